//! Streaming validation of sequence submission metadata.
//!
//! Bulk submissions describe one sample per row of a tab-separated file.
//! This crate resolves the routing headers of such a file and decodes its
//! rows lazily into validated entries, stopping at the first invalid row.
//!
//! # Features
//!
//! - **Header Resolution**: Accept the legacy spelling of the submission
//!   identifier header and locate the optional fasta id column
//! - **TSV Reading**: Forward-only row cursor over any `Read`
//! - **New Submissions**: [`MetadataEntry`] values via [`metadata_entries`]
//! - **Revisions**: [`RevisionEntry`] values via [`revision_entries`]
//!
//! # Example
//!
//! ```
//! use seqsub_ingest::metadata_entries;
//!
//! let data = "submissionId\tfastaId\tcountry\nS1\tS1.1,S1.2\tUSA\n";
//! let entries = metadata_entries(data.as_bytes(), true)?;
//!
//! for entry in entries {
//!     let entry = entry?;
//!     assert_eq!(entry.submission_id, "S1");
//!     assert_eq!(entry.fasta_ids, Some(vec!["S1.1".to_string(), "S1.2".to_string()]));
//! }
//! # Ok::<(), seqsub_ingest::IngestError>(())
//! ```

mod entries;
mod error;
mod headers;
mod tsv;

// === Error Types ===
pub use error::{IngestError, Result};

// === Header Resolution ===
pub use headers::{
    ACCESSION_HEADER, FASTA_ID_HEADER, HEADER_ALIASES, ResolvedHeaders, SUBMISSION_ID_HEADER,
    accepted_spellings, require_accession_header, resolve_fasta_id_header,
    resolve_submission_header,
};

// === TSV Reading ===
pub use tsv::{TsvHeaders, TsvReader, TsvRow};

// === Entries ===
pub use entries::{
    EntryStream, MetadataEntries, MetadataEntry, RevisionBuilder, RevisionEntries, RevisionEntry,
    RowBuilder, SubmissionBuilder, metadata_entries, parse_fasta_ids, revision_entries,
};
