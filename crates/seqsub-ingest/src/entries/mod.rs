//! Streaming entry builders.
//!
//! [`metadata_entries`] and [`revision_entries`] resolve headers eagerly and
//! return a lazy iterator. Each call to `next` reads and validates exactly one
//! row. The first invalid row ends the stream: it is yielded as an error, the
//! underlying reader is dropped, and every later call returns `None`.

mod revision;
mod stream;
mod submission;
mod types;

use std::collections::BTreeMap;

use crate::error::{IngestError, Result};
use crate::headers::ResolvedHeaders;
use crate::tsv::TsvRow;

pub use revision::{RevisionBuilder, RevisionEntries, revision_entries};
pub use stream::{EntryStream, RowBuilder};
pub use submission::{MetadataEntries, SubmissionBuilder, metadata_entries};
pub use types::{MetadataEntry, RevisionEntry};

/// Splits a comma-separated fasta id list, trimming pieces and dropping empty ones.
pub fn parse_fasta_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads and splits the fasta id column of `row`.
fn read_fasta_ids(row: &TsvRow, headers: &ResolvedHeaders) -> Result<Vec<String>> {
    let raw = row
        .get_non_empty(headers.fasta_id)
        .ok_or_else(|| IngestError::RowMissingFastaId {
            row: row.number(),
            header: headers.fasta_id.to_string(),
            content: row.to_string(),
        })?;
    Ok(parse_fasta_ids(raw))
}

/// Collects every column of `row` that is not used for routing.
fn collect_metadata(
    row: &TsvRow,
    headers: &ResolvedHeaders,
    include_fasta_ids: bool,
) -> BTreeMap<String, String> {
    row.iter()
        .filter(|(name, _)| !headers.is_routing_column(name, include_fasta_ids))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}
