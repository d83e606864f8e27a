//! Entries revising previously accessioned records.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{IngestError, Result};
use crate::headers::{ACCESSION_HEADER, ResolvedHeaders};
use crate::tsv::{TsvReader, TsvRow};

use super::stream::{EntryStream, RowBuilder};
use super::types::RevisionEntry;
use super::{collect_metadata, read_fasta_ids};

/// Lazy sequence of [`RevisionEntry`] values.
pub type RevisionEntries<R> = EntryStream<R, RevisionBuilder>;

/// Reads the header row of `reader` and returns a lazy sequence of revision entries.
///
/// # Errors
///
/// Same header errors as [`super::metadata_entries`], plus
/// [`IngestError::HeaderMissing`] if the accession header is absent.
pub fn revision_entries<R: Read>(
    reader: R,
    include_fasta_ids: bool,
) -> Result<RevisionEntries<R>> {
    RevisionEntries::from_tsv(TsvReader::new(reader)?, include_fasta_ids)
}

impl<R: Read> EntryStream<R, RevisionBuilder> {
    /// Builds the sequence from an already opened TSV reader.
    pub fn from_tsv(reader: TsvReader<R>, include_fasta_ids: bool) -> Result<Self> {
        let headers = ResolvedHeaders::for_revision(reader.headers().names())?;
        tracing::debug!(
            submission = headers.submission,
            fasta_id = headers.fasta_id,
            include_fasta_ids,
            "Resolved revision headers"
        );
        Ok(Self::new(
            reader,
            RevisionBuilder::new(headers, include_fasta_ids),
        ))
    }
}

impl EntryStream<File, RevisionBuilder> {
    /// Opens a metadata file of a revision.
    pub fn from_path(path: &Path, include_fasta_ids: bool) -> Result<Self> {
        Self::from_tsv(TsvReader::from_path(path)?, include_fasta_ids)
    }
}

/// Validates rows of a revision.
///
/// Unlike [`super::SubmissionBuilder`], whitespace in the submission
/// identifier is accepted here.
#[derive(Debug, Clone)]
pub struct RevisionBuilder {
    headers: ResolvedHeaders,
    include_fasta_ids: bool,
}

impl RevisionBuilder {
    /// Creates a revision builder routing on `headers`.
    ///
    /// With `include_fasta_ids`, every row must carry fasta ids.
    pub fn new(headers: ResolvedHeaders, include_fasta_ids: bool) -> Self {
        Self {
            headers,
            include_fasta_ids,
        }
    }
}

impl RowBuilder for RevisionBuilder {
    type Entry = RevisionEntry;

    fn build(&self, row: &TsvRow) -> Result<RevisionEntry> {
        let submission_id = row.get_non_empty(self.headers.submission).ok_or_else(|| {
            IngestError::RowMissingIdentifier {
                row: row.number(),
                header: self.headers.submission.to_string(),
                content: row.to_string(),
            }
        })?;

        let accession_header = self.headers.accession.unwrap_or(ACCESSION_HEADER);
        let accession = row.get_non_empty(accession_header).ok_or_else(|| {
            IngestError::RowMissingAccession {
                row: row.number(),
                header: accession_header.to_string(),
                content: row.to_string(),
            }
        })?;

        let fasta_ids = if self.include_fasta_ids {
            Some(read_fasta_ids(row, &self.headers)?)
        } else {
            None
        };

        let metadata = collect_metadata(row, &self.headers, self.include_fasta_ids);
        if metadata.is_empty() {
            return Err(IngestError::RowEmptyMetadata {
                row: row.number(),
                submission_id: submission_id.to_string(),
                content: row.to_string(),
            });
        }

        Ok(RevisionEntry {
            submission_id: submission_id.to_string(),
            accession: accession.to_string(),
            metadata,
            fasta_ids,
        })
    }

    fn headers(&self) -> &ResolvedHeaders {
        &self.headers
    }
}
