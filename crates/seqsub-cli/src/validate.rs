//! Runs a metadata file through the matching entry builder.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use seqsub_ingest::{
    EntryStream, MetadataEntries, MetadataEntry, ResolvedHeaders, RevisionEntries, RevisionEntry,
    RowBuilder,
};

/// Which kind of entries the file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Submission,
    Revision,
}

impl ValidationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submission => "submission",
            Self::Revision => "revision",
        }
    }
}

/// Options for a single validation run.
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    pub mode: ValidationMode,
    pub include_fasta_ids: bool,
}

/// Outcome of validating a whole file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSummary {
    pub path: PathBuf,
    pub mode: ValidationMode,
    pub submission_header: String,
    /// Column the fasta ids were read from, when linkage was requested.
    pub fasta_id_header: Option<String>,
    pub entries: u64,
    pub fasta_ids: u64,
}

/// Validates `path`, optionally writing every entry as a JSON line to `json_out`.
///
/// Stops at the first invalid row; the returned error carries the row details.
pub fn validate_file(
    path: &Path,
    options: &ValidateOptions,
    json_out: Option<&mut dyn Write>,
) -> Result<ValidationSummary> {
    let span = info_span!("validate", path = %path.display(), mode = options.mode.as_str());
    let _guard = span.enter();
    let start = Instant::now();

    let summary = match options.mode {
        ValidationMode::Submission => {
            let stream = MetadataEntries::<File>::from_path(path, options.include_fasta_ids)
                .with_context(|| format!("open metadata file {}", path.display()))?;
            drain(path, options, stream, json_out, |entry: &MetadataEntry| {
                entry.fasta_ids.as_ref().map_or(0, Vec::len)
            })?
        }
        ValidationMode::Revision => {
            let stream = RevisionEntries::<File>::from_path(path, options.include_fasta_ids)
                .with_context(|| format!("open revision file {}", path.display()))?;
            drain(path, options, stream, json_out, |entry: &RevisionEntry| {
                entry.fasta_ids.as_ref().map_or(0, Vec::len)
            })?
        }
    };

    info!(
        entries = summary.entries,
        fasta_ids = summary.fasta_ids,
        elapsed_ms = elapsed_ms(start.elapsed()),
        "Metadata file is valid"
    );
    Ok(summary)
}

fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn drain<R, B>(
    path: &Path,
    options: &ValidateOptions,
    mut stream: EntryStream<R, B>,
    mut json_out: Option<&mut dyn Write>,
    fasta_count: impl Fn(&B::Entry) -> usize,
) -> Result<ValidationSummary>
where
    R: std::io::Read,
    B: RowBuilder,
    B::Entry: Serialize,
{
    let headers: ResolvedHeaders = stream.headers().clone();
    let mut fasta_ids = 0u64;

    for entry in stream.by_ref() {
        let entry = entry.with_context(|| format!("invalid metadata in {}", path.display()))?;
        fasta_ids += fasta_count(&entry) as u64;
        if let Some(out) = json_out.as_mut() {
            serde_json::to_writer(&mut **out, &entry).context("write entry")?;
            writeln!(out).context("write entry")?;
        }
    }

    Ok(ValidationSummary {
        path: path.to_path_buf(),
        mode: options.mode,
        submission_header: headers.submission.to_string(),
        fasta_id_header: options
            .include_fasta_ids
            .then(|| headers.fasta_id.to_string()),
        entries: stream.produced(),
        fasta_ids,
    })
}
