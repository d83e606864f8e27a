//! Integration tests for the streaming entry builders.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::io::{self, Read};
use std::rc::Rc;

use proptest::prelude::*;
use seqsub_ingest::{
    EntryStream, IngestError, MetadataEntry, ResolvedHeaders, RevisionEntry, RowBuilder,
    TsvReader, TsvRow, metadata_entries, revision_entries,
};

fn metadata(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Reader that records when it is dropped.
struct TrackedReader<'a> {
    inner: &'a [u8],
    dropped: Rc<Cell<bool>>,
}

impl Read for TrackedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Drop for TrackedReader<'_> {
    fn drop(&mut self) {
        self.dropped.set(true);
    }
}

fn tracked(data: &str) -> (TrackedReader<'_>, Rc<Cell<bool>>) {
    let dropped = Rc::new(Cell::new(false));
    let reader = TrackedReader {
        inner: data.as_bytes(),
        dropped: Rc::clone(&dropped),
    };
    (reader, dropped)
}

/// Generates `rows` data rows on demand without holding them in memory.
struct GeneratedRows {
    pending: Vec<u8>,
    next_row: u64,
    rows: u64,
}

impl GeneratedRows {
    fn new(rows: u64) -> Self {
        Self {
            pending: b"submissionId\tcountry\n".to_vec(),
            next_row: 0,
            rows,
        }
    }
}

impl Read for GeneratedRows {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pending.is_empty() && self.next_row < self.rows {
            self.next_row += 1;
            self.pending = format!("S{}\tUSA\n", self.next_row).into_bytes();
        }
        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Ok(n)
    }
}

#[test]
fn submission_with_dedicated_fasta_column() {
    let data = "submissionId\tfastaId\tcountry\nS1\tS1.1,S1.2\tUSA\n";
    let entries: Vec<MetadataEntry> = metadata_entries(data.as_bytes(), true)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        entries,
        vec![MetadataEntry {
            submission_id: "S1".to_string(),
            metadata: metadata(&[("country", "USA")]),
            fasta_ids: Some(vec!["S1.1".to_string(), "S1.2".to_string()]),
        }]
    );
}

#[test]
fn revision_without_fasta_ids() {
    let data = "submissionId\taccession\tcountry\nS1\tACC1\tUSA\n";
    let entries: Vec<RevisionEntry> = revision_entries(data.as_bytes(), false)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        entries,
        vec![RevisionEntry {
            submission_id: "S1".to_string(),
            accession: "ACC1".to_string(),
            metadata: metadata(&[("country", "USA")]),
            fasta_ids: None,
        }]
    );
}

#[test]
fn legacy_alias_header() {
    let data = "submissionIdOld\tcountry\nS1\tUSA\n";
    let stream = metadata_entries(data.as_bytes(), false).unwrap();
    assert_eq!(stream.headers().submission, "submissionIdOld");

    let entries: Vec<MetadataEntry> = stream.collect::<Result<_, _>>().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].submission_id, "S1");
    assert_eq!(entries[0].metadata, metadata(&[("country", "USA")]));
}

#[test]
fn both_spellings_fail_at_construction() {
    let data = "submissionId\tsubmissionIdOld\tcountry\nS1\tS1\tUSA\n";
    let result = metadata_entries(data.as_bytes(), false);
    assert!(matches!(result, Err(IngestError::HeaderAmbiguous { .. })));
}

#[test]
fn missing_identifier_header_fails_at_construction() {
    let result = revision_entries("accession\tcountry\nACC1\tUSA\n".as_bytes(), false);
    assert!(matches!(result, Err(IngestError::HeaderMissing { .. })));
}

#[test]
fn empty_input_has_no_identifier_header() {
    let result = metadata_entries(io::empty(), false);
    assert!(matches!(
        result,
        Err(IngestError::HeaderMissing { ref header, .. }) if header == "submissionId"
    ));
}

#[test]
fn revision_header_check_reads_no_rows() {
    // The data row is not valid UTF-8: reading it would surface a decoder error.
    let data: &[u8] = b"submissionId\tcountry\nS1\t\xff\n";
    let result = revision_entries(data, false);
    assert!(matches!(
        result,
        Err(IngestError::HeaderMissing { ref header, .. }) if header == "accession"
    ));
}

#[test]
fn first_invalid_row_ends_the_stream() {
    let data: &[u8] = b"submissionId\tcountry\nS1\tUSA\nS 2\tUSA\nS3\t\xff\n";
    let mut stream = metadata_entries(data, false).unwrap();

    let first = stream.next().unwrap().unwrap();
    assert_eq!(first.submission_id, "S1");

    let err = stream.next().unwrap().unwrap_err();
    assert!(matches!(
        err,
        IngestError::RowIdentifierHasWhitespace { row: 2, .. }
    ));
    assert!(err.to_string().contains("submissionId=S 2, country=USA"));

    assert!(stream.next().is_none());
    assert!(stream.next().is_none());
    assert_eq!(stream.produced(), 1);
}

#[test]
fn decoder_errors_are_fatal() {
    let data: &[u8] = b"submissionId\tcountry\nS1\t\xff\nS2\tUSA\n";
    let mut stream = metadata_entries(data, false).unwrap();

    assert!(matches!(stream.next(), Some(Err(IngestError::Tsv(_)))));
    assert!(stream.next().is_none());
}

#[test]
fn reader_is_released_after_error() {
    let (reader, dropped) = tracked("submissionId\tcountry\n\tUSA\nS2\tUSA\n");
    let mut stream = metadata_entries(reader, false).unwrap();

    assert!(matches!(
        stream.next(),
        Some(Err(IngestError::RowMissingIdentifier { row: 1, .. }))
    ));
    assert!(stream.is_finished());
    assert!(dropped.get());
}

#[test]
fn reader_is_released_after_exhaustion() {
    let (reader, dropped) = tracked("submissionId\taccession\tcountry\nS1\tACC1\tUSA\n");
    let mut stream = revision_entries(reader, false).unwrap();

    assert!(stream.next().unwrap().is_ok());
    assert!(!dropped.get());
    assert!(stream.next().is_none());
    assert!(dropped.get());
}

#[test]
fn reader_is_released_when_abandoned() {
    let (reader, dropped) = tracked("submissionId\tcountry\nS1\tUSA\nS2\tUSA\n");
    let mut stream = metadata_entries(reader, false).unwrap();

    assert!(stream.next().unwrap().is_ok());
    drop(stream);
    assert!(dropped.get());
}

#[test]
fn large_inputs_are_streamed() {
    let stream = metadata_entries(GeneratedRows::new(50_000), false).unwrap();
    let mut count = 0u64;
    for entry in stream {
        let entry = entry.unwrap();
        count += 1;
        assert_eq!(entry.submission_id, format!("S{count}"));
    }
    assert_eq!(count, 50_000);
}

#[test]
fn consumer_can_stop_early() {
    let stream = metadata_entries(GeneratedRows::new(u64::MAX), false).unwrap();
    let ids: Vec<String> = stream
        .take(3)
        .map(|entry| entry.unwrap().submission_id)
        .collect();
    assert_eq!(ids, vec!["S1", "S2", "S3"]);
}

#[test]
fn unclosed_quote_does_not_swallow_rows() {
    let data = "submissionId\tcountry\nS1\t\"USA\nS2\tCHE\nS3\tDEU\n";
    let results: Vec<_> = metadata_entries(data.as_bytes(), false)
        .unwrap()
        .collect();

    assert_eq!(results.len(), 1);
    assert!(matches!(
        results[0],
        Err(IngestError::RowSpansLines { row: 1, line: 2, .. })
    ));
}

#[test]
fn unclosed_quote_in_revision_is_fatal() {
    let data = "submissionId\taccession\tcountry\n\
                S1\tACC1\tUSA\n\
                S2\t\"ACC2\tCHE\n\
                S3\tACC3\tDEU\n";
    let mut stream = revision_entries(data.as_bytes(), false).unwrap();

    assert!(stream.next().unwrap().is_ok());
    assert!(matches!(
        stream.next(),
        Some(Err(IngestError::RowSpansLines { row: 2, .. }))
    ));
    assert!(stream.next().is_none());
}

/// Yields only the submission identifier of each row.
struct IdOnly {
    headers: ResolvedHeaders,
}

impl RowBuilder for IdOnly {
    type Entry = String;

    fn build(&self, row: &TsvRow) -> seqsub_ingest::Result<String> {
        Ok(row.get(self.headers.submission).unwrap_or_default().to_string())
    }

    fn headers(&self) -> &ResolvedHeaders {
        &self.headers
    }
}

#[test]
fn custom_builder_drives_the_stream() {
    let data = "submissionIdOld\tcountry\nS1\tUSA\nS2\tCHE\n";
    let reader = TsvReader::new(data.as_bytes()).unwrap();
    let headers = ResolvedHeaders::for_submission(reader.headers().names()).unwrap();
    let stream = EntryStream::new(reader, IdOnly { headers });

    assert_eq!(stream.headers().submission, "submissionIdOld");
    let ids: Vec<String> = stream.collect::<Result<_, _>>().unwrap();
    assert_eq!(ids, vec!["S1", "S2"]);
}

fn whitespace_char() -> impl Strategy<Value = char> {
    prop::sample::select(vec![
        ' ', '\t', '\u{0b}', '\u{0c}', '\u{85}', '\u{a0}', '\u{2003}', '\u{3000}',
    ])
}

proptest! {
    #[test]
    fn whitespace_in_identifier_depends_on_mode(
        prefix in "[A-Za-z0-9.]{0,6}",
        space in whitespace_char(),
        suffix in "[A-Za-z0-9.]{0,6}",
    ) {
        let id = format!("{prefix}{space}{suffix}");

        let submission = format!("submissionId\tcountry\n\"{id}\"\tUSA\n");
        let mut stream = metadata_entries(submission.as_bytes(), false).unwrap();
        let rejected = matches!(
            stream.next(),
            Some(Err(IngestError::RowIdentifierHasWhitespace { ref submission_id, .. }))
                if *submission_id == id
        );
        prop_assert!(rejected);

        let revision = format!("submissionId\taccession\tcountry\n\"{id}\"\tACC1\tUSA\n");
        let entry = revision_entries(revision.as_bytes(), false)
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        prop_assert_eq!(entry.submission_id, id);
    }
}
