//! Fail-fast iterator shared by both entry builders.

use std::io::Read;

use crate::error::Result;
use crate::headers::ResolvedHeaders;
use crate::tsv::{TsvReader, TsvRow};

/// Turns one TSV row into a validated entry.
pub trait RowBuilder {
    /// Entry type produced for a valid row.
    type Entry;

    /// Validates `row` and builds its entry.
    fn build(&self, row: &TsvRow) -> Result<Self::Entry>;

    /// Headers this builder routes on.
    fn headers(&self) -> &ResolvedHeaders;
}

/// Lazy, fused sequence of entries read from a TSV stream.
///
/// The reader is owned by the stream and dropped as soon as the input is
/// exhausted or an error is yielded, or when the stream itself is dropped.
pub struct EntryStream<R, B> {
    reader: Option<TsvReader<R>>,
    builder: B,
    produced: u64,
}

impl<R: Read, B: RowBuilder> EntryStream<R, B> {
    /// Streams the rows of `reader` through `builder`.
    ///
    /// Headers must already be resolved; [`super::metadata_entries`] and
    /// [`super::revision_entries`] do that for the built-in builders.
    pub fn new(reader: TsvReader<R>, builder: B) -> Self {
        Self {
            reader: Some(reader),
            builder,
            produced: 0,
        }
    }

    /// Returns the resolved routing headers.
    pub fn headers(&self) -> &ResolvedHeaders {
        self.builder.headers()
    }

    /// Returns the number of entries yielded so far.
    pub fn produced(&self) -> u64 {
        self.produced
    }

    /// Returns true once the stream has ended, by exhaustion or by error.
    pub fn is_finished(&self) -> bool {
        self.reader.is_none()
    }

    fn finish(&mut self) {
        if self.reader.take().is_some() {
            tracing::debug!(entries = self.produced, "Closed metadata stream");
        }
    }
}

impl<R: Read, B: RowBuilder> Iterator for EntryStream<R, B> {
    type Item = Result<B::Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        let Some(next) = reader.next_row() else {
            self.finish();
            return None;
        };
        let result = match next {
            Ok(row) => {
                tracing::trace!(row = row.number(), "Validating metadata row");
                self.builder.build(&row)
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(entry) => {
                self.produced += 1;
                Some(Ok(entry))
            }
            Err(err) => {
                // Row values stay out of the log; the error itself carries them.
                tracing::warn!(row = ?err.row(), "Rejected metadata file");
                self.finish();
                Some(Err(err))
            }
        }
    }
}

impl<R: Read, B: RowBuilder> std::iter::FusedIterator for EntryStream<R, B> {}
