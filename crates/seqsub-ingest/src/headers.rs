//! Header resolution for submission metadata files.
//!
//! Older submission templates used a different spelling for the submission
//! identifier column. Both spellings are accepted, but never together.

use crate::error::{IngestError, Result};

/// Canonical header of the submission identifier column.
pub const SUBMISSION_ID_HEADER: &str = "submissionId";

/// Header of the optional column linking a row to its sequence file entries.
pub const FASTA_ID_HEADER: &str = "fastaId";

/// Header of the accession column, required for revisions.
pub const ACCESSION_HEADER: &str = "accession";

/// Recognized legacy spellings, keyed by canonical header name.
pub const HEADER_ALIASES: &[(&str, &[&str])] = &[(SUBMISSION_ID_HEADER, &["submissionIdOld"])];

/// Returns every accepted spelling of `canonical`, canonical name first.
pub fn accepted_spellings(canonical: &'static str) -> Vec<&'static str> {
    let aliases = HEADER_ALIASES
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, aliases)| *aliases)
        .unwrap_or_default();
    std::iter::once(canonical)
        .chain(aliases.iter().copied())
        .collect()
}

/// Determines which spelling of the submission identifier header is used.
///
/// # Errors
///
/// - [`IngestError::HeaderMissing`] if no accepted spelling is present
/// - [`IngestError::HeaderAmbiguous`] if more than one spelling is present
pub fn resolve_submission_header<S: AsRef<str>>(header_names: &[S]) -> Result<&'static str> {
    let accepted = accepted_spellings(SUBMISSION_ID_HEADER);
    let found: Vec<&'static str> = accepted
        .iter()
        .copied()
        .filter(|spelling| contains(header_names, spelling))
        .collect();

    match found.as_slice() {
        [] => Err(IngestError::HeaderMissing {
            header: SUBMISSION_ID_HEADER.to_string(),
            accepted: accepted.iter().map(ToString::to_string).collect(),
        }),
        [single] => Ok(*single),
        _ => Err(IngestError::HeaderAmbiguous {
            found: found.iter().map(ToString::to_string).collect(),
        }),
    }
}

/// Returns the dedicated fasta id header if present, else the submission header.
///
/// Sequence files are keyed by the submission identifier when no dedicated
/// column exists.
pub fn resolve_fasta_id_header<'a, S: AsRef<str>>(
    header_names: &[S],
    submission_header: &'a str,
) -> &'a str {
    if contains(header_names, FASTA_ID_HEADER) {
        FASTA_ID_HEADER
    } else {
        submission_header
    }
}

/// Checks that the accession header is present.
///
/// # Errors
///
/// Returns [`IngestError::HeaderMissing`] if the accession column is absent.
pub fn require_accession_header<S: AsRef<str>>(header_names: &[S]) -> Result<()> {
    if contains(header_names, ACCESSION_HEADER) {
        Ok(())
    } else {
        Err(IngestError::HeaderMissing {
            header: ACCESSION_HEADER.to_string(),
            accepted: vec![ACCESSION_HEADER.to_string()],
        })
    }
}

fn contains<S: AsRef<str>>(header_names: &[S], name: &str) -> bool {
    header_names.iter().any(|h| h.as_ref() == name)
}

/// Outcome of header resolution, shared by both entry builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHeaders {
    /// Spelling of the submission identifier column found in the file.
    pub submission: &'static str,
    /// Column holding fasta ids (may equal `submission`).
    pub fasta_id: &'static str,
    /// Accession column, set only for revisions.
    pub accession: Option<&'static str>,
}

impl ResolvedHeaders {
    /// Resolves headers for new submissions.
    pub fn for_submission<S: AsRef<str>>(header_names: &[S]) -> Result<Self> {
        let submission = resolve_submission_header(header_names)?;
        Ok(Self {
            submission,
            fasta_id: resolve_fasta_id_header(header_names, submission),
            accession: None,
        })
    }

    /// Resolves headers for revisions, which additionally need an accession.
    pub fn for_revision<S: AsRef<str>>(header_names: &[S]) -> Result<Self> {
        let submission = resolve_submission_header(header_names)?;
        require_accession_header(header_names)?;
        Ok(Self {
            submission,
            fasta_id: resolve_fasta_id_header(header_names, submission),
            accession: Some(ACCESSION_HEADER),
        })
    }

    /// Returns true if fasta ids come from a dedicated column.
    pub fn has_dedicated_fasta_id(&self) -> bool {
        self.fasta_id != self.submission
    }

    /// Returns true if `column` is consumed for routing and kept out of metadata.
    pub(crate) fn is_routing_column(&self, column: &str, include_fasta_ids: bool) -> bool {
        column == self.submission
            || self.accession == Some(column)
            || (include_fasta_ids && self.has_dedicated_fasta_id() && column == self.fasta_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_canonical_header() {
        let headers = ["submissionId", "country"];
        assert_eq!(resolve_submission_header(&headers).unwrap(), "submissionId");
    }

    #[test]
    fn test_resolve_legacy_alias() {
        let headers = ["country", "submissionIdOld"];
        assert_eq!(
            resolve_submission_header(&headers).unwrap(),
            "submissionIdOld"
        );
    }

    #[test]
    fn test_resolve_both_spellings_is_ambiguous() {
        let headers = ["submissionIdOld", "submissionId"];
        let err = resolve_submission_header(&headers).unwrap_err();
        match err {
            IngestError::HeaderAmbiguous { found } => {
                assert_eq!(found, vec!["submissionId", "submissionIdOld"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_missing_header() {
        let headers = ["country", "date"];
        let err = resolve_submission_header(&headers).unwrap_err();
        assert!(matches!(err, IngestError::HeaderMissing { ref header, .. } if header == "submissionId"));
    }

    #[test]
    fn test_header_match_is_case_sensitive() {
        let headers = ["SubmissionId"];
        assert!(resolve_submission_header(&headers).is_err());
    }

    #[test]
    fn test_fasta_id_header_dedicated() {
        let headers = ["submissionId", "fastaId"];
        assert_eq!(resolve_fasta_id_header(&headers, "submissionId"), "fastaId");
    }

    #[test]
    fn test_fasta_id_header_falls_back() {
        let headers = ["submissionIdOld", "country"];
        assert_eq!(
            resolve_fasta_id_header(&headers, "submissionIdOld"),
            "submissionIdOld"
        );
    }

    #[test]
    fn test_require_accession_header() {
        assert!(require_accession_header(&["accession", "submissionId"]).is_ok());
        let err = require_accession_header(&["submissionId"]).unwrap_err();
        assert!(matches!(err, IngestError::HeaderMissing { ref header, .. } if header == "accession"));
    }

    #[test]
    fn test_accepted_spellings() {
        assert_eq!(
            accepted_spellings(SUBMISSION_ID_HEADER),
            vec!["submissionId", "submissionIdOld"]
        );
        assert_eq!(accepted_spellings(ACCESSION_HEADER), vec!["accession"]);
    }

    #[test]
    fn test_routing_columns() {
        let resolved =
            ResolvedHeaders::for_revision(&["submissionId", "accession", "fastaId"]).unwrap();
        assert!(resolved.is_routing_column("submissionId", false));
        assert!(resolved.is_routing_column("accession", false));
        assert!(!resolved.is_routing_column("fastaId", false));
        assert!(resolved.is_routing_column("fastaId", true));
        assert!(!resolved.is_routing_column("country", true));
    }
}
