//! Validated entry types produced from metadata rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A validated row of a new submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataEntry {
    /// Caller-chosen identifier of the row; never empty, never contains whitespace.
    pub submission_id: String,
    /// Every non-routing column of the row.
    pub metadata: BTreeMap<String, String>,
    /// Linked sequence file ids, set only when linkage was requested.
    pub fasta_ids: Option<Vec<String>>,
}

/// A validated row revising a previously accessioned record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionEntry {
    pub submission_id: String,
    /// Accession of the record being revised.
    pub accession: String,
    pub metadata: BTreeMap<String, String>,
    pub fasta_ids: Option<Vec<String>>,
}
