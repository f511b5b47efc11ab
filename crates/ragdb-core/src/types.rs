//! Domain types shared by the store, index and retrieval engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub type ChunkId = u64;

/// A passage of a source document, as persisted by ingestion.
///
/// - `id`: stable chunk identifier, assigned once and never reused
/// - `text`: the passage itself (never empty)
/// - `source_title`/`source_url`: provenance of the parent document
/// - `page_number`: 1-based page the passage was taken from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: ChunkId,
    pub text: String,
    pub source_title: String,
    pub source_url: String,
    pub page_number: u32,
}

/// One `(distance, position)` pair returned by a vector index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub distance: f32,
    pub position: usize,
}

/// How a query is ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMode {
    /// Dense nearest-neighbour order only.
    Baseline,
    /// Dense + lexical scores normalized and fused.
    #[serde(alias = "reranker")]
    Fused,
}

impl RetrievalMode {
    /// Number of neighbours requested from the index for a final size of `k`.
    pub fn search_k(self, k: usize) -> usize {
        match self {
            Self::Baseline => k,
            Self::Fused => k.saturating_mul(2),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Fused => "fused",
        }
    }
}

impl fmt::Display for RetrievalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for RetrievalMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "baseline" => Ok(Self::Baseline),
            "fused" | "reranker" => Ok(Self::Fused),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

/// A chunk under consideration for a single query.
///
/// `lexical_score` and `combined_score` are only populated when fusion ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(flatten)]
    pub record: ChunkRecord,
    pub dense_distance: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexical_score: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_score: Option<f32>,
}

impl Candidate {
    pub fn new(record: ChunkRecord, dense_distance: f32) -> Self {
        Self { record, dense_distance, lexical_score: None, combined_score: None }
    }

    /// `1 - dense_distance`. Not bounded: squared L2 distances above 1 go negative.
    pub fn dense_similarity(&self) -> f32 { 1.0 - self.dense_distance }
}

/// Ranked output of one `retrieve` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub candidates: Vec<Candidate>,
    pub fusion_applied: bool,
}

impl RetrievalResult {
    pub fn empty() -> Self { Self { candidates: Vec::new(), fusion_applied: false } }

    pub fn top(&self) -> Option<&Candidate> { self.candidates.first() }

    pub fn len(&self) -> usize { self.candidates.len() }

    pub fn is_empty(&self) -> bool { self.candidates.is_empty() }
}
