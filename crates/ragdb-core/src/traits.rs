use crate::types::{ChunkId, ChunkRecord, Neighbor};

/// Maps text to a fixed-dimension vector in the same space as the index.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;

    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Read-only nearest-neighbour search over pre-computed embeddings.
///
/// `search` returns at most `n` neighbours ordered by ascending distance.
pub trait VectorIndex: Send + Sync {
    fn dim(&self) -> usize;
    fn len(&self) -> usize;
    fn search(&self, query_vec: &[f32], n: usize) -> anyhow::Result<Vec<Neighbor>>;

    fn is_empty(&self) -> bool { self.len() == 0 }
}

/// Index position to stable chunk id. Built and replaced together with its index.
pub trait IdMapper: Send + Sync {
    fn len(&self) -> usize;
    fn resolve(&self, position: usize) -> Option<ChunkId>;

    fn is_empty(&self) -> bool { self.len() == 0 }
}

pub trait ChunkStore: Send + Sync {
    /// `Ok(None)` when the id is unknown; `Err` only for store failures.
    fn get(&self, id: ChunkId) -> anyhow::Result<Option<ChunkRecord>>;
}

/// Scores each document against the query, using `documents` as the whole corpus.
///
/// Returns one raw score per document, in input order.
pub trait LexicalScorer: Send + Sync {
    fn score(&self, query: &str, documents: &[&str]) -> anyhow::Result<Vec<f32>>;
}
