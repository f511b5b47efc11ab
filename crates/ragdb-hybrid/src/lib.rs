//! Hybrid retrieval: dense nearest-neighbour search, optionally re-ranked by
//! fusing normalized dense similarity with BM25 computed over the candidates.

use anyhow::anyhow;
use tracing::{debug, instrument, warn};

use ragdb_core::error::{Error, Result};
use ragdb_core::traits::{ChunkStore, Embedder, IdMapper, LexicalScorer, VectorIndex};
use ragdb_core::types::{Candidate, Neighbor, RetrievalMode, RetrievalResult};
use ragdb_text::Bm25Scorer;

pub mod fusion;

/// Read-only retrieval engine over a vector index, its id map and a chunk store.
///
/// Holds no per-query state; share it behind an `Arc` for concurrent queries.
pub struct HybridRetriever<V, M, S> where V: VectorIndex, M: IdMapper, S: ChunkStore {
    embedder: Box<dyn Embedder>,
    index: V,
    ids: M,
    store: S,
    lexical: Box<dyn LexicalScorer>,
}

impl<V, M, S> HybridRetriever<V, M, S> where V: VectorIndex, M: IdMapper, S: ChunkStore {
    /// Fails when the embedder and index disagree on dimension, or when the
    /// id map does not cover exactly the vectors in the index.
    pub fn new(embedder: Box<dyn Embedder>, index: V, ids: M, store: S) -> Result<Self> {
        if embedder.dim() != index.dim() {
            return Err(Error::DimensionMismatch { what: "vector index", expected: embedder.dim(), actual: index.dim() });
        }
        if ids.len() != index.len() {
            return Err(Error::InvalidConfig(format!(
                "id map has {} entries but the vector index holds {} vectors",
                ids.len(),
                index.len()
            )));
        }
        debug!(vectors = index.len(), dim = index.dim(), "hybrid retriever ready");
        Ok(Self { embedder, index, ids, store, lexical: Box::new(Bm25Scorer::new()) })
    }

    pub fn with_lexical_scorer(mut self, scorer: Box<dyn LexicalScorer>) -> Self {
        self.lexical = scorer;
        self
    }

    pub fn len(&self) -> usize { self.index.len() }

    pub fn is_empty(&self) -> bool { self.index.is_empty() }

    /// Return up to `k` candidates for `query`.
    ///
    /// Baseline keeps dense order. Fused searches `2k` neighbours and, when at
    /// least two survive resolution, re-ranks them by combined score before
    /// truncating to `k`.
    #[instrument(level = "debug", skip(self, query))]
    pub fn retrieve(&self, query: &str, k: usize, mode: RetrievalMode) -> Result<RetrievalResult> {
        if query.trim().is_empty() {
            return Err(Error::InvalidRequest("query must not be empty".into()));
        }
        if k == 0 {
            return Err(Error::InvalidRequest("k must be greater than zero".into()));
        }

        let query_vec = self.embedder.embed(query).map_err(Error::Embedding)?;
        if query_vec.len() != self.index.dim() {
            return Err(Error::DimensionMismatch { what: "query embedding", expected: self.index.dim(), actual: query_vec.len() });
        }
        let search_k = mode.search_k(k);
        let neighbors = self.index.search(&query_vec, search_k).map_err(Error::Search)?;
        let mut candidates = self.resolve(&neighbors)?;
        debug!(search_k, neighbors = neighbors.len(), candidates = candidates.len(), "dense search done");

        let fusion_applied = mode == RetrievalMode::Fused && candidates.len() >= 2;
        if fusion_applied {
            let texts: Vec<&str> = candidates.iter().map(|c| c.record.text.as_str()).collect();
            let lexical = self.lexical.score(query, &texts).map_err(Error::Lexical)?;
            if lexical.len() != candidates.len() {
                return Err(Error::Lexical(anyhow!(
                    "scorer returned {} scores for {} candidates",
                    lexical.len(),
                    candidates.len()
                )));
            }
            fusion::fuse(&mut candidates, &lexical);
        }
        candidates.truncate(k);
        Ok(RetrievalResult { candidates, fusion_applied })
    }

    /// Turn index neighbours into candidates, preserving order. Positions the
    /// id map cannot resolve and ids missing from the store are skipped.
    fn resolve(&self, neighbors: &[Neighbor]) -> Result<Vec<Candidate>> {
        let mut out = Vec::with_capacity(neighbors.len());
        for n in neighbors {
            let Some(id) = self.ids.resolve(n.position) else {
                warn!(position = n.position, "index position has no chunk id");
                continue;
            };
            match self.store.get(id).map_err(Error::Store)? {
                Some(record) => out.push(Candidate::new(record, n.distance)),
                None => debug!(chunk_id = id, "chunk missing from store, skipped"),
            }
        }
        Ok(out)
    }
}
