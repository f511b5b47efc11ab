use ragdb_core::traits::IdMapper;
use ragdb_core::types::ChunkId;

/// Position `i` of the paired index holds the embedding of chunk `ids[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMap { ids: Vec<ChunkId> }

impl IdMap {
    pub fn new(ids: Vec<ChunkId>) -> Self { Self { ids } }

    pub fn ids(&self) -> &[ChunkId] { &self.ids }
}

impl From<Vec<ChunkId>> for IdMap {
    fn from(ids: Vec<ChunkId>) -> Self { Self::new(ids) }
}

impl IdMapper for IdMap {
    fn len(&self) -> usize { self.ids.len() }
    fn resolve(&self, position: usize) -> Option<ChunkId> { self.ids.get(position).copied() }
}
