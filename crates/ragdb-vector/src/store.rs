use anyhow::Context;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

use ragdb_core::error::{Error, Result};
use ragdb_core::traits::ChunkStore;
use ragdb_core::types::{ChunkId, ChunkRecord};

/// Chunk records keyed by id, iterated in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct MemoryChunkStore {
    records: BTreeMap<ChunkId, ChunkRecord>,
}

impl MemoryChunkStore {
    pub fn new() -> Self { Self::default() }

    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = ChunkRecord>,
    {
        let mut store = Self::new();
        for r in records { store.insert(r)?; }
        Ok(store)
    }

    /// Load one JSON-encoded `ChunkRecord` per line. Blank lines are skipped.
    pub fn from_jsonl(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open chunk file {}", path.display()))?;
        let store = Self::from_reader(BufReader::new(file)).with_context(|| format!("Invalid chunk file {}", path.display()))?;
        info!(records = store.len(), path = %path.display(), "loaded chunk store");
        Ok(store)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> anyhow::Result<Self> {
        let mut store = Self::new();
        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = line.with_context(|| format!("line {line_no}: read failed"))?;
            if line.trim().is_empty() { continue; }
            let record: ChunkRecord = serde_json::from_str(&line).with_context(|| format!("line {line_no}: not a chunk record"))?;
            store.insert(record).with_context(|| format!("line {line_no}"))?;
        }
        Ok(store)
    }

    /// Records are immutable once stored: a second record with the same id is rejected.
    pub fn insert(&mut self, record: ChunkRecord) -> Result<()> {
        if record.text.trim().is_empty() {
            return Err(Error::InvalidConfig(format!("chunk {} has empty text", record.id)));
        }
        if record.page_number == 0 {
            return Err(Error::InvalidConfig(format!("chunk {} has page number 0 (pages are 1-based)", record.id)));
        }
        if self.records.contains_key(&record.id) {
            return Err(Error::InvalidConfig(format!("duplicate chunk id {}", record.id)));
        }
        self.records.insert(record.id, record);
        Ok(())
    }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &ChunkRecord> { self.records.values() }
}

impl ChunkStore for MemoryChunkStore {
    fn get(&self, id: ChunkId) -> anyhow::Result<Option<ChunkRecord>> { Ok(self.records.get(&id).cloned()) }
}
