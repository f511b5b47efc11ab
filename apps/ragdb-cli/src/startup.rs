use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use ragdb_core::config::Settings;
use ragdb_core::traits::Embedder;
use ragdb_embed::load_embedder;
use ragdb_hybrid::HybridRetriever;
use ragdb_vector::{FlatL2Index, IdMap, MemoryChunkStore};

pub type Retriever = HybridRetriever<FlatL2Index, IdMap, MemoryChunkStore>;

/// Load the corpus and embedder, embed every chunk and assemble the retriever.
pub fn build_retriever(settings: &Settings) -> Result<Retriever> {
    let store = MemoryChunkStore::from_jsonl(&settings.corpus.chunks_path)?;
    let embedder = load_embedder(&settings.embedding).context("Failed to load embedder")?;
    let (index, ids) = embed_corpus(embedder.as_ref(), &store, true)?;
    info!(chunks = store.len(), dim = embedder.dim(), "corpus embedded");
    Ok(HybridRetriever::new(embedder, index, ids, store)?)
}

/// Embed chunks in id order. Position `i` of the index holds the chunk at `ids[i]`.
pub fn embed_corpus(embedder: &dyn Embedder, store: &MemoryChunkStore, show_progress: bool) -> Result<(FlatL2Index, IdMap)> {
    let pb = if show_progress { ProgressBar::new(store.len() as u64) } else { ProgressBar::hidden() };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("embedding");

    let mut index = FlatL2Index::new(embedder.dim());
    let mut ids = Vec::with_capacity(store.len());
    for record in store.iter() {
        let vector = embedder.embed(&record.text).with_context(|| format!("Failed to embed chunk {}", record.id))?;
        index.add(&vector)?;
        ids.push(record.id);
        pb.inc(1);
    }
    pb.finish_with_message("done");
    Ok((index, IdMap::new(ids)))
}
