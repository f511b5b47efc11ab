//! Sentence embedders implementing `ragdb_core::traits::Embedder`.
//!
//! `MiniLmEmbedder` runs a local BERT sentence model through candle;
//! `HashingEmbedder` is a deterministic stand-in selected with
//! `embedding.use_fake = true` or `APP_USE_FAKE_EMBEDDINGS=1`.

use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};
use tracing::info;

use ragdb_core::config::EmbeddingSettings;
use ragdb_core::traits::Embedder;

pub mod device;
pub mod hashing;
pub mod model;
pub mod pool;
pub mod tokenize;

pub use hashing::HashingEmbedder;
pub use model::MiniLmEmbedder;
pub use pool::masked_mean_l2;

/// Load the embedder described by `settings`. Failure here is fatal for the caller.
pub fn load_embedder(settings: &EmbeddingSettings) -> Result<Box<dyn Embedder>> {
    if settings.use_fake {
        info!(dim = settings.fake_dim, "using hashing embedder");
        return Ok(Box::new(HashingEmbedder::new(settings.fake_dim)));
    }
    let model_dir = resolve_model_dir(settings.model_dir.as_deref())?;
    Ok(Box::new(MiniLmEmbedder::load(&model_dir)?))
}

fn resolve_model_dir(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = configured { if p.exists() { info!(dir = %p.display(), "using configured model dir"); return Ok(p.to_path_buf()); } }
    if let Ok(dir) = std::env::var("APP_MODEL_DIR") { let p = PathBuf::from(&dir); if p.exists() { info!(dir = %p.display(), "using APP_MODEL_DIR"); return Ok(p); } }
    if let Ok(dir) = std::env::var("MODEL_DIR") { let p = PathBuf::from(&dir); if p.exists() { info!(dir = %p.display(), "using MODEL_DIR"); return Ok(p); } }
    let local = Path::new("models/all-MiniLM-L6-v2"); if local.exists() { info!(dir = %local.display(), "using model dir"); return Ok(local.to_path_buf()); }
    match configured {
        Some(p) => Err(anyhow!("Configured model directory {} does not exist", p.display())),
        None => Err(anyhow!("Could not locate a sentence embedding model directory")),
    }
}
