use ragdb_core::config::EmbeddingSettings;
use ragdb_embed::load_embedder;

// Embed two texts with the configured model (or the hashing embedder when
// APP_USE_FAKE_EMBEDDINGS=1) and print their shape.

fn main() -> anyhow::Result<()> {
    let settings = EmbeddingSettings { use_fake: ragdb_core::config::fake_embeddings_forced(), ..EmbeddingSettings::default() };
    let embedder = load_embedder(&settings)?;
    let texts = vec!["hello world".to_string(), "rust embeddings".to_string()];
    let embs = embedder.embed_batch(&texts)?;
    println!("B={} dim={}", embs.len(), embedder.dim());
    Ok(())
}
