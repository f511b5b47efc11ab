use ragdb_core::config::EmbeddingSettings;
use ragdb_core::traits::Embedder;
use ragdb_embed::{load_embedder, HashingEmbedder};

fn cosine(a: &[f32], b: &[f32]) -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() }

#[test]
fn hashing_embedder_shapes_and_determinism() {
    let embedder = HashingEmbedder::new(1024);
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), 1024, "embedding dim is 1024");

    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    for (a, b) in v1.iter().zip(v2.iter()) { assert!((a - b).abs() <= 1e-6); }
}

#[test]
fn shared_tokens_pull_texts_together() {
    let embedder = HashingEmbedder::new(1024);
    let query = embedder.embed("emergency stop").unwrap();
    let related = embedder.embed("press the emergency stop button").unwrap();
    let unrelated = embedder.embed("forklift battery charging area").unwrap();
    assert!(cosine(&query, &related) > cosine(&query, &unrelated));
}

#[test]
fn blank_text_embeds_to_zero_vector() {
    let v = HashingEmbedder::new(8).embed("   ").unwrap();
    assert_eq!(v, vec![0.0; 8]);
}

#[test]
fn load_embedder_honours_fake_setting() {
    let settings = EmbeddingSettings { model_dir: None, use_fake: true, fake_dim: 64 };
    let embedder = load_embedder(&settings).expect("fake embedder");
    assert_eq!(embedder.dim(), 64);
    assert_eq!(embedder.embed("hello").unwrap().len(), 64);
}

#[test]
fn load_embedder_fails_fast_on_missing_model_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = EmbeddingSettings { model_dir: Some(tmp.path().join("nope")), use_fake: false, fake_dim: 384 };
    assert!(load_embedder(&settings).is_err());
}
