use anyhow::Result;
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

use ragdb_core::traits::Embedder;

/// Deterministic bag-of-tokens embedder for tests and offline development.
///
/// Each whitespace token is hashed into one of `dim` buckets with a positive
/// weight, and the vector is L2-normalized. Texts sharing tokens end up
/// closer than texts that share none.
#[derive(Debug, Clone)]
pub struct HashingEmbedder { dim: usize }

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self { Self { dim: dim.max(1) } }
}

impl Embedder for HashingEmbedder {
    fn dim(&self) -> usize { self.dim }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h % self.dim as u64) as usize;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
        for x in &mut v { *x /= norm; }
        Ok(v)
    }
}
