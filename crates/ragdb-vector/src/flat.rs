use anyhow::bail;

use ragdb_core::error::{Error, Result};
use ragdb_core::traits::VectorIndex;
use ragdb_core::types::Neighbor;

/// Exact nearest-neighbour index using squared Euclidean distance.
///
/// Vectors are stored row-major; position `i` is the `i`-th vector added.
/// Search scans every vector and orders by `(distance, position)`.
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dim: usize,
    data: Vec<f32>,
}

impl FlatL2Index {
    pub fn new(dim: usize) -> Self { Self { dim, data: Vec::new() } }

    pub fn from_vectors(dim: usize, vectors: &[Vec<f32>]) -> Result<Self> {
        let mut index = Self::new(dim);
        index.data.reserve(dim * vectors.len());
        for v in vectors { index.add(v)?; }
        Ok(index)
    }

    /// Append a vector, returning its position.
    pub fn add(&mut self, vector: &[f32]) -> Result<usize> {
        if vector.len() != self.dim {
            return Err(Error::DimensionMismatch { what: "flat index vector", expected: self.dim, actual: vector.len() });
        }
        let position = self.count();
        self.data.extend_from_slice(vector);
        Ok(position)
    }

    fn count(&self) -> usize { if self.dim == 0 { 0 } else { self.data.len() / self.dim } }

    fn row(&self, position: usize) -> &[f32] { &self.data[position * self.dim..(position + 1) * self.dim] }
}

pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 { a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum() }

impl VectorIndex for FlatL2Index {
    fn dim(&self) -> usize { self.dim }

    fn len(&self) -> usize { self.count() }

    fn search(&self, query_vec: &[f32], n: usize) -> anyhow::Result<Vec<Neighbor>> {
        if query_vec.len() != self.dim {
            bail!("query vector has {} dims, index has {}", query_vec.len(), self.dim);
        }
        let mut hits: Vec<Neighbor> = (0..self.count())
            .map(|position| Neighbor { distance: squared_l2(query_vec, self.row(position)), position })
            .collect();
        // Stable: equal distances keep ascending position order.
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(n);
        Ok(hits)
    }
}
