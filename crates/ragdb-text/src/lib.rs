//! ragdb-text
//!
//! BM25 lexical scoring over an ephemeral in-RAM Tantivy index built from the
//! documents being scored. See `bm25` for the scorer and `examples/score.rs`
//! for CLI-like usage during development.

pub mod bm25;
pub mod tantivy_utils;

pub use bm25::Bm25Scorer;
