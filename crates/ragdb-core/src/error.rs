use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown retrieval mode '{0}' (expected 'baseline' or 'fused')")]
    UnknownMode(String),

    #[error("Dimension mismatch: {what} expects {expected}, got {actual}")]
    DimensionMismatch { what: &'static str, expected: usize, actual: usize },

    #[error("Embedding failed: {0}")]
    Embedding(#[source] anyhow::Error),

    #[error("Vector search failed: {0}")]
    Search(#[source] anyhow::Error),

    #[error("Chunk store lookup failed: {0}")]
    Store(#[source] anyhow::Error),

    #[error("Lexical scoring failed: {0}")]
    Lexical(#[source] anyhow::Error),
}

impl Error {
    /// True for errors caused by the request itself rather than the system.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::UnknownMode(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
