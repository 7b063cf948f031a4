//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for reindex-store operations.
#[derive(Debug, Error)]
pub enum ReindexError {
    /// Invalid or missing configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Splitter service failures (transport, non-200, bad body).
    #[error("chunker error: {0}")]
    Chunker(String),

    /// Embedding provider failures.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Mismatch in vector dimensionality across records.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),

    /// Generic error from anyhow chain.
    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}
