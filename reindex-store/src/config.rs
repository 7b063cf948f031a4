//! Runtime and collection configuration.

use crate::errors::ReindexError;

/// Distance function used for the vector space.
#[derive(Clone, Copy, Debug)]
pub enum DistanceKind {
    /// Cosine distance (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    Dot,
    /// Euclidean distance (L2).
    Euclid,
}

/// Configuration for the re-index pipeline and its Qdrant collection.
#[derive(Clone, Debug)]
pub struct ReindexConfig {
    /// Qdrant endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// API key for the Qdrant deployment.
    pub qdrant_api_key: String,
    /// Target collection name.
    pub collection: String,
    /// Distance function (Cosine by default).
    pub distance: DistanceKind,
    /// Dimensionality every upserted vector must have.
    pub embedding_dim: usize,
}

impl ReindexConfig {
    /// Loads the configuration from the process environment.
    ///
    /// `QDRANT_URL` and `QDRANT_API_KEY` are required; a missing one aborts
    /// startup with `ReindexError::Config` before any work is done.
    pub fn from_env() -> Result<Self, ReindexError> {
        let cfg = Self {
            qdrant_url: require("QDRANT_URL")?,
            qdrant_api_key: require("QDRANT_API_KEY")?,
            collection: std::env::var("QDRANT_COLLECTION").unwrap_or_else(|_| "pages".into()),
            distance: DistanceKind::Cosine,
            embedding_dim: parse_embedding_dim(std::env::var("EMBEDDING_DIM").ok())?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), ReindexError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(ReindexError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(ReindexError::Config("collection is empty".into()));
        }
        if self.embedding_dim == 0 {
            return Err(ReindexError::Config("embedding_dim must be > 0".into()));
        }
        Ok(())
    }
}

fn require(key: &str) -> Result<String, ReindexError> {
    std::env::var(key)
        .map_err(|_| ReindexError::Config(format!("{key} environment variable is required")))
}

/// Resolves `EMBEDDING_DIM`: absent → 768, present-but-unparsable → fatal.
pub(crate) fn parse_embedding_dim(raw: Option<String>) -> Result<usize, ReindexError> {
    match raw {
        Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
            ReindexError::Config(format!("EMBEDDING_DIM is not a valid integer: '{raw}'"))
        }),
        None => Ok(768),
    }
}
