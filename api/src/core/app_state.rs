use std::sync::Arc;

use reindex_store::{
    ChunkerConfig, GeminiConfig, GeminiEmbedder, HttpChunkSource, ReindexConfig, ReindexError,
    ReindexStore,
};

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Pipeline facade; owns the lazily-connected vector store handle.
    pub store: ReindexStore,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// # Errors
    /// Returns `ReindexError::Config` when a required variable is absent —
    /// the caller is expected to abort startup.
    pub fn from_env() -> Result<Self, ReindexError> {
        let cfg = ReindexConfig::from_env()?;
        let chunker = HttpChunkSource::new(ChunkerConfig::from_env())?;
        let embedder = GeminiEmbedder::new(GeminiConfig::from_env()?)?;

        let store = ReindexStore::new(cfg, Arc::new(chunker), Arc::new(embedder))?;
        Ok(Self { store })
    }
}
