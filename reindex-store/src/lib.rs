//! URL re-indexing over Qdrant: delete stale chunks, embed fresh ones, upsert.
//!
//! Given a page URL the pipeline drops the URL's namespace in the vector
//! store, asks the splitter service for fresh chunks, embeds each chunk in
//! retrieval-document mode and upserts one record per chunk. The design is
//! flat (no deep nesting) and splits responsibilities into focused modules.

mod builder;
mod config;
mod errors;
mod gateway;
mod pipeline;
mod record;

pub mod chunks;
pub mod embed;

pub use chunks::ChunkSource;
pub use chunks::http::{ChunkerConfig, HttpChunkSource};
pub use config::{DistanceKind, ReindexConfig};
pub use embed::EmbeddingsProvider;
pub use embed::gemini::{GeminiConfig, GeminiEmbedder};
pub use errors::ReindexError;
pub use gateway::{QdrantGateway, VectorGateway};
pub use pipeline::PipelineOutcome;
pub use record::PreparedRecord;

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::trace;

/// High-level facade that wires configuration and collaborators.
///
/// This is the single entry point recommended for application code. The
/// Qdrant connection is established lazily on the first run and reused for
/// the lifetime of the process; the `OnceCell` guarantees a single
/// construction even under repeated calls.
pub struct ReindexStore {
    cfg: ReindexConfig,
    chunker: Arc<dyn ChunkSource>,
    embedder: Arc<dyn EmbeddingsProvider>,
    gateway: OnceCell<QdrantGateway>,
}

impl ReindexStore {
    /// Constructs a new store from configuration and injected collaborators.
    ///
    /// # Errors
    /// Returns `ReindexError::Config` if the configuration is invalid.
    pub fn new(
        cfg: ReindexConfig,
        chunker: Arc<dyn ChunkSource>,
        embedder: Arc<dyn EmbeddingsProvider>,
    ) -> Result<Self, ReindexError> {
        trace!("ReindexStore::new collection={}", cfg.collection);
        cfg.validate()?;
        Ok(Self {
            cfg,
            chunker,
            embedder,
            gateway: OnceCell::new(),
        })
    }

    async fn gateway(&self) -> Result<&QdrantGateway, ReindexError> {
        self.gateway
            .get_or_try_init(|| QdrantGateway::connect(&self.cfg))
            .await
    }

    /// Runs the full re-index pipeline for `url`.
    ///
    /// Never returns `Err`: every failure is folded into the outcome so the
    /// caller can map it straight onto the entry-point contract.
    pub async fn reindex(&self, url: &str) -> PipelineOutcome {
        // Short-circuit before the store connection is even created.
        if let Some(outcome) = pipeline::validate_url(url) {
            return outcome;
        }

        let gateway = match self.gateway().await {
            Ok(gateway) => gateway,
            Err(err) => {
                return PipelineOutcome::ProcessingError(format!("An error occurred: {err}"));
            }
        };

        pipeline::run_reindex(
            url,
            self.chunker.as_ref(),
            self.embedder.as_ref(),
            gateway,
            self.cfg.embedding_dim,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::fixed::FixedEmbedder;

    #[tokio::test]
    async fn facade_rejects_empty_url_with_the_shared_message() {
        let cfg = ReindexConfig {
            qdrant_url: "http://localhost:6334".into(),
            qdrant_api_key: "test-key".into(),
            collection: "pages".into(),
            distance: DistanceKind::Cosine,
            embedding_dim: 768,
        };
        let chunker = HttpChunkSource::new(ChunkerConfig {
            endpoint: "http://localhost:9600/split".into(),
        })
        .unwrap();
        let store =
            ReindexStore::new(cfg, Arc::new(chunker), Arc::new(FixedEmbedder::new(768))).unwrap();

        // Rejected before the gateway is ever connected, so no store is needed.
        let outcome = store.reindex("  ").await;
        assert_eq!(
            outcome,
            PipelineOutcome::ValidationError("URL is required".into())
        );
        assert_eq!(outcome.status_code(), 400);
    }
}
