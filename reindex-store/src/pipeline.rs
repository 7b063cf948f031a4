//! Pipeline orchestrator: validate → delete → fetch chunks → build → upsert.

use tracing::{info, warn};

use crate::builder::build_records;
use crate::chunks::ChunkSource;
use crate::embed::EmbeddingsProvider;
use crate::gateway::VectorGateway;

/// Terminal outcome of one re-index run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Fresh chunks embedded and stored.
    Success,
    /// The request never reached any collaborator.
    ValidationError(String),
    /// Chunk fetch, record building or upsert failed.
    ProcessingError(String),
}

impl PipelineOutcome {
    /// Status code for the entry-point contract.
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineOutcome::Success => 200,
            PipelineOutcome::ValidationError(_) => 400,
            PipelineOutcome::ProcessingError(_) => 500,
        }
    }

    /// Human-readable body for the entry-point contract.
    pub fn message(&self) -> &str {
        match self {
            PipelineOutcome::Success => "Data stored in vector store",
            PipelineOutcome::ValidationError(msg) | PipelineOutcome::ProcessingError(msg) => msg,
        }
    }
}

/// Validation gate shared by the facade and the orchestrator, so the two
/// layers cannot drift apart on the rejection message.
pub(crate) fn validate_url(url: &str) -> Option<PipelineOutcome> {
    if url.trim().is_empty() {
        return Some(PipelineOutcome::ValidationError("URL is required".into()));
    }
    None
}

/// Runs the full re-index for `url`.
///
/// Stage failures are converted into outcomes at the stage boundary; only
/// the delete stage is non-fatal (stale records may survive, the run goes
/// on). A failed fetch or upsert after the delete leaves the namespace empty
/// until the next successful run; no rollback is attempted.
pub async fn run_reindex(
    url: &str,
    chunker: &dyn ChunkSource,
    embedder: &dyn EmbeddingsProvider,
    gateway: &dyn VectorGateway,
    expected_dim: usize,
) -> PipelineOutcome {
    if let Some(outcome) = validate_url(url) {
        return outcome;
    }

    info!("Re-indexing '{}'", url);

    // Best-effort: a stale namespace is preferable to aborting the refresh.
    if let Err(err) = gateway.delete_namespace(url).await {
        warn!("Failed to delete existing records for '{}': {}", url, err);
    }

    let chunks = match chunker.fetch_chunks(url).await {
        Ok(chunks) if chunks.is_empty() => {
            warn!("Splitter returned no chunks for '{}'", url);
            return PipelineOutcome::ProcessingError("Failed to preprocess data".into());
        }
        Ok(chunks) => chunks,
        Err(err) => {
            warn!("Chunk fetch failed for '{}': {}", url, err);
            return PipelineOutcome::ProcessingError("Failed to preprocess data".into());
        }
    };

    info!("Retrieved {} chunks for '{}'", chunks.len(), url);

    let records = match build_records(url, &chunks, embedder, expected_dim).await {
        Ok(records) => records,
        Err(err) => {
            return PipelineOutcome::ProcessingError(format!("An error occurred: {err}"));
        }
    };

    if let Err(err) = gateway.upsert(url, records).await {
        return PipelineOutcome::ProcessingError(format!("An error occurred: {err}"));
    }

    info!("Data stored in vector store for '{}'", url);
    PipelineOutcome::Success
}
