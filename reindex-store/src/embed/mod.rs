use crate::errors::ReindexError;
use std::{future::Future, pin::Pin};

/// Task type sent to the provider: vectors optimized for being searched
/// against, not for acting as the search query.
pub const RETRIEVAL_DOCUMENT: &str = "RETRIEVAL_DOCUMENT";

/// Provider interface for embedding generation.
///
/// Async is required because real providers (Gemini, Ollama, OpenAI)
/// perform HTTP requests. Implement this trait to plug in your own backend.
pub trait EmbeddingsProvider: Send + Sync {
    /// Embeds one chunk of text in retrieval-document mode.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, ReindexError>> + Send + 'a>>;
}

pub mod fixed;
pub mod gemini;
