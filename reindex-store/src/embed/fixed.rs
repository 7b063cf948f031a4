use crate::{EmbeddingsProvider, ReindexError};
use std::{future::Future, pin::Pin};

/// Returns the same vector for every input; never fails.
///
/// Useful for wiring tests and dry runs without an embedding service.
#[derive(Clone)]
pub struct FixedEmbedder {
    dim: usize,
}

impl FixedEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl EmbeddingsProvider for FixedEmbedder {
    fn embed<'a>(
        &'a self,
        _text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, ReindexError>> + Send + 'a>> {
        Box::pin(async move { Ok(vec![0.1; self.dim]) })
    }
}
