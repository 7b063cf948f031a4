//! Gemini embedding provider implementation.
//!
//! Calls the `embedContent` endpoint of the Generative Language API with
//! `reqwest::Client` and checks the returned dimensionality.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::embed::RETRIEVAL_DOCUMENT;
use crate::{EmbeddingsProvider, ReindexError};

/// Default embedding model; emits 768-dimensional vectors.
pub const EMBEDDING_MODEL: &str = "models/text-embedding-004";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini embedding backend.
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// API key for the Generative Language API.
    pub api_key: String,
    /// API base, overridable for self-hosted proxies.
    pub base_url: String,
    /// Model identifier, e.g. `models/text-embedding-004`.
    pub model: String,
    /// Expected embedding dimension size.
    pub dim: usize,
}

impl GeminiConfig {
    /// Loads the backend configuration from the process environment.
    ///
    /// `GEMINI_API_KEY` is required; absence aborts startup.
    pub fn from_env() -> Result<Self, ReindexError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            ReindexError::Config("GEMINI_API_KEY environment variable is required".into())
        })?;
        Ok(Self {
            api_key,
            base_url: std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            model: EMBEDDING_MODEL.to_string(),
            dim: crate::config::parse_embedding_dim(std::env::var("EMBEDDING_DIM").ok())?,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest<'a> {
    model: &'a str,
    content: Content<'a>,
    task_type: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

/// Gemini embedding provider (async).
pub struct GeminiEmbedder {
    cfg: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiEmbedder {
    /// Construct a new embedder from configuration.
    pub fn new(cfg: GeminiConfig) -> Result<Self, ReindexError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ReindexError::Embedding(format!("http client build: {e}")))?;
        Ok(Self { cfg, http })
    }
}

impl EmbeddingsProvider for GeminiEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Vec<f32>, ReindexError>> + Send + 'a>>
    {
        Box::pin(async move {
            // The key travels in a header, never in the URL: reqwest errors
            // print the full URL and would leak a query-string credential
            // into client-visible messages.
            let url = format!("{}/{}:embedContent", self.cfg.base_url, self.cfg.model);

            let req = EmbedContentRequest {
                model: &self.cfg.model,
                content: Content {
                    parts: vec![Part { text }],
                },
                task_type: RETRIEVAL_DOCUMENT,
            };

            let resp = self
                .http
                .post(&url)
                .header("x-goog-api-key", &self.cfg.api_key)
                .json(&req)
                .send()
                .await
                .map_err(|e| ReindexError::Embedding(format!("POST embedContent: {e}")))?;

            if resp.status() != StatusCode::OK {
                let code = resp.status();
                let body = resp
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read body>".into());
                return Err(ReindexError::Embedding(format!(
                    "embedContent non-200: {code}; body: {body}"
                )));
            }

            let parsed: EmbedContentResponse = resp
                .json()
                .await
                .map_err(|e| ReindexError::Embedding(format!("parse embedding json: {e}")))?;

            let values = parsed.embedding.values;
            if values.len() != self.cfg.dim {
                return Err(ReindexError::VectorSizeMismatch {
                    got: values.len(),
                    want: self.cfg.dim,
                });
            }

            Ok(values)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_wire_shape() {
        let req = EmbedContentRequest {
            model: EMBEDDING_MODEL,
            content: Content {
                parts: vec![Part { text: "chunk A text" }],
            },
            task_type: RETRIEVAL_DOCUMENT,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["model"], "models/text-embedding-004");
        assert_eq!(v["taskType"], "RETRIEVAL_DOCUMENT");
        assert_eq!(v["content"]["parts"][0]["text"], "chunk A text");
    }

    #[test]
    fn response_parses_values() {
        let raw = r#"{"embedding":{"values":[0.1,0.2,0.3]}}"#;
        let parsed: EmbedContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.embedding.values.len(), 3);
    }

    #[tokio::test]
    async fn transport_errors_do_not_expose_the_api_key() {
        let embedder = GeminiEmbedder::new(GeminiConfig {
            api_key: "super-secret-key".into(),
            // Nothing listens on the discard port, so send() fails with a
            // transport error that embeds the request URL.
            base_url: "http://127.0.0.1:9/v1beta".into(),
            model: EMBEDDING_MODEL.to_string(),
            dim: 768,
        })
        .unwrap();

        let err = embedder.embed("chunk A text").await.unwrap_err();
        assert!(!err.to_string().contains("super-secret-key"));
    }
}
