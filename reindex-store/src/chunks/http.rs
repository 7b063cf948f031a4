//! HTTP client for the text-splitter service.
//!
//! The request body is a serialized struct, never a spliced string, so URLs
//! with quotes or other special characters cannot malform the payload.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use crate::chunks::ChunkSource;
use crate::errors::ReindexError;

/// Configuration for the splitter client.
#[derive(Clone, Debug)]
pub struct ChunkerConfig {
    /// Splitter endpoint, e.g. `http://localhost:9600/split`.
    pub endpoint: String,
}

impl ChunkerConfig {
    /// Loads the endpoint from `CHUNKER_URL`, with a localhost default.
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("CHUNKER_URL")
                .unwrap_or_else(|_| "http://localhost:9600/split".into()),
        }
    }
}

#[derive(Debug, Serialize)]
struct SplitRequest<'a> {
    url: &'a str,
}

/// Splitter-service client (async).
pub struct HttpChunkSource {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpChunkSource {
    /// Construct a new client from configuration.
    pub fn new(cfg: ChunkerConfig) -> Result<Self, ReindexError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ReindexError::Chunker(format!("http client build: {e}")))?;
        Ok(Self {
            endpoint: cfg.endpoint,
            http,
        })
    }
}

impl ChunkSource for HttpChunkSource {
    fn fetch_chunks<'a>(
        &'a self,
        url: &'a str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<String>, ReindexError>> + Send + 'a>,
    > {
        Box::pin(async move {
            debug!("Requesting chunks for '{}' from {}", url, self.endpoint);

            let resp = self
                .http
                .post(&self.endpoint)
                .json(&SplitRequest { url })
                .send()
                .await
                .map_err(|e| ReindexError::Chunker(format!("POST {}: {e}", self.endpoint)))?;

            if resp.status() != StatusCode::OK {
                let code = resp.status();
                let body = resp
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read body>".into());
                return Err(ReindexError::Chunker(format!(
                    "splitter non-200: {code}; body: {body}"
                )));
            }

            let chunks: Vec<String> = resp
                .json()
                .await
                .map_err(|e| ReindexError::Chunker(format!("parse chunks json: {e}")))?;

            debug!("Splitter returned {} chunks for '{}'", chunks.len(), url);
            Ok(chunks)
        })
    }
}
