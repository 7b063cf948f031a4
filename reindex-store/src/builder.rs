//! Record Builder: turns text chunks into store-ready records.

use tracing::{debug, info};
use uuid::Uuid;

use crate::embed::EmbeddingsProvider;
use crate::errors::ReindexError;
use crate::record::PreparedRecord;

/// Builds one record per chunk.
///
/// Ids are minted fresh (UUID v4) on every run, so a re-index replaces
/// records even when the text did not change. Embedding calls are issued one
/// chunk at a time; the first failure aborts the whole step and no partial
/// record set is returned.
pub async fn build_records(
    url: &str,
    chunks: &[String],
    provider: &dyn EmbeddingsProvider,
    expected_dim: usize,
) -> Result<Vec<PreparedRecord>, ReindexError> {
    info!("Preparing {} records for '{}'", chunks.len(), url);

    let mut records = Vec::with_capacity(chunks.len());
    for text in chunks {
        let vector = provider.embed(text).await?;
        if vector.len() != expected_dim {
            return Err(ReindexError::VectorSizeMismatch {
                got: vector.len(),
                want: expected_dim,
            });
        }
        records.push(PreparedRecord {
            id: Uuid::new_v4().to_string(),
            vector,
            url: url.to_string(),
        });
    }

    debug!("Prepared {} records for upsert", records.len());
    Ok(records)
}
