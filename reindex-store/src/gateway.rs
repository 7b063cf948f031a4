//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! The facade concentrates all Qdrant interactions behind a minimal API,
//! hiding the verbose builder pattern from the rest of the pipeline. A
//! namespace is the set of points whose payload `url` equals the source URL;
//! one collection holds every namespace.

use std::{future::Future, pin::Pin};

use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, DeletePointsBuilder, Distance, Filter, PointStruct,
    UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::{DistanceKind, ReindexConfig};
use crate::errors::ReindexError;
use crate::record::PreparedRecord;

/// Store-side operations the pipeline depends on.
pub trait VectorGateway: Send + Sync {
    /// Removes every record in the `url` namespace.
    ///
    /// Deleting a namespace that holds no records is a no-op, not an error.
    fn delete_namespace<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), ReindexError>> + Send + 'a>>;

    /// Writes each record under its id within the `url` namespace.
    ///
    /// Atomic per point; the batch as a whole carries no atomicity claim.
    fn upsert<'a>(
        &'a self,
        url: &'a str,
        records: Vec<PreparedRecord>,
    ) -> Pin<Box<dyn Future<Output = Result<(), ReindexError>> + Send + 'a>>;
}

/// Qdrant-backed gateway.
pub struct QdrantGateway {
    client: Qdrant,
    collection: String,
    dim: usize,
}

impl QdrantGateway {
    /// Builds the client and makes sure the collection exists.
    ///
    /// Called once per process through the lazy handle in `ReindexStore`.
    pub async fn connect(cfg: &ReindexConfig) -> Result<Self, ReindexError> {
        cfg.validate()?; // Early validation of config.

        let client = Qdrant::from_url(&cfg.qdrant_url)
            .api_key(cfg.qdrant_api_key.clone())
            .build()
            .map_err(|e| ReindexError::Qdrant(format!("client build: {e}")))?;

        let gateway = Self {
            client,
            collection: cfg.collection.clone(),
            dim: cfg.embedding_dim,
        };
        gateway.ensure_collection(cfg.distance).await?;
        Ok(gateway)
    }

    /// Ensures that the collection exists in Qdrant.
    ///
    /// - If the collection already exists → no-op.
    /// - If missing → creates it with the configured dimension and distance.
    async fn ensure_collection(&self, distance: DistanceKind) -> Result<(), ReindexError> {
        match self.client.collection_info(&self.collection).await {
            Ok(_) => {
                debug!("Collection '{}' already exists", self.collection);
                return Ok(());
            }
            Err(err) => {
                warn!(
                    "Collection '{}' not found, will be created (error={})",
                    self.collection, err
                );
            }
        }

        let distance = match distance {
            DistanceKind::Cosine => Distance::Cosine,
            DistanceKind::Dot => Distance::Dot,
            DistanceKind::Euclid => Distance::Euclid,
        };

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(self.dim as u64, distance)),
            )
            .await
            .map_err(|e| ReindexError::Qdrant(format!("create_collection: {e}")))?;

        info!("Collection '{}' created successfully", self.collection);
        Ok(())
    }
}

impl VectorGateway for QdrantGateway {
    fn delete_namespace<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), ReindexError>> + Send + 'a>> {
        Box::pin(async move {
            info!(
                "Deleting existing records for '{}' from '{}'",
                url, self.collection
            );

            // wait(true) so the following upsert cannot race the delete.
            self.client
                .delete_points(
                    DeletePointsBuilder::new(&self.collection)
                        .points(Filter::must([Condition::matches("url", url.to_string())]))
                        .wait(true),
                )
                .await
                .map_err(|e| ReindexError::Qdrant(format!("delete_points: {e}")))?;

            debug!("Namespace '{}' cleared", url);
            Ok(())
        })
    }

    fn upsert<'a>(
        &'a self,
        url: &'a str,
        records: Vec<PreparedRecord>,
    ) -> Pin<Box<dyn Future<Output = Result<(), ReindexError>> + Send + 'a>> {
        Box::pin(async move {
            if records.is_empty() {
                debug!("No records provided for upsert");
                return Ok(());
            }

            info!(
                "Upserting {} records for '{}' into '{}'",
                records.len(),
                url,
                self.collection
            );

            let mut points: Vec<PointStruct> = Vec::with_capacity(records.len());
            for r in records {
                if r.vector.len() != self.dim {
                    return Err(ReindexError::VectorSizeMismatch {
                        got: r.vector.len(),
                        want: self.dim,
                    });
                }

                let payload: Payload = json!({ "url": r.url })
                    .try_into()
                    .map_err(|e| ReindexError::Qdrant(format!("payload convert: {e}")))?;
                points.push(PointStruct::new(r.id, r.vector, payload));
            }

            self.client
                .upsert_points(UpsertPointsBuilder::new(&self.collection, points))
                .await
                .map_err(|e| ReindexError::Qdrant(format!("upsert_points: {e}")))?;

            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Models the gateway contract against in-process state.
    #[derive(Default)]
    struct InMemoryGateway {
        namespaces: Mutex<HashMap<String, Vec<PreparedRecord>>>,
    }

    impl VectorGateway for InMemoryGateway {
        fn delete_namespace<'a>(
            &'a self,
            url: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<(), ReindexError>> + Send + 'a>> {
            Box::pin(async move {
                // Absent key is fine: empty namespace deletes are a no-op.
                self.namespaces.lock().unwrap().remove(url);
                Ok(())
            })
        }

        fn upsert<'a>(
            &'a self,
            url: &'a str,
            records: Vec<PreparedRecord>,
        ) -> Pin<Box<dyn Future<Output = Result<(), ReindexError>> + Send + 'a>> {
            Box::pin(async move {
                self.namespaces
                    .lock()
                    .unwrap()
                    .entry(url.to_string())
                    .or_default()
                    .extend(records);
                Ok(())
            })
        }
    }

    fn record(id: &str, url: &str) -> PreparedRecord {
        PreparedRecord {
            id: id.into(),
            vector: vec![0.1; 4],
            url: url.into(),
        }
    }

    #[tokio::test]
    async fn delete_on_empty_namespace_is_a_noop() {
        let gw = InMemoryGateway::default();
        assert!(gw.delete_namespace("https://example.com/page").await.is_ok());
    }

    #[tokio::test]
    async fn namespaces_are_isolated_by_url() {
        let gw = InMemoryGateway::default();
        gw.upsert("https://a.example", vec![record("1", "https://a.example")])
            .await
            .unwrap();
        gw.upsert("https://b.example", vec![record("2", "https://b.example")])
            .await
            .unwrap();

        gw.delete_namespace("https://a.example").await.unwrap();

        let namespaces = gw.namespaces.lock().unwrap();
        assert!(!namespaces.contains_key("https://a.example"));
        assert_eq!(namespaces["https://b.example"].len(), 1);
    }

    #[tokio::test]
    async fn delete_then_upsert_replaces_namespace_contents() {
        let url = "https://example.com/page";
        let gw = InMemoryGateway::default();
        gw.upsert(url, vec![record("old-1", url), record("old-2", url)])
            .await
            .unwrap();

        gw.delete_namespace(url).await.unwrap();
        gw.upsert(url, vec![record("new-1", url)]).await.unwrap();

        let namespaces = gw.namespaces.lock().unwrap();
        let ids: Vec<&str> = namespaces[url].iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["new-1"]);
    }
}
