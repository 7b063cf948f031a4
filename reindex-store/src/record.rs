//! Core data models used by the pipeline.

/// A chunk embedded and ready for upsert: one vector-store point.
#[derive(Clone, Debug)]
pub struct PreparedRecord {
    /// Freshly minted UUID v4; never derived from the chunk text, so every
    /// re-index replaces records even when the content did not change.
    pub id: String,
    /// Embedding produced in retrieval-document mode.
    pub vector: Vec<f32>,
    /// Source page URL; doubles as the namespace key in the store.
    pub url: String,
}
