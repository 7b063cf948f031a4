use crate::errors::ReindexError;
use std::{future::Future, pin::Pin};

/// Source of text chunks for a page.
///
/// The real implementation calls the splitter service over HTTP; tests plug
/// in scripted fakes.
pub trait ChunkSource: Send + Sync {
    /// Returns the ordered chunks for `url`.
    ///
    /// An empty list is a valid response and means the page produced no
    /// indexable text; the pipeline treats it as terminal.
    fn fetch_chunks<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, ReindexError>> + Send + 'a>>;
}

pub mod http;
