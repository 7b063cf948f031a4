pub mod reindex_request;
pub mod reindex_route;
