use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};
use crate::routes::reindex::reindex_request::ReindexRequest;

/// HTTP endpoint for re-indexing one page.
///
/// Expects a JSON payload with `url`. Replies with the pipeline outcome:
/// 400 when the url is missing or empty, 500 when chunking, embedding or
/// upserting failed, 200 once the fresh records are stored.
pub async fn reindex_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReindexRequest>,
) -> Response {
    info!(url = %body.url, "re-index requested");

    let outcome = state.store.reindex(&body.url).await;

    ApiResponse::new(outcome.status_code(), outcome.message()).into_response()
}
