use axum::{body::Bytes, extract::State, http::StatusCode, Extension, Json};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    services::validation,
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Returns the whole watchlist in position order
pub async fn get_watchlist(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<Vec<String>>> {
    let watchlist = state.store.get_watchlist().await?;

    tracing::info!(
        request_id = %request_id,
        count = watchlist.len(),
        "Fetched watchlist"
    );

    Ok(Json(watchlist))
}

/// Replaces the whole watchlist with the JSON list in the request body
///
/// The body is decoded as JSON whatever its `Content-Type`. Every item is
/// validated before the store is touched.
pub async fn replace_watchlist(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> AppResult<StatusCode> {
    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Rejected malformed JSON body");
        AppError::MalformedBody(e.to_string())
    })?;

    let items = validation::validate_watchlist(value).map_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Rejected watchlist");
        e
    })?;

    let count = items.len();
    state.store.replace_watchlist(items).await?;

    tracing::info!(request_id = %request_id, count, "Replaced watchlist");

    Ok(StatusCode::NO_CONTENT)
}
