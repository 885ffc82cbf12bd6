use axum::{extract::State, Json};

use crate::extractors::JsonPayload;
use crate::models::ProcessResponse;
use crate::startup::AppState;

/// Echo the parsed body after a fixed delay. Malformed JSON is rejected by
/// the extractor before the delay starts.
#[tracing::instrument(skip(state, payload))]
pub async fn process_data(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> Json<ProcessResponse> {
    tokio::time::sleep(state.config.process_delay()).await;

    Json(ProcessResponse::new(payload))
}
