use axum::{extract::State, Json};

use crate::models::GreetingResponse;
use crate::startup::AppState;

/// Greeting behind a fixed, non-cancellable delay.
pub async fn hello_async(State(state): State<AppState>) -> Json<GreetingResponse> {
    tokio::time::sleep(state.config.hello_delay()).await;

    Json(GreetingResponse::default())
}
