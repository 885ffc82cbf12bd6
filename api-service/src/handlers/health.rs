use axum::{http::StatusCode, Json};

use crate::models::HealthResponse;

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse::healthy(chrono::Local::now())),
    )
}
