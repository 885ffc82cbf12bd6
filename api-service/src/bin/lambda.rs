//! Serverless entry point: the same router served through API Gateway.

use api_service::config::ApiConfig;
use api_service::serverless::prepare_runtime;
use api_service::startup::{build_router, AppState};
use lambda_http::{run, Error};
use service_core::metrics::init_metrics;
use service_core::observability::init_tracing;

fn main() -> Result<(), Error> {
    let runtime = prepare_runtime()?;
    runtime.block_on(serve())
}

async fn serve() -> Result<(), Error> {
    let config = ApiConfig::load()?;

    init_tracing(
        "api-service-lambda",
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );
    init_metrics()?;

    tracing::info!(base_path = %config.base_path, "Starting Lambda handler");

    let app = build_router(AppState::new(config));
    run(app).await
}
