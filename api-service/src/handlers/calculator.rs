use axum::Json;
use metrics::counter;
use service_core::error::AppError;

use crate::extractors::CalculationPayload;
use crate::models::{CalculationError, CalculationInput, CalculationResponse};

#[tracing::instrument(skip(payload))]
pub async fn calculate(
    CalculationPayload(payload): CalculationPayload,
) -> Result<Json<CalculationResponse>, AppError> {
    match evaluate(payload) {
        Ok(response) => {
            counter!(
                "calculations_total",
                "operation" => response.operation.clone(),
                "outcome" => "ok"
            )
            .increment(1);
            tracing::debug!(
                operation = %response.operation,
                result = response.result,
                "Calculation succeeded"
            );
            Ok(Json(response))
        }
        Err(err) => {
            counter!("calculations_total", "operation" => "-", "outcome" => err.outcome())
                .increment(1);
            tracing::info!(error = %err, "Calculation rejected");
            Err(err.into())
        }
    }
}

fn evaluate(input: CalculationInput) -> Result<CalculationResponse, CalculationError> {
    input.validate()?.calculate()
}
