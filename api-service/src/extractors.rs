//! Explicit body decoding for the calculator and echo endpoints.
//!
//! Bodies are decoded into a tagged result before a handler sees them.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use serde_json::{Map, Value};
use service_core::error::AppError;
use thiserror::Error;

use crate::models::CalculationInput;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed request body")]
    MalformedBody,

    #[error("Malformed JSON body")]
    MalformedJson,
}

impl From<DecodeError> for AppError {
    fn from(err: DecodeError) -> Self {
        AppError::bad_request(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyFormat {
    Json,
    Form,
}

fn body_format(headers: &HeaderMap) -> BodyFormat {
    let is_form = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
        .unwrap_or(false);

    if is_form {
        BodyFormat::Form
    } else {
        BodyFormat::Json
    }
}

/// Decode a calculator body. An empty body is an empty object; a form body
/// contributes every field as a string, last occurrence winning.
pub fn decode_calculation(
    headers: &HeaderMap,
    body: &[u8],
) -> Result<CalculationInput, DecodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CalculationInput::default());
    }

    let fields = match body_format(headers) {
        BodyFormat::Form => {
            let pairs: Vec<(String, String)> =
                serde_urlencoded::from_bytes(body).map_err(|_| DecodeError::MalformedBody)?;
            pairs
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect::<Map<String, Value>>()
        }
        BodyFormat::Json => match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => return Err(DecodeError::MalformedBody),
        },
    };

    Ok(CalculationInput::from_map(fields))
}

/// Decode an echo body: any JSON value at all.
pub fn decode_json_value(body: &[u8]) -> Result<Value, DecodeError> {
    serde_json::from_slice(body).map_err(|_| DecodeError::MalformedJson)
}

/// Calculator input extracted from a JSON or form-encoded body.
pub struct CalculationPayload(pub CalculationInput);

#[axum::async_trait]
impl<S> FromRequest<S> for CalculationPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let headers = req.headers().clone();
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let input = decode_calculation(&headers, &body).map_err(|e| {
            tracing::info!(error = %e, "Rejected calculator body");
            AppError::from(e)
        })?;

        Ok(CalculationPayload(input))
    }
}

/// Arbitrary JSON payload; content type is not enforced.
pub struct JsonPayload(pub Value);

#[axum::async_trait]
impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let value = decode_json_value(&body).map_err(|e| {
            tracing::warn!(error = %e, "Rejected echo body");
            AppError::from(e)
        })?;

        Ok(JsonPayload(value))
    }
}
