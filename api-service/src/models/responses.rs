use serde::Serialize;
use serde_json::Value;

pub const HEALTH_MESSAGE: &str = "API is running successfully";
pub const GREETING_MESSAGE: &str = "Hello from Django!";

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    /// RFC 3339 with the local UTC offset.
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy(now: chrono::DateTime<chrono::Local>) -> Self {
        Self {
            status: "healthy",
            message: HEALTH_MESSAGE,
            timestamp: now.to_rfc3339_opts(chrono::SecondsFormat::Micros, false),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GreetingResponse {
    pub message: &'static str,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub status: &'static str,
}

impl Default for GreetingResponse {
    fn default() -> Self {
        Self {
            message: GREETING_MESSAGE,
            is_async: true,
            status: "success",
        }
    }
}

/// Echo of an arbitrary payload; the value is passed through untouched.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResponse {
    pub received: Value,
    pub processed: bool,
}

impl ProcessResponse {
    pub fn new(received: Value) -> Self {
        Self {
            received,
            processed: true,
        }
    }
}
