use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::time::Duration;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Validate)]
pub struct ApiConfig {
    pub common: core_config::Config,
    /// Prefix the API routes are nested under, e.g. `/api`. Empty mounts at `/`.
    #[validate(custom(function = "validate_base_path"))]
    pub base_path: String,
    #[validate(range(max = 30000))]
    pub hello_delay_ms: u64,
    #[validate(range(max = 30000))]
    pub process_delay_ms: u64,
    pub otlp_endpoint: Option<String>,
    pub log_level: String,
}

/// Service-specific keys, read from unprefixed environment variables
/// (`BASE_PATH`, `HELLO_DELAY_MS`, `PROCESS_DELAY_MS`, `OTLP_ENDPOINT`, `LOG_LEVEL`).
#[derive(Debug, Deserialize)]
struct ServiceSettings {
    #[serde(default)]
    base_path: String,
    #[serde(default = "default_hello_delay_ms")]
    hello_delay_ms: u64,
    #[serde(default = "default_process_delay_ms")]
    process_delay_ms: u64,
    otlp_endpoint: Option<String>,
    #[serde(default = "default_log_level")]
    log_level: String,
}

fn default_hello_delay_ms() -> u64 {
    100
}

fn default_process_delay_ms() -> u64 {
    200
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            base_path: String::new(),
            hello_delay_ms: default_hello_delay_ms(),
            process_delay_ms: default_process_delay_ms(),
            otlp_endpoint: None,
            log_level: default_log_level(),
        }
    }
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;

        let settings: ServiceSettings = config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()?;

        let config = ApiConfig {
            common,
            base_path: settings.base_path,
            hello_delay_ms: settings.hello_delay_ms,
            process_delay_ms: settings.process_delay_ms,
            otlp_endpoint: settings.otlp_endpoint.filter(|e| !e.is_empty()),
            log_level: settings.log_level,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn hello_delay(&self) -> Duration {
        Duration::from_millis(self.hello_delay_ms)
    }

    pub fn process_delay(&self) -> Duration {
        Duration::from_millis(self.process_delay_ms)
    }
}

fn validate_base_path(base_path: &str) -> Result<(), ValidationError> {
    if base_path.is_empty() {
        return Ok(());
    }
    if !base_path.starts_with('/') || base_path.ends_with('/') {
        let mut err = ValidationError::new("base_path");
        err.message = Some("must start with '/' and must not end with '/'".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_delays() {
        let config = ApiConfig::default();
        assert_eq!(config.hello_delay(), Duration::from_millis(100));
        assert_eq!(config.process_delay(), Duration::from_millis(200));
        assert!(config.base_path.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn base_path_shape_is_validated() {
        for ok in ["", "/api", "/v1/api"] {
            let config = ApiConfig {
                base_path: ok.to_string(),
                ..ApiConfig::default()
            };
            assert!(config.validate().is_ok(), "{ok} should be accepted");
        }

        for bad in ["api", "/api/", "/"] {
            let config = ApiConfig {
                base_path: bad.to_string(),
                ..ApiConfig::default()
            };
            assert!(config.validate().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn excessive_delay_is_rejected() {
        let config = ApiConfig {
            process_delay_ms: 60_000,
            ..ApiConfig::default()
        };
        let err: AppError = config.validate().unwrap_err().into();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
