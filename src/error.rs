use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Top-level error for the binary's startup and command paths.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),
}
