use crate::config::ConfigError;
use crate::intake::{LedgerError, MarksViolation};
use crate::policy::PolicyError;
use crate::telemetry::TelemetryError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("policy error: {0}")]
    Policy(#[from] PolicyError),
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("invalid marks: {0}")]
    Marks(#[from] MarksViolation),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
