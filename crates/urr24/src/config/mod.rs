use crate::policy::{PolicyError, PolicyTable};
use std::env;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub policy: PolicySource,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let path = env::var("URR24_POLICY_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let working_days = match env::var("URR24_WORKING_DAYS") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|days| *days > 0)
                    .ok_or(ConfigError::InvalidWorkingDays { value: raw })?,
            ),
            Err(_) => None,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            policy: PolicySource { path, working_days },
            telemetry: TelemetryConfig { log_level },
        })
    }

    /// Resolve the policy table this process will run with.
    pub fn policy(&self) -> Result<PolicyTable, ConfigError> {
        self.policy.resolve()
    }
}

/// Where the policy table comes from, plus any environment overrides.
#[derive(Debug, Clone, Default)]
pub struct PolicySource {
    pub path: Option<PathBuf>,
    pub working_days: Option<u32>,
}

impl PolicySource {
    pub fn resolve(&self) -> Result<PolicyTable, ConfigError> {
        let mut table = match &self.path {
            Some(path) => PolicyTable::from_path(path)?,
            None => PolicyTable::urr24(),
        };

        if let Some(days) = self.working_days {
            table.attendance.total_working_days = days;
        }

        table.validate()?;
        Ok(table)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("URR24_WORKING_DAYS must be a positive integer (found '{value}')")]
    InvalidWorkingDays { value: String },
    #[error("policy table could not be loaded: {0}")]
    Policy(#[from] PolicyError),
}
