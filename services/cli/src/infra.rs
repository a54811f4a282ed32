use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;
use urr24::config::AppConfig;
use urr24::error::AppError;
use urr24::rules::SemesterRecord;
use urr24::{telemetry, RulesEngine};

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Parse a completed semester written as `SGPA:CREDITS`, e.g. `8.4:20`.
pub(crate) fn parse_semester(raw: &str) -> Result<SemesterRecord, String> {
    let (sgpa, credits) = raw
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected SGPA:CREDITS, found '{raw}'"))?;
    let sgpa = sgpa
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid SGPA in '{raw}' ({err})"))?;
    if !(0.0..=10.0).contains(&sgpa) {
        return Err(format!("SGPA must be between 0 and 10 (found {sgpa})"));
    }
    let credits = credits
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("invalid credits in '{raw}' ({err})"))?;
    Ok(SemesterRecord::new(sgpa, credits))
}

/// Load configuration, install tracing and build the engine every command runs against.
pub(crate) fn bootstrap() -> Result<RulesEngine, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let policy = config.policy()?;
    info!(
        ?config.environment,
        policy_file = ?config.policy.path,
        working_days = policy.attendance.total_working_days,
        "rules engine ready"
    );
    Ok(RulesEngine::new(policy))
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
