use crate::config::ConfigError;
use crate::earnings::{LoadError, RuleError};
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Load(LoadError),
    Rule(RuleError),
    Output(serde_json::Error),
    UnknownAirport(String),
    NoApplicableRule { segment: String, category: String },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Load(err) => write!(f, "data error: {}", err),
            AppError::Rule(err) => write!(f, "rule error: {}", err),
            AppError::Output(err) => write!(f, "failed to render output: {}", err),
            AppError::UnknownAirport(iata) => write!(f, "unknown airport '{}'", iata),
            AppError::NoApplicableRule { segment, category } => write!(
                f,
                "no rule applies to {} for fare-earn category '{}'",
                segment, category
            ),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Load(err) => Some(err),
            AppError::Rule(err) => Some(err),
            AppError::Output(err) => Some(err),
            AppError::UnknownAirport(_) | AppError::NoApplicableRule { .. } => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<LoadError> for AppError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

impl From<RuleError> for AppError {
    fn from(value: RuleError) -> Self {
        Self::Rule(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}
