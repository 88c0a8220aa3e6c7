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
    pub telemetry: TelemetryConfig,
    pub data: DataConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        if log_level.trim().is_empty() {
            return Err(ConfigError::EmptyLogLevel);
        }

        let data = DataConfig {
            rules_path: path_var("EARN_RULES_PATH", "config/rules.json")?,
            airports_path: path_var("EARN_AIRPORTS_PATH", "config/airports.csv")?,
            regions_path: path_var("EARN_REGIONS_PATH", "config/regions.json")?,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            data,
        })
    }
}

fn path_var(name: &'static str, default: &str) -> Result<PathBuf, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyPath { variable: name });
    }
    Ok(PathBuf::from(value.trim()))
}

/// Locations of the rule, airport and region documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    pub rules_path: PathBuf,
    pub airports_path: PathBuf,
    pub regions_path: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_LOG_LEVEL must not be empty")]
    EmptyLogLevel,
    #[error("{variable} must not be empty")]
    EmptyPath { variable: &'static str },
}
