use std::env;
use std::fmt;

use crate::workflows::screening::EvaluationConfig;

/// Distinguishes runtime behavior for different stages of the service.
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
    pub screening: ScreeningConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let default_threshold_percentage = match env::var("SCREENING_THRESHOLD") {
            Ok(raw) => parse_threshold(&raw)?,
            Err(_) => DEFAULT_THRESHOLD_PERCENTAGE,
        };

        let worker_threads = match env::var("SCREENING_WORKERS") {
            Ok(raw) => Some(parse_workers(&raw)?),
            Err(_) => None,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            screening: ScreeningConfig {
                default_threshold_percentage,
                worker_threads,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Threshold applied when a position does not carry its own.
pub const DEFAULT_THRESHOLD_PERCENTAGE: f64 = 75.0;

fn parse_threshold(raw: &str) -> Result<f64, ConfigError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidThreshold(raw.to_string()))?;
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidThreshold(raw.to_string()))
    }
}

fn parse_workers(raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(workers) if workers > 0 => Ok(workers),
        _ => Err(ConfigError::InvalidWorkers(raw.to_string())),
    }
}

/// Engine level knobs sourced from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningConfig {
    pub default_threshold_percentage: f64,
    pub worker_threads: Option<usize>,
}

impl ScreeningConfig {
    pub fn evaluation_config(&self) -> EvaluationConfig {
        EvaluationConfig {
            default_threshold_percentage: self.default_threshold_percentage,
            worker_threads: self.worker_threads,
            ..EvaluationConfig::default()
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidThreshold(String),
    InvalidWorkers(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidThreshold(raw) => write!(
                f,
                "SCREENING_THRESHOLD must be a percentage between 0 and 100 (got '{raw}')"
            ),
            ConfigError::InvalidWorkers(raw) => write!(
                f,
                "SCREENING_WORKERS must be a positive integer (got '{raw}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
