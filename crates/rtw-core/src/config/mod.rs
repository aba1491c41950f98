use std::env;
use std::fmt;

use crate::clinical::certificates::CompliancePolicy;
use crate::clinical::evidence::EvidencePolicy;
use crate::clinical::suitability::SuitabilityPolicy;

/// Distinguishes runtime behavior for different stages of the advisor.
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
    pub rules: RulesConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("RTW_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("RTW_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let mut rules = RulesConfig::default();
        if let Some(days) = read_days("RTW_CERTIFICATE_EXPIRING_SOON_DAYS")? {
            rules.compliance.expiring_soon_days = days;
            rules.evidence.expiring_soon_days = days;
        }
        if let Some(days) = read_days("RTW_CERTIFICATE_CURRENCY_DAYS")? {
            rules.evidence.certificate_currency_days = days;
        }
        if let Some(days) = read_days("RTW_LONG_TAIL_DAYS")? {
            rules.evidence.long_tail_days = days;
        }

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            rules,
        })
    }
}

fn read_days(key: &'static str) -> Result<Option<i64>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|days| *days >= 0)
            .map(Some)
            .ok_or(ConfigError::InvalidNumber { key, value: raw }),
        Err(_) => Ok(None),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Thresholds for every rule engine, defaulting to the production constants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RulesConfig {
    pub compliance: CompliancePolicy,
    pub suitability: SuitabilityPolicy,
    pub evidence: EvidencePolicy,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a non-negative whole number of days (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
