//! Configuration management for Library Desk

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;

use crate::policy::loan::{FINE_PER_DAY, LOAN_PERIOD_DAYS};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Optional directory for daily rolling log files
    pub directory: Option<String>,
}

/// Lending rules applied by the issue desk
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoanConfig {
    pub loan_period_days: u32,
    pub fine_per_day: Decimal,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SeedConfig {
    pub load_demo_data: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub loans: LoanConfig,
    pub seed: SeedConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // e.g. LIBRARY_DESK_SERVER__PORT=9000
            .add_source(
                Environment::with_prefix("LIBRARY_DESK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("auth.jwt_secret", env::var("JWT_SECRET").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-this-secret-in-production".to_string(),
            jwt_expiration_hours: 12,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
        }
    }
}

impl Default for LoanConfig {
    fn default() -> Self {
        Self {
            loan_period_days: LOAN_PERIOD_DAYS,
            fine_per_day: FINE_PER_DAY,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { load_demo_data: true }
    }
}
