// Centralized configuration for the assessment engine
// Load ALL env vars ONCE on first use

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

use crate::services::simulation::SimulationMode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Global engine configuration loaded once
pub static CONFIG: Lazy<EngineConfig> = Lazy::new(|| {
    dotenv::dotenv().ok();

    EngineConfig::from_env().unwrap_or_else(|e| {
        warn!("Invalid engine configuration, using defaults: {}", e);
        EngineConfig::default()
    })
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub environment: Environment,
    pub rust_log: String,

    // Engine
    pub simulation: SimulationMode,
    pub history_capacity: usize,
    pub rules_path: Option<PathBuf>,

    // Features
    pub log_assessments: bool,
}

/// Environment type
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl From<&str> for Environment {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "test" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

pub const DEFAULT_LOG_FILTER: &str = "scamguard_core=info";
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            rust_log: DEFAULT_LOG_FILTER.to_string(),
            simulation: SimulationMode::Hashed,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            rules_path: None,
            log_assessments: true,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing keys take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let parse_bool_or_default = |key: &str, default: &str| -> Result<bool, ConfigError> {
            match get_or_default(key, default).to_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                other => Err(ConfigError::InvalidValue(
                    key.to_string(),
                    format!("'{}' is not a boolean", other),
                )),
            }
        };

        let environment = Environment::from(get_or_default("ENVIRONMENT", "development").as_str());
        let rust_log = get_or_default("RUST_LOG", DEFAULT_LOG_FILTER);
        let simulation: SimulationMode = get_or_default("SCAMGUARD_SIMULATION", "hashed").parse()?;

        let history_capacity: usize = get_or_default("SCAMGUARD_HISTORY_CAPACITY", "5")
            .parse()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "SCAMGUARD_HISTORY_CAPACITY".to_string(),
                    "not a valid usize".to_string(),
                )
            })?;
        if history_capacity == 0 {
            return Err(ConfigError::InvalidValue(
                "SCAMGUARD_HISTORY_CAPACITY".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let rules_path = lookup("SCAMGUARD_RULES_PATH")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            rust_log,
            simulation,
            history_capacity,
            rules_path,
            log_assessments: parse_bool_or_default("SCAMGUARD_LOG_ASSESSMENTS", "true")?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

/// Get the global configuration
pub fn config() -> &'static EngineConfig {
    &CONFIG
}
