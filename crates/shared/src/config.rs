//! Application configuration management.

use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Allocation defaults.
    #[serde(default)]
    pub allocation: AllocationConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Allocation defaults applied when the caller does not override them.
#[derive(Debug, Clone, Deserialize)]
pub struct AllocationConfig {
    /// Truncate every split to whole units.
    #[serde(default = "default_whole_units")]
    pub whole_units: bool,
    /// Treat amounts as major units of this currency.
    #[serde(default)]
    pub currency: Option<Currency>,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            whole_units: default_whole_units(),
            currency: None,
        }
    }
}

fn default_whole_units() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "apportion=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("APPORTION").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
