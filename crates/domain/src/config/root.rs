use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::database::{DatabaseConfig, MAX_BACKOFF_FACTOR, MIN_BACKOFF_FACTOR};
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::maintenance::MaintenanceConfig;

const LOCAL_CONFIG: &str = "acumba-cache.toml";
const SYSTEM_CONFIG: &str = "/etc/acumba-cache/config.toml";

/// Main configuration structure for the response cache
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// SQLite file, pool sizes and lock retry policy
    #[serde(default)]
    pub database: DatabaseConfig,

    /// TTL mapping per endpoint
    #[serde(default)]
    pub cache: CacheConfig,

    /// Capacity limits and background job intervals
    #[serde(default)]
    pub maintenance: MaintenanceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. acumba-cache.toml in current directory
    /// 3. /etc/acumba-cache/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG).exists() {
            Self::from_file(LOCAL_CONFIG)?
        } else if std::path::Path::new(SYSTEM_CONFIG).exists() {
            Self::from_file(SYSTEM_CONFIG)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Database path cannot be empty".to_string(),
            ));
        }

        if self.database.write_pool_max_connections == 0
            || self.database.read_pool_max_connections == 0
        {
            return Err(ConfigError::Validation(
                "Pool sizes must be at least 1".to_string(),
            ));
        }

        let factor = self.database.retry_backoff_factor;
        if !(MIN_BACKOFF_FACTOR..=MAX_BACKOFF_FACTOR).contains(&factor) {
            return Err(ConfigError::Validation(format!(
                "retry_backoff_factor must be between {} and {}, got {}",
                MIN_BACKOFF_FACTOR, MAX_BACKOFF_FACTOR, factor
            )));
        }

        let m = &self.maintenance;
        if m.max_entries_per_endpoint == 0 || m.max_total_entries == 0 {
            return Err(ConfigError::Validation(
                "Entry limits must be greater than 0".to_string(),
            ));
        }

        if m.cleanup_interval_secs == 0
            || m.optimize_interval_secs == 0
            || m.stats_retention_interval_secs == 0
        {
            return Err(ConfigError::Validation(
                "Maintenance intervals must be greater than 0".to_string(),
            ));
        }

        if let Some(endpoint) = self
            .cache
            .endpoint_ttls
            .keys()
            .find(|name| name.trim().is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "Invalid endpoint name in endpoint_ttls: '{}'",
                endpoint
            )));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}
