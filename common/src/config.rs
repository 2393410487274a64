// Configuration management with layered configuration (file, env)

use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Main settings structure containing all configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub menu: MenuSourceConfig,
    pub scheduler: SchedulerConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSourceConfig {
    /// Fixed HTTP(S) location of the published sheet.
    pub url: String,
    #[serde(default = "default_fetch_timeout_seconds")]
    pub fetch_timeout_seconds: u64,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// IANA timezone used to compute "today". Unset means the system
    /// local zone.
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_refresh_interval_seconds")]
    pub refresh_interval_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub metrics_port: u16,
    pub tracing_endpoint: Option<String>,
}

fn default_fetch_timeout_seconds() -> u64 {
    30
}

fn default_delimiter() -> char {
    ','
}

fn default_refresh_interval_seconds() -> u64 {
    300
}

impl Settings {
    /// Load configuration with layered precedence: defaults → file → env
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default configuration
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Add local configuration (not committed to git)
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // Add environment-specific configuration
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), String> {
        if self.menu.url.is_empty() {
            return Err("Menu URL cannot be empty".to_string());
        }
        if self.menu.fetch_timeout_seconds == 0 {
            return Err("Fetch timeout must be greater than 0".to_string());
        }
        if !self.menu.delimiter.is_ascii() {
            return Err("Delimiter must be a single ASCII character".to_string());
        }
        if let Some(tz) = &self.menu.timezone {
            if Tz::from_str(tz).is_err() {
                return Err(format!("Unknown timezone: {}", tz));
            }
        }
        if self.scheduler.refresh_interval_seconds == 0 {
            return Err("Refresh interval must be greater than 0".to_string());
        }
        if self.observability.log_level.is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }

    /// The configured timezone, parsed; `None` means the system local zone.
    pub fn menu_timezone(&self) -> Option<Tz> {
        self.menu
            .timezone
            .as_deref()
            .and_then(|tz| Tz::from_str(tz).ok())
    }
}
