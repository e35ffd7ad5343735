//! Configuration management for the weatherfeed application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings. The resulting
//! [`FeedConfig`] is passed explicitly to the fetch and extract stages.

use crate::FeedError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the weatherfeed application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Weather feed location settings
    #[serde(default)]
    pub feed: FeedSettings,
    /// Icon download and cache settings
    #[serde(default)]
    pub icons: IconSettings,
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Temperature units selected through the location code suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Celsius,
    Fahrenheit,
}

impl Units {
    /// Suffix the feed expects after the location id, e.g. `_c`
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Units::Celsius => "_c",
            Units::Fahrenheit => "_f",
        }
    }
}

/// Weather feed settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSettings {
    /// Base URL the location code and `.xml` are appended to
    #[serde(default = "default_weather_url")]
    pub weather_url: String,
    /// Location code, optionally carrying a units suffix (`UKXX0718_c`)
    #[serde(default = "default_location")]
    pub location: String,
    /// Overrides the units suffix of `location` when set
    #[serde(default)]
    pub units: Option<Units>,
}

/// Icon settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconSettings {
    /// Base URL icons are downloaded from as `<base_url>/<code>.gif`
    #[serde(default = "default_icons_base_url")]
    pub base_url: String,
    /// Existing, writable directory icons are cached in
    #[serde(default = "default_images_path")]
    pub images_path: PathBuf,
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds; requests wait indefinitely when unset
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_weather_url() -> String {
    "http://xml.weather.yahoo.com/forecastrss/".to_string()
}

fn default_location() -> String {
    "UKXX0718_c".to_string()
}

fn default_icons_base_url() -> String {
    "http://l.yimg.com/us.yimg.com/i/us/we/52".to_string()
}

fn default_images_path() -> PathBuf {
    PathBuf::from("./images")
}

fn default_user_agent() -> String {
    format!("weatherfeed/{}", crate::VERSION)
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            weather_url: default_weather_url(),
            location: default_location(),
            units: None,
        }
    }
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            base_url: default_icons_base_url(),
            images_path: default_images_path(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl FeedSettings {
    /// Location code as sent to the feed, with the configured units applied
    #[must_use]
    pub fn location_code(&self) -> String {
        match self.units {
            None => self.location.clone(),
            Some(units) => {
                let id = [Units::Celsius, Units::Fahrenheit]
                    .iter()
                    .find_map(|u| self.location.strip_suffix(u.suffix()))
                    .unwrap_or(&self.location);
                format!("{id}{}", units.suffix())
            }
        }
    }
}

impl FeedConfig {
    /// Load configuration from `config_path`, or the default location when
    /// `None`, then apply `WEATHERFEED_` environment overrides
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.clone().or_else(Self::get_config_path);

        if let Some(config_file) = config_file {
            // An explicitly named file must exist; the default location is optional
            if config_path.is_some() || config_file.exists() {
                builder = builder.add_source(
                    File::from(config_file.clone())
                        .required(config_path.is_some())
                        .format(config::FileFormat::Toml),
                );
            }
        }

        // Environment overrides, e.g. WEATHERFEED_FEED__LOCATION
        builder = builder.add_source(
            Environment::with_prefix("WEATHERFEED")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: FeedConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherfeed").join("config.toml"))
    }

    /// Apply default values to fields left empty
    pub fn apply_defaults(&mut self) {
        if self.feed.weather_url.is_empty() {
            self.feed.weather_url = default_weather_url();
        }
        if self.icons.base_url.is_empty() {
            self.icons.base_url = default_icons_base_url();
        }
        if self.icons.images_path.as_os_str().is_empty() {
            self.icons.images_path = default_images_path();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_urls()?;
        self.validate_location()?;
        self.validate_http()?;
        self.validate_logging()?;
        Ok(())
    }

    /// URL of the feed document for the configured location
    #[must_use]
    pub fn feed_url(&self) -> String {
        crate::fetch::feed_url(&self.feed.weather_url, &self.feed.location_code())
    }

    fn validate_urls(&self) -> Result<()> {
        for (name, url) in [
            ("Weather feed URL", &self.feed.weather_url),
            ("Icon base URL", &self.icons.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(FeedError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }
        Ok(())
    }

    fn validate_location(&self) -> Result<()> {
        if self.feed.location.trim().is_empty() {
            return Err(FeedError::config("Location code cannot be empty").into());
        }
        Ok(())
    }

    fn validate_http(&self) -> Result<()> {
        if let Some(timeout) = self.http.timeout_seconds {
            if timeout == 0 || timeout > 300 {
                return Err(FeedError::config(
                    "HTTP timeout must be between 1 and 300 seconds",
                )
                .into());
            }
        }
        Ok(())
    }

    fn validate_logging(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(FeedError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ))
            .into());
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(FeedError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                LOG_FORMATS.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
