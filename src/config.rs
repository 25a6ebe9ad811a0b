//! Configuration management for `aurorawx`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::AuroraError;
use crate::models::TemperatureConversion;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuroraConfig {
    /// Aurora imagery/weather API settings
    pub aurora: AuroraApiConfig,
    /// Zip code geocoding API settings
    pub zipcode: ZipCodeApiConfig,
    /// Image download settings
    pub downloads: DownloadConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Aurora API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuroraApiConfig {
    pub base_url: String,
    /// Version path segment appended to the base URL
    pub api_version: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Celsius to Fahrenheit conversion (`corrected` or `truncated`)
    pub temperature_conversion: TemperatureConversion,
    /// Fixed `tz` offset in seconds; the local clock is used when unset
    pub tz_offset_seconds: Option<i32>,
}

/// Zip code API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZipCodeApiConfig {
    pub base_url: String,
    pub api_version: String,
    /// zipcodeapi.com application key, required for zip lookups
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Directory downloaded images are written to
    pub directory: PathBuf,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_aurora_base_url() -> String {
    "https://api.auroras.live/".to_string()
}

fn default_aurora_api_version() -> String {
    "v1".to_string()
}

fn default_zipcode_base_url() -> String {
    "https://www.zipcodeapi.com/".to_string()
}

fn default_zipcode_api_version() -> String {
    "rest".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_download_directory() -> PathBuf {
    PathBuf::from("image_downloads")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for AuroraApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_aurora_base_url(),
            api_version: default_aurora_api_version(),
            timeout_seconds: default_timeout(),
            temperature_conversion: TemperatureConversion::default(),
            tz_offset_seconds: None,
        }
    }
}

impl Default for ZipCodeApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_zipcode_base_url(),
            api_version: default_zipcode_api_version(),
            api_key: None,
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            directory: default_download_directory(),
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

impl AuroraConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = &config_path {
            if !path.exists() {
                return Err(AuroraError::config(format!(
                    "Config file not found: {}",
                    path.display()
                ))
                .into());
            }
        }

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|p| p.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides such as AURORAWX_ZIPCODE__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("AURORAWX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AuroraConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aurorawx").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.aurora.base_url.is_empty() {
            self.aurora.base_url = default_aurora_base_url();
        }
        if self.aurora.api_version.is_empty() {
            self.aurora.api_version = default_aurora_api_version();
        }
        if self.aurora.timeout_seconds == 0 {
            self.aurora.timeout_seconds = default_timeout();
        }
        if self.zipcode.base_url.is_empty() {
            self.zipcode.base_url = default_zipcode_base_url();
        }
        if self.zipcode.api_version.is_empty() {
            self.zipcode.api_version = default_zipcode_api_version();
        }
        if self.zipcode.timeout_seconds == 0 {
            self.zipcode.timeout_seconds = default_timeout();
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
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        // Only zip lookups need a key, so a missing key is reported at lookup time
        if let Some(api_key) = &self.zipcode.api_key {
            if api_key.trim().is_empty() {
                return Err(AuroraError::config(
                    "Zip code API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }

            if api_key.contains('/') {
                return Err(AuroraError::config(
                    "Zip code API key appears to be invalid (contains '/'). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.aurora.timeout_seconds > 300 {
            return Err(AuroraError::config("Aurora API timeout cannot exceed 300 seconds").into());
        }

        if self.zipcode.timeout_seconds > 300 {
            return Err(
                AuroraError::config("Zip code API timeout cannot exceed 300 seconds").into(),
            );
        }

        if let Some(offset) = self.aurora.tz_offset_seconds {
            if offset.abs() >= 24 * 60 * 60 {
                return Err(AuroraError::config(format!(
                    "Timezone offset must be less than one day, got {offset} seconds"
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AuroraError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AuroraError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Aurora", &self.aurora.base_url),
            ("Zip code", &self.zipcode.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AuroraError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.downloads.directory.as_os_str().is_empty() {
            return Err(AuroraError::config("Download directory cannot be empty").into());
        }

        Ok(())
    }
}
