//! Configuration management for `kweather`
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings. The loaded
//! configuration is treated as read-only for the lifetime of the process.

use crate::KWeatherError;
use anyhow::{Context, Result};
use chrono::Locale;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `kweather`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KWeatherConfig {
    /// Open-Meteo endpoints
    #[serde(default)]
    pub api: ApiConfig,
    /// Static file server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Presentation settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Fixed device position used by the "use my location" action
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather and geocoding API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Place-search endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Static file server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory whose files are served
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// City loaded when the widget starts
    #[serde(default = "default_city")]
    pub default_city: String,
    /// Locale for day labels, e.g. `en_US` or `de_DE`
    #[serde(default = "default_locale")]
    pub locale: String,
}

/// Device position. Leaving both fields unset means geolocation is unsupported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeolocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
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
fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_root() -> PathBuf {
    PathBuf::from("public")
}

fn default_city() -> String {
    "New York".to_string()
}

fn default_locale() -> String {
    "en_US".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            root: default_root(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            locale: default_locale(),
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

impl DisplayConfig {
    /// Parsed locale for date labels
    pub fn locale(&self) -> crate::Result<Locale> {
        Locale::try_from(self.locale.as_str())
            .map_err(|_| KWeatherError::config(format!("Unknown locale '{}'", self.locale)))
    }
}

impl KWeatherConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            tracing::debug!("Reading config file {}", config_file.display());
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // KWEATHER_SERVER__PORT=9000 style overrides
        builder = builder.add_source(
            Environment::with_prefix("KWEATHER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: KWeatherConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kweather").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.api.geocoding_url.is_empty() {
            self.api.geocoding_url = default_geocoding_url();
        }
        if self.api.forecast_url.is_empty() {
            self.api.forecast_url = default_forecast_url();
        }
        if self.api.timeout_seconds == 0 {
            self.api.timeout_seconds = default_timeout();
        }
        if self.display.default_city.trim().is_empty() {
            self.display.default_city = default_city();
        }
        if self.display.locale.is_empty() {
            self.display.locale = default_locale();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        self.validate_urls()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_geolocation()?;
        Ok(())
    }

    fn validate_urls(&self) -> crate::Result<()> {
        for (name, url) in [
            ("geocoding", &self.api.geocoding_url),
            ("forecast", &self.api.forecast_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(KWeatherError::config(format!(
                    "The {name} URL must be a valid HTTP or HTTPS URL"
                )));
            }
        }
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> crate::Result<()> {
        if self.api.timeout_seconds > 300 {
            return Err(KWeatherError::config(
                "API timeout cannot exceed 300 seconds",
            ));
        }
        Ok(())
    }

    fn validate_string_values(&self) -> crate::Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(KWeatherError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(KWeatherError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        self.display.locale()?;
        Ok(())
    }

    fn validate_geolocation(&self) -> crate::Result<()> {
        match (self.geolocation.latitude, self.geolocation.longitude) {
            (None, None) => Ok(()),
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    return Err(KWeatherError::config(format!(
                        "Latitude must be between -90 and 90, got: {lat}"
                    )));
                }
                if !(-180.0..=180.0).contains(&lon) {
                    return Err(KWeatherError::config(format!(
                        "Longitude must be between -180 and 180, got: {lon}"
                    )));
                }
                Ok(())
            }
            _ => Err(KWeatherError::config(
                "Geolocation needs both latitude and longitude",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = KWeatherConfig::default();
        assert_eq!(
            config.api.forecast_url,
            "https://api.open-meteo.com/v1/forecast"
        );
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.display.default_city, "New York");
        assert_eq!(config.logging.level, "info");
        assert!(config.geolocation.latitude.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = KWeatherConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = KWeatherConfig::default();
        config.api.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = KWeatherConfig::default();
        config.api.geocoding_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_half_position() {
        let mut config = KWeatherConfig::default();
        config.geolocation.latitude = Some(40.0);
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("both latitude"));

        config.geolocation.longitude = Some(-200.0);
        assert!(config.validate().is_err());

        config.geolocation.longitude = Some(-74.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_locale_rejected() {
        let mut config = KWeatherConfig::default();
        config.display.locale = "xx_NOPE".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = KWeatherConfig::default();
        config.display.default_city = "   ".to_string();
        config.api.timeout_seconds = 0;
        config.apply_defaults();
        assert_eq!(config.display.default_city, "New York");
        assert_eq!(config.api.timeout_seconds, 30);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[display]\ndefault_city = \"Chicago\"\n\n[server]\nport = 9001\n\n[geolocation]\nlatitude = 41.88\nlongitude = -87.63"
        )
        .unwrap();

        let config = KWeatherConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.display.default_city, "Chicago");
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.geolocation.latitude, Some(41.88));
        // untouched sections keep their defaults
        assert_eq!(config.logging.format, "pretty");
    }
}
