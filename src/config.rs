//! Configuration management for the wetbulb application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WetBulbError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Cities tracked when no other list is given. Order only affects display.
pub const DEFAULT_CITIES: [&str; 10] = [
    "Mumbai",
    "Chennai",
    "Kolkata",
    "Kochi",
    "Visakhapatnam",
    "Goa",
    "Mangalore",
    "Puducherry",
    "Kozhikode",
    "Porbandar",
];

/// Root configuration structure for the wetbulb application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WetBulbConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Tracked cities and alerting
    #[serde(default)]
    pub cities: CitiesConfig,
    /// Scatter plot output
    #[serde(default)]
    pub plot: PlotConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,
    /// Base URL for weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Tracked cities and alert settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitiesConfig {
    /// Initial list of tracked cities
    #[serde(default = "default_cities")]
    pub defaults: Vec<String>,
    /// Wet-bulb temperature above which a city is flagged, in Celsius
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,
    /// Number of cities in the ranking shown when nothing is flagged
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

/// Scatter plot output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// SVG output path
    #[serde(default = "default_plot_output")]
    pub output: PathBuf,
    /// Image width in pixels
    #[serde(default = "default_plot_width")]
    pub width: u32,
    /// Image height in pixels
    #[serde(default = "default_plot_height")]
    pub height: u32,
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
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_cities() -> Vec<String> {
    DEFAULT_CITIES.iter().map(ToString::to_string).collect()
}

fn default_alert_threshold() -> f64 {
    crate::wet_bulb::ALERT_THRESHOLD_C
}

fn default_top_n() -> usize {
    3
}

fn default_plot_output() -> PathBuf {
    PathBuf::from("wet_bulb.svg")
}

fn default_plot_width() -> u32 {
    1000
}

fn default_plot_height() -> u32 {
    600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for CitiesConfig {
    fn default() -> Self {
        Self {
            defaults: default_cities(),
            alert_threshold: default_alert_threshold(),
            top_n: default_top_n(),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            output: default_plot_output(),
            width: default_plot_width(),
            height: default_plot_height(),
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

impl WetBulbConfig {
    /// Load configuration from a file (or the default location) and `WETBULB_` variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        Self::load_with_env(config_path, None)
    }

    /// `env` replaces the process environment when given
    fn load_with_env(
        config_path: Option<PathBuf>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WETBULB_WEATHER__API_KEY, WETBULB_CITIES__DEFAULTS=Mumbai,Goa, ...
        builder = builder.add_source(
            Environment::with_prefix("WETBULB")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cities.defaults")
                .try_parsing(true)
                .source(env),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WetBulbConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wetbulb").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.cities.defaults.is_empty() {
            self.cities.defaults = default_cities();
        }
        if self.cities.top_n == 0 {
            self.cities.top_n = default_top_n();
        }
        if self.plot.output.as_os_str().is_empty() {
            self.plot.output = default_plot_output();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> std::result::Result<(), WetBulbError> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the API key when one is provided
    pub fn validate_api_key(&self) -> std::result::Result<(), WetBulbError> {
        if let Some(api_key) = &self.weather.api_key {
            if api_key.trim().is_empty() {
                return Err(WetBulbError::config(
                    "Weather API key cannot be empty if provided. Either remove it or provide a valid key",
                ));
            }

            if api_key.len() < 8 || api_key.len() > 100 {
                return Err(WetBulbError::config(
                    "Weather API key appears to be invalid (unexpected length)",
                ));
            }
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> std::result::Result<(), WetBulbError> {
        if self.weather.timeout_seconds > 300 {
            return Err(WetBulbError::config(
                "Weather API timeout cannot exceed 300 seconds",
            ));
        }

        if !self.cities.alert_threshold.is_finite() {
            return Err(WetBulbError::config("Alert threshold must be a finite number"));
        }

        if self.cities.top_n > 50 {
            return Err(WetBulbError::config("Ranking size cannot exceed 50"));
        }

        for (name, value) in [("width", self.plot.width), ("height", self.plot.height)] {
            if !(200..=4000).contains(&value) {
                return Err(WetBulbError::config(format!(
                    "Plot {name} must be between 200 and 4000 pixels, got: {value}"
                )));
            }
        }

        Ok(())
    }

    fn validate_string_values(&self) -> std::result::Result<(), WetBulbError> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WetBulbError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WetBulbError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(WetBulbError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            ));
        }

        if self.cities.defaults.iter().any(|c| c.trim().is_empty()) {
            return Err(WetBulbError::config("Default city names cannot be empty"));
        }

        Ok(())
    }
}
