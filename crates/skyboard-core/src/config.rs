use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Environment variable that points at an alternate config file.
pub const CONFIG_PATH_ENV: &str = "SKYBOARD_CONFIG";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Weather API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Report contents and refresh cadence
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Indicator timing
    #[serde(default)]
    pub ui: UiConfig,

    /// Locations shown on the dashboard, in display order
    #[serde(default = "default_locations")]
    pub locations: Vec<LocationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the weather API
    pub origin: String,

    /// Sent with every request; the API rejects anonymous clients
    pub user_agent: String,

    /// Per-request timeout. Unset means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            origin: "https://api.weather.gov".to_string(),
            user_agent: concat!("skyboard/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base refresh interval in minutes (location i first refreshes after (i + 1) intervals)
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u32,

    /// How many nearby stations to request per location
    #[serde(default = "default_station_limit")]
    pub station_limit: u32,

    /// Fetch active alerts for each location
    #[serde(default = "default_true")]
    pub alerts: bool,

    /// Text products fetched from each location's forecast office
    #[serde(default = "default_product_types")]
    pub product_types: Vec<String>,

    /// Drop hazardous weather outlooks that report a quiet first day
    #[serde(default = "default_true")]
    pub hide_quiet_outlooks: bool,

    /// Office whose alerts administrative message is read at startup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_message_office: Option<String>,
}

fn default_refresh_minutes() -> u32 {
    5
}

fn default_station_limit() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_product_types() -> Vec<String> {
    vec!["HWO".to_string()]
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            refresh_minutes: default_refresh_minutes(),
            station_limit: default_station_limit(),
            alerts: true,
            product_types: default_product_types(),
            hide_quiet_outlooks: true,
            admin_message_office: None,
        }
    }
}

impl WeatherConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.refresh_minutes) * 60)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long the progress bar stays full before resetting
    #[serde(default = "default_progress_hold_ms")]
    pub progress_hold_ms: u64,
}

fn default_progress_hold_ms() -> u64 {
    500
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            progress_hold_ms: default_progress_hold_ms(),
        }
    }
}

impl UiConfig {
    pub fn progress_hold(&self) -> Duration {
        Duration::from_millis(self.progress_hold_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Display label; falls back to the API's place name when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationConfig {
    pub fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: Some(name.to_string()),
            latitude,
            longitude,
        }
    }
}

fn default_locations() -> Vec<LocationConfig> {
    vec![
        LocationConfig::new("Horseheads, NY", 42.1762, -76.8358),
        LocationConfig::new("Waynesboro, VA", 38.0762, -78.9125),
        LocationConfig::new("Yorktown, VA", 37.2367, -76.5065),
        LocationConfig::new("Waverly, IA", 42.7382, -92.4781),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            weather: WeatherConfig::default(),
            ui: UiConfig::default(),
            locations: default_locations(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, writing defaults there if missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            tracing::info!("Wrote default config to {}", config_path.display());
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged. Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.api.origin, "api.origin", &mut result);

        if self.api.user_agent.trim().is_empty() {
            result.add_error("api.user_agent", "User agent must not be empty");
        }

        if self.api.timeout_secs == Some(0) {
            result.add_error("api.timeout_secs", "Timeout must be greater than 0");
        }

        if self.weather.refresh_minutes == 0 {
            result.add_error(
                "weather.refresh_minutes",
                "Refresh interval must be greater than 0",
            );
        } else if self.weather.refresh_minutes > 1440 {
            result.add_warning(
                "weather.refresh_minutes",
                "Weather refresh interval is more than 24 hours",
            );
        }

        if self.weather.station_limit == 0 {
            result.add_error(
                "weather.station_limit",
                "At least one station must be requested",
            );
        }

        if self.locations.is_empty() {
            result.add_warning("locations", "No locations configured - nothing to show");
        }

        for (i, location) in self.locations.iter().enumerate() {
            if !(-90.0..=90.0).contains(&location.latitude) {
                result.add_error(
                    format!("locations[{}].latitude", i),
                    format!("Latitude out of range: {}", location.latitude),
                );
            }
            if !(-180.0..=180.0).contains(&location.longitude) {
                result.add_error(
                    format!("locations[{}].longitude", i),
                    format!("Longitude out of range: {}", location.longitude),
                );
            }
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skyboard");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_default_locations() {
        let config = Config::default();
        assert_eq!(config.locations.len(), 4);
        assert_eq!(config.locations[0].name.as_deref(), Some("Horseheads, NY"));
        assert_eq!(config.locations[3].longitude, -92.4781);
        assert_eq!(config.weather.refresh_interval(), Duration::from_secs(300));
        assert_eq!(config.ui.progress_hold(), Duration::from_millis(500));
        assert!(config.api.timeout().is_none());
    }

    #[test]
    fn test_invalid_origin() {
        let mut config = Config::default();
        config.api.origin = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "api.origin"));
    }

    #[test]
    fn test_invalid_origin_scheme() {
        let mut config = Config::default();
        config.api.origin = "ftp://api.weather.gov".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_refresh_is_error() {
        let mut config = Config::default();
        config.weather.refresh_minutes = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.refresh_minutes"));
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let mut config = Config::default();
        config.locations.push(LocationConfig {
            name: None,
            latitude: 91.0,
            longitude: -200.0,
        });
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "locations[4].latitude"));
        assert!(result.errors.iter().any(|e| e.field == "locations[4].longitude"));
    }

    #[test]
    fn test_no_locations_is_warning() {
        let mut config = Config::default();
        config.locations.clear();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "locations"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert_eq!(summary, "field1: error1; field2: error2");
    }

    #[test]
    fn test_load_from_missing_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.locations, Config::default().locations);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.weather.product_types, vec!["HWO".to_string()]);
    }

    #[test]
    fn test_written_file_has_only_live_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let table: toml::Table = toml::from_str(&contents).unwrap();
        let mut keys: Vec<&str> = table.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["api", "locations", "ui", "weather"]);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[weather]
refresh_minutes = 10

[[locations]]
latitude = 40.0
longitude = -75.0
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.weather.refresh_minutes, 10);
        assert_eq!(config.weather.station_limit, 1);
        assert!(config.weather.alerts);
        assert_eq!(config.api.origin, "https://api.weather.gov");
        assert_eq!(config.locations.len(), 1);
        assert!(config.locations[0].name.is_none());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "locations = 3").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
