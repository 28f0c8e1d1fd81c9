use crate::error::{env_error, validation_error, DashResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Default settings file location
pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.toml";

/// Default calendar auto-refresh interval in seconds
pub const DEFAULT_REFRESH_INTERVAL: u64 = 60;

/// Default location of the component enable flags
pub const DEFAULT_COMPONENTS_PATH: &str = "config/components.toml";

/// EmailJS credentials. Each one is optional so that a missing value can be
/// reported when a send is attempted rather than at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailConfig {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
}

/// Main configuration structure for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Display name used when none has been saved yet
    pub display_name: Option<String>,
    /// City used when geolocation is unavailable
    pub weather_location: Option<String>,
    /// Optional coordinates standing in for a geolocation fix
    pub geo_latitude: Option<f64>,
    pub geo_longitude: Option<f64>,
    /// Where the display name and theme are persisted
    pub settings_path: String,
    /// Theme forced at startup ("light" or "dark")
    pub theme: Option<String>,
    /// Calendar auto-refresh interval in seconds
    pub calendar_refresh_interval: u64,
    /// Connect the calendar on startup
    pub calendar_auto_connect: bool,
    /// Overrides the artificial latency of every mock provider
    pub mock_latency_ms: Option<u64>,
    /// Email provider credentials
    pub email: EmailConfig,
    /// Recipient for the summary sent on startup
    pub summary_email: Option<String>,
    /// Map of component names to their enabled status
    pub components: HashMap<String, bool>,
    /// Where the component enable flags are persisted
    pub components_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_name: None,
            weather_location: None,
            geo_latitude: None,
            geo_longitude: None,
            settings_path: DEFAULT_SETTINGS_PATH.to_string(),
            theme: None,
            calendar_refresh_interval: DEFAULT_REFRESH_INTERVAL,
            calendar_auto_connect: true,
            mock_latency_ms: None,
            email: EmailConfig::default(),
            summary_email: None,
            components: default_components(),
            components_path: DEFAULT_COMPONENTS_PATH.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> DashResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let settings_path =
            optional_var("SETTINGS_PATH").unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());

        let calendar_refresh_interval =
            parse_var("CALENDAR_REFRESH_INTERVAL")?.unwrap_or(DEFAULT_REFRESH_INTERVAL);
        if calendar_refresh_interval == 0 {
            return Err(env_error("CALENDAR_REFRESH_INTERVAL must be positive"));
        }

        let calendar_auto_connect = parse_var("CALENDAR_AUTO_CONNECT")?.unwrap_or(true);

        let email = EmailConfig {
            service_id: optional_var("EMAILJS_SERVICE_ID"),
            template_id: optional_var("EMAILJS_TEMPLATE_ID"),
            public_key: optional_var("EMAILJS_PUBLIC_KEY"),
        };

        let components_path = optional_var("COMPONENTS_PATH")
            .unwrap_or_else(|| DEFAULT_COMPONENTS_PATH.to_string());

        // Initialize default components
        let mut components = default_components();

        // Load components configuration from file if it exists
        if let Ok(content) = fs::read_to_string(&components_path) {
            if let Ok(file_components) = toml::from_str::<HashMap<String, bool>>(&content) {
                // Merge with defaults
                for (key, value) in file_components {
                    components.insert(key, value);
                }
            }
        }

        Ok(Config {
            display_name: optional_var("DISPLAY_NAME"),
            weather_location: optional_var("WEATHER_LOCATION"),
            geo_latitude: parse_var("GEO_LATITUDE")?,
            geo_longitude: parse_var("GEO_LONGITUDE")?,
            settings_path,
            theme: optional_var("THEME"),
            calendar_refresh_interval,
            calendar_auto_connect,
            mock_latency_ms: parse_var("MOCK_LATENCY_MS")?,
            email,
            summary_email: optional_var("SUMMARY_EMAIL"),
            components,
            components_path,
        })
    }

    /// Check if a component is enabled
    pub fn is_component_enabled(&self, name: &str) -> bool {
        *self.components.get(name).unwrap_or(&false)
    }

    /// Update component enabled status. Takes effect on the next start.
    pub fn set_component_enabled(&mut self, name: &str, enabled: bool) -> DashResult<()> {
        if !default_components().contains_key(name) {
            return Err(validation_error(&format!("Unknown widget: {}", name)));
        }
        self.components.insert(name.to_string(), enabled);
        self.save_components()
    }

    /// Latency for a mock provider, honouring the global override
    pub fn mock_latency(&self, default_ms: u64) -> Duration {
        Duration::from_millis(self.mock_latency_ms.unwrap_or(default_ms))
    }

    /// Calendar refresh interval as a Duration
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.calendar_refresh_interval)
    }

    /// Save component configuration to file
    fn save_components(&self) -> DashResult<()> {
        // Create config directory if it doesn't exist
        if let Some(dir) = Path::new(&self.components_path).parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let toml_str = toml::to_string(&self.components)?;
        fs::write(&self.components_path, toml_str)?;

        Ok(())
    }
}

fn default_components() -> HashMap<String, bool> {
    let mut components = HashMap::new();
    components.insert("weather".to_string(), true);
    components.insert("quotes".to_string(), true);
    components.insert("calendar".to_string(), true);
    components
}

/// Read an environment variable, treating blank values as unset
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse an optional environment variable
fn parse_var<T: FromStr>(name: &str) -> DashResult<Option<T>> {
    match optional_var(name) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| env_error(&format!("Invalid {} format", name))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_components_enabled() {
        let config = Config::default();
        assert!(config.is_component_enabled("weather"));
        assert!(config.is_component_enabled("quotes"));
        assert!(config.is_component_enabled("calendar"));
        assert!(!config.is_component_enabled("unknown"));
    }

    #[test]
    fn test_mock_latency_override() {
        let mut config = Config::default();
        assert_eq!(config.mock_latency(800), Duration::from_millis(800));

        config.mock_latency_ms = Some(0);
        assert_eq!(config.mock_latency(800), Duration::ZERO);
    }

    #[test]
    fn test_refresh_interval() {
        let config = Config::default();
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_component_toggle_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config {
            components_path: dir
                .path()
                .join("config/components.toml")
                .to_string_lossy()
                .into_owned(),
            ..Config::default()
        };

        config.set_component_enabled("quotes", false).unwrap();
        assert!(!config.is_component_enabled("quotes"));

        let saved = fs::read_to_string(&config.components_path).unwrap();
        let flags: HashMap<String, bool> = toml::from_str(&saved).unwrap();
        assert_eq!(flags.get("quotes"), Some(&false));
        assert_eq!(flags.get("weather"), Some(&true));
    }

    #[test]
    fn test_unknown_component_is_rejected() {
        let mut config = Config::default();
        assert!(config.set_component_enabled("stocks", true).is_err());
        assert!(!config.components.contains_key("stocks"));
    }
}
