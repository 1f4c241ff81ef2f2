use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::StarFilterRange;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub filter: FilterSettings,
    #[serde(default)]
    pub places: PlacesSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_seed_path")]
    pub seed_path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            seed_path: default_seed_path(),
        }
    }
}

fn default_seed_path() -> String { "data/restaurants.json".to_string() }

/// Initial star filter of a new session
#[derive(Debug, Clone, Deserialize)]
pub struct FilterSettings {
    #[serde(default = "default_min_stars")]
    pub min_stars: f64,
    #[serde(default = "default_max_stars")]
    pub max_stars: f64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            min_stars: default_min_stars(),
            max_stars: default_max_stars(),
        }
    }
}

impl FilterSettings {
    pub fn star_range(&self) -> StarFilterRange {
        StarFilterRange::new(self.min_stars, self.max_stars)
    }
}

fn default_min_stars() -> f64 { 0.0 }
fn default_max_stars() -> f64 { 5.0 }

/// Nearby search and geocoding provider
///
/// Lookups are disabled when no API key is configured.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacesSettings {
    #[serde(default = "default_places_endpoint")]
    pub endpoint: String,
    pub api_key: Option<String>,
    #[serde(default = "default_places_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_radius")]
    pub max_radius_m: f64,
    pub language: Option<String>,
}

impl Default for PlacesSettings {
    fn default() -> Self {
        Self {
            endpoint: default_places_endpoint(),
            api_key: None,
            timeout_secs: default_places_timeout(),
            max_radius_m: default_max_radius(),
            language: None,
        }
    }
}

fn default_places_endpoint() -> String { "https://maps.googleapis.com/maps/api".to_string() }
fn default_places_timeout() -> u64 { 10 }
fn default_max_radius() -> f64 { 5_000.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with RESTO_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., RESTO__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("RESTO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("RESTO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Pick up the provider key from the conventional variable when the
/// prefixed one is not set
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    if env::var("RESTO__PLACES__API_KEY").is_ok() {
        return Ok(settings);
    }

    match env::var("GOOGLE_MAPS_API_KEY") {
        Ok(api_key) if !api_key.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("places.api_key", api_key)?
            .build(),
        _ => Ok(settings),
    }
}
