use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{info, warn};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub location: LocationConfig,
    pub geocoding: GeocodingConfig,
    pub ui: UiConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LocationConfig {
    pub high_accuracy: bool,      // IP fixes are coarse; kept for parity with device APIs
    pub timeout_seconds: u64,     // Give up on the position request after this long
    pub maximum_age_seconds: u64, // Cached fixes younger than this are acceptable
    pub secure_transport: bool,   // When false in a debug build, a simulated fix is used
    pub simulated_city: String,   // What the simulated fix resolves to
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GeocodingConfig {
    pub api_key: String, // The OPENCAGE_API_KEY environment variable overrides this
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            location: LocationConfig {
                high_accuracy: false,
                timeout_seconds: 10,
                maximum_age_seconds: 300,
                secure_transport: true,
                simulated_city: "Dubai".to_string(),
            },
            geocoding: GeocodingConfig {
                api_key: String::new(),
            },
            ui: UiConfig { tick_rate_ms: 150 },
        }
    }
}

impl Config {
    /// Loads config.toml from the root directory.
    /// If it doesn't exist, creates a default one.
    pub fn load() -> Self {
        let config_path = "config.toml";

        if let Ok(content) = fs::read_to_string(config_path) {
            match toml::from_str::<Config>(&content) {
                Ok(config) => return config.with_env_overrides(),
                Err(e) => warn!("Failed to parse config.toml: {}. Using defaults.", e),
            }
        }

        let default_config = Config::default();

        // Save default config to disk for the user to edit later
        let toml_string = toml::to_string_pretty(&default_config).unwrap();
        if fs::write(config_path, toml_string).is_err() {
            warn!("Could not write default config.toml to disk.");
        }

        info!("Loaded default configuration.");
        default_config.with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("OPENCAGE_API_KEY") {
            if !key.is_empty() {
                self.geocoding.api_key = key;
            }
        }
        self
    }
}
