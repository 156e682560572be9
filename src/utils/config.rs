use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::predictors::sighting::SightingCriteria;

pub const CONFIG_PATH_ENV: &str = "ISS_NOTIFY_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "notifier.toml";
const ENV_PREFIX: &str = "ISS_NOTIFY_";

/// Observer location, provider credentials and sighting thresholds for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_m: f64,
    pub n2yo_api_key: String,
    pub owm_api_key: String,
    /// Local "HH:MM".
    pub bedtime: String,
    pub max_magnitude: f64,
    pub max_cloud_cover: u8,
    pub log_level: String,
    pub n2yo_base_url: String,
    pub owm_base_url: String,
    pub crew_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latitude: 40.7128,
            longitude: -74.0060,
            altitude_m: 0.0,
            n2yo_api_key: String::new(),
            owm_api_key: String::new(),
            bedtime: "22:00".to_string(),
            max_magnitude: -1.0,
            max_cloud_cover: 30,
            log_level: "info".to_string(),
            n2yo_base_url: "https://api.n2yo.com/rest/v1".to_string(),
            owm_base_url: "https://api.openweathermap.org".to_string(),
            crew_url: "http://api.open-notify.org/astros.json".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then the TOML file at exactly `path` if present, then `ISS_NOTIFY_*` variables.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file_exact(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, figment::Error> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(path)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }

    pub fn criteria(&self) -> SightingCriteria {
        SightingCriteria {
            max_magnitude: self.max_magnitude,
            max_cloud_cover: self.max_cloud_cover,
            bedtime: self.bedtime.clone(),
        }
    }

    /// Names of required credentials left empty.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.n2yo_api_key.trim().is_empty() {
            missing.push("n2yo_api_key");
        }
        if self.owm_api_key.trim().is_empty() {
            missing.push("owm_api_key");
        }
        missing
    }
}
