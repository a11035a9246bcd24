use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use ragdesk_engine::{ClientSettings, DEFAULT_BASE_URL};
use serde::Deserialize;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "ragdesk.ron";

/// Deployment settings read once at startup. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the config file if present. Problems fall back to defaults and are
    /// returned as warnings, since the logger is not up yet.
    pub fn load(path: &Path) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();

        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return (Self::default(), warnings);
            }
            Err(err) => {
                warnings.push(format!("Failed to read config from {:?}: {}", path, err));
                return (Self::default(), warnings);
            }
        };

        let mut config: AppConfig = match ron::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                warnings.push(format!("Failed to parse config from {:?}: {}", path, err));
                return (Self::default(), warnings);
            }
        };

        if LevelFilter::from_str(&config.log_level).is_err() {
            warnings.push(format!(
                "Unknown log level {:?} in {:?}; using info",
                config.log_level, path
            ));
            config.log_level = "info".to_string();
        }

        (config, warnings)
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_url.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}
