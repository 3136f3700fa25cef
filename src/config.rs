use serde::{Deserialize, Serialize};

use crate::utils::constants::{DEFAULT_API_BASE_URL, DEFAULT_STORAGE_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url_development: String,
    pub api_base_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    /// localStorage key of the persisted session snapshot.
    pub storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url_development: DEFAULT_API_BASE_URL.to_string(),
            api_base_url_production: DEFAULT_API_BASE_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the configuration baked in at compile time (see `build.rs`).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| match key {
            "API_BASE_URL" => option_env!("API_BASE_URL"),
            "API_BASE_URL_PRODUCTION" => option_env!("API_BASE_URL_PRODUCTION"),
            "ENVIRONMENT" => option_env!("ENVIRONMENT"),
            "ENABLE_LOGGING" => option_env!("ENABLE_LOGGING"),
            "STORAGE_KEY" => option_env!("STORAGE_KEY"),
            _ => None,
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<&'static str>) -> Self {
        let development = lookup("API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL);
        Self {
            api_base_url_development: development.to_string(),
            api_base_url_production: lookup("API_BASE_URL_PRODUCTION")
                .unwrap_or(development)
                .to_string(),
            environment: lookup("ENVIRONMENT").unwrap_or("development").to_string(),
            enable_logging: lookup("ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
            storage_key: lookup("STORAGE_KEY")
                .filter(|key| !key.is_empty())
                .unwrap_or(DEFAULT_STORAGE_KEY)
                .to_string(),
        }
    }

    /// Backend base URL for the current environment.
    pub fn api_base_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.api_base_url_production,
            _ => &self.api_base_url_development,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// Console log level: verbose in development, quiet when logging is off.
    pub fn log_level(&self) -> log::Level {
        if !self.enable_logging {
            log::Level::Warn
        } else if self.is_production() {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_backend() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base_url(), "http://localhost:8000");
        assert_eq!(config.storage_key, "checkmate:auth");
        assert_eq!(config.log_level(), log::Level::Debug);
    }

    #[test]
    fn production_uses_its_own_url() {
        let config = AppConfig::from_lookup(|key| match key {
            "API_BASE_URL" => Some("http://localhost:9000"),
            "API_BASE_URL_PRODUCTION" => Some("https://api.checkmate.test"),
            "ENVIRONMENT" => Some("production"),
            _ => None,
        });
        assert_eq!(config.api_base_url(), "https://api.checkmate.test");
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn production_falls_back_to_the_shared_url() {
        let config = AppConfig::from_lookup(|key| match key {
            "API_BASE_URL" => Some("https://shared.test"),
            "ENVIRONMENT" => Some("production"),
            _ => None,
        });
        assert_eq!(config.api_base_url(), "https://shared.test");
    }

    #[test]
    fn bad_values_fall_back() {
        let config = AppConfig::from_lookup(|key| match key {
            "ENABLE_LOGGING" => Some("maybe"),
            "STORAGE_KEY" => Some(""),
            _ => None,
        });
        assert!(config.is_logging_enabled());
        assert_eq!(config.storage_key, "checkmate:auth");

        let quiet = AppConfig::from_lookup(|key| (key == "ENABLE_LOGGING").then_some("false"));
        assert_eq!(quiet.log_level(), log::Level::Warn);
    }
}
