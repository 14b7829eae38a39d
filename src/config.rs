//! Settings read from the environment.

use crate::error::ConfigError;
use crate::service::ServiceConfig;
use crate::waypoint::LatLng;

pub const MAPS_API_KEY: &str = "MAPS_API_KEY";
pub const BASE_URL: &str = "PATHPILOT_BASE_URL";
pub const TIMEOUT_SECS: &str = "PATHPILOT_TIMEOUT_SECS";

/// Initial map viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub api_key: String,
    pub center: LatLng,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub map: MapSettings,
    pub service: ServiceConfig,
}

impl AppConfig {
    /// Loads `.env.local` and `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::from_filename(".env.local").ok();
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(MAPS_API_KEY)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing(MAPS_API_KEY))?;

        let mut service = ServiceConfig::default();
        if let Some(base_url) = lookup(BASE_URL).filter(|url| !url.is_empty()) {
            service.base_url = base_url;
        }
        if let Some(value) = lookup(TIMEOUT_SECS) {
            service.timeout_secs = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid {
                    key: TIMEOUT_SECS,
                    value,
                })?;
        }

        Ok(Self {
            map: MapSettings {
                api_key,
                center: LatLng::new(29.643946, -82.355),
                zoom: 14,
            },
            service,
        })
    }
}
