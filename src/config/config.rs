use std::env;

use thiserror::Error;
use tracing::info;
use url::Url;

pub const BASE_URL_VAR: &str = "BACKEND_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const API_PREFIX: &str = "/api/v1";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {source}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin, without the API prefix.
    pub base_url: Url,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let raw = var(BASE_URL_VAR).unwrap_or_else(|| {
            info!("{BASE_URL_VAR} not set, using default: {DEFAULT_BASE_URL}");
            DEFAULT_BASE_URL.to_string()
        });
        Self::with_base_url(&raw)
    }

    pub fn with_base_url(raw: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
            key: BASE_URL_VAR,
            value: raw.to_string(),
            source,
        })?;
        Ok(Self { base_url })
    }

    /// `<base>/api/v1`, the prefix every request path is resolved under.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), API_PREFIX)
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}
