use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use tubedigest_infra::youtube::DEFAULT_API_BASE_URL;

const API_KEY_VAR: &str = "YOUTUBE_API_KEY";

#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub http_addr: SocketAddr,
    pub request_timeout: Duration,
}

// Keeps the credential out of logs.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("http_addr", &self.http_addr)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required variable {0}")]
    Missing(&'static str),
    #[error("invalid socket address: {0}")]
    InvalidSocket(String),
    #[error("invalid integer for {0}: {1}")]
    InvalidNumber(&'static str, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
    #[error("dotenv error: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key =
            read_optional_string(&lookup, API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;
        let api_base_url = read_string(&lookup, "TUBEDIGEST_API_BASE_URL", DEFAULT_API_BASE_URL);
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "TUBEDIGEST_API_BASE_URL",
                api_base_url,
            ));
        }
        let http_addr_raw = read_string(&lookup, "TUBEDIGEST_HTTP_ADDR", "127.0.0.1:8080");
        let http_addr = http_addr_raw
            .parse()
            .map_err(|_| ConfigError::InvalidSocket(http_addr_raw.clone()))?;
        let request_timeout_secs = read_u64(&lookup, "TUBEDIGEST_REQUEST_TIMEOUT_SECS", 30)?;
        if request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "TUBEDIGEST_REQUEST_TIMEOUT_SECS",
                request_timeout_secs.to_string(),
            ));
        }

        Ok(Self {
            api_key,
            api_base_url,
            http_addr,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

/// Loads `.env` when present. Variables already set in the process win.
pub fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn read_string<F>(lookup: &F, key: &'static str, default: &'static str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    read_optional_string(lookup, key).unwrap_or_else(|| default.to_string())
}

fn read_u64<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = read_string(lookup, key, "");
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse()
        .map_err(|_| ConfigError::InvalidNumber(key, raw))
}

fn read_optional_string<F>(lookup: &F, key: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_default();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = config_from(&[("YOUTUBE_API_KEY", "abc")]).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.http_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_api_key_is_rejected() {
        assert!(matches!(config_from(&[]), Err(ConfigError::Missing("YOUTUBE_API_KEY"))));
        assert!(matches!(
            config_from(&[("YOUTUBE_API_KEY", "   ")]),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[("YOUTUBE_API_KEY", "k"), ("TUBEDIGEST_HTTP_ADDR", "nope")]),
            Err(ConfigError::InvalidSocket(_))
        ));
        assert!(matches!(
            config_from(&[("YOUTUBE_API_KEY", "k"), ("TUBEDIGEST_REQUEST_TIMEOUT_SECS", "ten")]),
            Err(ConfigError::InvalidNumber(_, _))
        ));
        assert!(matches!(
            config_from(&[("YOUTUBE_API_KEY", "k"), ("TUBEDIGEST_REQUEST_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidValue(_, _))
        ));
        assert!(matches!(
            config_from(&[("YOUTUBE_API_KEY", "k"), ("TUBEDIGEST_API_BASE_URL", "ftp://x")]),
            Err(ConfigError::InvalidValue(_, _))
        ));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = config_from(&[("YOUTUBE_API_KEY", "super-secret")]).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
