//! Configuration management for the phone lookup validator.
//!
//! Configuration is loaded from environment variables, with an optional `.env`
//! file picked up by `dotenvy`. Nothing is written to stdout while loading.

use crate::error::{ConfigError, ConfigResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::env;

/// Default base URL of the lookup service.
pub const DEFAULT_LOOKUP_API_URL: &str = "https://lookups.twilio.com";

static ACCOUNT_SID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^AC[0-9a-fA-F]{32}$").expect("account SID regex is valid"));

static COUNTRY_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2}$").expect("country code regex is valid"));

/// Configuration for the lookup client and validator.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lookup service base URL
    pub lookup_api_url: String,

    /// Account SID, used as the Basic auth username
    pub account_sid: String,

    /// Auth token, used as the Basic auth password
    pub auth_token: String,

    /// ISO 3166-1 alpha-2 country hint for national-format numbers
    pub country_code: Option<String>,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `TWILIO_ACCOUNT_SID`: account SID (`AC` followed by 32 hex characters)
    /// - `TWILIO_AUTH_TOKEN`: auth token
    ///
    /// Optional environment variables:
    /// - `LOOKUP_API_BASE_URL`: service base URL (default: `https://lookups.twilio.com`)
    /// - `LOOKUP_COUNTRY_CODE`: two-letter country hint (default: unset)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let account_sid = env::var("TWILIO_ACCOUNT_SID")
            .map_err(|_| ConfigError::MissingVar("TWILIO_ACCOUNT_SID".to_string()))?;

        let auth_token = env::var("TWILIO_AUTH_TOKEN")
            .map_err(|_| ConfigError::MissingVar("TWILIO_AUTH_TOKEN".to_string()))?;

        if !ACCOUNT_SID_RE.is_match(account_sid.trim()) {
            return Err(ConfigError::InvalidValue {
                var: "TWILIO_ACCOUNT_SID".to_string(),
                reason: "Must be 'AC' followed by 32 hex characters".to_string(),
            });
        }

        if auth_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "TWILIO_AUTH_TOKEN".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let lookup_api_url = env::var("LOOKUP_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_LOOKUP_API_URL.to_string());

        if !lookup_api_url.starts_with("http://") && !lookup_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "LOOKUP_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let country_code = Self::parse_country_code(env::var("LOOKUP_COUNTRY_CODE").ok())?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            lookup_api_url,
            account_sid: account_sid.trim().to_string(),
            auth_token,
            country_code,
            request_timeout,
            log_level,
        })
    }

    /// Blank means unset; anything else must be two ASCII letters.
    fn parse_country_code(raw: Option<String>) -> ConfigResult<Option<String>> {
        let Some(raw) = raw else {
            return Ok(None);
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        if !COUNTRY_CODE_RE.is_match(trimmed) {
            return Err(ConfigError::InvalidValue {
                var: "LOOKUP_COUNTRY_CODE".to_string(),
                reason: format!("Must be a two-letter country code, got: {}", raw),
            });
        }

        Ok(Some(trimmed.to_ascii_uppercase()))
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            lookup_api_url: DEFAULT_LOOKUP_API_URL.to_string(),
            account_sid: String::new(),
            auth_token: String::new(),
            country_code: None,
            request_timeout: 10,
            log_level: "error".to_string(),
        }
    }
}
