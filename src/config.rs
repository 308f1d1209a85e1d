//! Environment-driven configuration for the sample.

use std::env;
use std::time::Duration;

use tracing::Level;

use crate::client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use crate::domain::{ApiKey, EmailAddress, ValidationError};

pub const API_KEY_VAR: &str = "SPARKPOST_API_KEY";
pub const SENDER_EMAIL_VAR: &str = "SPARKPOST_SENDER_EMAIL";
pub const BASE_URL_VAR: &str = "SPARKPOST_BASE_URL";
pub const TIMEOUT_SECS_VAR: &str = "SPARKPOST_TIMEOUT_SECS";
pub const LOG_LEVEL_VAR: &str = "SPARKPOST_LOG_LEVEL";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: ApiKey,
    pub sender: EmailAddress,
    pub base_url: String,
    pub timeout: Duration,
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .and_then(|value| ApiKey::new(value).ok())
            .ok_or(ConfigError::MissingApiKey)?;

        let sender = match lookup(SENDER_EMAIL_VAR) {
            None => return Err(ConfigError::MissingSenderEmail),
            Some(value) => match EmailAddress::new(value) {
                Ok(sender) => sender,
                Err(ValidationError::Empty { .. }) => return Err(ConfigError::MissingSenderEmail),
                Err(source) => return Err(ConfigError::InvalidSenderEmail(source)),
            },
        };

        let base_url = lookup(BASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned());
        url::Url::parse(base_url.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
            value: base_url.clone(),
            source,
        })?;

        let timeout = match lookup(TIMEOUT_SECS_VAR) {
            None => DEFAULT_TIMEOUT,
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidTimeout(value))?,
        };

        let log_level = match lookup(LOG_LEVEL_VAR) {
            None => Level::DEBUG,
            Some(value) => value
                .trim()
                .parse::<Level>()
                .map_err(|_| ConfigError::InvalidLogLevel(value))?,
        };

        Ok(Config {
            api_key,
            sender,
            base_url,
            timeout,
            log_level,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "SPARKPOST_API_KEY must be defined as an environment variable.\nVisit https://app.sparkpost.com/account/credentials to create your API Key."
    )]
    MissingApiKey,

    #[error("SPARKPOST_SENDER_EMAIL must be defined as an environment variable.")]
    MissingSenderEmail,

    #[error("SPARKPOST_SENDER_EMAIL is not usable: {0}")]
    InvalidSenderEmail(#[source] ValidationError),

    #[error("SPARKPOST_BASE_URL is not a valid URL: {value}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("SPARKPOST_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),

    #[error("SPARKPOST_LOG_LEVEL must be one of trace, debug, info, warn, error, got {0:?}")]
    InvalidLogLevel(String),
}
