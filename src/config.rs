//! Client configuration: application credentials and target environment.

use std::fmt;

use thiserror::Error;

use crate::auth;
use crate::network::Environment;

/// Environment variable holding the application id.
pub const APP_ID_ENV: &str = "COINGATE_APP_ID";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "COINGATE_API_KEY";

/// Environment variable holding the API secret.
pub const API_SECRET_ENV: &str = "COINGATE_API_SECRET";

/// Environment variable selecting the sandbox (`1`, `true`, `yes`).
pub const SANDBOX_ENV: &str = "COINGATE_SANDBOX";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required environment variable is not set or empty
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    /// An environment variable could not be parsed
    #[error("Invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

/// Application credentials plus the environment they belong to.
///
/// Created once per integration and shared by every request. The base URL is
/// derived from [`Environment`] and never changes afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    application_id: i64,
    api_key: String,
    api_secret: String,
    environment: Environment,
}

impl ClientConfig {
    /// Create a configuration from the values shown in the CoinGate dashboard.
    pub fn new(
        application_id: i64,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        is_sandbox: bool,
    ) -> Self {
        Self {
            application_id,
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            environment: Environment::from_sandbox(is_sandbox),
        }
    }

    /// Read the configuration from `COINGATE_APP_ID`, `COINGATE_API_KEY`,
    /// `COINGATE_API_SECRET` and the optional `COINGATE_SANDBOX`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or the application
    /// id is not an integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let raw_id = required(APP_ID_ENV)?;
        let application_id = raw_id.parse::<i64>().map_err(|_| ConfigError::InvalidVar {
            name: APP_ID_ENV,
            value: raw_id.clone(),
        })?;

        let is_sandbox = match lookup(SANDBOX_ENV) {
            Some(value) => parse_flag(&value).ok_or(ConfigError::InvalidVar {
                name: SANDBOX_ENV,
                value,
            })?,
            None => false,
        };

        Ok(Self::new(
            application_id,
            required(API_KEY_ENV)?,
            required(API_SECRET_ENV)?,
            is_sandbox,
        ))
    }

    /// Override the environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn application_id(&self) -> i64 {
        self.application_id
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// REST API base URL selected by the environment.
    pub fn base_url(&self) -> &'static str {
        self.environment.api_url()
    }

    /// Signature for a request made with `nonce`.
    pub fn sign(&self, nonce: i64) -> String {
        auth::sign(nonce, self.application_id, &self.api_key, &self.api_secret)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("application_id", &self.application_id)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("environment", &self.environment)
            .finish()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Some(false),
        "1" | "true" | "yes" | "on" => Some(true),
        _ => None,
    }
}
