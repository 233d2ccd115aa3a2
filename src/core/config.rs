use secrecy::{ExposeSecret, Secret};
use serde::{Serialize, Serializer};
use std::env;

/// Production endpoint of the Bitget Wallet open API
pub const DEFAULT_BASE_URL: &str = "https://bopenapi.bgwapi.io";

/// Public demo credentials. They may be rotated upstream; override them with
/// `BGW_API_KEY` / `BGW_API_SECRET` / `BGW_PARTNER_CODE`.
pub const DEFAULT_API_KEY: &str = "4843D8C3F1E20772C0E634EDACC5C5F9A0E2DC92";
pub const DEFAULT_API_SECRET: &str = "F2ABFDC684BDC6775FD6286B8D06A3AAD30FD587";
pub const DEFAULT_PARTNER_CODE: &str = "bgw_swap_public";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

const API_KEY_VAR: &str = "BGW_API_KEY";
const API_SECRET_VAR: &str = "BGW_API_SECRET";
const PARTNER_CODE_VAR: &str = "BGW_PARTNER_CODE";
const BASE_URL_VAR: &str = "BGW_BASE_URL";

/// Process-wide credentials and endpoint settings.
///
/// Built once at startup and handed to the signer and REST client by value;
/// nothing in the crate reads credentials from ambient state afterwards.
#[derive(Debug, Clone)]
pub struct BgwConfig {
    pub api_key: Secret<String>,
    pub api_secret: Secret<String>,
    pub partner_code: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

// Custom Serialize implementation - never expose secrets in serialization
impl Serialize for BgwConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("BgwConfig", 5)?;
        state.serialize_field("api_key", "[REDACTED]")?;
        state.serialize_field("api_secret", "[REDACTED]")?;
        state.serialize_field("partner_code", &self.partner_code)?;
        state.serialize_field("base_url", &self.base_url)?;
        state.serialize_field("timeout_seconds", &self.timeout_seconds)?;
        state.end()
    }
}

impl Default for BgwConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_API_KEY.to_string(),
            DEFAULT_API_SECRET.to_string(),
            DEFAULT_PARTNER_CODE.to_string(),
        )
    }
}

impl BgwConfig {
    /// Create a new configuration with explicit credentials
    #[must_use]
    pub fn new(api_key: String, api_secret: String, partner_code: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            api_secret: Secret::new(api_secret),
            partner_code,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables, each falling back to the public demo value:
    /// - `BGW_API_KEY`
    /// - `BGW_API_SECRET`
    /// - `BGW_PARTNER_CODE`
    /// - `BGW_BASE_URL` (optional, defaults to the production endpoint)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_VAR).unwrap_or_else(|_| DEFAULT_API_KEY.to_string());
        let api_secret =
            env::var(API_SECRET_VAR).unwrap_or_else(|_| DEFAULT_API_SECRET.to_string());
        let partner_code =
            env::var(PARTNER_CODE_VAR).unwrap_or_else(|_| DEFAULT_PARTNER_CODE.to_string());

        let mut config = Self::new(api_key, api_secret, partner_code);
        if let Ok(base_url) = env::var(BASE_URL_VAR) {
            config = config.base_url(base_url)?;
        }

        if !config.has_credentials() {
            return Err(ConfigError::InvalidConfiguration(format!(
                "{} and {} must not be empty",
                API_KEY_VAR, API_SECRET_VAR
            )));
        }

        Ok(config)
    }

    /// Create configuration from a `.env` file and environment variables
    ///
    /// A missing `.env` file is fine; values then come from the process
    /// environment or the built-in defaults.
    #[cfg(feature = "env-file")]
    pub fn from_env_file() -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(".env")
    }

    /// Create configuration from a specific `.env` file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env()
    }

    /// Check that both halves of the key pair are present
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && !self.api_secret.expose_secret().is_empty()
    }

    /// Set a custom base URL; a trailing slash is dropped so paths join cleanly
    pub fn base_url(mut self, base_url: String) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidConfiguration(format!(
                "{} must be an http(s) URL, got '{}'",
                BASE_URL_VAR, base_url
            )));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    /// Set the per-request timeout
    #[must_use]
    pub const fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Get API secret (use carefully - exposes secret)
    pub fn api_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
