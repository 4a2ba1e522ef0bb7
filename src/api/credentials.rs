//! Tecnocall API credentials
//!
//! Credentials are supplied by the host per execution and stay read-only for
//! the duration of a batch. Loading supports environment variables
//! (TECNOCALL_BASE_URL, TECNOCALL_BOT_TOKEN) for headless use.

use std::env;

use tracing::debug;

use crate::error::ConnectorError;

/// Default API host when the credential does not override it.
pub const DEFAULT_BASE_URL: &str = "https://api.tecnocall.com";

const ENV_BASE_URL: &str = "TECNOCALL_BASE_URL";
const ENV_BOT_TOKEN: &str = "TECNOCALL_BOT_TOKEN";

/// Bot credentials for the Tecnocall API.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub base_url: String,
    pub bot_token: String,
}

impl Credentials {
    pub fn new(base_url: impl Into<String>, bot_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bot_token: bot_token.into(),
        }
    }

    /// Load credentials from environment variables. The base URL falls back
    /// to [`DEFAULT_BASE_URL`]; the bot token is required.
    pub fn from_env() -> Result<Self, ConnectorError> {
        let base_url = env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let bot_token = env::var(ENV_BOT_TOKEN)
            .map_err(|_| ConnectorError::Credentials(format!("{} is not set", ENV_BOT_TOKEN)))?;

        debug!(
            "Loaded credentials from environment, token: {}",
            mask_credential(&bot_token)
        );
        Ok(Self::new(base_url, bot_token))
    }
}

/// Mask sensitive credential values for logging
pub fn mask_credential(value: &str) -> String {
    if value.len() <= 8 {
        "*".repeat(value.len())
    } else {
        format!("{}...{}", &value[..4], &value[value.len() - 4..])
    }
}
