//! Application configuration.

use chrono_tz::Tz;
use expense_alerts::TelegramClient;
use expense_bank::MonobankClient;
use expense_core::DEFAULT_TIMEZONE;
use std::fmt;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Application configuration, read from the environment.
#[derive(Clone)]
pub struct AppConfig {
    /// Banking API token (`X-Token`).
    pub monobank_token: String,
    /// Chat receiving expense summaries.
    pub chat_id: i64,
    /// Telegram bot token.
    pub telegram_token: String,
    /// Username commands must be addressed to; looked up at startup when unset.
    pub telegram_bot_username: Option<String>,
    /// Statement account identifier.
    pub account: String,
    /// URL registered as the statement webhook.
    pub webhook_url: String,
    /// HTTP listen port.
    pub port: u16,
    /// Zone for the day boundary and message timestamps.
    pub timezone: Tz,
    pub monobank_api_url: String,
    pub telegram_api_url: Url,
}

impl AppConfig {
    pub const DEFAULT_PORT: u16 = 3000;

    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let monobank_token = match get("MONOBANK_TOKEN").or_else(|| get("MONOBANK_BOT_TOKEN")) {
            Some(token) => token,
            None => return Err(ConfigError::Missing("MONOBANK_TOKEN")),
        };

        let chat_id = require("CHAT_ID")?;
        let chat_id = chat_id.trim().parse().map_err(|_| ConfigError::Invalid {
            var: "CHAT_ID",
            value: chat_id,
        })?;

        let telegram_api_url = get("TELEGRAM_API_URL")
            .unwrap_or_else(|| TelegramClient::DEFAULT_BASE_URL.to_string());
        let telegram_api_url =
            Url::parse(telegram_api_url.trim()).map_err(|_| ConfigError::Invalid {
                var: "TELEGRAM_API_URL",
                value: telegram_api_url,
            })?;

        let port = match get("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value,
            })?,
            None => Self::DEFAULT_PORT,
        };

        let timezone = match get("TIMEZONE") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "TIMEZONE",
                value,
            })?,
            None => DEFAULT_TIMEZONE,
        };

        Ok(Self {
            monobank_token,
            chat_id,
            telegram_token: require("TELEGRAM_BOT_TOKEN")?,
            telegram_bot_username: get("TELEGRAM_BOT_USERNAME")
                .map(|name| name.trim().trim_start_matches('@').to_string()),
            account: require("ALLOWED_ACCOUNT")?,
            webhook_url: require("MONOBANK_WEBHOOK_URL")?,
            port,
            timezone,
            monobank_api_url: get("MONOBANK_API_URL")
                .unwrap_or_else(|| MonobankClient::DEFAULT_BASE_URL.to_string()),
            telegram_api_url,
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("monobank_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("telegram_token", &"<redacted>")
            .field("telegram_bot_username", &self.telegram_bot_username)
            .field("account", &self.account)
            .field("webhook_url", &self.webhook_url)
            .field("port", &self.port)
            .field("timezone", &self.timezone)
            .field("monobank_api_url", &self.monobank_api_url)
            .field("telegram_api_url", &self.telegram_api_url.as_str())
            .finish()
    }
}
