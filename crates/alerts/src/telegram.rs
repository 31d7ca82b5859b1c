//! Telegram Bot API client.

use async_trait::async_trait;
use std::fmt;
use teloxide::prelude::*;
use teloxide::types::InlineKeyboardMarkup;
use teloxide::RequestError;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("Telegram request failed: {0}")]
    Request(String),
    #[error("Failed to decode Telegram response: {0}")]
    Decode(String),
}

impl From<RequestError> for TelegramError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::InvalidJson { source, .. } => TelegramError::Decode(source.to_string()),
            other => TelegramError::Request(other.to_string()),
        }
    }
}

/// Outcome of a Bot API call that reached Telegram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// `ok: true`. Carries the echoed message text when the method returns one.
    Sent { text: Option<String> },
    /// `ok: false` with the API's description.
    Rejected { description: String },
}

/// `sendMessage` request.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl OutgoingMessage {
    pub fn text(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            reply_markup: None,
        }
    }

    pub fn with_keyboard(mut self, markup: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }
}

/// The Bot API operations the service uses.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn send_message(&self, message: &OutgoingMessage) -> Result<Delivery, TelegramError>;

    async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: &str,
    ) -> Result<Delivery, TelegramError>;
}

/// API rejections become `Delivery::Rejected`; everything else is an error.
fn into_delivery<T>(
    result: Result<T, RequestError>,
    text: impl FnOnce(T) -> Option<String>,
) -> Result<Delivery, TelegramError> {
    match result {
        Ok(value) => Ok(Delivery::Sent { text: text(value) }),
        Err(RequestError::Api(api)) => Ok(Delivery::Rejected {
            description: api.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Telegram bot used for outgoing calls.
#[derive(Clone)]
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.telegram.org";

    /// Create a client for the bot with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    /// Point the client at another Bot API server.
    pub fn with_api_url(mut self, url: Url) -> Self {
        self.bot = self.bot.set_api_url(url);
        self
    }

    /// The bot's `@username`, without the `@`.
    pub async fn bot_username(&self) -> Result<Option<String>, TelegramError> {
        let me = self.bot.get_me().await?;
        Ok(me.user.username.clone())
    }
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_url", &self.bot.api_url().to_string())
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl ChatApi for TelegramClient {
    async fn send_message(&self, message: &OutgoingMessage) -> Result<Delivery, TelegramError> {
        let mut request = self
            .bot
            .send_message(message.chat_id, message.text.clone());
        if let Some(markup) = &message.reply_markup {
            request = request.reply_markup(markup.clone());
        }

        let result = request.await;
        debug!("Telegram sendMessage to {} ok={}", message.chat_id, result.is_ok());
        into_delivery(result, |sent| sent.text().map(str::to_string))
    }

    async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: &str,
    ) -> Result<Delivery, TelegramError> {
        let result = self
            .bot
            .answer_callback_query(callback_query_id)
            .text(text)
            .await;
        into_delivery(result, |_| None)
    }
}
