//! `/unfreeze` command: re-registers the statement webhook on request.
//!
//! The command answers with a one-button keyboard; pressing the button
//! registers the webhook and reports the result. Nothing is stored between
//! the two steps, the callback payload carries everything needed.

use expense_alerts::{
    callback_chat_id, ChatApi, Command, Delivery, OutgoingMessage, TelegramError,
};
use expense_bank::WebhookRegistrar;
use std::sync::Arc;
use teloxide::types::{
    CallbackQuery, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, Update, UpdateKind,
};
use tracing::{debug, error, info, warn};

pub const UNFREEZE_CALLBACK: &str = "unfreeze";

pub const PROMPT_TEXT: &str = "Press the button to re-register the statement webhook.";
pub const BUTTON_TEXT: &str = "Unfreeze";
pub const REGISTERED_TEXT: &str = "Webhook successfully registered.";
pub const FAILED_TEXT: &str = "Webhook registration failed.";

/// What the flow did with an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnfreezeOutcome {
    /// Command received, button sent.
    Prompted,
    Registered,
    RegistrationFailed,
    /// Not a command or callback this flow handles.
    Ignored,
}

impl UnfreezeOutcome {
    /// Text reported to the user after a button press.
    pub fn result_text(self) -> Option<&'static str> {
        match self {
            UnfreezeOutcome::Registered => Some(REGISTERED_TEXT),
            UnfreezeOutcome::RegistrationFailed => Some(FAILED_TEXT),
            UnfreezeOutcome::Prompted | UnfreezeOutcome::Ignored => None,
        }
    }
}

pub fn unfreeze_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(
        BUTTON_TEXT,
        UNFREEZE_CALLBACK,
    )]])
}

pub struct UnfreezeFlow {
    chat: Arc<dyn ChatApi>,
    registrar: Arc<dyn WebhookRegistrar>,
    webhook_url: String,
    bot_name: String,
}

impl UnfreezeFlow {
    /// `bot_name` is the bot's username; commands addressed to other bots
    /// are ignored.
    pub fn new(
        chat: Arc<dyn ChatApi>,
        registrar: Arc<dyn WebhookRegistrar>,
        webhook_url: impl Into<String>,
        bot_name: impl Into<String>,
    ) -> Self {
        Self {
            chat,
            registrar,
            webhook_url: webhook_url.into(),
            bot_name: bot_name.into(),
        }
    }

    /// Handle one Telegram update. Telegram failures are logged, never returned.
    pub async fn handle(&self, update: &Update) -> UnfreezeOutcome {
        match &update.kind {
            UpdateKind::CallbackQuery(query) => self.on_callback(query).await,
            UpdateKind::Message(message) => {
                let command = message
                    .text()
                    .and_then(|text| Command::from_text(text, &self.bot_name));
                match command {
                    Some(Command::Unfreeze) => self.prompt(message.chat.id).await,
                    None => {
                        debug!("Ignoring message {:?}", update.id);
                        UnfreezeOutcome::Ignored
                    }
                }
            }
            _ => {
                debug!("Ignoring update {:?}", update.id);
                UnfreezeOutcome::Ignored
            }
        }
    }

    async fn prompt(&self, chat_id: ChatId) -> UnfreezeOutcome {
        let message = OutgoingMessage::text(chat_id, PROMPT_TEXT).with_keyboard(unfreeze_keyboard());
        log_delivery("sendMessage", self.chat.send_message(&message).await);
        UnfreezeOutcome::Prompted
    }

    async fn on_callback(&self, query: &CallbackQuery) -> UnfreezeOutcome {
        if query.data.as_deref() != Some(UNFREEZE_CALLBACK) {
            debug!("Ignoring callback query {}", query.id);
            return UnfreezeOutcome::Ignored;
        }

        let outcome = match self.registrar.register_webhook(&self.webhook_url).await {
            Ok(()) => UnfreezeOutcome::Registered,
            Err(e) => {
                error!("Webhook registration failed: {}", e);
                UnfreezeOutcome::RegistrationFailed
            }
        };
        let text = outcome.result_text().unwrap_or(FAILED_TEXT);

        log_delivery(
            "answerCallbackQuery",
            self.chat.answer_callback_query(&query.id, text).await,
        );

        match callback_chat_id(query) {
            Some(chat_id) => {
                let message = OutgoingMessage::text(chat_id, text);
                log_delivery("sendMessage", self.chat.send_message(&message).await);
            }
            None => warn!("Callback query {} has no message; result not posted", query.id),
        }

        outcome
    }
}

fn log_delivery(method: &str, result: Result<Delivery, TelegramError>) {
    match result {
        Ok(Delivery::Sent { .. }) => info!("Telegram {} succeeded", method),
        Ok(Delivery::Rejected { description }) => {
            error!("Telegram API Error ({}): {}", method, description)
        }
        Err(e) => error!("Telegram {} failed: {}", method, e),
    }
}
