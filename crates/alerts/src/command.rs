//! Bot commands and inbound webhook updates.

use teloxide::types::{CallbackQuery, ChatId, MaybeInaccessibleMessage, Update};
use teloxide::utils::command::BotCommands;

/// Bot commands.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Re-register the bank statement webhook")]
    Unfreeze,
}

impl Command {
    /// Parse a message addressed to `bot_name`.
    ///
    /// Commands suffixed with another bot's username are rejected. With an
    /// empty `bot_name` any suffixed command is rejected.
    pub fn from_text(text: &str, bot_name: &str) -> Option<Self> {
        Self::parse(text, bot_name).ok()
    }
}

/// Parse a raw webhook body. Returns `None` for anything that is not an update.
pub fn parse_update(body: &[u8]) -> Option<Update> {
    serde_json::from_slice(body).ok()
}

/// Chat of the message carrying the pressed button.
pub fn callback_chat_id(query: &CallbackQuery) -> Option<ChatId> {
    match query.message.as_ref()? {
        MaybeInaccessibleMessage::Regular(message) => Some(message.chat.id),
        MaybeInaccessibleMessage::Inaccessible(message) => Some(message.chat.id),
    }
}
