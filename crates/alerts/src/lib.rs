//! Telegram notifications for the expense notifier.
//!
//! This crate provides:
//! - A Telegram bot client for `sendMessage` and `answerCallbackQuery`
//! - Bot commands and inbound webhook update parsing
//! - The expense summary notifier

pub mod command;
pub mod notifier;
pub mod telegram;

pub use command::{callback_chat_id, parse_update, Command};
pub use notifier::{format_summary_message, Notifier};
pub use telegram::{ChatApi, Delivery, OutgoingMessage, TelegramClient, TelegramError};
