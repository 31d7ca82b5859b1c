//! Daily expense notification.

use crate::telegram::{ChatApi, Delivery, OutgoingMessage, TelegramError};
use expense_core::{ExpenseSummary, CURRENCY};
use std::sync::Arc;
use teloxide::types::ChatId;
use tracing::{error, info};

/// Format a summary as the notification text.
pub fn format_summary_message(summary: &ExpenseSummary) -> String {
    format!(
        "Today's total expenses are {} {}.\n\
         Date and time: {}.\n\
         Transaction details: {}",
        summary.total_display(),
        CURRENCY,
        summary.generated_at,
        summary.details()
    )
}

/// Sends expense summaries to one chat.
pub struct Notifier {
    chat: Arc<dyn ChatApi>,
    chat_id: ChatId,
}

impl Notifier {
    pub fn new(chat: Arc<dyn ChatApi>, chat_id: ChatId) -> Self {
        Self { chat, chat_id }
    }

    /// Send the summary. An API-level rejection is logged and returned as
    /// `Delivery::Rejected`; only transport and decode failures are errors.
    pub async fn notify(&self, summary: &ExpenseSummary) -> Result<Delivery, TelegramError> {
        let message = OutgoingMessage::text(self.chat_id, format_summary_message(summary));
        let delivery = self.chat.send_message(&message).await?;

        match &delivery {
            Delivery::Sent { text } => {
                info!("Message sent: {}", text.as_deref().unwrap_or(&message.text));
            }
            Delivery::Rejected { description } => {
                error!("Telegram API Error: {}", description);
            }
        }

        Ok(delivery)
    }
}
