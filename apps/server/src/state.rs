//! Shared handler state.

use crate::config::AppConfig;
use crate::gate::WebhookGate;
use crate::unfreeze::UnfreezeFlow;
use expense_alerts::{Notifier, TelegramClient};
use expense_bank::MonobankClient;
use std::sync::Arc;
use teloxide::types::ChatId;
use tracing::{info, warn};

/// State shared by all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<WebhookGate>,
    pub unfreeze: Arc<UnfreezeFlow>,
}

impl AppState {
    pub fn new(gate: WebhookGate, unfreeze: UnfreezeFlow) -> Self {
        Self {
            gate: Arc::new(gate),
            unfreeze: Arc::new(unfreeze),
        }
    }

    /// Wire the real API clients from configuration.
    ///
    /// Without a configured username the bot is asked for its own. If that
    /// fails only commands without an `@username` suffix are accepted.
    pub async fn from_config(config: &AppConfig) -> Self {
        let bank = Arc::new(
            MonobankClient::new(config.monobank_token.clone())
                .with_base_url(config.monobank_api_url.clone()),
        );
        let telegram = Arc::new(
            TelegramClient::new(config.telegram_token.clone())
                .with_api_url(config.telegram_api_url.clone()),
        );

        let bot_name = match &config.telegram_bot_username {
            Some(name) => name.clone(),
            None => match telegram.bot_username().await {
                Ok(Some(name)) => name,
                Ok(None) => String::new(),
                Err(e) => {
                    warn!("Failed to look up bot username: {}", e);
                    String::new()
                }
            },
        };
        if bot_name.is_empty() {
            warn!("Bot username unknown; only unsuffixed commands are accepted");
        } else {
            info!("  Bot username: @{}", bot_name);
        }

        let gate = WebhookGate::new(
            bank.clone(),
            Notifier::new(telegram.clone(), ChatId(config.chat_id)),
            config.account.clone(),
            config.timezone,
        );
        let unfreeze = UnfreezeFlow::new(telegram, bank, config.webhook_url.clone(), bot_name);

        Self::new(gate, unfreeze)
    }
}
