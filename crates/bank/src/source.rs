//! Traits for the banking API operations the service depends on.

use crate::BankResult;
use async_trait::async_trait;
use expense_core::{StatementWindow, Transaction};

/// Source of statement transactions for an account.
#[async_trait]
pub trait StatementSource: Send + Sync {
    /// Fetch transactions for `account` within `window`, in statement order.
    async fn fetch_statement(
        &self,
        account: &str,
        window: StatementWindow,
    ) -> BankResult<Vec<Transaction>>;
}

/// Registers the URL the bank pushes statement events to.
#[async_trait]
pub trait WebhookRegistrar: Send + Sync {
    async fn register_webhook(&self, url: &str) -> BankResult<()>;
}
