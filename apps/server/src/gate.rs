//! Single-flight guard for the fetch, aggregate and notify cycle.
//!
//! Bank webhooks can arrive in bursts. Only one cycle runs at a time;
//! events arriving while a cycle is in flight are dropped, not queued.

use chrono_tz::Tz;
use expense_alerts::{Delivery, Notifier, TelegramError};
use expense_bank::{BankError, StatementSource};
use expense_core::{
    local_time_label, now_in, ExpenseSummary, MinorUnits, StatementWindow, CURRENCY,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
enum CycleError {
    #[error("Error fetching statement: {0}")]
    Fetch(#[from] BankError),
    #[error("Error sending notification: {0}")]
    Send(#[from] TelegramError),
}

/// Result of one inbound webhook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Summary delivered to the chat.
    Delivered {
        total_minor_units: MinorUnits,
        lines: Vec<String>,
    },
    /// Telegram answered with `ok: false`.
    Rejected { description: String },
    /// Fetch or transport failure.
    Failed { reason: String },
    /// Another cycle was in flight; event dropped.
    Skipped,
}

/// Resets the busy flag when the cycle ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs at most one expense cycle at a time.
pub struct WebhookGate {
    busy: AtomicBool,
    source: Arc<dyn StatementSource>,
    notifier: Notifier,
    account: String,
    timezone: Tz,
}

impl WebhookGate {
    pub fn new(
        source: Arc<dyn StatementSource>,
        notifier: Notifier,
        account: impl Into<String>,
        timezone: Tz,
    ) -> Self {
        Self {
            busy: AtomicBool::new(false),
            source,
            notifier,
            account: account.into(),
            timezone,
        }
    }

    /// Whether a cycle is currently in flight.
    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn try_enter(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(&self.busy))
    }

    /// Handle one inbound event. Never fails; errors are logged and reported
    /// in the outcome.
    pub async fn trigger(&self) -> CycleOutcome {
        let Some(_guard) = self.try_enter() else {
            info!("Already processing, ignoring duplicate webhook");
            return CycleOutcome::Skipped;
        };

        match self.run_cycle().await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{}", e);
                CycleOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn run_cycle(&self) -> Result<CycleOutcome, CycleError> {
        let now = now_in(self.timezone);
        let window = StatementWindow::today(now);

        let transactions = self.source.fetch_statement(&self.account, window).await?;
        let summary = ExpenseSummary::from_transactions(&transactions, local_time_label(now));

        info!(
            "Total amount from all transactions today: {} {}",
            summary.total_display(),
            CURRENCY
        );

        let outcome = match self.notifier.notify(&summary).await? {
            Delivery::Sent { .. } => CycleOutcome::Delivered {
                total_minor_units: summary.total_minor_units,
                lines: summary.lines,
            },
            Delivery::Rejected { description } => CycleOutcome::Rejected { description },
        };

        Ok(outcome)
    }
}
