//! Daily expense aggregation.

use crate::{MinorUnits, Transaction, CURRENCY};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Detail text used when no expense has a description.
pub const NO_TRANSACTIONS: &str = "No transactions found.";

/// Expenses for one notification cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    /// Signed sum of negative amounts (never positive).
    pub total_minor_units: MinorUnits,
    /// `"description: amount UAH"` per described expense, in statement order.
    /// Holds the placeholder line when there are none.
    pub lines: Vec<String>,
    /// Local time the summary was built
    pub generated_at: String,
}

impl ExpenseSummary {
    /// Sum expenses (amount < 0) and list the described ones.
    ///
    /// Income and zero-amount items are skipped. Expenses without a description
    /// count toward the total but get no line.
    pub fn from_transactions(transactions: &[Transaction], generated_at: impl Into<String>) -> Self {
        let mut total = MinorUnits::ZERO;
        let mut lines = Vec::new();

        for tx in transactions.iter().filter(|tx| tx.is_expense()) {
            debug!(
                description = tx.description.as_deref().unwrap_or_default(),
                amount = tx.amount.to_major(),
                "Expense"
            );

            total = total + tx.amount;

            if let Some(label) = tx.label() {
                lines.push(format!("{}: {} {}", label, tx.amount, CURRENCY));
            }
        }

        if lines.is_empty() {
            lines.push(NO_TRANSACTIONS.to_string());
        }

        Self {
            total_minor_units: total,
            lines,
            generated_at: generated_at.into(),
        }
    }

    /// Total spent as a positive amount.
    pub fn spent(&self) -> MinorUnits {
        -self.total_minor_units
    }

    /// Display total, e.g. `15.50`.
    pub fn total_display(&self) -> String {
        self.spent().to_string()
    }

    /// Detail lines joined for a message body.
    pub fn details(&self) -> String {
        self.lines.join("\n")
    }
}
