//! Statement transaction as returned by the banking API.

use crate::MinorUnits;
use serde::{Deserialize, Serialize};

/// One statement item. Unknown fields from the API are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Signed amount; expenses are negative.
    pub amount: MinorUnits,
    /// Merchant or transfer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Statement item id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
}

impl Transaction {
    pub fn new(amount: i64, description: Option<&str>) -> Self {
        Self {
            amount: MinorUnits(amount),
            description: description.map(str::to_string),
            id: None,
            time: None,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    /// Description, if present and not empty.
    pub fn label(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}
