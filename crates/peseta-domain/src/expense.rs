use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::CategoryId;

/// A recorded expense as returned by the transactions API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub category: CategoryId,
}

impl Expense {
    pub fn new(amount: Decimal, date: NaiveDate, category: CategoryId) -> Self {
        Self {
            id: None,
            amount,
            description: String::new(),
            date,
            category,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
