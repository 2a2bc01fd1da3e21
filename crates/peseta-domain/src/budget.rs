use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category::CategoryId, period::PeriodType};

/// A recurring spending guardrail for one expense category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: Uuid,
    pub category_id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub limit_amount: Decimal,
    pub period_type: PeriodType,
    pub start_date: NaiveDate,
    #[serde(default = "Budget::default_active")]
    pub active: bool,
}

impl Budget {
    pub fn new(
        category_id: CategoryId,
        limit_amount: Decimal,
        period_type: PeriodType,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            category_name: None,
            limit_amount,
            period_type,
            start_date,
            active: true,
        }
    }

    pub fn with_category_name(mut self, name: impl Into<String>) -> Self {
        self.category_name = Some(name.into());
        self
    }

    pub fn default_active() -> bool {
        true
    }

    /// Display name, falling back to the numeric category id.
    pub fn display_name(&self) -> String {
        self.category_name
            .clone()
            .unwrap_or_else(|| format!("Categoría {}", self.category_id))
    }
}

/// Values captured when a user creates a new budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDraft {
    pub category_id: CategoryId,
    pub limit_amount: Decimal,
    #[serde(default)]
    pub period_type: PeriodType,
    pub start_date: NaiveDate,
}

/// Editable fields of an existing budget. The category is fixed once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub limit_amount: Decimal,
    pub period_type: PeriodType,
    pub start_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn deserializes_api_payload() {
        let json = r#"{
            "id": "6f1c2a4e-3b5d-4c1e-9a7f-2d8e0b1c4a55",
            "categoryId": 1,
            "categoryName": "Comida",
            "limitAmount": 50000.50,
            "periodType": "biweekly",
            "startDate": "2024-03-04"
        }"#;
        let budget: Budget = serde_json::from_str(json).unwrap();
        assert_eq!(budget.category_id, 1);
        assert_eq!(budget.limit_amount, dec!(50000.50));
        assert_eq!(budget.period_type, PeriodType::Biweekly);
        assert_eq!(budget.start_date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert!(budget.active, "missing flag defaults to active");
    }

    #[test]
    fn limit_amount_accepts_string_decimals() {
        let json = r#"{
            "id": "6f1c2a4e-3b5d-4c1e-9a7f-2d8e0b1c4a55",
            "categoryId": 2,
            "limitAmount": "1250.75",
            "periodType": "weekly",
            "startDate": "2024-03-04",
            "active": false
        }"#;
        let budget: Budget = serde_json::from_str(json).unwrap();
        assert_eq!(budget.limit_amount, dec!(1250.75));
        assert!(!budget.active);
    }

    #[test]
    fn display_name_falls_back_to_category_id() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let budget = Budget::new(7, dec!(100), PeriodType::Monthly, date);
        assert_eq!(budget.display_name(), "Categoría 7");
        assert_eq!(budget.with_category_name("Alquiler").display_name(), "Alquiler");
    }
}
