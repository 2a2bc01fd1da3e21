//! Spend classification results and alert summaries.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{budget::Budget, period::BudgetPeriod};

/// Percent used at which a budget enters the warning band.
pub const WARNING_THRESHOLD_PERCENT: Decimal = Decimal::from_parts(70, 0, 0, false, 0);
/// Percent used at which a budget enters the danger band.
pub const DANGER_THRESHOLD_PERCENT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Severity band derived from the percentage of the limit already spent.
pub enum StatusLevel {
    Ok,
    Warning,
    Danger,
}

impl StatusLevel {
    pub fn from_percent(percent_used: Decimal) -> Self {
        if percent_used >= DANGER_THRESHOLD_PERCENT {
            StatusLevel::Danger
        } else if percent_used >= WARNING_THRESHOLD_PERCENT {
            StatusLevel::Warning
        } else {
            StatusLevel::Ok
        }
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatusLevel::Ok => "ok",
            StatusLevel::Warning => "warning",
            StatusLevel::Danger => "danger",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Classification of spend against a limit.
pub struct BudgetStatus {
    /// Capped at 100 and rounded to two decimals.
    pub percent_used: Decimal,
    /// Negative when the limit has been exceeded.
    pub remaining: Decimal,
    pub is_over_budget: bool,
    pub is_near_limit: bool,
    pub level: StatusLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// A budget paired with its active period, spend and status.
pub struct EvaluatedBudget {
    pub budget: Budget,
    pub period: BudgetPeriod,
    pub total_spent: Decimal,
    pub status: BudgetStatus,
}

impl EvaluatedBudget {
    pub fn is_active(&self) -> bool {
        self.budget.active
    }

    pub fn is_over_budget(&self) -> bool {
        self.status.is_over_budget
    }

    pub fn is_near_limit(&self) -> bool {
        self.status.is_near_limit
    }
}

/// What recording one more expense would do to a budget's current period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseImpact {
    pub evaluated: EvaluatedBudget,
    pub amount: Decimal,
    /// How far past the limit the expense would go, `None` when it fits.
    pub overshoot: Option<Decimal>,
}

impl ExpenseImpact {
    pub fn remaining_before(&self) -> Decimal {
        self.evaluated.status.remaining
    }

    pub fn remaining_after(&self) -> Decimal {
        self.remaining_before().saturating_sub(self.amount)
    }

    pub fn exceeds_budget(&self) -> bool {
        self.overshoot.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Partition of active budgets that need the user's attention.
pub struct BudgetAlerts {
    pub total_alerts: usize,
    pub over_budget: Vec<EvaluatedBudget>,
    pub near_limit: Vec<EvaluatedBudget>,
}

impl BudgetAlerts {
    pub fn is_empty(&self) -> bool {
        self.total_alerts == 0
    }

    /// Banner copy shown above the budget list, `None` when nothing needs attention.
    pub fn banner_message(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let mut parts = Vec::new();
        let over = self.over_budget.len();
        if over > 0 {
            parts.push(format!(
                "{over} presupuesto{s} excedido{s}.",
                s = plural_suffix(over)
            ));
        }
        let near = self.near_limit.len();
        if near > 0 {
            parts.push(format!(
                "{near} presupuesto{s} cerca del límite.",
                s = plural_suffix(near)
            ));
        }
        Some(parts.join(" "))
    }

    /// Short headline such as `2 alertas activas`.
    pub fn headline(&self) -> String {
        let s = plural_suffix(self.total_alerts);
        format!("{} alerta{s} activa{s}", self.total_alerts)
    }
}

fn plural_suffix(count: usize) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::PeriodType;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn evaluated(over: bool, near: bool) -> EvaluatedBudget {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        EvaluatedBudget {
            budget: Budget::new(1, dec!(100), PeriodType::Monthly, start),
            period: BudgetPeriod::new(start, end).unwrap(),
            total_spent: dec!(0),
            status: BudgetStatus {
                percent_used: dec!(0),
                remaining: dec!(100),
                is_over_budget: over,
                is_near_limit: near,
                level: StatusLevel::Ok,
            },
        }
    }

    #[test]
    fn level_bands_follow_thresholds() {
        assert_eq!(StatusLevel::from_percent(dec!(69.99)), StatusLevel::Ok);
        assert_eq!(StatusLevel::from_percent(dec!(70)), StatusLevel::Warning);
        assert_eq!(StatusLevel::from_percent(dec!(89.99)), StatusLevel::Warning);
        assert_eq!(StatusLevel::from_percent(dec!(90.00)), StatusLevel::Danger);
        assert_eq!(StatusLevel::from_percent(dec!(100)), StatusLevel::Danger);
    }

    #[test]
    fn banner_is_absent_without_alerts() {
        assert_eq!(BudgetAlerts::default().banner_message(), None);
    }

    #[test]
    fn banner_pluralizes_each_part() {
        let alerts = BudgetAlerts {
            total_alerts: 3,
            over_budget: vec![evaluated(true, false), evaluated(true, false)],
            near_limit: vec![evaluated(false, true)],
        };
        assert_eq!(
            alerts.banner_message().as_deref(),
            Some("2 presupuestos excedidos. 1 presupuesto cerca del límite.")
        );
        assert_eq!(alerts.headline(), "3 alertas activas");
    }

    #[test]
    fn banner_omits_empty_parts() {
        let alerts = BudgetAlerts {
            total_alerts: 1,
            over_budget: Vec::new(),
            near_limit: vec![evaluated(false, true)],
        };
        assert_eq!(
            alerts.banner_message().as_deref(),
            Some("1 presupuesto cerca del límite.")
        );
        assert_eq!(alerts.headline(), "1 alerta activa");
    }
}
