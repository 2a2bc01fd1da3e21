use peseta_domain::{BudgetAlerts, EvaluatedBudget};
use tracing::debug;

/// Partitions evaluated budgets into alert buckets for banners.
pub struct BudgetAlertAggregator;

impl BudgetAlertAggregator {
    /// Collects active over-budget and near-limit budgets, preserving input order.
    ///
    /// Over-budget wins: a budget that is over its limit never shows up in
    /// `near_limit`, whatever its percentage.
    pub fn aggregate(budgets: &[EvaluatedBudget]) -> BudgetAlerts {
        let mut over_budget = Vec::new();
        let mut near_limit = Vec::new();

        for entry in budgets.iter().filter(|entry| entry.is_active()) {
            if entry.is_over_budget() {
                over_budget.push(entry.clone());
            } else if entry.is_near_limit() {
                near_limit.push(entry.clone());
            }
        }

        let total_alerts = over_budget.len() + near_limit.len();
        debug!(
            evaluated = budgets.len(),
            over_budget = over_budget.len(),
            near_limit = near_limit.len(),
            "aggregated budget alerts"
        );
        BudgetAlerts {
            total_alerts,
            over_budget,
            near_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use peseta_domain::{Budget, BudgetPeriod, BudgetStatus, PeriodType, StatusLevel};
    use rust_decimal_macros::dec;

    fn entry(category_id: u32, active: bool, over: bool, near: bool) -> EvaluatedBudget {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let mut budget = Budget::new(category_id, dec!(100), PeriodType::Monthly, start);
        budget.active = active;
        EvaluatedBudget {
            budget,
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
    fn empty_input_has_no_alerts() {
        let alerts = BudgetAlertAggregator::aggregate(&[]);
        assert_eq!(alerts.total_alerts, 0);
        assert!(alerts.over_budget.is_empty());
        assert!(alerts.near_limit.is_empty());
    }

    #[test]
    fn partitions_active_budgets_and_skips_inactive() {
        let a = entry(1, true, true, false);
        let b = entry(2, true, false, true);
        let c = entry(3, false, true, false);

        let alerts = BudgetAlertAggregator::aggregate(&[a.clone(), b.clone(), c]);
        assert_eq!(alerts.over_budget, vec![a]);
        assert_eq!(alerts.near_limit, vec![b]);
        assert_eq!(alerts.total_alerts, 2);
    }

    #[test]
    fn over_budget_takes_precedence_over_near_limit() {
        let both = entry(1, true, true, true);
        let alerts = BudgetAlertAggregator::aggregate(std::slice::from_ref(&both));
        assert_eq!(alerts.over_budget.len(), 1);
        assert!(alerts.near_limit.is_empty());
        assert_eq!(alerts.total_alerts, 1);
    }

    #[test]
    fn preserves_input_order() {
        let first = entry(5, true, false, true);
        let second = entry(2, true, false, true);
        let third = entry(9, true, false, true);
        let alerts = BudgetAlertAggregator::aggregate(&[first, second, third]);
        let ids: Vec<_> = alerts
            .near_limit
            .iter()
            .map(|entry| entry.budget.category_id)
            .collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn aggregation_is_repeatable() {
        let input = vec![entry(1, true, true, false), entry(2, true, false, true)];
        assert_eq!(
            BudgetAlertAggregator::aggregate(&input),
            BudgetAlertAggregator::aggregate(&input)
        );
    }
}
