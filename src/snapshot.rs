//! Budget snapshots: the budgets and expenses the API returned, held in memory.

use std::{fs, path::Path};

use chrono::NaiveDate;
use peseta_core::{
    budget_service::CONFLICT_STATUS, BudgetAlertAggregator, BudgetService, CoreError,
    SpendingService,
};
use peseta_domain::{
    Budget, BudgetAlerts, BudgetDraft, BudgetUpdate, CategoryId, EvaluatedBudget, Expense,
    ExpenseCategory, ExpenseImpact,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::PesetaError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BudgetSnapshot {
    pub budgets: Vec<Budget>,
    pub expenses: Vec<Expense>,
}

impl BudgetSnapshot {
    pub fn load(path: &Path) -> Result<Self, PesetaError> {
        let data = fs::read_to_string(path)?;
        let snapshot = Self::from_json(&data)?;
        info!(
            path = %path.display(),
            budgets = snapshot.budgets.len(),
            expenses = snapshot.expenses.len(),
            "loaded budget snapshot"
        );
        Ok(snapshot)
    }

    /// Parses the API payload and fills in catalog names the payload left out.
    pub fn from_json(data: &str) -> Result<Self, PesetaError> {
        let mut snapshot: BudgetSnapshot = serde_json::from_str(data)?;
        for budget in snapshot
            .budgets
            .iter_mut()
            .filter(|budget| budget.category_name.is_none())
        {
            if let Some(category) = ExpenseCategory::from_id(budget.category_id) {
                budget.category_name = Some(category.name.to_string());
            }
        }
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> Result<(), PesetaError> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        info!(path = %path.display(), "saved budget snapshot");
        Ok(())
    }

    pub fn evaluate(&self, as_of: NaiveDate) -> Result<Vec<EvaluatedBudget>, PesetaError> {
        Ok(SpendingService::evaluate_all(&self.budgets, &self.expenses, as_of)?)
    }

    pub fn alerts(&self, as_of: NaiveDate) -> Result<BudgetAlerts, PesetaError> {
        Ok(BudgetAlertAggregator::aggregate(&self.evaluate(as_of)?))
    }

    /// Adds a budget, refusing a second active budget for the same category.
    pub fn add_budget(&mut self, draft: BudgetDraft) -> Result<&Budget, PesetaError> {
        let category_id = draft.category_id;
        if self.active_budget_for(category_id).is_some() {
            let conflict = BudgetService::interpret_rejection(CONFLICT_STATUS, category_id, None);
            return Err(conflict.into());
        }
        let budget = BudgetService::create(draft)?;
        self.budgets.push(budget);
        let index = self.budgets.len() - 1;
        Ok(&self.budgets[index])
    }

    /// Edits the budget whose id starts with `prefix`; returns it with its new first-period end.
    pub fn update_budget(
        &mut self,
        prefix: &str,
        update: BudgetUpdate,
    ) -> Result<(&Budget, NaiveDate), PesetaError> {
        let index = self.position_by_prefix(prefix)?;
        let budget = &mut self.budgets[index];
        let end = BudgetService::apply_update(budget, update)?;
        Ok((&self.budgets[index], end))
    }

    /// Soft-deletes the budget whose id starts with `prefix`, freeing its category.
    pub fn deactivate_budget(&mut self, prefix: &str) -> Result<&Budget, PesetaError> {
        let index = self.position_by_prefix(prefix)?;
        let budget = &mut self.budgets[index];
        if !budget.active {
            warn!(budget_id = %budget.id, "budget already inactive");
            return Err(CoreError::InvalidInput(format!(
                "budget {} is already inactive",
                budget.id
            ))
            .into());
        }
        budget.active = false;
        info!(budget_id = %budget.id, category = budget.category_id, "deactivated budget");
        Ok(&self.budgets[index])
    }

    pub fn active_budget_for(&self, category_id: CategoryId) -> Option<&Budget> {
        self.budgets
            .iter()
            .find(|budget| budget.active && budget.category_id == category_id)
    }

    /// Impact of a prospective expense on the category's active budget.
    ///
    /// `None` when the category has no active budget in effect on `as_of`.
    pub fn project_expense(
        &self,
        category_id: CategoryId,
        amount: Decimal,
        as_of: NaiveDate,
    ) -> Result<Option<ExpenseImpact>, PesetaError> {
        let Some(budget) = self
            .active_budget_for(category_id)
            .filter(|budget| SpendingService::has_started(budget, as_of))
        else {
            debug!(category_id, %as_of, "no active budget for category");
            return Ok(None);
        };
        let impact = SpendingService::project_expense(budget, &self.expenses, amount, as_of)?;
        Ok(Some(impact))
    }

    pub fn find_budget(&self, prefix: &str) -> Result<&Budget, PesetaError> {
        let index = self.position_by_prefix(prefix)?;
        Ok(&self.budgets[index])
    }

    fn position_by_prefix(&self, prefix: &str) -> Result<usize, PesetaError> {
        let needle = prefix.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(CoreError::InvalidInput("budget id must not be empty".into()).into());
        }
        let matches: Vec<usize> = self
            .budgets
            .iter()
            .enumerate()
            .filter(|(_, budget)| budget.id.to_string().starts_with(&needle))
            .map(|(index, _)| index)
            .collect();
        debug!(prefix = %needle, matches = matches.len(), "resolved budget prefix");
        match matches.as_slice() {
            [index] => Ok(*index),
            [] => Err(CoreError::BudgetNotFound(prefix.to_string()).into()),
            _ => Err(CoreError::InvalidInput(format!(
                "budget id `{}` is ambiguous ({} matches)",
                prefix,
                matches.len()
            ))
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peseta_domain::PeriodType;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const PAYLOAD: &str = r#"{
        "budgets": [
            {
                "id": "6f1c2d3e-0000-4000-8000-000000000001",
                "categoryId": 1,
                "limitAmount": "50000",
                "periodType": "monthly",
                "startDate": "2024-03-10"
            },
            {
                "id": "6f1c2d3e-0000-4000-8000-000000000002",
                "categoryId": 2,
                "categoryName": "Bus y taxi",
                "limitAmount": 20000,
                "periodType": "weekly",
                "startDate": "2024-03-04",
                "active": true
            }
        ],
        "expenses": [
            { "amount": 42000, "date": "2024-03-14", "category": 1, "description": "Super" },
            { "amount": "15000.50", "date": "2024-03-18", "category": 2 }
        ]
    }"#;

    #[test]
    fn parses_api_payload_and_fills_catalog_names() {
        let snapshot = BudgetSnapshot::from_json(PAYLOAD).unwrap();
        assert_eq!(snapshot.budgets.len(), 2);
        assert_eq!(snapshot.budgets[0].category_name.as_deref(), Some("Comida"));
        assert_eq!(snapshot.budgets[0].limit_amount, dec!(50000));
        assert!(snapshot.budgets[0].active);
        assert_eq!(
            snapshot.budgets[1].category_name.as_deref(),
            Some("Bus y taxi")
        );
        assert_eq!(snapshot.expenses[1].amount, dec!(15000.50));
    }

    #[test]
    fn empty_document_is_an_empty_snapshot() {
        let snapshot = BudgetSnapshot::from_json("{}").unwrap();
        assert_eq!(snapshot, BudgetSnapshot::default());
        assert!(snapshot.alerts(date(2024, 1, 1)).unwrap().is_empty());
    }

    #[test]
    fn alerts_reflect_current_periods() {
        let snapshot = BudgetSnapshot::from_json(PAYLOAD).unwrap();
        let alerts = snapshot.alerts(date(2024, 3, 20)).unwrap();
        assert_eq!(alerts.total_alerts, 2);
        assert_eq!(alerts.near_limit.len(), 2);
        assert_eq!(alerts.near_limit[0].status.percent_used, dec!(84.00));
        assert_eq!(alerts.near_limit[1].status.percent_used, dec!(75.00));
    }

    #[test]
    fn second_active_budget_for_category_is_a_conflict() {
        let mut snapshot = BudgetSnapshot::from_json(PAYLOAD).unwrap();
        let err = snapshot
            .add_budget(BudgetDraft {
                category_id: 1,
                limit_amount: dec!(1000),
                period_type: PeriodType::Weekly,
                start_date: date(2024, 3, 1),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            PesetaError::Core(CoreError::DuplicateActiveBudget(1))
        ));

        let created = snapshot
            .add_budget(BudgetDraft {
                category_id: 3,
                limit_amount: dec!(1000),
                period_type: PeriodType::Weekly,
                start_date: date(2024, 3, 1),
            })
            .unwrap();
        assert_eq!(created.category_name.as_deref(), Some("Salud"));
        assert_eq!(snapshot.budgets.len(), 3);
    }

    #[test]
    fn update_by_prefix_and_lookup_errors() {
        let mut snapshot = BudgetSnapshot::from_json(PAYLOAD).unwrap();
        let (budget, end) = snapshot
            .update_budget(
                "6F1C2D3E-0000-4000-8000-000000000002",
                BudgetUpdate {
                    limit_amount: dec!(30000),
                    period_type: PeriodType::Biweekly,
                    start_date: date(2024, 4, 1),
                },
            )
            .unwrap();
        assert_eq!(end, date(2024, 4, 14));
        assert_eq!(budget.category_id, 2);
        assert_eq!(budget.limit_amount, dec!(30000));

        assert!(matches!(
            snapshot.find_budget("6f1c2d3e"),
            Err(PesetaError::Core(CoreError::InvalidInput(_)))
        ));
        assert!(matches!(
            snapshot.find_budget("ffff"),
            Err(PesetaError::Core(CoreError::BudgetNotFound(_)))
        ));
    }

    #[test]
    fn save_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budgets.json");
        let snapshot = BudgetSnapshot::from_json(PAYLOAD).unwrap();
        snapshot.save(&path).unwrap();
        assert_eq!(BudgetSnapshot::load(&path).unwrap(), snapshot);
    }

    #[test]
    fn deactivated_budget_frees_its_category() {
        let mut snapshot = BudgetSnapshot::from_json(PAYLOAD).unwrap();
        let removed = snapshot
            .deactivate_budget("6f1c2d3e-0000-4000-8000-000000000001")
            .unwrap();
        assert!(!removed.active);
        assert!(snapshot.active_budget_for(1).is_none());

        let replacement = snapshot
            .add_budget(BudgetDraft {
                category_id: 1,
                limit_amount: dec!(60000),
                period_type: PeriodType::Biweekly,
                start_date: date(2024, 3, 18),
            })
            .unwrap();
        assert!(replacement.active);
        assert_eq!(snapshot.budgets.len(), 3);
        assert_eq!(snapshot.active_budget_for(1).unwrap().limit_amount, dec!(60000));

        assert!(matches!(
            snapshot.deactivate_budget("6f1c2d3e-0000-4000-8000-000000000001"),
            Err(PesetaError::Core(CoreError::InvalidInput(_)))
        ));
    }

    #[test]
    fn projected_expense_uses_active_budget_of_category() {
        let snapshot = BudgetSnapshot::from_json(PAYLOAD).unwrap();
        let impact = snapshot
            .project_expense(1, dec!(10000), date(2024, 3, 20))
            .unwrap()
            .expect("groceries budget");
        assert_eq!(impact.remaining_before(), dec!(8000));
        assert_eq!(impact.overshoot, Some(dec!(2000)));

        assert!(snapshot
            .project_expense(4, dec!(10), date(2024, 3, 20))
            .unwrap()
            .is_none());
        assert!(snapshot
            .project_expense(2, dec!(10), date(2024, 3, 1))
            .unwrap()
            .is_none());
    }
}
