//! Sums recorded expenses into per-budget spend figures.

use chrono::NaiveDate;
use peseta_domain::{Budget, BudgetPeriod, CategoryId, EvaluatedBudget, Expense, ExpenseImpact};
use rust_decimal::Decimal;
use tracing::debug;

use crate::{budget_service::BudgetService, period_engine::BudgetPeriodEngine, CoreError};

/// Stateless spend utilities over expense lists.
pub struct SpendingService;

impl SpendingService {
    /// Totals expenses of `category_id` dated inside `period` (both ends included).
    pub fn total_in_period(
        expenses: &[Expense],
        category_id: CategoryId,
        period: &BudgetPeriod,
    ) -> Result<Decimal, CoreError> {
        expenses
            .iter()
            .filter(|expense| expense.category == category_id && period.contains(expense.date))
            .try_fold(Decimal::ZERO, |total, expense| {
                total.checked_add(expense.amount).ok_or_else(|| {
                    CoreError::InvalidInput(format!(
                        "spend for category {} overflows",
                        category_id
                    ))
                })
            })
    }

    /// Evaluates one budget for the period containing `as_of`.
    pub fn evaluate_budget(
        budget: &Budget,
        expenses: &[Expense],
        as_of: NaiveDate,
    ) -> Result<EvaluatedBudget, CoreError> {
        let period = BudgetPeriodEngine::compute_current_period(
            budget.start_date,
            budget.period_type,
            as_of,
        )?;
        let total_spent = Self::total_in_period(expenses, budget.category_id, &period)?;
        BudgetService::evaluate(budget, total_spent, as_of)
    }

    /// Projects a prospective expense of `amount` onto the budget's current period.
    ///
    /// The overshoot is measured against what remains before the expense, so a
    /// budget that is already over reports the whole amount plus the deficit.
    pub fn project_expense(
        budget: &Budget,
        expenses: &[Expense],
        amount: Decimal,
        as_of: NaiveDate,
    ) -> Result<ExpenseImpact, CoreError> {
        if amount <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(format!(
                "expense amount must be greater than 0 (got {})",
                amount
            )));
        }
        let evaluated = Self::evaluate_budget(budget, expenses, as_of)?;
        let remaining = evaluated.status.remaining;
        let overshoot = (amount > remaining).then(|| amount.saturating_sub(remaining));
        debug!(budget_id = %budget.id, %amount, %remaining, ?overshoot, "projected expense");
        Ok(ExpenseImpact {
            evaluated,
            amount,
            overshoot,
        })
    }

    /// Evaluates every budget that has started by `as_of`, inactive ones included.
    ///
    /// Budgets whose start date is still ahead have no current period and are
    /// left out of the result.
    pub fn evaluate_all(
        budgets: &[Budget],
        expenses: &[Expense],
        as_of: NaiveDate,
    ) -> Result<Vec<EvaluatedBudget>, CoreError> {
        let mut evaluated = Vec::with_capacity(budgets.len());
        for budget in budgets {
            if !Self::has_started(budget, as_of) {
                debug!(budget_id = %budget.id, start = %budget.start_date, "budget not started yet");
                continue;
            }
            evaluated.push(Self::evaluate_budget(budget, expenses, as_of)?);
        }
        Ok(evaluated)
    }

    /// Whether `as_of` falls in or after the budget's first period.
    pub fn has_started(budget: &Budget, as_of: NaiveDate) -> bool {
        BudgetPeriodEngine::compute_current_period(budget.start_date, budget.period_type, as_of)
            .is_ok()
    }
}
