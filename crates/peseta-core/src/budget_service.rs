//! Validation and evaluation for budget create/edit flows.

use chrono::NaiveDate;
use peseta_domain::{
    Budget, BudgetDraft, BudgetUpdate, CategoryId, EvaluatedBudget, ExpenseCategory, PeriodType,
    UNSELECTED_CATEGORY,
};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{period_engine::BudgetPeriodEngine, CoreError};

/// HTTP status the budgets API answers with when a category already has an active budget.
pub const CONFLICT_STATUS: u16 = 409;
const NOT_FOUND_STATUS: u16 = 404;

/// Stateless budget helpers shared by every screen that creates, edits or shows budgets.
pub struct BudgetService;

impl BudgetService {
    /// Validates a draft and turns it into a new active budget.
    pub fn create(draft: BudgetDraft) -> Result<Budget, CoreError> {
        let category = Self::validate_category(draft.category_id)?;
        Self::validate_limit(draft.limit_amount)?;
        // Fails early if the first period cannot be represented.
        BudgetPeriodEngine::compute_period_end(draft.start_date, draft.period_type)?;

        let budget = Budget::new(
            category.id,
            draft.limit_amount,
            draft.period_type,
            draft.start_date,
        )
        .with_category_name(category.name);
        debug!(budget_id = %budget.id, category = category.name, "created budget");
        Ok(budget)
    }

    /// Applies an edit and returns the recomputed end of the first period.
    ///
    /// The budget is left untouched when validation fails.
    pub fn apply_update(budget: &mut Budget, update: BudgetUpdate) -> Result<NaiveDate, CoreError> {
        Self::validate_limit(update.limit_amount)?;
        let end = BudgetPeriodEngine::compute_period_end(update.start_date, update.period_type)?;

        budget.limit_amount = update.limit_amount;
        budget.period_type = update.period_type;
        budget.start_date = update.start_date;
        debug!(budget_id = %budget.id, %end, "updated budget");
        Ok(end)
    }

    /// End date preview shown while a create or edit form is being filled in.
    pub fn preview_end_date(
        start_date: NaiveDate,
        period_type: PeriodType,
    ) -> Result<NaiveDate, CoreError> {
        BudgetPeriodEngine::compute_period_end(start_date, period_type)
    }

    /// Resolves the active period containing `as_of` and classifies `total_spent` within it.
    pub fn evaluate(
        budget: &Budget,
        total_spent: Decimal,
        as_of: NaiveDate,
    ) -> Result<EvaluatedBudget, CoreError> {
        let period = BudgetPeriodEngine::compute_current_period(
            budget.start_date,
            budget.period_type,
            as_of,
        )?;
        let status = BudgetPeriodEngine::classify_status(total_spent, budget.limit_amount)?;
        Ok(EvaluatedBudget {
            budget: budget.clone(),
            period,
            total_spent,
            status,
        })
    }

    /// Maps a failed budgets API response onto the core error taxonomy.
    pub fn interpret_rejection(
        status: u16,
        category_id: CategoryId,
        body: Option<&str>,
    ) -> CoreError {
        let error = match status {
            CONFLICT_STATUS => CoreError::DuplicateActiveBudget(category_id),
            NOT_FOUND_STATUS => CoreError::BudgetNotFound(
                body.map(str::to_string)
                    .unwrap_or_else(|| format!("category {}", category_id)),
            ),
            _ => CoreError::Rejected {
                status,
                message: body
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or("budget request failed")
                    .to_string(),
            },
        };
        warn!(status, category_id, %error, "budget request rejected");
        error
    }

    pub fn validate_limit(limit_amount: Decimal) -> Result<(), CoreError> {
        if limit_amount <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(format!(
                "limit amount must be greater than 0 (got {})",
                limit_amount
            )));
        }
        Ok(())
    }

    pub fn validate_category(category_id: CategoryId) -> Result<ExpenseCategory, CoreError> {
        if category_id == UNSELECTED_CATEGORY {
            return Err(CoreError::InvalidInput("a category must be selected".into()));
        }
        ExpenseCategory::from_id(category_id).ok_or_else(|| {
            CoreError::InvalidInput(format!("unknown expense category {}", category_id))
        })
    }
}
