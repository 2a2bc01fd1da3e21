use peseta_domain::{CategoryId, ParsePeriodTypeError, PeriodWindowError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("An active budget already exists for category {0}")]
    DuplicateActiveBudget(CategoryId),
    #[error("Budget not found: {0}")]
    BudgetNotFound(String),
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl From<ParsePeriodTypeError> for CoreError {
    fn from(err: ParsePeriodTypeError) -> Self {
        CoreError::InvalidInput(err.to_string())
    }
}

impl From<PeriodWindowError> for CoreError {
    fn from(err: PeriodWindowError) -> Self {
        CoreError::InvalidInput(err.to_string())
    }
}
