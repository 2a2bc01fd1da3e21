//! peseta-domain
//!
//! Pure domain models (Budget, PeriodType, BudgetPeriod, statuses, expenses).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod budget;
pub mod category;
pub mod expense;
pub mod period;
pub mod status;

pub use budget::*;
pub use category::*;
pub use expense::*;
pub use period::*;
pub use status::*;
