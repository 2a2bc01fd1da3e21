//! peseta-core
//!
//! Budget period arithmetic, spend classification, and alert aggregation.
//! Depends on peseta-domain. No CLI, no terminal I/O, no network or storage access.

pub mod alert_aggregator;
pub mod budget_service;
pub mod error;
pub mod period_engine;
pub mod spending_service;
pub mod time;

pub use alert_aggregator::*;
pub use budget_service::*;
pub use error::CoreError;
pub use period_engine::*;
pub use spending_service::*;
pub use time::{Clock, FixedClock, SystemClock};
