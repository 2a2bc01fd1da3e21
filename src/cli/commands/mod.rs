use std::{ops::RangeInclusive, str::FromStr};

use peseta_core::CoreError;
use peseta_domain::{CategoryId, PeriodType};
use rust_decimal::Decimal;

use super::context::CommandError;
use super::registry::CommandRegistry;

mod budgets;
mod config;
mod periods;
mod system;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in periods::definitions()
        .into_iter()
        .chain(budgets::definitions())
        .chain(config::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}

pub(crate) fn require_args(
    args: &[&str],
    range: RangeInclusive<usize>,
    usage: &str,
) -> Result<(), CommandError> {
    if range.contains(&args.len()) {
        Ok(())
    } else {
        Err(CommandError::InvalidArguments(format!("usage: {}", usage)))
    }
}

pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, CommandError> {
    Decimal::from_str(raw.trim())
        .map_err(|_| CoreError::InvalidInput(format!("`{}` is not an amount", raw)).into())
}

pub(crate) fn parse_period(raw: &str) -> Result<PeriodType, CommandError> {
    Ok(PeriodType::from_str(raw).map_err(CoreError::from)?)
}

pub(crate) fn parse_category(raw: &str) -> Result<CategoryId, CommandError> {
    raw.trim()
        .parse::<CategoryId>()
        .map_err(|_| CoreError::InvalidInput(format!("`{}` is not a category id", raw)).into())
}
