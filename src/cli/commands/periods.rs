use peseta_core::{BudgetPeriodEngine, BudgetService};

use super::{parse_amount, parse_period, require_args};
use crate::cli::context::{parse_date, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render::{progress_bar, PROGRESS_WIDTH};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "end-date",
            "Preview where a budget's first period ends",
            "end-date <YYYY-MM-DD> <weekly|biweekly|monthly>",
            cmd_end_date,
        ),
        CommandEntry::new(
            "period",
            "Show the period containing a date",
            "period <start YYYY-MM-DD> <period> [as-of YYYY-MM-DD]",
            cmd_period,
        ),
        CommandEntry::new(
            "status",
            "Classify spend against a limit",
            "status <spent> <limit>",
            cmd_status,
        ),
    ]
}

fn cmd_end_date(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "end-date <YYYY-MM-DD> <weekly|biweekly|monthly>";
    require_args(args, 2..=2, USAGE)?;
    let start = parse_date(args[0])?;
    let period_type = parse_period(args[1])?;

    let end = BudgetService::preview_end_date(start, period_type)?;
    output::info(format!("Fin del periodo: {} ({})", end, period_type.label()));
    output::hint(period_type.reset_hint());
    Ok(())
}

fn cmd_period(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "period <start YYYY-MM-DD> <period> [as-of YYYY-MM-DD]";
    require_args(args, 2..=3, USAGE)?;
    let start = parse_date(args[0])?;
    let period_type = parse_period(args[1])?;
    let as_of = context.as_of(args.get(2))?;

    let period = match args.get(2) {
        Some(_) => BudgetPeriodEngine::compute_current_period(start, period_type, as_of)?,
        None => BudgetPeriodEngine::current_period_today(start, period_type, context.clock())?,
    };
    output::info(format!(
        "Periodo actual: {} ({} días, {} restantes al {})",
        period,
        period.days(),
        period.days_remaining(as_of),
        as_of
    ));
    Ok(())
}

fn cmd_status(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2..=2, "status <spent> <limit>")?;
    let spent = parse_amount(args[0])?;
    let limit = parse_amount(args[1])?;

    let status = BudgetPeriodEngine::classify_status(spent, limit)?;
    let bar = progress_bar(status.percent_used, PROGRESS_WIDTH);
    output::block(output::level_color(
        status.level,
        status.is_over_budget,
        &format!("{} {:.2}% {}", bar, status.percent_used, status.level),
    ));
    output::info(format!(
        "remaining={:.2} over_budget={} near_limit={}",
        status.remaining, status.is_over_budget, status.is_near_limit
    ));
    Ok(())
}
