use std::path::PathBuf;

use peseta_domain::{BudgetDraft, BudgetUpdate, ExpenseCategory};
use tracing::{info, warn};

use super::{parse_amount, parse_category, parse_period, require_args};
use crate::cli::context::{parse_date, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::snapshot::BudgetSnapshot;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "load",
            "Load a budget snapshot (JSON)",
            "load <path>",
            cmd_load,
        ),
        CommandEntry::new(
            "save",
            "Write the current snapshot to disk",
            "save [path]",
            cmd_save,
        ),
        CommandEntry::new(
            "budgets",
            "List budgets with their current period and progress",
            "budgets [as-of YYYY-MM-DD] [--table]",
            cmd_budgets,
        ),
        CommandEntry::new(
            "alerts",
            "Summarize over-budget and near-limit budgets",
            "alerts [as-of YYYY-MM-DD]",
            cmd_alerts,
        ),
        CommandEntry::new(
            "create",
            "Create a budget in the loaded snapshot",
            "create <category-id> <limit> [period] <start YYYY-MM-DD>",
            cmd_create,
        ),
        CommandEntry::new(
            "edit",
            "Change limit, period, or start of a budget",
            "edit <budget-id-prefix> <limit> <period> <start YYYY-MM-DD>",
            cmd_edit,
        ),
        CommandEntry::new(
            "delete",
            "Deactivate a budget so its category can take a new one",
            "delete <budget-id-prefix>",
            cmd_delete,
        ),
        CommandEntry::new(
            "check",
            "Show how an expense would affect its category's budget",
            "check <category-id> <amount> [as-of YYYY-MM-DD]",
            cmd_check,
        ),
        CommandEntry::new(
            "categories",
            "List expense categories budgets can target",
            "categories",
            cmd_categories,
        ),
    ]
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1..=1, "load <path>")?;
    let path = PathBuf::from(args[0]);
    let snapshot = BudgetSnapshot::load(&path)?;
    output::success(format!(
        "Loaded {} budgets and {} expenses from {}.",
        snapshot.budgets.len(),
        snapshot.expenses.len(),
        path.display()
    ));
    context.set_snapshot(snapshot, Some(path.clone()));
    context.remember_snapshot(&path)
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 0..=1, "save [path]")?;
    let path = match args.first() {
        Some(raw) => PathBuf::from(raw),
        None => context.snapshot_path.clone().ok_or_else(|| {
            CommandError::InvalidArguments("no snapshot path yet: use `save <path>`".into())
        })?,
    };
    context.snapshot()?.save(&path)?;
    output::success(format!("Saved snapshot to {}.", path.display()));
    context.snapshot_path = Some(path.clone());
    context.remember_snapshot(&path)
}

fn cmd_budgets(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "budgets [as-of YYYY-MM-DD] [--table]";
    require_args(args, 0..=2, USAGE)?;
    let as_table = args.contains(&"--table");
    let dates: Vec<&&str> = args.iter().filter(|arg| **arg != "--table").collect();
    if dates.len() > 1 {
        return Err(CommandError::InvalidArguments(format!("usage: {}", USAGE)));
    }
    let as_of = context.as_of(dates.first().copied())?;

    let evaluated = context.snapshot()?.evaluate(as_of)?;
    if evaluated.is_empty() {
        output::info(format!("No budgets in effect on {}.", as_of));
        return Ok(());
    }

    let money = context.money_format();
    output::section(format!("Presupuestos al {}", as_of));
    if as_table {
        output::block(render::budgets_table(&evaluated, &money));
    } else {
        for entry in &evaluated {
            let card = render::budget_card(entry, as_of, &money);
            output::block(output::level_color(
                entry.status.level,
                entry.is_over_budget(),
                &card,
            ));
        }
    }

    let alerts = peseta_core::BudgetAlertAggregator::aggregate(&evaluated);
    if let Some(banner) = alerts.banner_message() {
        output::warning(banner);
    }
    Ok(())
}

fn cmd_alerts(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 0..=1, "alerts [as-of YYYY-MM-DD]")?;
    let as_of = context.as_of(args.first())?;
    let alerts = context.snapshot()?.alerts(as_of)?;
    info!(%as_of, total = alerts.total_alerts, "computed budget alerts");

    let summary = render::alerts_summary(
        &alerts,
        &context.money_format(),
        context.config.near_limit_alerts,
    );
    output::block(summary);
    Ok(())
}

fn cmd_create(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "create <category-id> <limit> [period] <start YYYY-MM-DD>";
    require_args(args, 3..=4, USAGE)?;
    let category_id = parse_category(args[0])?;
    let limit_amount = parse_amount(args[1])?;
    let (period_type, start_date) = if args.len() == 4 {
        (parse_period(args[2])?, parse_date(args[3])?)
    } else {
        let configured = &context.config.default_period_type;
        let fallback = parse_period(configured).map_err(|err| {
            warn!(value = %configured, "invalid default_period_type in config");
            CommandError::InvalidArguments(format!(
                "config default_period_type is invalid ({}); pass a period or fix it with `config set default_period_type <period>`",
                err
            ))
        })?;
        (fallback, parse_date(args[2])?)
    };

    let budget = context.snapshot_or_default().add_budget(BudgetDraft {
        category_id,
        limit_amount,
        period_type,
        start_date,
    })?;
    output::success(format!(
        "Presupuesto creado: {} · {} desde {} ({})",
        budget.display_name(),
        budget.period_type.label(),
        budget.start_date,
        budget.id
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "edit <budget-id-prefix> <limit> <period> <start YYYY-MM-DD>";
    require_args(args, 4..=4, USAGE)?;
    let update = BudgetUpdate {
        limit_amount: parse_amount(args[1])?,
        period_type: parse_period(args[2])?,
        start_date: parse_date(args[3])?,
    };

    let (budget, end) = context.snapshot_mut()?.update_budget(args[0], update)?;
    output::success(format!(
        "Presupuesto actualizado: {} · {} del {} al {}",
        budget.display_name(),
        budget.period_type.label(),
        budget.start_date,
        end
    ));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1..=1, "delete <budget-id-prefix>")?;
    let budget = context.snapshot_mut()?.deactivate_budget(args[0])?;
    output::success(format!(
        "Presupuesto eliminado: {} · {} ({})",
        budget.display_name(),
        budget.period_type.label(),
        budget.id
    ));
    Ok(())
}

fn cmd_check(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2..=3, "check <category-id> <amount> [as-of YYYY-MM-DD]")?;
    let category_id = parse_category(args[0])?;
    let amount = parse_amount(args[1])?;
    let as_of = context.as_of(args.get(2))?;

    let Some(impact) = context
        .snapshot()?
        .project_expense(category_id, amount, as_of)?
    else {
        let name = ExpenseCategory::from_id(category_id)
            .map(|category| category.name.to_string())
            .unwrap_or_else(|| format!("Categoría {}", category_id));
        output::info(format!(
            "No hay presupuesto activo para la categoría {} al {}.",
            name, as_of
        ));
        return Ok(());
    };

    let money = context.money_format();
    let text = render::expense_impact(&impact, &money);
    if impact.exceeds_budget() {
        output::warning(text);
    } else {
        output::block(text);
    }
    Ok(())
}

fn cmd_categories(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 0..=0, "categories")?;
    output::block(render::categories_table());
    Ok(())
}
