//! Text rendering for budget cards, alert summaries and the category catalog.
//!
//! Everything here returns plain strings; callers decide on color.

use chrono::NaiveDate;
use peseta_config::Config;
use peseta_domain::{BudgetAlerts, EvaluatedBudget, ExpenseCategory, ExpenseImpact, StatusLevel};
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};

use super::table::{Table, TableColumn};

pub const PROGRESS_WIDTH: usize = 20;
const FILLED: char = '█';
const EMPTY: char = '░';

/// Locale-aware money and percentage formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    symbol: String,
    group: char,
    decimal: char,
}

impl MoneyFormat {
    /// Spanish locales group with spaces and use a decimal comma.
    pub fn new(locale: &str, symbol: &str) -> Self {
        let spanish = locale.to_ascii_lowercase().starts_with("es");
        Self {
            symbol: symbol.to_string(),
            group: if spanish { ' ' } else { ',' },
            decimal: if spanish { ',' } else { '.' },
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.locale, &config.currency_symbol)
    }

    pub fn amount(&self, value: Decimal) -> String {
        let sign = if value.is_sign_negative() && !value.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{}{}{}", sign, self.symbol, self.number(value.abs()))
    }

    pub fn percent(&self, value: Decimal) -> String {
        format!("{}%", self.number(value))
    }

    fn number(&self, value: Decimal) -> String {
        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let text = format!("{:.2}", rounded);
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        let (sign, digits) = match whole.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", whole),
        };

        let mut grouped = String::new();
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push(self.group);
            }
            grouped.push(ch);
        }
        format!("{}{}{}{}", sign, grouped, self.decimal, fraction)
    }
}

/// Fixed-width bar filled in proportion to `percent_used`.
pub fn progress_bar(percent_used: Decimal, width: usize) -> String {
    let clamped = percent_used.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let filled = (clamped * Decimal::from(width) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    bar.extend(std::iter::repeat(FILLED).take(filled));
    bar.extend(std::iter::repeat(EMPTY).take(width - filled));
    bar.push(']');
    bar
}

pub fn status_label(entry: &EvaluatedBudget) -> &'static str {
    if entry.is_over_budget() {
        return "Excedido";
    }
    match entry.status.level {
        StatusLevel::Ok => "En rango",
        StatusLevel::Warning => "Cerca del límite",
        StatusLevel::Danger => "Crítico",
    }
}

fn status_icon(entry: &EvaluatedBudget) -> &'static str {
    if entry.is_over_budget() {
        "✖"
    } else if entry.is_near_limit() {
        "▲"
    } else {
        "●"
    }
}

/// Multi-line card for one evaluated budget.
pub fn budget_card(entry: &EvaluatedBudget, as_of: NaiveDate, money: &MoneyFormat) -> String {
    let budget = &entry.budget;
    let mut title = format!(
        "{} · {} · {}",
        budget.display_name(),
        budget.period_type.label(),
        status_label(entry)
    );
    if !budget.active {
        title.push_str(" · Inactivo");
    }

    let days_left = entry.period.days_remaining(as_of);
    let lines = [
        title,
        format!(
            "  {} {}",
            progress_bar(entry.status.percent_used, PROGRESS_WIDTH),
            money.percent(entry.status.percent_used)
        ),
        format!(
            "  Gastado    {} de {}",
            money.amount(entry.total_spent),
            money.amount(budget.limit_amount)
        ),
        format!(
            "  {:<10} {}",
            remaining_label(entry.status.remaining),
            money.amount(entry.status.remaining.abs())
        ),
        format!(
            "  Periodo    {} ({} día{} restante{})",
            entry.period,
            days_left,
            plural(days_left),
            plural(days_left)
        ),
        format!("  Id         {}", budget.id),
    ];
    lines.join("\n")
}

/// `Disponible` while money is left, `Excedido` once the limit is passed.
pub fn remaining_label(remaining: Decimal) -> &'static str {
    if remaining.is_sign_negative() && !remaining.is_zero() {
        "Excedido"
    } else {
        "Disponible"
    }
}

/// Budget box shown before an expense is recorded, with the overshoot warning when it applies.
pub fn expense_impact(impact: &ExpenseImpact, money: &MoneyFormat) -> String {
    let entry = &impact.evaluated;
    let remaining = impact.remaining_before();
    let mut lines = vec![
        format!("Presupuesto de {}", entry.budget.display_name()),
        format!(
            "  {}: {}",
            remaining_label(remaining),
            money.amount(remaining.abs())
        ),
        format!(
            "  Has gastado {} de {} ({})",
            money.amount(entry.total_spent),
            money.amount(entry.budget.limit_amount),
            entry.period
        ),
    ];
    match impact.overshoot {
        Some(overshoot) => lines.push(format!(
            "  Esta cantidad excederá tu presupuesto por {}",
            money.amount(overshoot)
        )),
        None => lines.push(format!(
            "  Tras registrar {} quedarían {} disponibles",
            money.amount(impact.amount),
            money.amount(impact.remaining_after())
        )),
    }
    lines.join("\n")
}

/// Alert headline, banner copy and one line per flagged budget.
///
/// With `include_near_limit` off only over-budget entries are reported.
pub fn alerts_summary(
    alerts: &BudgetAlerts,
    money: &MoneyFormat,
    include_near_limit: bool,
) -> String {
    let shown = if include_near_limit {
        alerts.clone()
    } else {
        BudgetAlerts {
            total_alerts: alerts.over_budget.len(),
            over_budget: alerts.over_budget.clone(),
            near_limit: Vec::new(),
        }
    };

    let Some(banner) = shown.banner_message() else {
        return "Sin alertas: todos los presupuestos están en rango.".to_string();
    };

    let mut lines = vec![shown.headline(), banner];
    for entry in shown.over_budget.iter().chain(shown.near_limit.iter()) {
        lines.push(format!(
            "  {} {}: {} de {} ({})",
            status_icon(entry),
            entry.budget.display_name(),
            money.amount(entry.total_spent),
            money.amount(entry.budget.limit_amount),
            money.percent(entry.status.percent_used)
        ));
    }
    lines.join("\n")
}

/// One-line-per-budget overview.
pub fn budgets_table(entries: &[EvaluatedBudget], money: &MoneyFormat) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("CATEGORÍA"),
        TableColumn::left("PERIODO"),
        TableColumn::right("GASTADO"),
        TableColumn::right("LÍMITE"),
        TableColumn::right("USO"),
        TableColumn::left("ESTADO"),
    ]);
    for entry in entries {
        table.push_row(vec![
            entry.budget.display_name(),
            entry.budget.period_type.label().to_string(),
            money.amount(entry.total_spent),
            money.amount(entry.budget.limit_amount),
            money.percent(entry.status.percent_used),
            status_label(entry).to_string(),
        ]);
    }
    table.render()
}

pub fn categories_table() -> String {
    let mut table = Table::new(vec![TableColumn::right("ID"), TableColumn::left("CATEGORÍA")]);
    for category in ExpenseCategory::all() {
        table.push_row(vec![category.id.to_string(), category.name.to_string()]);
    }
    table.render()
}

fn plural(count: i64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
