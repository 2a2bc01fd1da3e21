use peseta_config::Config;

use super::{parse_period, require_args};
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "config [show|set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View or change preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|action| action.to_lowercase()).as_deref() {
        None | Some("show") => {
            require_args(args, 0..=1, USAGE)?;
            show_config(context)
        }
        Some("set") => {
            require_args(args, 3..=3, USAGE)?;
            set_config_value(context, args[1], args[2])
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`; usage: {}",
            other, USAGE
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    for key in Config::KEYS {
        output::block(format!("  {:<20} {}", key, context.config.get(key)?));
    }
    let last = context
        .config
        .last_snapshot
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(none)".into());
    output::block(format!("  {:<20} {}", "last_snapshot", last));
    output::block(format!(
        "  {:<20} {}",
        "file",
        context.config_manager.config_path().display()
    ));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    if key == "default_period_type" {
        parse_period(value)?;
    }
    context.config.set(key, value)?;
    context.persist_config()?;
    if key == "ui_color_enabled" {
        context.apply_output_preferences();
    }
    output::success(format!("Set {} = {}", key, context.config.get(key)?));
    Ok(())
}
