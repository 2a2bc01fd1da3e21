use super::require_args;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Peseta {}", meta.version));
    output::block(format!(
        "  Build hash   : {} ({})",
        meta.git_hash, meta.git_status
    ));
    output::block(format!("  Built at     : {}", meta.timestamp));
    output::block(format!("  Target       : {}", meta.target));
    output::block(format!("  Profile      : {}", meta.profile));
    output::block(format!("  Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 0..=1, "help [command]")?;
    if let Some(raw) = args.first() {
        match context.command(&raw.to_lowercase()) {
            Some(entry) => {
                output::section(format!("Help: {}", entry.name));
                output::block(format!("  Description: {}", entry.description));
                output::block(format!("  Usage: {}", entry.usage));
            }
            None => context.suggest_command(raw),
        }
        return Ok(());
    }

    output::section("Available commands");
    for entry in context.registry.list() {
        output::block(format!("  {:<12} {}", entry.name, entry.description));
    }
    output::hint("Use `help <command>` for details.");
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
