//! Shell state, dispatch, and error reporting.

use std::{
    env,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm};
use peseta_config::{Config, ConfigError, ConfigManager};
use peseta_core::{Clock, CoreError, FixedClock, SystemClock};
use strsim::levenshtein;
use thiserror::Error;
use tracing::{info, warn};

use super::commands;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
use super::render::MoneyFormat;
use crate::errors::{CliError, PesetaError};
use crate::snapshot::BudgetSnapshot;

/// Pins "today" for every command, formatted `YYYY-MM-DD`.
pub const TODAY_ENV: &str = "PESETA_TODAY";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No budget snapshot loaded. Use `load <path>` first.")]
    SnapshotNotLoaded,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Peseta(#[from] PesetaError),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        CommandError::Peseta(err.into())
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::Peseta(err.into())
    }
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub snapshot: Option<BudgetSnapshot>,
    pub snapshot_path: Option<PathBuf>,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
    clock: Box<dyn Clock>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::from_environment()?;
        Self::with_config_manager(mode, config_manager)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        let mut context = ShellContext {
            mode,
            registry,
            config_manager,
            config,
            snapshot: None,
            snapshot_path: None,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
            clock: clock_from_env(),
        };
        context.apply_output_preferences();
        context.auto_load_last();
        Ok(context)
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn auto_load_last(&mut self) {
        if self.mode != CliMode::Interactive {
            return;
        }
        let Some(path) = self.config.last_snapshot.clone() else {
            return;
        };
        if !path.exists() {
            return;
        }
        match BudgetSnapshot::load(&path) {
            Ok(snapshot) => {
                output::success(format!(
                    "Automatically loaded last snapshot `{}`.",
                    path.display()
                ));
                self.set_snapshot(snapshot, Some(path));
            }
            Err(err) => output::warning(format!(
                "Could not reload `{}`: {}",
                path.display(),
                err
            )),
        }
    }

    pub(crate) fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            color_enabled: self.config.ui_color_enabled,
        });
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Parses an optional `as-of` argument, defaulting to today.
    pub(crate) fn as_of(&self, arg: Option<&&str>) -> Result<NaiveDate, CommandError> {
        match arg {
            Some(raw) => parse_date(raw),
            None => Ok(self.today()),
        }
    }

    pub(crate) fn money_format(&self) -> MoneyFormat {
        MoneyFormat::from_config(&self.config)
    }

    pub(crate) fn snapshot(&self) -> Result<&BudgetSnapshot, CommandError> {
        self.snapshot.as_ref().ok_or(CommandError::SnapshotNotLoaded)
    }

    pub(crate) fn snapshot_mut(&mut self) -> Result<&mut BudgetSnapshot, CommandError> {
        self.snapshot.as_mut().ok_or(CommandError::SnapshotNotLoaded)
    }

    /// Budgets created before any `load` land in a fresh snapshot.
    pub(crate) fn snapshot_or_default(&mut self) -> &mut BudgetSnapshot {
        self.snapshot.get_or_insert_with(BudgetSnapshot::default)
    }

    pub(crate) fn set_snapshot(&mut self, snapshot: BudgetSnapshot, path: Option<PathBuf>) {
        self.snapshot = Some(snapshot);
        self.snapshot_path = path;
    }

    pub(crate) fn remember_snapshot(&mut self, path: &Path) -> CommandResult {
        self.config.last_snapshot = Some(path.to_path_buf());
        self.persist_config()
    }

    pub fn prompt(&self) -> String {
        let name = self
            .snapshot_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| format!("[{}]", name.to_string_lossy()))
            .unwrap_or_default();
        format!("peseta{} ⮞ ", name)
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };

        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());

        let control = self.dispatch(&command, raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let lowered = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &lowered), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                warn!(command = ?self.last_command, %message, "invalid arguments");
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::SnapshotNotLoaded => {
                output::error(CommandError::SnapshotNotLoaded);
                output::hint("Try `load budgets.json` or `create 1 50000 monthly 2024-03-01`.");
            }
            CommandError::Peseta(PesetaError::Core(CoreError::DuplicateActiveBudget(category))) => {
                output::error(format!(
                    "Ya existe un presupuesto activo para la categoría {}.",
                    category
                ));
                output::hint("Edit the existing budget with `edit <id> ...` instead.");
            }
            other => {
                warn!(command = ?self.last_command, error = %other, "command failed");
                output::error(other);
            }
        }
    }
}

fn clock_from_env() -> Box<dyn Clock> {
    match env::var(TODAY_ENV) {
        Ok(raw) => match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
            Ok(date) => {
                info!(%date, "using pinned date");
                Box::new(FixedClock::on(date))
            }
            Err(err) => {
                warn!(value = %raw, %err, "ignoring invalid {}", TODAY_ENV);
                Box::new(SystemClock)
            }
        },
        Err(_) => Box::new(SystemClock),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        CoreError::InvalidInput(format!("`{}` is not a date (expected YYYY-MM-DD)", raw)).into()
    })
}

#[cfg(test)]
pub(crate) fn process_script(context: &mut ShellContext, lines: &[&str]) -> Vec<String> {
    let mut failures = Vec::new();
    for line in lines {
        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => failures.push(err.to_string()),
        }
    }
    failures
}
