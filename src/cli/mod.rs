mod commands;
mod context;
pub mod output;
mod registry;
pub mod render;
mod shell;
pub mod table;

pub use context::{
    CliMode, CommandError, CommandResult, LoopControl, ShellContext, DATE_FORMAT, TODAY_ENV,
};
pub use registry::{CommandEntry, CommandRegistry};
pub use shell::{run_cli, SCRIPT_ENV};
