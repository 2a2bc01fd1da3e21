use peseta_config::ConfigError;
use peseta_core::CoreError;
use thiserror::Error;

/// Error type that unifies failures across the Peseta crates.
#[derive(Debug, Error)]
pub enum PesetaError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures that stop the shell itself rather than a single command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Peseta(#[from] PesetaError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Peseta(err.into())
    }
}
