//! CLI interface module

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::errors::IplocateError;
use commands::{config_generate, run_convert, run_lookup, run_seed};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<IplocateError> for CliError {
    fn from(err: IplocateError) -> Self {
        match err {
            IplocateError::Validation(msg) => CliError::ParseError(msg),
            IplocateError::DatabaseConfig(_)
            | IplocateError::DatabaseConnection(_)
            | IplocateError::DatabaseOperation(_) => CliError::StorageError(err.to_string()),
            other => CliError::CommandError(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::StorageError(format!("{:#}", err))
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Convert {
            input,
            output,
            level,
        } => run_convert(input, output, level).await,

        Commands::Seed {
            file,
            name,
            batch_size,
        } => run_seed(file, name, batch_size).await,

        Commands::Lookup { ip } => run_lookup(ip).await,

        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force),

        Commands::Serve => Err(CliError::CommandError(
            "serve is handled by server mode".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            CliError::from(IplocateError::database_connection("refused")),
            CliError::StorageError(_)
        ));
        assert!(matches!(
            CliError::from(IplocateError::validation("bad ip")),
            CliError::ParseError(msg) if msg == "bad ip"
        ));
        assert!(matches!(
            CliError::from(IplocateError::file_operation("missing")),
            CliError::CommandError(_)
        ));
    }
}
