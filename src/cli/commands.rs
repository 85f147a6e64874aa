//! CLI command implementations

use std::fs;
use std::path::Path;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use crate::config::IngestionConfig;
use crate::gateway::TokenizedTemplate;

/// Dispatches a parsed command line.
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Init {
            config,
            group_id,
            topic,
        } => init(&config, &group_id, &topic),
        Command::Check { template } => check(&template),
    }
}

/// Writes a scaffold deployment config, refusing to overwrite.
pub fn init(path: &Path, group_id: &str, topic: &str) -> CliResult<()> {
    if path.exists() {
        return Err(CliError::AlreadyInitialized {
            path: path.to_path_buf(),
        });
    }
    let config = IngestionConfig::scaffold(group_id, topic);
    config.validate()?;
    let body = serde_json::to_string_pretty(&config).map_err(crate::config::ConfigError::Parse)?;
    fs::write(path, body)?;
    println!("wrote {}", path.display());
    Ok(())
}

/// Validates a tokenized template file and prints its token.
pub fn check(path: &Path) -> CliResult<()> {
    let template = TokenizedTemplate::from_path(path)?;
    println!("{}", template.token);
    Ok(())
}
