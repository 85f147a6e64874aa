//! Operator CLI
//!
//! Small on purpose: the template-upload client is a separate tool. This
//! binary scaffolds a deployment config and sanity-checks tokenized
//! template files.

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check, init, run_command};
pub use errors::{CliError, CliResult};

/// Parses arguments and dispatches to the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli)
}
