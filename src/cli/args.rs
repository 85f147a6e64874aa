//! CLI argument definitions using clap
//!
//! Commands:
//! - streamgate init --config <path> --group-id <id> --topic <name>
//! - streamgate check --template <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// streamgate - stream-schema definition and ingestion coordination
#[derive(Parser, Debug)]
#[command(name = "streamgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a scaffold deployment config
    Init {
        /// Path to write the configuration file to
        #[arg(long, default_value = "./streamgate.json")]
        config: PathBuf,

        /// Consumer group id for this deployment
        #[arg(long = "group-id")]
        group_id: String,

        /// Topic the consumer binds to
        #[arg(long)]
        topic: String,
    },

    /// Validate a tokenized template file and print its token
    Check {
        /// Path to the tokenized template
        #[arg(long)]
        template: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
