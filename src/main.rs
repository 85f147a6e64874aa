//! streamgate CLI entry point
//!
//! A minimal entrypoint that parses arguments, dispatches to CLI commands,
//! prints errors to stderr, and exits non-zero on failure. All logic lives
//! in the cli module.

use streamgate::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
