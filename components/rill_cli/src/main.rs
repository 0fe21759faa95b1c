//! Rill CLI entry point.
//!
//! Parses the single positional argument and delegates to the Runtime.

use clap::Parser as ClapParser;
use rill_cli::{Cli, CliError, Runtime};

fn main() {
    let cli = Cli::parse();

    let mut runtime = Runtime::new();
    match runtime.execute_file(&cli.file) {
        Ok(()) => {}
        Err(CliError::Io(e)) => {
            eprintln!("error: could not read file '{}': {}", cli.file, e);
            std::process::exit(1);
        }
        Err(CliError::Script(e)) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
