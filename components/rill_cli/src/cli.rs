//! Command-line arguments for the `rill` binary.

use clap::Parser;

/// Run a Rill source file.
#[derive(Parser, Debug)]
#[command(name = "rill", version, about = "Rill scripting language")]
pub struct Cli {
    /// Path of the source file to execute
    pub file: String,
}
