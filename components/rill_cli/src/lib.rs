//! Rill CLI library.
//!
//! Provides the [`Runtime`] that wires the front end to the VM, plus the
//! argument and error types for the `rill` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod runtime;

pub use cli::Cli;
pub use error::{CliError, CliResult};
pub use runtime::Runtime;
