//! Runtime orchestration for Rill execution.
//!
//! The Runtime coordinates the whole pipeline: parser and compiler for
//! the front end, VM for execution, and foreign-function wiring at the
//! boundary between them.

use crate::error::CliResult;
use core_types::ForeignFn;
use interpreter::{PrintWriter, VM};
use parser::{compile, Parser};

/// Main runtime that orchestrates Rill execution.
///
/// Foreign functions are registered by name; at execution time each name
/// is interned and the function installed into the register slot
/// matching its symbol id, where compiled calls expect to find it.
pub struct Runtime {
    /// Persistent VM instance holding the register file
    vm: VM,
    /// Foreign functions to install before each run
    foreign: Vec<(String, ForeignFn)>,
}

impl Runtime {
    /// Create a runtime that prints to standard output.
    pub fn new() -> Self {
        Self {
            vm: VM::new(),
            foreign: Vec::new(),
        }
    }

    /// Create a runtime with a custom print sink.
    pub fn with_writer(writer: Box<dyn PrintWriter>) -> Self {
        Self {
            vm: VM::with_writer(writer),
            foreign: Vec::new(),
        }
    }

    /// Register a foreign function under a source-visible name.
    pub fn register_foreign(&mut self, name: impl Into<String>, function: ForeignFn) {
        self.foreign.push((name.into(), function));
    }

    /// Execute a Rill source file.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Io` if the file cannot be read, or
    /// `CliError::Script` for any pipeline failure.
    pub fn execute_file(&mut self, path: &str) -> CliResult<()> {
        let source = std::fs::read_to_string(path)?;
        self.execute_source(&source)
    }

    /// Execute Rill source text: parse, compile, wire foreign functions,
    /// run.
    pub fn execute_source(&mut self, source: &str) -> CliResult<()> {
        let mut module = Parser::new(source).parse_module()?;

        // Intern the foreign names before sizing the local register
        // range, so their slots are always inside it.
        let slots: Vec<(u32, ForeignFn)> = self
            .foreign
            .iter()
            .map(|(name, f)| (module.interner.intern(name).as_u32(), *f))
            .collect();
        let nlocals = module.interner.len() as u32 + 1;

        let chunk = compile(&module, nlocals)?;

        for (slot, function) in slots {
            self.vm.install_foreign(slot as usize, function);
        }
        self.vm.execute(&chunk)?;
        Ok(())
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
