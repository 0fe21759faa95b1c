//! Virtual machine for Rill bytecode execution.
//!
//! The VM executes a [`bytecode_system::CodeChunk`]: a fetch-decode-
//! execute loop over packed 32-bit instruction words operating on a flat
//! register file of [`core_types::Value`] slots.
//!
//! # Overview
//!
//! - [`VM`] - the register file and execution loop
//! - [`PrintWriter`] - pluggable sink for `print` output
//! - [`StdoutWriter`] / [`CaptureWriter`] - standard and test sinks

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod output;
mod vm;

pub use output::{CaptureWriter, PrintWriter, StdoutWriter};
pub use vm::VM;
