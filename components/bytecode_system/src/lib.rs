//! Bytecode system for the Rill VM.
//!
//! Defines the instruction set of the register-based VM and the container
//! for compiled code:
//!
//! - [`Op`] - opcode numbering and the 6-bit opcode field layout
//! - [`Instruction`] - tagged instruction type with exact encode/decode
//!   routines for the packed 32-bit word format
//! - [`CodeChunk`] - constants, instruction words, and the register counter
//!
//! The VM executes raw `u32` words; [`Instruction`] exists so that the
//! compiler and any tooling can build and inspect instructions with named
//! fields while interoperating exactly with the packed format.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod chunk;
mod instruction;
mod opcode;

pub use chunk::CodeChunk;
pub use instruction::Instruction;
pub use opcode::{Op, OP_SHIFT, REGISTER_CAPACITY};
