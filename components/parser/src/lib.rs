//! Rill front end: lexer, interner, AST, parser, and bytecode compiler.
//!
//! The pipeline runs source text through the [`Lexer`], builds an
//! arena-allocated AST with the precedence-climbing [`Parser`], and
//! translates the resulting [`Module`] into a
//! [`bytecode_system::CodeChunk`] with [`compile`].
//!
//! All stages report failures as [`core_types::RillError`]; the first
//! error wins and aborts the stage with no recovery.
//!
//! # Example
//!
//! ```
//! use parser::{compile, Parser};
//!
//! let module = Parser::new("a := 1\nprint a\n").parse_module().unwrap();
//! let nlocals = module.interner.len() as u32 + 1;
//! let chunk = compile(&module, nlocals).unwrap();
//! assert!(!chunk.code.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod bytecode_gen;
pub mod error;
pub mod intern;
pub mod lexer;
pub mod parser;

pub use ast::{AstArena, AstNode, BinaryOp, Module, NodeId, ParseValue, UnaryOp};
pub use bytecode_gen::compile;
pub use intern::{Interner, Symbol};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
