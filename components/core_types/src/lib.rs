//! Core Rill value types and error handling.
//!
//! This crate provides the foundational types for the Rill runtime,
//! including the runtime value representation, error types, and source
//! location tracking.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of Rill runtime values
//! - [`ForeignFn`] - The foreign-function calling convention
//! - [`RillError`] - Rill errors with source positions
//! - [`ErrorKind`] - Types of Rill errors
//! - [`SourcePosition`] - Source code location
//!
//! # Examples
//!
//! ```
//! use core_types::{Value, RillError, ErrorKind};
//!
//! // Create Rill values
//! let num = Value::Int(42);
//! assert!(num.is_truthy());
//! assert_eq!(num.to_string(), "42");
//!
//! // Create an error
//! let error = RillError::new(ErrorKind::ParseError, "unexpected token");
//! assert_eq!(error.message, "unexpected token");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;
mod value;

pub use error::{ErrorKind, RillError};
pub use source::SourcePosition;
pub use value::{ForeignFn, Value};
