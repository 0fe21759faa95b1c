//! Error constructors for the front end.

use core_types::{ErrorKind, RillError, SourcePosition};

/// Create a lex error at a given position.
pub fn lex_error(message: impl Into<String>, position: Option<SourcePosition>) -> RillError {
    let error = RillError::new(ErrorKind::LexError, message);
    match position {
        Some(pos) => error.with_position(pos),
        None => error,
    }
}

/// Create a parse error at a given position.
pub fn parse_error(message: impl Into<String>, position: Option<SourcePosition>) -> RillError {
    let error = RillError::new(ErrorKind::ParseError, message);
    match position {
        Some(pos) => error.with_position(pos),
        None => error,
    }
}

/// Create an unexpected token error.
pub fn unexpected_token(expected: &str, got: &str, position: Option<SourcePosition>) -> RillError {
    parse_error(format!("expected {}, got {}", expected, got), position)
}

/// Create a compile error.
pub fn compile_error(message: impl Into<String>) -> RillError {
    RillError::new(ErrorKind::CompileError, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_kind() {
        let err = lex_error("test", None);
        assert!(matches!(err.kind, ErrorKind::LexError));
    }

    #[test]
    fn test_unexpected_token_message() {
        let err = unexpected_token("newline", "'('", None);
        assert_eq!(err.message, "expected newline, got '('");
    }
}
