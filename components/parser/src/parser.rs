//! Precedence-climbing expression parser and recursive-descent statement
//! parser.
//!
//! Expression parsing is table driven: each token kind maps to an
//! optional prefix rule (how the token starts an expression) and an
//! optional infix rule (precedence, associativity, and what to fold when
//! the token joins two expressions). The climb loop consumes an infix
//! token only while its precedence is strictly greater than the minimum
//! the caller will accept; right-associative operators recurse at
//! `precedence - 1`, left-associative at `precedence`. That one rule
//! produces both associativities without per-level grammar rules.
//!
//! Every parse function returns `Result`; the first error aborts the
//! whole parse via `?` with no recovery and no partial AST.

use crate::ast::{AstArena, BinaryOp, Module, ParseValue, UnaryOp};
use crate::error::{lex_error, parse_error, unexpected_token};
use crate::intern::Interner;
use crate::lexer::{Lexer, Token, TokenKind};
use core_types::RillError;
use std::rc::Rc;

/// Fixed precedence at which unary prefix operators bind their operand:
/// tighter than multiplication, looser than exponentiation.
const UNARY_PRECEDENCE: i32 = 65;

/// How a token starts an expression.
#[derive(Debug, Clone, Copy)]
enum Prefix {
    Ident,
    Int,
    Str,
    True,
    False,
    Paren,
    Unary(UnaryOp),
}

/// How a token joins a left operand with what follows.
#[derive(Debug, Clone, Copy)]
enum InfixKind {
    Binary(BinaryOp),
    Call,
}

#[derive(Debug, Clone, Copy)]
struct Infix {
    precedence: i32,
    right_assoc: bool,
    kind: InfixKind,
}

/// Prefix dispatch table, built once as a match over token kinds.
fn prefix_rule(kind: TokenKind) -> Option<Prefix> {
    match kind {
        TokenKind::Ident => Some(Prefix::Ident),
        TokenKind::Int => Some(Prefix::Int),
        TokenKind::Str => Some(Prefix::Str),
        TokenKind::True => Some(Prefix::True),
        TokenKind::False => Some(Prefix::False),
        TokenKind::LParen => Some(Prefix::Paren),
        TokenKind::Minus => Some(Prefix::Unary(UnaryOp::Minus)),
        TokenKind::Plus => Some(Prefix::Unary(UnaryOp::Plus)),
        TokenKind::Not => Some(Prefix::Unary(UnaryOp::Not)),
        _ => None,
    }
}

/// Infix dispatch table with precedence and associativity alongside each
/// entry.
fn infix_rule(kind: TokenKind) -> Option<Infix> {
    let (precedence, right_assoc, rule) = match kind {
        TokenKind::LParen => (80, false, InfixKind::Call),
        TokenKind::StarStar => (70, true, InfixKind::Binary(BinaryOp::Pow)),
        TokenKind::Star => (60, false, InfixKind::Binary(BinaryOp::Mul)),
        TokenKind::Slash => (60, false, InfixKind::Binary(BinaryOp::Div)),
        TokenKind::Plus => (50, false, InfixKind::Binary(BinaryOp::Add)),
        TokenKind::Minus => (50, false, InfixKind::Binary(BinaryOp::Sub)),
        TokenKind::Lt => (40, false, InfixKind::Binary(BinaryOp::Lt)),
        TokenKind::Le => (40, false, InfixKind::Binary(BinaryOp::Le)),
        TokenKind::Gt => (40, false, InfixKind::Binary(BinaryOp::Gt)),
        TokenKind::Ge => (40, false, InfixKind::Binary(BinaryOp::Ge)),
        TokenKind::EqEq => (35, false, InfixKind::Binary(BinaryOp::Eq)),
        TokenKind::NotEq => (35, false, InfixKind::Binary(BinaryOp::Neq)),
        TokenKind::Assign => (10, true, InfixKind::Binary(BinaryOp::Assign)),
        _ => return None,
    };
    Some(Infix {
        precedence,
        right_assoc,
        kind: rule,
    })
}

/// Short token description for error messages.
fn describe(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Plus => "'+'",
        TokenKind::Minus => "'-'",
        TokenKind::Star => "'*'",
        TokenKind::StarStar => "'**'",
        TokenKind::Slash => "'/'",
        TokenKind::Lt => "'<'",
        TokenKind::Le => "'<='",
        TokenKind::Gt => "'>'",
        TokenKind::Ge => "'>='",
        TokenKind::EqEq => "'=='",
        TokenKind::NotEq => "'!='",
        TokenKind::Not => "'!'",
        TokenKind::Assign => "':='",
        TokenKind::Int => "integer literal",
        TokenKind::Str => "string literal",
        TokenKind::Ident => "identifier",
        TokenKind::While => "'while'",
        TokenKind::If => "'if'",
        TokenKind::Else => "'else'",
        TokenKind::Def => "'def'",
        TokenKind::Print => "'print'",
        TokenKind::True => "'true'",
        TokenKind::False => "'false'",
        TokenKind::LParen => "'('",
        TokenKind::RParen => "')'",
        TokenKind::LBrace => "'{'",
        TokenKind::RBrace => "'}'",
        TokenKind::Comma => "','",
        TokenKind::Newline => "newline",
        TokenKind::Eof => "end of input",
        TokenKind::Error => "invalid input",
    }
}

/// Rill parser.
///
/// Owns the lexer, the interner, and the AST arena for one module.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    interner: Interner,
    arena: AstArena,
}

impl<'a> Parser<'a> {
    /// Create a parser over the given source text, primed on its first
    /// token.
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next();
        Self {
            lexer,
            current,
            interner: Interner::new(),
            arena: AstArena::new(),
        }
    }

    /// Parse a whole module: newline-separated statements up to end of
    /// input.
    pub fn parse_module(mut self) -> Result<Module, RillError> {
        self.skip_newlines();
        let root = self.parse_statements(TokenKind::Eof)?;
        self.expect(TokenKind::Eof)?;
        Ok(Module {
            arena: self.arena,
            interner: self.interner,
            root,
        })
    }

    fn advance(&mut self) {
        self.current = self.lexer.next();
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn skip_newlines(&mut self) {
        while self.at(TokenKind::Newline) {
            self.advance();
        }
    }

    /// Error for the current token: the lexer's sticky message if it is
    /// the ERROR token, otherwise a parse error with `message`.
    fn error_at_current(&self, message: &str) -> RillError {
        let position = Some(self.current.position());
        if self.at(TokenKind::Error) {
            lex_error(
                self.lexer.error().unwrap_or("invalid input"),
                position,
            )
        } else {
            parse_error(message, position)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), RillError> {
        if !self.at(kind) {
            if self.at(TokenKind::Error) {
                return Err(self.error_at_current(""));
            }
            return Err(unexpected_token(
                describe(kind),
                describe(self.current.kind),
                Some(self.current.position()),
            ));
        }
        self.advance();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// Parse an expression, folding infix operators whose precedence is
    /// strictly greater than `min_precedence`.
    fn parse_expression(&mut self, min_precedence: i32) -> Result<ParseValue, RillError> {
        let mut left = self.parse_primary()?;

        while let Some(rule) = infix_rule(self.current.kind) {
            if rule.precedence <= min_precedence {
                break;
            }
            match rule.kind {
                InfixKind::Call => {
                    left = self.parse_call(left)?;
                }
                InfixKind::Binary(op) => {
                    let next_min = if rule.right_assoc {
                        rule.precedence - 1
                    } else {
                        rule.precedence
                    };
                    self.advance();
                    let right = self.parse_expression(next_min)?;
                    left = self.arena.binop(op, left, right);
                }
            }
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<ParseValue, RillError> {
        let rule = match prefix_rule(self.current.kind) {
            Some(rule) => rule,
            None => return Err(self.error_at_current(&format!(
                "expected an expression, got {}",
                describe(self.current.kind)
            ))),
        };
        match rule {
            Prefix::Ident => {
                let text = self.lexer.token_text(&self.current);
                let sym = self.interner.intern(text);
                self.advance();
                Ok(ParseValue::Ident(sym))
            }
            Prefix::Int => self.parse_int(),
            Prefix::Str => self.parse_string(),
            Prefix::True => {
                self.advance();
                Ok(ParseValue::True)
            }
            Prefix::False => {
                self.advance();
                Ok(ParseValue::False)
            }
            Prefix::Paren => {
                self.advance();
                let exp = self.parse_expression(0)?;
                self.expect(TokenKind::RParen)?;
                Ok(exp)
            }
            Prefix::Unary(op) => {
                self.advance();
                let exp = self.parse_expression(UNARY_PRECEDENCE)?;
                Ok(self.arena.unop(op, exp))
            }
        }
    }

    /// Decode an integer literal. Digits fold without overflow checking;
    /// out-of-range literals wrap.
    fn parse_int(&mut self) -> Result<ParseValue, RillError> {
        let text = self.lexer.token_text(&self.current);
        let mut value: i32 = 0;
        for b in text.bytes() {
            value = value.wrapping_mul(10).wrapping_add((b - b'0') as i32);
        }
        self.advance();
        Ok(ParseValue::Int(value))
    }

    /// Decode a string literal: strip the quotes and resolve backslash
    /// escapes.
    fn parse_string(&mut self) -> Result<ParseValue, RillError> {
        let text = self.lexer.token_text(&self.current);
        let position = self.current.position();
        let inner = &text[1..text.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                other => {
                    let found = other.map(|c| c.to_string()).unwrap_or_default();
                    return Err(lex_error(
                        format!("invalid escape sequence '\\{}'", found),
                        Some(position),
                    ));
                }
            }
        }
        self.advance();
        Ok(ParseValue::Str(Rc::from(out.as_str())))
    }

    /// Parse `( <expr>,* )` after a callee expression.
    fn parse_call(&mut self, callee: ParseValue) -> Result<ParseValue, RillError> {
        self.expect(TokenKind::LParen)?;
        let args = if self.at(TokenKind::RParen) {
            ParseValue::Nil
        } else {
            self.parse_expression_list()?
        };
        self.expect(TokenKind::RParen)?;
        Ok(self.arena.call(callee, args))
    }

    fn parse_expression_list(&mut self) -> Result<ParseValue, RillError> {
        let mut items = Vec::new();
        loop {
            items.push(self.parse_expression(0)?);
            if self.at(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(self.arena.list_from(items))
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn parse_statements(&mut self, terminator: TokenKind) -> Result<ParseValue, RillError> {
        let mut statements = Vec::new();
        while !self.at(terminator) {
            if self.at(TokenKind::Eof) {
                return Err(self.error_at_current("unexpected end of input"));
            }
            statements.push(self.parse_statement(terminator)?);
        }
        Ok(self.arena.list_from(statements))
    }

    fn parse_statement(&mut self, terminator: TokenKind) -> Result<ParseValue, RillError> {
        match self.current.kind {
            TokenKind::While => self.parse_while(),
            TokenKind::If => self.parse_if(),
            TokenKind::Def => self.parse_fn_def(),
            TokenKind::Print => {
                self.advance();
                let expr = self.parse_expression(0)?;
                self.finish_simple_statement(terminator)?;
                Ok(self.arena.print(expr))
            }
            _ => {
                let expr = self.parse_expression(0)?;
                self.finish_simple_statement(terminator)?;
                Ok(expr)
            }
        }
    }

    /// A non-block statement ends at a newline or at the enclosing
    /// block's terminator.
    fn finish_simple_statement(&mut self, terminator: TokenKind) -> Result<(), RillError> {
        if self.at(TokenKind::Newline) {
            self.skip_newlines();
            Ok(())
        } else if self.at(terminator) {
            Ok(())
        } else {
            Err(self.error_at_current(&format!(
                "expected newline or {}, got {}",
                describe(terminator),
                describe(self.current.kind)
            )))
        }
    }

    fn parse_block(&mut self) -> Result<ParseValue, RillError> {
        self.expect(TokenKind::LBrace)?;
        self.skip_newlines();
        let statements = self.parse_statements(TokenKind::RBrace)?;
        self.expect(TokenKind::RBrace)?;
        self.skip_newlines();
        Ok(statements)
    }

    fn parse_while(&mut self) -> Result<ParseValue, RillError> {
        self.expect(TokenKind::While)?;
        let cond = self.parse_expression(0)?;
        self.skip_newlines();
        let body = self.parse_block()?;
        Ok(self.arena.while_loop(cond, body))
    }

    /// Parse an `if` chain. Branches are collected and the chain is
    /// linked back-to-front so every node is built exactly once: each
    /// branch's `next` is the following `If` node, the final `else`
    /// body, or `Nil`.
    fn parse_if(&mut self) -> Result<ParseValue, RillError> {
        self.expect(TokenKind::If)?;
        let cond = self.parse_expression(0)?;
        self.skip_newlines();
        let body = self.parse_block()?;

        let mut branches = vec![(cond, body)];
        let mut tail = ParseValue::Nil;
        while self.at(TokenKind::Else) {
            self.advance();
            if self.at(TokenKind::If) {
                self.advance();
                let cond = self.parse_expression(0)?;
                self.skip_newlines();
                let body = self.parse_block()?;
                branches.push((cond, body));
            } else {
                self.skip_newlines();
                tail = self.parse_block()?;
                break;
            }
        }

        let mut chain = tail;
        for (cond, body) in branches.into_iter().rev() {
            chain = self.arena.if_branch(cond, body, chain);
        }
        Ok(chain)
    }

    fn parse_fn_def(&mut self) -> Result<ParseValue, RillError> {
        self.expect(TokenKind::Def)?;
        if !self.at(TokenKind::Ident) {
            return Err(self.error_at_current(&format!(
                "expected identifier, got {}",
                describe(self.current.kind)
            )));
        }
        let name = self.interner.intern(self.lexer.token_text(&self.current));
        self.advance();

        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                if !self.at(TokenKind::Ident) {
                    return Err(self.error_at_current(&format!(
                        "expected identifier, got {}",
                        describe(self.current.kind)
                    )));
                }
                let sym = self.interner.intern(self.lexer.token_text(&self.current));
                self.advance();
                params.push(ParseValue::Ident(sym));
                if self.at(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        self.skip_newlines();
        let body = self.parse_block()?;
        let params = self.arena.list_from(params);
        Ok(self.arena.fn_def(name, params, body))
    }
}
