#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Recursive descent parser for circuit expressions.
//!
//! Grammar, with explicit parenthesization for every binary application:
//!
//! ```text
//! expr     := operand [ op operand ]
//! operand  := '~' operand | atom | '(' expr ')'
//! op       := '&' | '|' | '^'
//! ```
//!
//! There is no operator precedence: a chain like `a & b | c` is rejected
//! rather than guessed at, with the error pointing at the second
//! operator. Every atom is interned through the registry as it is
//! recognized, so the resulting tree references variable ids only.

use crate::circuit::expr::Expr;
use crate::circuit::registry::SignalRegistry;
use crate::circuit::token::{Token, TokenKind, tokenize};
use core::fmt;
use std::error::Error;

/// A malformed expression. Fatal to the translation session; no partial
/// formula escapes a failed parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A character that belongs to no token.
    UnknownToken { pos: usize, found: char },
    /// A token that cannot start an operand, e.g. `)` or a bare operator.
    UnexpectedToken { pos: usize, found: String },
    /// A `(` whose group never closes.
    UnmatchedParen { pos: usize },
    /// Input ended where an operand was required.
    MissingOperand { pos: usize },
    /// A complete expression was followed by more input; the usual cause
    /// is an unparenthesized operator chain.
    TrailingInput { pos: usize, found: String },
    /// Nothing but whitespace.
    EmptyExpression,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownToken { pos, found } => {
                write!(f, "unknown token `{found}` at position {pos}")
            }
            Self::UnexpectedToken { pos, found } => {
                write!(f, "unexpected `{found}` at position {pos}")
            }
            Self::UnmatchedParen { pos } => {
                write!(f, "unmatched `(` at position {pos}")
            }
            Self::MissingOperand { pos } => {
                write!(f, "missing operand at position {pos}")
            }
            Self::TrailingInput { pos, found } => {
                write!(
                    f,
                    "trailing `{found}` at position {pos}; parenthesize every binary application"
                )
            }
            Self::EmptyExpression => write!(f, "empty expression"),
        }
    }
}

impl Error for ParseError {}

/// Parses `text` into an expression tree, interning every signal name
/// through `registry`.
///
/// # Errors
///
/// A [`ParseError`] naming the offending position; see the variants.
pub fn parse(text: &str, registry: &mut SignalRegistry) -> Result<Expr, ParseError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let mut parser = Parser {
        tokens,
        idx: 0,
        end_pos: text.len(),
        registry,
    };

    let expr = parser.expr()?;
    match parser.peek() {
        Some(token) => Err(ParseError::TrailingInput {
            pos: token.pos,
            found: token.to_string(),
        }),
        None => Ok(expr),
    }
}

struct Parser<'r> {
    tokens: Vec<Token>,
    idx: usize,
    end_pos: usize,
    registry: &'r mut SignalRegistry,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.idx)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.idx).cloned();
        if token.is_some() {
            self.idx += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.operand()?;

        let Some(Token {
            kind: TokenKind::Op(op),
            ..
        }) = self.peek()
        else {
            return Ok(lhs);
        };
        let op = *op;
        self.advance();

        let rhs = self.operand()?;
        Ok(Expr::binary(op, lhs, rhs))
    }

    fn operand(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.advance() else {
            return Err(ParseError::MissingOperand { pos: self.end_pos });
        };

        match token.kind {
            TokenKind::Not => Ok(Expr::not(self.operand()?)),
            TokenKind::Ident(name) => Ok(Expr::Atom(self.registry.intern(&name))),
            TokenKind::LParen => {
                let inner = self.expr()?;
                match self.peek() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => {
                        self.advance();
                        Ok(inner)
                    }
                    Some(next) => Err(ParseError::TrailingInput {
                        pos: next.pos,
                        found: next.to_string(),
                    }),
                    None => Err(ParseError::UnmatchedParen { pos: token.pos }),
                }
            }
            TokenKind::RParen | TokenKind::Op(_) => Err(ParseError::UnexpectedToken {
                pos: token.pos,
                found: token.to_string(),
            }),
        }
    }
}
