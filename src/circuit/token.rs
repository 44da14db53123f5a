#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Tokenizer for circuit expressions.
//!
//! Produces a typed token stream for the parser to consume; every token
//! carries its byte position so errors can point at the offending input.
//! Whitespace separates tokens and is otherwise insignificant.

use crate::circuit::parser::ParseError;
use core::fmt;

/// A binary gate operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOp {
    And,
    Or,
    Xor,
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::And => '&',
            Self::Or => '|',
            Self::Xor => '^',
        };
        write!(f, "{symbol}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    LParen,
    RParen,
    Not,
    Op(GateOp),
    Ident(String),
}

/// One token plus the byte offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Not => write!(f, "~"),
            TokenKind::Op(op) => write!(f, "{op}"),
            TokenKind::Ident(name) => write!(f, "{name}"),
        }
    }
}

const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits `text` into tokens.
///
/// # Errors
///
/// [`ParseError::UnknownToken`] for any character that is neither
/// whitespace, an operator, a parenthesis, `~`, nor part of a signal name.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        let kind = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '~' => TokenKind::Not,
            '&' => TokenKind::Op(GateOp::And),
            '|' => TokenKind::Op(GateOp::Or),
            '^' => TokenKind::Op(GateOp::Xor),
            c if is_ident_char(c) => {
                let mut name = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if !is_ident_char(c) {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(name),
                    pos,
                });
                continue;
            }
            other => return Err(ParseError::UnknownToken { pos, found: other }),
        };

        chars.next();
        tokens.push(Token { kind, pos });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("(a & net_1)").expect("tokenize failed");
        let kinds: Vec<TokenKind> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LParen,
                TokenKind::Ident("a".into()),
                TokenKind::Op(GateOp::And),
                TokenKind::Ident("net_1".into()),
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_positions() {
        let tokens = tokenize("ab ^ c").expect("tokenize failed");
        let positions: Vec<usize> = tokens.iter().map(|t| t.pos).collect();
        assert_eq!(positions, vec![0, 3, 5]);
    }

    #[test]
    fn test_tokenize_ignores_newlines() {
        let tokens = tokenize("a\n\t| b").expect("tokenize failed");
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_tokenize_rejects_unknown_character() {
        let err = tokenize("a + b").expect_err("expected an error");
        assert_eq!(err, ParseError::UnknownToken { pos: 2, found: '+' });
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("  \n ").expect("tokenize failed").is_empty());
    }
}
