use std::io;

use thiserror::Error;

use crate::lex::TokenKind;

/// Top-level error returned by every `parse*` entry point.
#[derive(Debug, Error)]
pub enum Error {
    #[error("source error: {0}")]
    Source(#[from] io::Error),
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    /// Line the failure was detected on, when it came from the lexer or parser.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Source(_) => None,
            Error::Lex(err) => Some(err.line()),
            Error::Parse(err) => err.line(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string starting on line {line}")]
    UnterminatedString { line: usize },
    #[error("malformed boolean literal on line {line}")]
    MalformedBoolean { line: usize },
    #[error("malformed null literal on line {line}")]
    MalformedNull { line: usize },
    #[error("unknown literal starting with {} on line {line}", describe_byte(.byte))]
    UnknownLiteral { byte: u8, line: usize },
    #[error("string on line {line} is not valid utf-8")]
    InvalidUtf8 { line: usize },
}

fn describe_byte(byte: &u8) -> String {
    if byte.is_ascii() {
        format!("{:?}", char::from(*byte))
    } else {
        format!("byte 0x{byte:02x}")
    }
}

impl LexError {
    pub fn line(&self) -> usize {
        match *self {
            LexError::UnterminatedString { line }
            | LexError::MalformedBoolean { line }
            | LexError::MalformedNull { line }
            | LexError::UnknownLiteral { line, .. }
            | LexError::InvalidUtf8 { line } => line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("document must start with '{{' or '[', got {kind} on line {line}")]
    InvalidStart { kind: TokenKind, line: usize },
    #[error("expected object close but got {kind} on line {line}")]
    ExpectedObjectClose { kind: TokenKind, line: usize },
    #[error("expected array close but got {kind} on line {line}")]
    ExpectedArrayClose { kind: TokenKind, line: usize },
    #[error("expected colon but got {kind} on line {line}")]
    ExpectedColon { kind: TokenKind, line: usize },
    #[error("illegal token for value: {kind} on line {line}")]
    IllegalValueToken { kind: TokenKind, line: usize },
    #[error("invalid number literal {text:?} on line {line}")]
    InvalidNumberLiteral { text: String, line: usize },
    #[error("expected comma but got {kind} on line {line}")]
    ExpectedComma { kind: TokenKind, line: usize },
    #[error("trailing comma before {kind} on line {line}")]
    TrailingComma { kind: TokenKind, line: usize },
    #[error("unexpected {kind} after document root on line {line}")]
    TrailingContent { kind: TokenKind, line: usize },
    #[error("nesting deeper than {max} levels")]
    DepthLimitExceeded { max: usize },
}

impl ParseError {
    pub fn line(&self) -> Option<usize> {
        match *self {
            ParseError::InvalidStart { line, .. }
            | ParseError::ExpectedObjectClose { line, .. }
            | ParseError::ExpectedArrayClose { line, .. }
            | ParseError::ExpectedColon { line, .. }
            | ParseError::IllegalValueToken { line, .. }
            | ParseError::InvalidNumberLiteral { line, .. }
            | ParseError::ExpectedComma { line, .. }
            | ParseError::TrailingComma { line, .. }
            | ParseError::TrailingContent { line, .. } => Some(line),
            ParseError::DepthLimitExceeded { .. } => None,
        }
    }
}
