mod token;

use memchr::{memchr2, memchr_iter};

pub use token::{Token, TokenKind};

use crate::error::LexError;

pub type LexResult<T> = std::result::Result<T, LexError>;

/// Split `input` into tokens. The returned sequence always ends with
/// [`TokenKind::EndOfInput`].
pub fn tokenize(input: &[u8]) -> LexResult<Vec<Token>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::EndOfInput;
        tokens.push(token);
        if done {
            break;
        }
    }
    log::trace!("tokenized {} bytes into {} tokens", input.len(), tokens.len());
    Ok(tokens)
}

pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            match byte {
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' => self.pos += 1,
                _ => break,
            }
        }
    }

    pub fn next_token(&mut self) -> LexResult<Token> {
        self.skip_whitespace();
        let line = self.line;
        let Some(byte) = self.peek() else {
            return Ok(Token::structural(TokenKind::EndOfInput, line));
        };

        let kind = match byte {
            b'{' => TokenKind::ObjectOpen,
            b'}' => TokenKind::ObjectClose,
            b'[' => TokenKind::ArrayOpen,
            b']' => TokenKind::ArrayClose,
            b':' => TokenKind::Colon,
            b',' => TokenKind::Comma,
            b'"' => {
                self.pos += 1;
                return self.scan_string(line);
            }
            _ => return self.scan_literal(byte, line),
        };
        self.pos += 1;
        Ok(Token::structural(kind, line))
    }

    // Raw bytes up to the closing quote. A backslash keeps the following byte
    // in the string but nothing is unescaped.
    fn scan_string(&mut self, line: usize) -> LexResult<Token> {
        let start = self.pos;
        let mut cursor = start;
        let end = loop {
            let rest = &self.input[cursor..];
            let Some(offset) = memchr2(b'"', b'\\', rest) else {
                return Err(LexError::UnterminatedString { line });
            };
            let at = cursor + offset;
            if self.input[at] == b'"' {
                break at;
            }
            if at + 1 >= self.input.len() {
                return Err(LexError::UnterminatedString { line });
            }
            cursor = at + 2;
        };

        let raw = &self.input[start..end];
        self.line += memchr_iter(b'\n', raw).count();
        self.pos = end + 1;
        let text = std::str::from_utf8(raw)
            .map_err(|_| LexError::InvalidUtf8 { line })?
            .to_owned();
        Ok(Token::with_text(TokenKind::String, text, line))
    }

    fn scan_literal(&mut self, lead: u8, line: usize) -> LexResult<Token> {
        match lead {
            b'0'..=b'9' | b'-' => Ok(self.scan_number(line)),
            b't' => self.scan_boolean("true", line),
            b'f' => self.scan_boolean("false", line),
            b'n' => self.scan_null(line),
            byte => Err(LexError::UnknownLiteral { byte, line }),
        }
    }

    fn scan_number(&mut self, line: usize) -> Token {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if byte.is_ascii_digit() || byte == b'.' || byte == b'-' {
                self.pos += 1;
            } else {
                break;
            }
        }
        // Only ASCII digits, '.' and '-' were consumed.
        let text = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();
        Token::with_text(TokenKind::Number, text, line)
    }

    fn scan_boolean(&mut self, expected: &'static str, line: usize) -> LexResult<Token> {
        for &want in expected.as_bytes() {
            if self.advance() != Some(want) {
                return Err(LexError::MalformedBoolean { line });
            }
        }
        Ok(Token::with_text(
            TokenKind::Boolean,
            expected.to_owned(),
            line,
        ))
    }

    fn scan_null(&mut self, line: usize) -> LexResult<Token> {
        for &want in b"null" {
            if self.advance() != Some(want) {
                return Err(LexError::MalformedNull { line });
            }
        }
        Ok(Token::structural(TokenKind::Null, line))
    }
}
