use crate::error::ParseError;
use crate::ledger::{AllocKind, Ledger, ReleaseReport};
use crate::lex::{Token, TokenKind};
use crate::options::{ParseOptions, MAX_DEPTH_CEILING};
use crate::value::{Object, Value};

pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Build a tree from `tokens`, recording every allocation in a fresh ledger.
///
/// On failure the partial tree is dropped and the ledger discarded, so nothing
/// built before the error outlives the call.
pub fn parse_tokens(tokens: Vec<Token>, options: &ParseOptions) -> ParseResult<(Value, Ledger)> {
    let mut ledger = Ledger::new();
    let mut parser = Parser::new(tokens, &mut ledger, options);
    match parser.parse_document() {
        Ok(root) => {
            log::debug!(
                "parsed {} document with {} allocations",
                root.type_name(),
                ledger.len()
            );
            Ok((root, ledger))
        }
        Err(err) => {
            log::debug!(
                "parse failed: {err}; discarding {} recorded allocations",
                ledger.len()
            );
            Err(err)
        }
    }
}

struct Parser<'a> {
    // The text of a consumed token is moved into the tree; tokens at or after
    // the cursor are never modified.
    tokens: Vec<Token>,
    cursor: usize,
    ledger: &'a mut Ledger,
    strict: bool,
    max_depth: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: Vec<Token>, ledger: &'a mut Ledger, options: &ParseOptions) -> Self {
        Self {
            tokens,
            cursor: 0,
            ledger,
            strict: options.strict,
            max_depth: options.max_depth.min(MAX_DEPTH_CEILING),
            depth: 0,
        }
    }

    fn parse_document(&mut self) -> ParseResult<Value> {
        let (kind, line) = self.peek();
        let root = match kind {
            TokenKind::ObjectOpen => {
                self.bump();
                self.parse_object()?
            }
            TokenKind::ArrayOpen => {
                self.bump();
                self.parse_array()?
            }
            _ => return Err(ParseError::InvalidStart { kind, line }),
        };
        if self.strict {
            let (kind, line) = self.peek();
            if kind != TokenKind::EndOfInput {
                return Err(ParseError::TrailingContent { kind, line });
            }
        }
        Ok(root)
    }

    fn peek(&self) -> (TokenKind, usize) {
        match self.tokens.get(self.cursor) {
            Some(token) => (token.kind, token.line),
            None => (
                TokenKind::EndOfInput,
                self.tokens.last().map_or(1, |token| token.line),
            ),
        }
    }

    fn bump(&mut self) {
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
    }

    fn take_text(&mut self) -> String {
        let text = self
            .tokens
            .get_mut(self.cursor)
            .and_then(|token| token.text.take())
            .unwrap_or_default();
        self.bump();
        text
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::DepthLimitExceeded {
                max: self.max_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // Called with the opening brace already consumed.
    fn parse_object(&mut self) -> ParseResult<Value> {
        self.enter()?;
        log::trace!("object at token {}", self.cursor);
        self.ledger.record(AllocKind::MapContainer);
        let mut map = Object::new();

        while self.peek().0 == TokenKind::String {
            let key = self.take_text();
            self.ledger.record(AllocKind::Scalar);
            self.expect_colon()?;
            let value = self.parse_value()?;
            if let Some(previous) = map.insert(key.into(), value) {
                // The map keeps its original key; the duplicate key and the
                // overwritten value are dropped here.
                let mut released = ReleaseReport::of_tree(&previous);
                released += ReleaseReport::scalar();
                self.ledger.retire(released);
            }
            self.separator(TokenKind::ObjectClose, |kind| kind == TokenKind::String)?;
        }

        let (kind, line) = self.peek();
        if kind != TokenKind::ObjectClose {
            return Err(ParseError::ExpectedObjectClose { kind, line });
        }
        self.bump();
        self.leave();
        Ok(Value::Object(map))
    }

    // Called with the opening bracket already consumed.
    fn parse_array(&mut self) -> ParseResult<Value> {
        self.enter()?;
        log::trace!("array at token {}", self.cursor);
        self.ledger.record(AllocKind::ArrayContainer);
        let mut items = Vec::new();

        while self.peek().0.starts_value() {
            items.push(self.parse_value()?);
            self.separator(TokenKind::ArrayClose, TokenKind::starts_value)?;
        }

        let (kind, line) = self.peek();
        if kind != TokenKind::ArrayClose {
            return Err(ParseError::ExpectedArrayClose { kind, line });
        }
        self.bump();
        self.leave();
        Ok(Value::Array(items))
    }

    /// Consume the comma after a member. Lenient mode takes one if present and
    /// never complains.
    fn separator(
        &mut self,
        close: TokenKind,
        starts_member: impl Fn(TokenKind) -> bool,
    ) -> ParseResult<()> {
        let (kind, line) = self.peek();
        if kind == TokenKind::Comma {
            self.bump();
            if self.strict {
                let (next, next_line) = self.peek();
                if next == close {
                    return Err(ParseError::TrailingComma {
                        kind: next,
                        line: next_line,
                    });
                }
            }
            return Ok(());
        }
        if self.strict && starts_member(kind) {
            return Err(ParseError::ExpectedComma { kind, line });
        }
        Ok(())
    }

    fn expect_colon(&mut self) -> ParseResult<()> {
        let (kind, line) = self.peek();
        if kind != TokenKind::Colon {
            return Err(ParseError::ExpectedColon { kind, line });
        }
        self.bump();
        Ok(())
    }

    fn parse_value(&mut self) -> ParseResult<Value> {
        let (kind, line) = self.peek();
        match kind {
            TokenKind::String => {
                let text = self.take_text();
                self.ledger.record(AllocKind::Scalar);
                Ok(Value::String(text))
            }
            TokenKind::Number => {
                let text = self.take_text();
                let value = parse_number(&text)
                    .ok_or(ParseError::InvalidNumberLiteral { text, line })?;
                self.ledger.record(AllocKind::Scalar);
                Ok(value)
            }
            TokenKind::Boolean => {
                let value = match self.take_text().as_str() {
                    "true" => true,
                    "false" => false,
                    _ => return Err(ParseError::IllegalValueToken { kind, line }),
                };
                self.ledger.record(AllocKind::Scalar);
                Ok(Value::Bool(value))
            }
            TokenKind::Null => {
                self.bump();
                Ok(Value::Null)
            }
            TokenKind::ObjectOpen => {
                self.bump();
                self.parse_object()
            }
            TokenKind::ArrayOpen => {
                self.bump();
                self.parse_array()
            }
            _ => Err(ParseError::IllegalValueToken { kind, line }),
        }
    }
}

/// Integers without a fractional part, floats with one. Anything else the
/// lexer let through (`1-2`, `1.2.3`, a lone `-`) is rejected.
fn parse_number(text: &str) -> Option<Value> {
    if text.contains('.') {
        let value: f64 = text.parse().ok()?;
        return value.is_finite().then_some(Value::Float(value));
    }
    text.parse::<i64>().ok().map(Value::Integer)
}
