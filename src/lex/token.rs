use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    ObjectOpen,
    ObjectClose,
    Comma,
    Colon,
    ArrayOpen,
    ArrayClose,
    String,
    Number,
    Boolean,
    Null,
    EndOfInput,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::ObjectOpen => "objectOpen",
            TokenKind::ObjectClose => "objectClose",
            TokenKind::Comma => "comma",
            TokenKind::Colon => "colon",
            TokenKind::ArrayOpen => "arrayOpen",
            TokenKind::ArrayClose => "arrayClose",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "null",
            TokenKind::EndOfInput => "endOfInput",
        }
    }

    /// Kinds that may begin a value inside an array or after a colon.
    pub fn starts_value(self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Number
                | TokenKind::Boolean
                | TokenKind::Null
                | TokenKind::ObjectOpen
                | TokenKind::ArrayOpen
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexical unit. `text` is only populated for strings, numbers and booleans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Option<String>,
    pub line: usize,
}

impl Token {
    pub(crate) fn structural(kind: TokenKind, line: usize) -> Self {
        Self {
            kind,
            text: None,
            line,
        }
    }

    pub(crate) fn with_text(kind: TokenKind, text: String, line: usize) -> Self {
        Self {
            kind,
            text: Some(text),
            line,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
