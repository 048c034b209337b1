//! Token definitions

/// Token kinds produced by the line lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Words
    Ident,
    Number,

    // Literals
    StringLit,
    CharLit,
    /// Go backtick string; may continue on the next line
    RawString,

    // Comments
    LineComment,
    /// `/* ... */`; may continue on the next line
    BlockComment,

    /// Any other single character (`{`, `;`, `*`, ...)
    Punct,

    Whitespace,
}

/// A slice of one source line with its kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct && self.text.starts_with(c)
    }

    /// Literals and comments: text that translation rules must not touch
    pub fn is_opaque(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::StringLit
                | TokenKind::CharLit
                | TokenKind::RawString
                | TokenKind::LineComment
                | TokenKind::BlockComment
        )
    }
}
