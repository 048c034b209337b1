//! Lexer module - per-line tokenization
//!
//! Translation is line-oriented, so the lexer works on one physical line at a
//! time. The only constructs that can span lines (block comments and Go raw
//! strings) are carried between calls in [`LexState`].
//!
//! Everything the engine counts or rewrites goes through here: braces are
//! counted only outside literals and comments, rule tables run on a masked
//! copy of the line, and parameter lists are split on top-level commas.

mod token;

pub use token::*;

/// Multi-line lexer state carried from one line to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexState {
    pub in_block_comment: bool,
    pub in_raw_string: bool,
}

/// Tokenize one line. Tokens are contiguous and cover the whole line.
pub fn tokenize_line<'a>(line: &'a str, state: &mut LexState) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    if state.in_block_comment {
        match line.find("*/") {
            Some(end) => {
                tokens.push(Token::new(TokenKind::BlockComment, &line[..end + 2]));
                pos = end + 2;
                state.in_block_comment = false;
            }
            None => {
                if !line.is_empty() {
                    tokens.push(Token::new(TokenKind::BlockComment, line));
                }
                return tokens;
            }
        }
    } else if state.in_raw_string {
        match line.find('`') {
            Some(end) => {
                tokens.push(Token::new(TokenKind::RawString, &line[..end + 1]));
                pos = end + 1;
                state.in_raw_string = false;
            }
            None => {
                if !line.is_empty() {
                    tokens.push(Token::new(TokenKind::RawString, line));
                }
                return tokens;
            }
        }
    }

    while pos < line.len() {
        let rest = &line[pos..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        let (kind, len) = if rest.starts_with("//") {
            (TokenKind::LineComment, rest.len())
        } else if rest.starts_with("/*") {
            match rest[2..].find("*/") {
                Some(i) => (TokenKind::BlockComment, i + 4),
                None => {
                    state.in_block_comment = true;
                    (TokenKind::BlockComment, rest.len())
                }
            }
        } else if c == '"' {
            (TokenKind::StringLit, quoted_len(rest, '"'))
        } else if c == '\'' {
            (TokenKind::CharLit, quoted_len(rest, '\''))
        } else if c == '`' {
            match rest[1..].find('`') {
                Some(i) => (TokenKind::RawString, i + 2),
                None => {
                    state.in_raw_string = true;
                    (TokenKind::RawString, rest.len())
                }
            }
        } else if c.is_whitespace() {
            (TokenKind::Whitespace, run_len(rest, char::is_whitespace))
        } else if c.is_alphabetic() || c == '_' {
            (
                TokenKind::Ident,
                run_len(rest, |ch| ch.is_alphanumeric() || ch == '_'),
            )
        } else if c.is_ascii_digit() {
            (
                TokenKind::Number,
                run_len(rest, |ch| {
                    ch.is_alphanumeric() || ch == '_' || ch == '.' || ch == '\''
                }),
            )
        } else {
            (TokenKind::Punct, c.len_utf8())
        };

        tokens.push(Token::new(kind, &rest[..len]));
        pos += len;
    }

    tokens
}

/// Length of a quoted literal starting at `rest[0]`, closing quote included.
/// An unterminated literal runs to the end of the line.
fn quoted_len(rest: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in rest.char_indices().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == quote {
            return i + c.len_utf8();
        }
    }
    rest.len()
}

fn run_len(rest: &str, pred: impl Fn(char) -> bool) -> usize {
    rest.char_indices()
        .find(|(_, c)| !pred(*c))
        .map(|(i, _)| i)
        .unwrap_or(rest.len())
}

/// Braces found on one line, outside literals and comments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BraceCount {
    pub opens: usize,
    pub closes: usize,
    /// `}` tokens before the first other code token (used for indentation)
    pub leading_closes: usize,
}

impl BraceCount {
    pub fn net(&self) -> isize {
        self.opens as isize - self.closes as isize
    }
}

/// Count the braces of one line, advancing the multi-line state
pub fn count_braces(line: &str, state: &mut LexState) -> BraceCount {
    let mut count = BraceCount::default();
    let mut leading = true;
    for tok in tokenize_line(line, state) {
        match tok.kind {
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment => {}
            TokenKind::Punct if tok.text == "{" => {
                count.opens += 1;
                leading = false;
            }
            TokenKind::Punct if tok.text == "}" => {
                count.closes += 1;
                if leading {
                    count.leading_closes += 1;
                }
            }
            _ => leading = false,
        }
    }
    count
}

/// Split `s` on `sep` where it is not nested inside `()`, `[]`, `{}`, `<>`
/// or a literal. Parts are trimmed; empty input yields no parts.
pub fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    let mut state = LexState::default();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut offset = 0usize;
    for tok in tokenize_line(s, &mut state) {
        if tok.kind == TokenKind::Punct {
            match tok.text {
                "(" | "[" | "{" | "<" => depth += 1,
                ")" | "]" | "}" | ">" => depth = depth.saturating_sub(1),
                t if depth == 0 && t.starts_with(sep) => {
                    parts.push(s[start..offset].trim());
                    start = offset + t.len();
                }
                _ => {}
            }
        }
        offset += tok.text.len();
    }
    parts.push(s[start..].trim());
    parts
}

const MASK_OPEN: char = '\u{E000}';
const MASK_CLOSE: char = '\u{E001}';

/// A line with its literals replaced by inert placeholders and its trailing
/// `//` comment split off, so rule tables only ever see code.
#[derive(Debug, Clone, Default)]
pub struct MaskedLine {
    pub code: String,
    pub comment: Option<String>,
    literals: Vec<String>,
    comment_only: bool,
}

impl MaskedLine {
    /// True when the line holds comments and nothing else
    pub fn is_comment_only(&self) -> bool {
        self.comment_only
    }

    /// Rewrite masked literals in place; `f` returns `None` to keep one as is
    pub fn map_literals(&mut self, f: impl Fn(&str) -> Option<String>) {
        for lit in &mut self.literals {
            if let Some(rewritten) = f(lit) {
                *lit = rewritten;
            }
        }
    }

    /// Put the masked literals back into `text`
    pub fn restore(&self, text: &str) -> String {
        if self.literals.is_empty() {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len());
        let mut chars = text.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c != MASK_OPEN {
                out.push(c);
                continue;
            }
            let digits_start = i + c.len_utf8();
            let mut digits_end = digits_start;
            while let Some(&(j, d)) = chars.peek() {
                if d.is_ascii_digit() {
                    digits_end = j + d.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let literal = text[digits_start..digits_end]
                .parse::<usize>()
                .ok()
                .and_then(|idx| self.literals.get(idx));
            let closed = matches!(chars.peek(), Some(&(_, MASK_CLOSE)));
            match literal {
                Some(lit) if closed => {
                    chars.next();
                    out.push_str(lit);
                }
                _ => {
                    out.push(c);
                    out.push_str(&text[digits_start..digits_end]);
                }
            }
        }
        out
    }

    /// Restored code with the trailing comment re-attached
    pub fn restore_with_comment(&self, text: &str) -> String {
        let code = self.restore(text);
        match &self.comment {
            Some(comment) if code.trim().is_empty() => comment.clone(),
            Some(comment) => format!("{} {}", code.trim_end(), comment),
            None => code,
        }
    }
}

/// Mask the literals and comments of one line
pub fn mask_line(line: &str, state: &mut LexState) -> MaskedLine {
    let mut masked = MaskedLine::default();
    let mut saw_comment = false;
    let mut saw_code = false;
    for tok in tokenize_line(line, state) {
        match tok.kind {
            TokenKind::LineComment => {
                saw_comment = true;
                masked.comment = Some(tok.text.to_string());
            }
            TokenKind::BlockComment => {
                saw_comment = true;
                push_placeholder(&mut masked, tok.text);
            }
            TokenKind::StringLit | TokenKind::CharLit | TokenKind::RawString => {
                saw_code = true;
                push_placeholder(&mut masked, tok.text);
            }
            TokenKind::Whitespace => masked.code.push_str(tok.text),
            _ => {
                saw_code = true;
                masked.code.push_str(tok.text);
            }
        }
    }
    masked.comment_only = saw_comment && !saw_code;
    masked
}

fn push_placeholder(masked: &mut MaskedLine, text: &str) {
    masked.code.push(MASK_OPEN);
    masked.code.push_str(&masked.literals.len().to_string());
    masked.code.push(MASK_CLOSE);
    masked.literals.push(text.to_string());
}
