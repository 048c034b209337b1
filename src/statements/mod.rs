//! Statement translation - per-line rewriting of non-declaration lines
//!
//! Translators receive the masked code of one line with its indentation
//! removed, and return the rewritten code plus any trailing notes. The pair
//! driver restores literals, re-attaches comments and re-indents.

pub mod cpp;
pub mod go;
pub mod java;

/// A rewritten statement line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statement {
    pub code: String,
    /// Trailing `// ...` notes (dropped bindings, stripped sigils)
    pub notes: Vec<String>,
    pub pointer_stripped: bool,
}

impl Statement {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Code followed by its notes as trailing comments
    pub fn render(&self) -> String {
        let mut out = self.code.clone();
        for note in &self.notes {
            if out.trim().is_empty() {
                out = format!("// {note}");
            } else {
                out.push_str(&format!(" // {note}"));
            }
        }
        out
    }
}

/// Keywords that start a line never terminated with `;`
const CONTROL_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "case", "default", "else", "try", "catch", "finally", "do",
];

/// Append `;` unless the line already ends a statement, opens or continues a
/// block, or starts with a control keyword. Multi-line expressions can end
/// up with a stray terminator.
pub fn terminate(code: &str) -> String {
    let trimmed = code.trim_end();
    if trimmed.trim().is_empty() || needs_no_terminator(trimmed.trim_start()) {
        return trimmed.to_string();
    }
    format!("{trimmed};")
}

fn needs_no_terminator(code: &str) -> bool {
    if code.starts_with("//") || code.starts_with("/*") {
        return true;
    }
    if code.ends_with("&&") || code.ends_with("||") {
        return true;
    }
    if code.ends_with([';', '{', '}', ',', '(', ':']) {
        return true;
    }
    let first = code
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .next()
        .unwrap_or_default();
    CONTROL_KEYWORDS.contains(&first)
}

/// Wrap a condition in parentheses unless one pair already spans all of it
pub fn wrap_condition(cond: &str) -> String {
    let cond = cond.trim();
    if is_fully_parenthesized(cond) {
        cond.to_string()
    } else {
        format!("({cond})")
    }
}

fn is_fully_parenthesized(s: &str) -> bool {
    if !(s.starts_with('(') && s.ends_with(')')) {
        return false;
    }
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 && i + 1 < s.len() {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminate() {
        assert_eq!(terminate("x++"), "x++;");
        assert_eq!(terminate("return a"), "return a;");
        assert_eq!(terminate("while (true) {"), "while (true) {");
        assert_eq!(terminate("}"), "}");
        assert_eq!(terminate("case 1:"), "case 1:");
        assert_eq!(terminate("default:"), "default:");
        assert_eq!(terminate("call(a,"), "call(a,");
        assert_eq!(terminate("ok = a &&"), "ok = a &&");
        assert_eq!(terminate("} else {"), "} else {");
        assert_eq!(terminate("done;"), "done;");
        assert_eq!(terminate(""), "");
        // Identifiers that merely start with a keyword are still statements.
        assert_eq!(terminate("format(x)"), "format(x);");
        assert_eq!(terminate("}()"), "}();");
    }

    #[test]
    fn test_wrap_condition() {
        assert_eq!(wrap_condition("x > 0"), "(x > 0)");
        assert_eq!(wrap_condition("(x > 0)"), "(x > 0)");
        assert_eq!(wrap_condition("(a) && (b)"), "((a) && (b))");
        assert_eq!(wrap_condition("f(x)"), "(f(x))");
    }

    #[test]
    fn test_render_notes() {
        let stmt = Statement::new("var v = f();").note("dropped: err");
        assert_eq!(stmt.render(), "var v = f(); // dropped: err");
        assert_eq!(Statement::new("").note("index: i").render(), "// index: i");
    }
}
