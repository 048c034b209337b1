//! Scope tracking - brace-depth state machine
//!
//! The tracker knows how deep it is and which declaration it is inside
//! (struct, interface or function). Blocks nested inside a function body
//! (`if`, `for`, closures) only move the depth counter; they never become
//! scopes of their own.

use crate::lexer::{count_braces, BraceCount, LexState};

/// What kind of declaration the current line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    TopLevel,
    Struct,
    Interface,
    Function,
}

/// One open declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub kind: ScopeKind,
    pub name: String,
    /// Depth before the declaration line
    pub entry_depth: usize,
    /// 1-based line of the declaration header
    pub open_line: usize,
    /// Whether the opening `{` has been seen
    pub opened: bool,
}

/// Result of feeding one line to the tracker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Observed {
    pub braces: BraceCount,
    /// Depth before the line was applied
    pub depth_before: usize,
    /// Scopes closed by this line, innermost first
    pub closed: Vec<Scope>,
}

#[derive(Debug, Default)]
pub struct ScopeTracker {
    depth: usize,
    stack: Vec<Scope>,
    lex: LexState,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Kind of the innermost open declaration
    pub fn state(&self) -> ScopeKind {
        self.stack.last().map(|s| s.kind).unwrap_or(ScopeKind::TopLevel)
    }

    pub fn current(&self) -> Option<&Scope> {
        self.stack.last()
    }

    /// Number of open declarations
    pub fn open_scopes(&self) -> usize {
        self.stack.len()
    }

    /// True when the current line sits directly in a declaration body (not in
    /// a nested block inside it)
    pub fn at_body_level(&self) -> bool {
        self.stack
            .last()
            .is_some_and(|s| s.opened && self.depth == s.entry_depth + 1)
    }

    /// Enter a declaration whose header is `line`, then apply the line's
    /// braces. A header that opens and closes on the same line is closed
    /// again immediately and reported in `closed`.
    pub fn enter(&mut self, kind: ScopeKind, name: &str, line_no: usize, line: &str) -> Observed {
        self.stack.push(Scope {
            kind,
            name: name.to_string(),
            entry_depth: self.depth,
            open_line: line_no,
            opened: false,
        });
        self.observe(line)
    }

    /// Apply one line's brace delta and close any scope it ends
    pub fn observe(&mut self, line: &str) -> Observed {
        let braces = count_braces(line, &mut self.lex);
        let depth_before = self.depth;

        if braces.opens > 0 {
            if let Some(top) = self.stack.last_mut() {
                top.opened = true;
            }
        }

        let next = self.depth as isize + braces.net();
        self.depth = next.max(0) as usize;

        let mut closed = Vec::new();
        while let Some(top) = self.stack.last() {
            if top.opened && self.depth <= top.entry_depth {
                if let Some(scope) = self.stack.pop() {
                    closed.push(scope);
                }
            } else {
                break;
            }
        }

        Observed {
            braces,
            depth_before,
            closed,
        }
    }

    /// Close every scope still open at end of file
    pub fn finish(&mut self) -> Vec<Scope> {
        let mut closed = Vec::with_capacity(self.stack.len());
        while let Some(scope) = self.stack.pop() {
            closed.push(scope);
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `depth` nested blocks inside one function
    fn nested_source(depth: usize) -> Vec<String> {
        let mut lines = vec!["func f() {".to_string()];
        for level in 1..depth {
            lines.push(format!("{}if x{level} {{", "\t".repeat(level)));
        }
        lines.push(format!("{}work()", "\t".repeat(depth)));
        for level in (1..depth).rev() {
            lines.push(format!("{}}}", "\t".repeat(level)));
        }
        lines.push("}".to_string());
        lines
    }

    #[test]
    fn test_depth_returns_to_zero_for_nesting_one_to_five() {
        for depth in 1..=5 {
            let lines = nested_source(depth);
            let mut tracker = ScopeTracker::new();
            tracker.enter(ScopeKind::Function, "f", 1, &lines[0]);
            let mut max = tracker.depth();
            for line in &lines[1..] {
                tracker.observe(line);
                max = max.max(tracker.depth());
            }
            assert_eq!(max, depth, "max depth for nesting {depth}");
            assert_eq!(tracker.depth(), 0, "final depth for nesting {depth}");
            assert_eq!(tracker.state(), ScopeKind::TopLevel);
        }
    }

    #[test]
    fn test_nested_blocks_keep_function_state() {
        let mut tracker = ScopeTracker::new();
        tracker.enter(ScopeKind::Function, "run", 1, "func run() {");
        assert!(tracker.at_body_level());
        tracker.observe("for {");
        assert_eq!(tracker.state(), ScopeKind::Function);
        assert!(!tracker.at_body_level());
        let obs = tracker.observe("}");
        assert!(obs.closed.is_empty());
        let obs = tracker.observe("}");
        assert_eq!(obs.closed.len(), 1);
        assert_eq!(obs.closed[0].name, "run");
        assert_eq!(obs.depth_before, 1);
    }

    #[test]
    fn test_pending_open_brace() {
        let mut tracker = ScopeTracker::new();
        tracker.enter(ScopeKind::Struct, "Point", 1, "class Point");
        assert_eq!(tracker.state(), ScopeKind::Struct);
        assert!(!tracker.current().is_some_and(|s| s.opened));
        tracker.observe("{");
        assert!(tracker.at_body_level());
        let obs = tracker.observe("};");
        assert_eq!(obs.closed.len(), 1);
        assert_eq!(tracker.state(), ScopeKind::TopLevel);
    }

    #[test]
    fn test_single_line_declaration_closes_immediately() {
        let mut tracker = ScopeTracker::new();
        let obs = tracker.enter(ScopeKind::Function, "noop", 3, "func noop() {}");
        assert_eq!(obs.closed.len(), 1);
        assert_eq!(obs.closed[0].open_line, 3);
        assert_eq!(tracker.open_scopes(), 0);
    }

    #[test]
    fn test_unbalanced_closers_clamp_at_zero() {
        let mut tracker = ScopeTracker::new();
        tracker.observe("}}");
        assert_eq!(tracker.depth(), 0);
        tracker.observe("{");
        assert_eq!(tracker.depth(), 1);
    }

    #[test]
    fn test_braces_in_literals_and_comments_ignored() {
        let mut tracker = ScopeTracker::new();
        tracker.enter(ScopeKind::Function, "f", 1, "func f() {");
        tracker.observe(r#"s := "{{{" // }"#);
        tracker.observe("/* {");
        tracker.observe("} */");
        assert_eq!(tracker.depth(), 1);
        tracker.observe("}");
        assert_eq!(tracker.depth(), 0);
    }

    #[test]
    fn test_finish_closes_open_scopes() {
        let mut tracker = ScopeTracker::new();
        tracker.enter(ScopeKind::Struct, "Outer", 1, "class Outer {");
        tracker.enter(ScopeKind::Function, "run", 2, "void run() {");
        let closed = tracker.finish();
        assert_eq!(
            closed.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["run", "Outer"]
        );
        assert_eq!(tracker.state(), ScopeKind::TopLevel);
    }
}
