//! Type mapping tables - ordered pattern → replacement rules per language pair
//!
//! A [`RuleSet`] is applied as a single ordered pass over one line of code.
//! A rule may match text produced by an earlier rule on the same line, so the
//! order in which rules are declared is part of their meaning: qualified
//! idioms (`std::cout << ...`, `fmt.Errorf(...)`) come before the bare type
//! and punctuation rules that would otherwise corrupt them.
//!
//! Rules never recurse into their own captures, so generic arguments are
//! rewritten one level deep only (`vector<vector<int>>` keeps its inner
//! `vector`).

pub mod cpp_java;
pub mod go_java;
pub mod java_cpp;
mod types;

pub use types::*;

use crate::lexer::{mask_line, LexState};
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Where a rule is allowed to fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    /// Type text and statements alike
    Any,
    /// Statement lines only (call idioms, I/O)
    Statement,
    /// Declaration headers and member types only
    Declaration,
}

/// The kind of text a rule set is being applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleContext {
    Statement,
    Declaration,
}

impl Applicability {
    fn allows(self, ctx: RuleContext) -> bool {
        match self {
            Applicability::Any => true,
            Applicability::Statement => ctx == RuleContext::Statement,
            Applicability::Declaration => ctx == RuleContext::Declaration,
        }
    }
}

/// Replacement side of a rule
pub enum Replacement {
    /// `regex` replacement template (`$1`, `${name}`)
    Template(&'static str),
    /// Computed from the captures
    With(fn(&Captures) -> String),
}

/// One pattern → replacement rule
pub struct Rule {
    pub name: &'static str,
    pattern: Regex,
    replacement: Replacement,
    applies: Applicability,
}

impl Rule {
    /// Build a rule from a literal pattern. Patterns are compile-time
    /// constants; every table is exercised by the tests below.
    pub fn new(name: &'static str, pattern: &str, template: &'static str) -> Self {
        Self {
            name,
            pattern: static_regex(pattern),
            replacement: Replacement::Template(template),
            applies: Applicability::Any,
        }
    }

    pub fn with(name: &'static str, pattern: &str, f: fn(&Captures) -> String) -> Self {
        Self {
            name,
            pattern: static_regex(pattern),
            replacement: Replacement::With(f),
            applies: Applicability::Any,
        }
    }

    /// Restrict the rule to statement lines
    pub fn statement(mut self) -> Self {
        self.applies = Applicability::Statement;
        self
    }

    /// Restrict the rule to declaration text
    pub fn declaration(mut self) -> Self {
        self.applies = Applicability::Declaration;
        self
    }

    pub fn applies(&self) -> Applicability {
        self.applies
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match &self.replacement {
            Replacement::Template(t) => self.pattern.replace_all(text, *t),
            Replacement::With(f) => self.pattern.replace_all(text, |caps: &Captures| f(caps)),
        }
    }
}

pub(crate) fn static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid rule pattern {pattern:?}: {e}"))
}

/// An ordered list of rules for one language pair
pub struct RuleSet {
    name: &'static str,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: &'static str, rules: Vec<Rule>) -> Self {
        Self { name, rules }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule allowed in `ctx` once, in declaration order
    pub fn apply_in(&self, text: &str, ctx: RuleContext) -> String {
        let mut out = text.to_string();
        for rule in self.rules.iter().filter(|r| r.applies.allows(ctx)) {
            let replaced = match rule.apply(&out) {
                Cow::Borrowed(_) => None,
                Cow::Owned(s) => Some(s),
            };
            if let Some(s) = replaced {
                out = s;
            }
        }
        out
    }

    /// Apply to statement text
    pub fn apply(&self, text: &str) -> String {
        self.apply_in(text, RuleContext::Statement)
    }

    /// Apply to a raw line, leaving literals and the trailing comment alone
    pub fn apply_line(&self, line: &str) -> String {
        let mut state = LexState::default();
        let masked = mask_line(line, &mut state);
        let code = self.apply(&masked.code);
        masked.restore_with_comment(&code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_apply_in_order() {
        // The second rule sees the output of the first.
        let set = RuleSet::new(
            "demo",
            vec![
                Rule::new("qualified", r"std::string", "String"),
                Rule::new("scope", r"::", "."),
            ],
        );
        assert_eq!(set.apply("std::string a::b"), "String a.b");

        // Reversed order corrupts the qualified form before it can match.
        let reversed = RuleSet::new(
            "demo-reversed",
            vec![
                Rule::new("scope", r"::", "."),
                Rule::new("qualified", r"std::string", "String"),
            ],
        );
        assert_eq!(reversed.apply("std::string"), "std.string");
    }

    #[test]
    fn test_applicability_filters_rules() {
        let set = RuleSet::new(
            "demo",
            vec![
                Rule::new("call", r"\blen\((\w+)\)", "$1.size()").statement(),
                Rule::new("type", r"\bstring\b", "String"),
            ],
        );
        assert_eq!(
            set.apply_in("len(string)", RuleContext::Declaration),
            "len(String)"
        );
        assert_eq!(set.apply_in("len(xs)", RuleContext::Statement), "xs.size()");
    }

    #[test]
    fn test_apply_line_skips_literals() {
        let set = RuleSet::new("demo", vec![Rule::new("nil", r"\bnil\b", "null")]);
        assert_eq!(
            set.apply_line(r#"x = nil // nil stays"#),
            "x = null // nil stays"
        );
        assert_eq!(set.apply_line(r#"s = "nil""#), r#"s = "nil""#);
    }

    #[test]
    fn test_function_replacement() {
        let set = RuleSet::new(
            "demo",
            vec![Rule::with("upper", r"\b(up)\((\w+)\)", |c| c[2].to_uppercase())],
        );
        assert_eq!(set.apply("x = up(abc)"), "x = ABC");
    }

    #[test]
    fn test_all_tables_compile() {
        assert!(!go_java::GO_TO_JAVA.is_empty());
        assert!(!cpp_java::CPP_TO_JAVA.is_empty());
        assert!(!cpp_java::CPP_PREPROCESSOR.is_empty());
        assert!(!java_cpp::JAVA_TO_CPP.is_empty());
        assert!(!java_cpp::JAVA_TYPES_TO_CPP.is_empty());
    }
}
