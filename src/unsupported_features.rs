//! Unsupported construct registry (centralized guard)
//!
//! Lines using constructs with no structural equivalent in the target are
//! replaced by exactly one inert placeholder line. When the source line
//! opens or closes blocks, the same braces are kept in front of the comment
//! so brace balance (and the scope tracker) stay correct.

use crate::lexer::{count_braces, mask_line, LexState};
use crate::pairs::Language;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnsupportedConstruct {
    /// `go f()`
    Goroutine,
    /// `<-ch` / `ch <- v`
    Channel,
    /// `select {`
    Select,
    /// `defer f()`
    Defer,
    /// `std::thread`, `std::async`
    Thread,
    /// `synchronized (x) {` / `synchronized` methods
    Synchronized,
}

impl UnsupportedConstruct {
    pub const ALL: [UnsupportedConstruct; 6] = [
        UnsupportedConstruct::Goroutine,
        UnsupportedConstruct::Channel,
        UnsupportedConstruct::Select,
        UnsupportedConstruct::Defer,
        UnsupportedConstruct::Thread,
        UnsupportedConstruct::Synchronized,
    ];

    /// Category name used in placeholders and diagnostics
    pub fn category(self) -> &'static str {
        match self {
            UnsupportedConstruct::Goroutine => "goroutine",
            UnsupportedConstruct::Channel => "channel",
            UnsupportedConstruct::Select => "select",
            UnsupportedConstruct::Defer => "defer",
            UnsupportedConstruct::Thread => "thread",
            UnsupportedConstruct::Synchronized => "synchronized",
        }
    }

    /// Source language the construct belongs to
    pub fn language(self) -> Language {
        match self {
            UnsupportedConstruct::Goroutine
            | UnsupportedConstruct::Channel
            | UnsupportedConstruct::Select
            | UnsupportedConstruct::Defer => Language::Go,
            UnsupportedConstruct::Thread => Language::Cpp,
            UnsupportedConstruct::Synchronized => Language::Java,
        }
    }

    /// Does the masked `code` of one line use this construct
    fn matches(self, code: &str) -> bool {
        let trimmed = code.trim_start().trim_start_matches('}').trim_start();
        match self {
            UnsupportedConstruct::Goroutine => {
                find_keyword(trimmed, "go") == Some(0) && !trimmed[2..].trim_start().is_empty()
            }
            UnsupportedConstruct::Channel => code.contains("<-"),
            UnsupportedConstruct::Select => {
                find_keyword(trimmed, "select") == Some(0)
                    && trimmed["select".len()..].trim_start().starts_with('{')
            }
            UnsupportedConstruct::Defer => find_keyword(trimmed, "defer") == Some(0),
            UnsupportedConstruct::Thread => {
                code.contains("std::thread")
                    || code.contains("std::async")
                    || code.contains("std::jthread")
            }
            UnsupportedConstruct::Synchronized => find_keyword(code, "synchronized").is_some(),
        }
    }
}

/// Whole-word search for `keyword` in `line`
fn find_keyword(line: &str, keyword: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let k = keyword.as_bytes();
    if k.is_empty() {
        return None;
    }
    let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    let mut i = 0usize;
    while i + k.len() <= bytes.len() {
        if &bytes[i..i + k.len()] == k {
            let left_ok = i == 0 || !is_word(bytes[i - 1]);
            let right_ok = i + k.len() == bytes.len() || !is_word(bytes[i + k.len()]);
            if left_ok && right_ok {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

/// One guarded line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardHit {
    pub construct: UnsupportedConstruct,
    /// Replacement line (indentation kept)
    pub placeholder: String,
}

#[derive(Debug, Clone)]
pub struct UnsupportedConstructGuard {
    enabled: HashSet<UnsupportedConstruct>,
}

impl UnsupportedConstructGuard {
    pub fn new(enabled: HashSet<UnsupportedConstruct>) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self, construct: UnsupportedConstruct) -> bool {
        self.enabled.contains(&construct)
    }

    pub fn enable(&mut self, construct: UnsupportedConstruct) {
        self.enabled.insert(construct);
    }

    pub fn disable(&mut self, construct: UnsupportedConstruct) {
        self.enabled.remove(&construct);
    }

    /// Check one raw line of `source` code. `state` is the caller's
    /// multi-line lexer state; it is only read, so the caller still advances
    /// it for the line.
    pub fn check(&self, line: &str, state: &LexState, source: Language) -> Option<GuardHit> {
        let mut probe = *state;
        let masked = mask_line(line, &mut probe);
        if masked.is_comment_only() || masked.code.trim().is_empty() {
            return None;
        }
        let construct = UnsupportedConstruct::ALL
            .into_iter()
            .filter(|c| c.language() == source && self.is_enabled(*c))
            .find(|c| c.matches(&masked.code))?;

        let mut probe = *state;
        let braces = count_braces(line, &mut probe);
        Some(GuardHit {
            construct,
            placeholder: placeholder(line, construct, braces.net()),
        })
    }
}

impl Default for UnsupportedConstructGuard {
    fn default() -> Self {
        Self {
            enabled: UnsupportedConstruct::ALL.into_iter().collect(),
        }
    }
}

/// `// TODO: <category> — <source text>`, prefixed with the braces needed to
/// keep the line's net delta
fn placeholder(line: &str, construct: UnsupportedConstruct, net: isize) -> String {
    let indent_len = line.len() - line.trim_start().len();
    let indent = &line[..indent_len];
    let braces = match net {
        n if n > 0 => "{ ".repeat(n as usize),
        n if n < 0 => "} ".repeat(n.unsigned_abs()),
        _ => String::new(),
    };
    format!(
        "{indent}{braces}// TODO: {} — {}",
        construct.category(),
        line.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(line: &str) -> Option<GuardHit> {
        check_in(line, Language::Go)
    }

    fn check_in(line: &str, source: Language) -> Option<GuardHit> {
        UnsupportedConstructGuard::default().check(line, &LexState::default(), source)
    }

    #[test]
    fn test_goroutine_placeholder() {
        let hit = check("\tgo worker(jobs)").unwrap();
        assert_eq!(hit.construct, UnsupportedConstruct::Goroutine);
        assert_eq!(hit.placeholder, "\t// TODO: goroutine — go worker(jobs)");
    }

    #[test]
    fn test_categories() {
        assert_eq!(check("v := <-ch").unwrap().construct, UnsupportedConstruct::Channel);
        assert_eq!(check("ch <- v").unwrap().construct, UnsupportedConstruct::Channel);
        assert_eq!(check("defer f.Close()").unwrap().construct, UnsupportedConstruct::Defer);
        assert_eq!(
            check_in("std::thread t(run);", Language::Cpp).unwrap().construct,
            UnsupportedConstruct::Thread
        );
        assert_eq!(
            check_in("public synchronized void inc() {", Language::Java).unwrap().construct,
            UnsupportedConstruct::Synchronized
        );
    }

    #[test]
    fn test_ordinary_lines_pass() {
        assert!(check("goal := 3").is_none());
        assert!(check("x = deferred").is_none());
        assert!(check(r#"fmt.Println("go <- here")"#).is_none());
        assert!(check("// go run main.go").is_none());
        assert!(check("if a < -1 {").is_none());
        // Constructs only apply to their own source language.
        assert!(check_in("if (a<-1) {", Language::Cpp).is_none());
        assert!(check("synchronized := true").is_none());
    }

    #[test]
    fn test_brace_delta_is_kept() {
        let hit = check("select {").unwrap();
        assert_eq!(hit.construct, UnsupportedConstruct::Select);
        assert_eq!(hit.placeholder, "{ // TODO: select — select {");

        let hit = check("go func() {").unwrap();
        assert!(hit.placeholder.starts_with("{ // TODO: goroutine"));

        assert!(check("}()").is_none());

        let hit = check_in("\t\tsynchronized (lock) {", Language::Java).unwrap();
        assert_eq!(hit.placeholder, "\t\t{ // TODO: synchronized — synchronized (lock) {");
    }

    #[test]
    fn test_registry_disable() {
        let mut guard = UnsupportedConstructGuard::default();
        guard.disable(UnsupportedConstruct::Defer);
        assert!(!guard.is_enabled(UnsupportedConstruct::Defer));
        assert!(guard.check("defer wg.Done()", &LexState::default(), Language::Go).is_none());
        guard.enable(UnsupportedConstruct::Defer);
        assert!(guard.check("defer wg.Done()", &LexState::default(), Language::Go).is_some());
    }

    #[test]
    fn test_block_comment_state_is_respected() {
        let state = LexState {
            in_block_comment: true,
            in_raw_string: false,
        };
        let guard = UnsupportedConstructGuard::default();
        assert!(guard.check("go run() */", &state, Language::Go).is_none());
    }
}
