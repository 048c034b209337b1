//! C++ → Java statement rewriting
//!
//! Java has no pointers or references, so declarators lose their sigils
//! before the rule table runs. Stripped pointers are marked on the line.

use super::Statement;
use crate::rules::{cpp_java::CPP_TO_JAVA, static_regex};
use once_cell::sync::Lazy;
use regex::Regex;

/// `Node* n`, `const Foo *f`, `int* p`, `std::vector<int>* v`
static POINTER_DECL: Lazy<Regex> = Lazy::new(|| {
    static_regex(
        r"\b([A-Z]\w*(?:<[^;=()]*>)?|(?:std::)?\w+<[^;=()]*>|int|char|double|float|long|short|bool|void|auto|unsigned|size_t)\s*\*+\s*(\w+)",
    )
});

/// `*p = 5;`
static LEADING_DEREF: Lazy<Regex> = Lazy::new(|| static_regex(r"^\*+\s*(\w)"));

/// `T& x` / `T &x` at the start of a declaration or parameter. A binary `&`
/// has space on both sides and is left alone.
static REFERENCE_DECL: Lazy<Regex> =
    Lazy::new(|| static_regex(r"(^|[(,]\s*)((?:const\s+)?[\w:<>]+?)(?:&\s*|\s+&)(\w+)"));

/// `&x` as an argument or initializer
static ADDRESS_OF: Lazy<Regex> = Lazy::new(|| static_regex(r"([(,=]\s*)&(\w)"));

static DELETE: Lazy<Regex> = Lazy::new(|| static_regex(r"^delete(?:\[\])?\s+(\w+)\s*;"));

/// Rewrite one masked C++ statement line
pub fn translate(code: &str) -> Statement {
    let code = code.trim();
    if code.is_empty() {
        return Statement::default();
    }

    let mut stripped = false;
    let mut text = code.to_string();

    if let Some(caps) = DELETE.captures(&text) {
        return Statement::new(format!("{} = null;", &caps[1]));
    }

    if POINTER_DECL.is_match(&text) {
        text = POINTER_DECL.replace_all(&text, "$1 $2").into_owned();
        stripped = true;
    }
    if LEADING_DEREF.is_match(&text) {
        text = LEADING_DEREF.replace(&text, "$1").into_owned();
        stripped = true;
    }
    text = REFERENCE_DECL.replace_all(&text, "$1$2 $3").into_owned();
    text = ADDRESS_OF.replace_all(&text, "$1$2").into_owned();

    let mut stmt = Statement::new(CPP_TO_JAVA.apply(&text));
    if stripped {
        stmt.pointer_stripped = true;
        stmt = stmt.note("pointer stripped");
    }
    stmt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_declarations() {
        let stmt = translate("Node* next = head->next;");
        assert_eq!(stmt.code, "Node next = head.next;");
        assert!(stmt.pointer_stripped);
        assert_eq!(stmt.render(), "Node next = head.next; // pointer stripped");

        assert_eq!(translate("int *p = nullptr;").code, "int p = null;");
        assert_eq!(translate("*p = 5;").code, "p = 5;");
    }

    #[test]
    fn test_multiplication_is_kept() {
        let stmt = translate("int area = w * h;");
        assert_eq!(stmt.code, "int area = w * h;");
        assert!(!stmt.pointer_stripped);
    }

    #[test]
    fn test_references() {
        assert_eq!(
            translate("for (auto& item : items) {").code,
            "for (var item : items) {"
        );
        assert_eq!(translate("const std::string& name = p.name;").code, "final String name = p.name;");
        assert_eq!(translate("swap(&a, &b);").code, "swap(a, b);");
        assert_eq!(translate("bool ok = a && b;").code, "boolean ok = a && b;");
    }

    #[test]
    fn test_delete() {
        assert_eq!(translate("delete node;").code, "node = null;");
    }

    #[test]
    fn test_stream_output() {
        assert_eq!(
            translate("std::cout << \"total: \" << total << std::endl;").code,
            "System.out.println(\"total: \" + total);"
        );
    }
}
