//! C++ → Java rule tables

use super::{box_type, Rule, RuleSet};
use crate::lexer::split_top_level;
use once_cell::sync::Lazy;
use regex::Captures;

/// `cout << a << " " << b << endl` → `a + " " + b`
fn stream_chain(chain: &str) -> String {
    chain
        .split("<<")
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" + ")
}

fn println_stream(c: &Captures) -> String {
    format!("System.{}.println({});", stream_name(&c[1]), stream_chain(&c[2]))
}

fn print_stream(c: &Captures) -> String {
    format!("System.{}.print({});", stream_name(&c[1]), stream_chain(&c[2]))
}

fn stream_name(cpp: &str) -> &'static str {
    if cpp == "cerr" {
        "err"
    } else {
        "out"
    }
}

/// Container element types must be boxed in Java generics
fn boxed_args(args: &str) -> String {
    split_top_level(args, ',')
        .into_iter()
        .map(|a| box_type(&cpp_primitive(a)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn cpp_primitive(t: &str) -> String {
    match t.trim() {
        "bool" => "boolean".to_string(),
        "size_t" | "int32_t" | "uint32_t" | "unsigned" | "unsigned int" => "int".to_string(),
        "int64_t" | "uint64_t" | "long long" => "long".to_string(),
        "int16_t" | "uint16_t" => "short".to_string(),
        "int8_t" | "uint8_t" => "byte".to_string(),
        other => other.to_string(),
    }
}

fn to_array_list(c: &Captures) -> String {
    format!("ArrayList<{}>", boxed_args(&c[1]))
}

fn to_linked_list(c: &Captures) -> String {
    format!("LinkedList<{}>", boxed_args(&c[1]))
}

fn to_hash_map(c: &Captures) -> String {
    format!("HashMap<{}>", boxed_args(&c[1]))
}

fn to_tree_map(c: &Captures) -> String {
    format!("TreeMap<{}>", boxed_args(&c[1]))
}

fn to_hash_set(c: &Captures) -> String {
    format!("HashSet<{}>", boxed_args(&c[1]))
}

fn to_tree_set(c: &Captures) -> String {
    format!("TreeSet<{}>", boxed_args(&c[1]))
}

fn to_optional(c: &Captures) -> String {
    format!("Optional<{}>", boxed_args(&c[1]))
}

/// Preprocessor lines: includes become imports, everything else disappears.
/// Applied to the raw line, since include paths are string literals.
pub static CPP_PREPROCESSOR: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        "cpp-preprocessor",
        vec![
            Rule::new("iostream", r"^\s*#\s*include\s*<iostream>.*$", "import java.io.*;"),
            Rule::new("vector", r"^\s*#\s*include\s*<vector>.*$", "import java.util.ArrayList;"),
            Rule::new("list", r"^\s*#\s*include\s*<list>.*$", "import java.util.LinkedList;"),
            Rule::new("map", r"^\s*#\s*include\s*<(?:unordered_)?map>.*$", "import java.util.HashMap;"),
            Rule::new("set", r"^\s*#\s*include\s*<(?:unordered_)?set>.*$", "import java.util.HashSet;"),
            Rule::new("optional", r"^\s*#\s*include\s*<optional>.*$", "import java.util.Optional;"),
            Rule::new(
                "algorithm",
                r"^\s*#\s*include\s*<algorithm>.*$",
                "import java.util.Collections;",
            ),
            Rule::new("cmath", r"^\s*#\s*include\s*<cmath>.*$", "import static java.lang.Math.*;"),
            Rule::new("fstream", r"^\s*#\s*include\s*<fstream>.*$", "import java.nio.file.*;"),
            Rule::new("other-include", r"^\s*#\s*include\b.*$", ""),
            Rule::new("directive", r"^\s*#.*$", ""),
        ],
    )
});

/// Ordered C++ → Java line rules. Every `std::` rule precedes the `::`
/// collapse at the end.
pub static CPP_TO_JAVA: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        "cpp-java",
        vec![
            Rule::new("using-namespace", r"^\s*using\s+namespace\s+\w+\s*;\s*$", ""),
            // Entry points (pointer sigils may already be gone from argv)
            Rule::new(
                "main-args",
                r"\bint\s+main\s*\(\s*int\s+argc\s*,\s*(?:const\s+)?char\s*\**\s*&?\s*\**\s*argv\s*(?:\[\s*\])?\s*\)",
                "public static void main(String[] args)",
            ),
            Rule::new(
                "main",
                r"\bint\s+main\s*\(\s*(?:void)?\s*\)",
                "public static void main(String[] args)",
            ),
            // Stream I/O
            Rule::with(
                "cout-endl",
                r"\b(?:std::)?(cout|cerr)\s*<<\s*(.+?)\s*<<\s*(?:std::)?endl\s*;",
                println_stream,
            )
            .statement(),
            Rule::with(
                "cout",
                r"\b(?:std::)?(cout|cerr)\s*<<\s*(.+?)\s*;",
                print_stream,
            )
            .statement(),
            Rule::new(
                "cin",
                r"\b(?:std::)?cin\s*>>\s*(\w+)\s*;",
                "$1 = scanner.nextLine();",
            )
            .statement(),
            Rule::new("printf", r"(^|[^.\w])printf\(", "${1}System.out.printf(").statement(),
            // Allocation helpers
            Rule::new(
                "make-shared",
                r"\b(?:std::)?make_(?:shared|unique)<([\w:]+)>\(",
                "new $1(",
            )
            .statement(),
            // Containers, one level deep
            Rule::with(
                "unordered-map",
                r"\b(?:std::)?unordered_map<(.+?,\s*.+?)>",
                to_hash_map,
            ),
            Rule::with("map", r"\b(?:std::)?map<(.+?,\s*.+?)>", to_tree_map),
            Rule::with("unordered-set", r"\b(?:std::)?unordered_set<(.+?)>", to_hash_set),
            Rule::with("set", r"\b(?:std::)?set<(.+?)>", to_tree_set),
            Rule::with("vector", r"\b(?:std::)?vector<(.+?)>", to_array_list),
            Rule::with("list", r"\bstd::list<(.+?)>", to_linked_list),
            Rule::with("optional", r"\b(?:std::)?optional<(.+?)>", to_optional),
            Rule::new("smart-pointer", r"\b(?:std::)?(?:unique|shared)_ptr<(.+?)>", "$1"),
            Rule::new("std-string", r"\bstd::string\b", "String"),
            Rule::new("string", r"\bstring\b", "String"),
            // Primitives and qualifiers
            Rule::new("bool", r"\bbool\b", "boolean"),
            Rule::new("const", r"\bconst\b", "final"),
            Rule::new("auto", r"\bauto\b", "var"),
            Rule::new("unsigned", r"\bunsigned\s+(int|long|short|char)\b", "$1"),
            Rule::new("long-long", r"\blong\s+long\b", "long"),
            Rule::new("size-t", r"\b(?:std::)?size_t\b", "int"),
            Rule::new("u8", r"\bu?int8_t\b", "byte"),
            Rule::new("u16", r"\bu?int16_t\b", "short"),
            Rule::new("u32", r"\bu?int32_t\b", "int"),
            Rule::new("u64", r"\bu?int64_t\b", "long"),
            Rule::new("void-pointer", r"\bvoid\s*\*", "Object"),
            Rule::new("nullptr", r"\bnullptr\b", "null"),
            Rule::new("null-macro", r"\bNULL\b", "null"),
            Rule::new("this-arrow", r"\bthis->", "this."),
            // Bare punctuation collapse, last
            Rule::new("arrow", r"->", "."),
            Rule::new("scope", r"::", "."),
        ],
    )
});
