//! Go → Java statement rewriting

use super::{terminate, wrap_condition, Statement};
use crate::declarations::go::{parse_value_decl, ValueDecl, ValueSpec};
use crate::lexer::split_top_level;
use crate::rules::{go_java::GO_TO_JAVA, infer_literal_type, map_go_type, static_regex};
use once_cell::sync::Lazy;
use regex::Regex;

static RANGE: Lazy<Regex> = Lazy::new(|| {
    static_regex(r"^for\s+(?:(\w+)\s*(?:,\s*(\w+))?\s*:?=\s*)?range\s+(.+?)\s*\{\s*$")
});
static THREE_CLAUSE: Lazy<Regex> =
    Lazy::new(|| static_regex(r"^for\s+([^;]*);([^;]*);(.*?)\s*\{\s*$"));
static FOREVER: Lazy<Regex> = Lazy::new(|| static_regex(r"^for\s*\{\s*$"));
static WHILE: Lazy<Regex> = Lazy::new(|| static_regex(r"^for\s+(.+?)\s*\{\s*$"));
static IF: Lazy<Regex> = Lazy::new(|| static_regex(r"^(\}\s*else\s+)?if\s+(.+?)\s*\{\s*$"));
static SWITCH: Lazy<Regex> = Lazy::new(|| static_regex(r"^switch\b\s*(.*?)\s*\{\s*$"));
static SHORT_DECL: Lazy<Regex> = Lazy::new(|| static_regex(r"^([\w\s,]+?)\s*:=\s*(.+)$"));
static RETURN: Lazy<Regex> = Lazy::new(|| static_regex(r"^return\s+(.+)$"));
static INT_LITERAL: Lazy<Regex> = Lazy::new(|| static_regex(r"^-?\d+$"));

/// Rewrite one masked Go statement line
pub fn translate(code: &str) -> Statement {
    let code = code.trim();
    if code.is_empty() {
        return Statement::default();
    }
    if code == "fallthrough" {
        return Statement::new("// fallthrough");
    }

    loop_form(code)
        .or_else(|| conditional(code))
        .or_else(|| local_value_decl(code))
        .or_else(|| {
            short_declaration(code).map(|mut stmt| {
                stmt.code = terminate(&stmt.code);
                stmt
            })
        })
        .or_else(|| multi_return(code))
        .unwrap_or_else(|| Statement::new(terminate(&expr(code))))
}

/// Call-site and type rules over one expression
fn expr(text: &str) -> String {
    GO_TO_JAVA.apply(text.trim())
}

fn loop_form(code: &str) -> Option<Statement> {
    if let Some(caps) = RANGE.captures(code) {
        let collection = expr(&caps[3]);
        let first = caps.get(1).map(|m| m.as_str());
        let second = caps.get(2).map(|m| m.as_str());
        return Some(match (first, second) {
            (None, _) => Statement::new(format!("for (var _item : {collection}) {{")),
            // A single range variable is bound as the element
            (Some(value), None) => Statement::new(format!("for (var {value} : {collection}) {{")),
            (Some(index), Some("_")) => Statement::new(format!(
                "for (int {index} = 0; {index} < {collection}.size(); {index}++) {{"
            )),
            (Some("_"), Some(value)) => {
                Statement::new(format!("for (var {value} : {collection}) {{"))
            }
            (Some(index), Some(value)) => {
                Statement::new(format!("for (var {value} : {collection}) {{"))
                    .note(format!("index: {index}"))
            }
        });
    }

    if let Some(caps) = THREE_CLAUSE.captures(code) {
        let init = loop_init(caps[1].trim());
        let cond = expr(&caps[2]);
        let post = expr(&caps[3]);
        return Some(Statement::new(format!("for ({init}; {cond}; {post}) {{")));
    }

    if FOREVER.is_match(code) {
        return Some(Statement::new("while (true) {"));
    }

    let caps = WHILE.captures(code)?;
    Some(Statement::new(format!(
        "while {} {{",
        wrap_condition(&expr(&caps[1]))
    )))
}

/// `i := 0` → `int i = 0`; other initializers use `var`
fn loop_init(init: &str) -> String {
    match SHORT_DECL.captures(init) {
        Some(caps) if !caps[1].contains(',') => {
            let value = expr(&caps[2]);
            let ty = if INT_LITERAL.is_match(&value) { "int" } else { "var" };
            format!("{ty} {} = {value}", caps[1].trim())
        }
        _ => expr(init),
    }
}

fn conditional(code: &str) -> Option<Statement> {
    if let Some(caps) = IF.captures(code) {
        let prefix = if caps.get(1).is_some() { "} else " } else { "" };
        let (init, cond) = split_init(&caps[2]);
        let head = format!("{prefix}if {} {{", wrap_condition(&expr(cond)));
        return Some(with_init(init, head));
    }

    let caps = SWITCH.captures(code)?;
    let (init, tag) = split_init(&caps[1]);
    let tag = if tag.trim().is_empty() {
        "true".to_string()
    } else {
        expr(tag)
    };
    Some(with_init(init, format!("switch {} {{", wrap_condition(&tag))))
}

/// `init; cond` → (`Some(init)`, `cond`)
fn split_init(header: &str) -> (Option<&str>, &str) {
    let parts = split_top_level(header, ';');
    match parts.as_slice() {
        [init, cond] => (Some(*init), *cond),
        _ => (None, header.trim()),
    }
}

/// Emit an init statement in front of the block header, on the same line
fn with_init(init: Option<&str>, head: String) -> Statement {
    let Some(init) = init else {
        return Statement::new(head);
    };
    let mut stmt = short_declaration(init).unwrap_or_else(|| Statement::new(expr(init)));
    stmt.code = format!("{} {head}", terminate(&stmt.code));
    stmt
}

/// `x := e` → `var x = e`. Parallel assignments declare each name; a
/// multi-value call keeps its first binding and notes the rest.
fn short_declaration(code: &str) -> Option<Statement> {
    let caps = SHORT_DECL.captures(code)?;
    let names: Vec<&str> = caps[1].split(',').map(str::trim).collect();
    let values = split_top_level(&caps[2], ',');

    if names.len() == values.len() {
        let decls: Vec<String> = names
            .iter()
            .zip(&values)
            .map(|(name, value)| match *name {
                "_" => expr(value),
                name => format!("var {name} = {}", expr(value)),
            })
            .collect();
        return Some(Statement::new(decls.join("; ")));
    }

    let value = expr(&caps[2]);
    let code = match names[0] {
        "_" => value,
        first => format!("var {first} = {value}"),
    };
    let dropped: Vec<&str> = names[1..].iter().copied().filter(|n| *n != "_").collect();
    let stmt = Statement::new(code);
    Some(if dropped.is_empty() {
        stmt
    } else {
        stmt.note(format!("dropped: {}", dropped.join(", ")))
    })
}

/// Local single-line `var`/`const` declarations. Groups are tracked by the
/// file driver.
fn local_value_decl(code: &str) -> Option<Statement> {
    match parse_value_decl(code)? {
        ValueDecl::Single { constant, spec } => Some(value_declaration(&spec, "", constant, false)),
        ValueDecl::Group { .. } => None,
    }
}

/// Java declarations for one Go value spec, each prefixed with `modifiers`.
/// `explicit` forces a concrete type (fields cannot use `var`).
pub fn value_declaration(
    spec: &ValueSpec,
    modifiers: &str,
    constant: bool,
    explicit: bool,
) -> Statement {
    let values = spec
        .value
        .as_deref()
        .map(|v| split_top_level(v, ','))
        .unwrap_or_default();
    let final_kw = if constant {
        format!("{modifiers}final ")
    } else {
        modifiers.to_string()
    };

    // `a, b = f()`: keep the first binding
    if !values.is_empty() && values.len() != spec.names.len() {
        let first = spec.names.first().map(String::as_str).unwrap_or("_");
        let ty = declared_type(spec, Some(values[0]), explicit);
        let stmt = Statement::new(format!("{final_kw}{ty} {first} = {};", expr(values[0])));
        return match spec.names.get(1..) {
            Some(rest) if !rest.is_empty() => stmt.note(format!("dropped: {}", rest.join(", "))),
            _ => stmt,
        };
    }

    let decls: Vec<String> = spec
        .names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let value = values.get(i).copied();
            let ty = declared_type(spec, value, explicit);
            match value {
                Some(v) => format!("{final_kw}{ty} {name} = {};", expr(v)),
                None => format!("{final_kw}{ty} {name};"),
            }
        })
        .collect();
    Statement::new(decls.join(" "))
}

fn declared_type(spec: &ValueSpec, value: Option<&str>, explicit: bool) -> String {
    match (&spec.ty, value) {
        (Some(ty), _) => map_go_type(ty),
        (None, Some(v)) if explicit => infer_literal_type(v).to_string(),
        (None, Some(_)) => "var".to_string(),
        (None, None) => "Object".to_string(),
    }
}

/// `return a, b` → `return a;`, noting the dropped values
fn multi_return(code: &str) -> Option<Statement> {
    let caps = RETURN.captures(code)?;
    let values = split_top_level(&caps[1], ',');
    if values.len() < 2 {
        return None;
    }
    Some(
        Statement::new(format!("return {};", expr(values[0])))
            .note(format!("dropped: {}", values[1..].join(", "))),
    )
}
