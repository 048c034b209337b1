//! Structural type mapping
//!
//! The line rules only see flat text. Declarations (fields, parameters,
//! return types) go through these mappers instead, which understand Go type
//! syntax well enough to rebuild slices, maps and pointers as Java types.

/// Go primitive → Java type
const GO_PRIMITIVES: &[(&str, &str)] = &[
    ("string", "String"),
    ("int", "int"),
    ("int8", "byte"),
    ("int16", "short"),
    ("int32", "int"),
    ("int64", "long"),
    ("uint", "int"),
    ("uint8", "byte"),
    ("uint16", "short"),
    ("uint32", "int"),
    ("uint64", "long"),
    ("uintptr", "long"),
    ("float32", "float"),
    ("float64", "double"),
    ("bool", "boolean"),
    ("byte", "byte"),
    ("rune", "char"),
    ("error", "Exception"),
    ("any", "Object"),
    ("interface{}", "Object"),
];

/// Java primitive → boxed type, for generic arguments
const BOXED: &[(&str, &str)] = &[
    ("int", "Integer"),
    ("long", "Long"),
    ("double", "Double"),
    ("float", "Float"),
    ("boolean", "Boolean"),
    ("byte", "Byte"),
    ("short", "Short"),
    ("char", "Character"),
];

/// Box a Java primitive; other types are returned unchanged
pub fn box_type(t: &str) -> String {
    let t = t.trim();
    BOXED
        .iter()
        .find(|(prim, _)| *prim == t)
        .map(|(_, boxed)| boxed.to_string())
        .unwrap_or_else(|| t.to_string())
}

/// Map a Go type expression to a Java type.
///
/// An empty type maps to `void`. Unknown names (user types, `pkg.Type`) are
/// returned as written.
pub fn map_go_type(go: &str) -> String {
    let t = go.trim();
    if t.is_empty() {
        return "void".to_string();
    }

    let t = t.trim_start_matches('*').trim();

    if let Some(inner) = t.strip_prefix("...") {
        return format!("{}...", map_go_type(inner));
    }
    if let Some(inner) = t.strip_prefix("[]") {
        return format!("List<{}>", box_type(&map_go_type(inner)));
    }
    if let Some(rest) = t.strip_prefix('[') {
        // Fixed-size array: [N]T
        if let Some(close) = rest.find(']') {
            return format!("{}[]", map_go_type(&rest[close + 1..]));
        }
    }
    if let Some(rest) = t.strip_prefix("map[") {
        if let Some(close) = matching_bracket(rest) {
            let key = map_go_type(&rest[..close]);
            let value = map_go_type(&rest[close + 1..]);
            return format!("Map<{}, {}>", box_type(&key), box_type(&value));
        }
    }
    if let Some(inner) = t
        .strip_prefix("chan<-")
        .or_else(|| t.strip_prefix("<-chan"))
        .or_else(|| t.strip_prefix("chan "))
    {
        return format!("BlockingQueue<{}>", box_type(&map_go_type(inner)));
    }
    if t.starts_with("func(") || t == "func" {
        return "Object".to_string();
    }
    if t.starts_with("struct{") || t.starts_with("struct {") {
        return "Object".to_string();
    }

    let compact: String = t.split_whitespace().collect();
    GO_PRIMITIVES
        .iter()
        .find(|(go, _)| *go == compact)
        .map(|(_, java)| java.to_string())
        .unwrap_or_else(|| t.to_string())
}

/// Index of the `]` closing an already-opened `[` at the start of `s`
fn matching_bracket(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Infer a Java type from a literal initializer (`const X = 5`)
pub fn infer_literal_type(value: &str) -> &'static str {
    let v = value.trim();
    if v.starts_with('"') || v.starts_with('`') {
        "String"
    } else if v.starts_with('\'') {
        "char"
    } else if v == "true" || v == "false" {
        "boolean"
    } else if v.parse::<i32>().is_ok() || (is_hex_literal(v) && v.len() <= 10) {
        "int"
    } else if v.parse::<i64>().is_ok() || is_hex_literal(v) {
        "long"
    } else if v.parse::<f64>().is_ok() {
        "double"
    } else {
        "Object"
    }
}

fn is_hex_literal(v: &str) -> bool {
    v.strip_prefix("0x")
        .or_else(|| v.strip_prefix("0X"))
        .is_some_and(|h| !h.is_empty() && h.chars().all(|c| c.is_ascii_hexdigit() || c == '_'))
}
