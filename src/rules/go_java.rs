//! Go → Java rule table

use super::{box_type, map_go_type, Rule, RuleSet};
use crate::lexer::split_top_level;
use once_cell::sync::Lazy;
use regex::Captures;

/// `xs = append(xs, a, b)` → `xs.add(a)` / `xs.addAll(List.of(a, b))`
fn self_append(c: &Captures) -> String {
    let (indent, target, source, args) = (&c[1], &c[2], &c[3], &c[4]);
    if target != source {
        return c[0].to_string();
    }
    let values = split_top_level(args, ',');
    if values.len() == 1 {
        format!("{indent}{target}.add({})", values[0])
    } else {
        format!("{indent}{target}.addAll(List.of({}))", values.join(", "))
    }
}

/// `make([]T, n)` / `make(map[K]V)` keep their element types on the diamond
fn make_collection(c: &Captures) -> String {
    let ty = map_go_type(&c[1]);
    if ty.starts_with("Map<") {
        "new HashMap<>()".to_string()
    } else if ty.starts_with("List<") {
        "new ArrayList<>()".to_string()
    } else {
        format!("new {}()", box_type(&ty))
    }
}

/// Call idioms first, then types and literals.
pub static GO_TO_JAVA: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        "go-java",
        vec![
            // Statement-level rewrites that must see the untouched call
            Rule::with(
                "self-append",
                r"^(\s*)(\w+)\s*=\s*append\(\s*(\w+)\s*,\s*(.+)\)\s*$",
                self_append,
            )
            .statement(),
            Rule::new("append", r"\bappend\((\w+),\s*(.+)\)", "$1.add($2)").statement(),
            Rule::with(
                "make",
                r"\bmake\(((?:\[\]|map\[)[^,)]*?)(?:\s*,\s*[^)]*)?\)",
                make_collection,
            )
            .statement(),
            // fmt / errors
            Rule::new("fmt-println", r"\bfmt\.Println\(", "System.out.println(").statement(),
            Rule::new("fmt-printf", r"\bfmt\.Printf\(", "System.out.printf(").statement(),
            Rule::new("fmt-print", r"\bfmt\.Print\(", "System.out.print(").statement(),
            Rule::new("fmt-sprintf", r"\bfmt\.Sprintf\(", "String.format(").statement(),
            Rule::new(
                "fmt-errorf",
                r"\bfmt\.Errorf\((.*)\)",
                "new Exception(String.format($1))",
            )
            .statement(),
            Rule::new("errors-new", r"\berrors\.New\(", "new Exception(").statement(),
            Rule::new("len", r"\blen\(([\w.]+)\)", "$1.size()").statement(),
            // strings: receiver-style rewrites need a simple first argument
            Rule::new(
                "strings-contains",
                r"\bstrings\.Contains\(([\w.]+),\s*",
                "$1.contains(",
            )
            .statement(),
            Rule::new(
                "strings-has-prefix",
                r"\bstrings\.HasPrefix\(([\w.]+),\s*",
                "$1.startsWith(",
            )
            .statement(),
            Rule::new(
                "strings-has-suffix",
                r"\bstrings\.HasSuffix\(([\w.]+),\s*",
                "$1.endsWith(",
            )
            .statement(),
            Rule::new("strings-split", r"\bstrings\.Split\(([\w.]+),\s*", "$1.split(")
                .statement(),
            Rule::new(
                "strings-replace-all",
                r"\bstrings\.ReplaceAll\(([\w.]+),\s*",
                "$1.replace(",
            )
            .statement(),
            Rule::new(
                "strings-to-lower",
                r"\bstrings\.ToLower\(([\w.]+)\)",
                "$1.toLowerCase()",
            )
            .statement(),
            Rule::new(
                "strings-to-upper",
                r"\bstrings\.ToUpper\(([\w.]+)\)",
                "$1.toUpperCase()",
            )
            .statement(),
            Rule::new(
                "strings-trim-space",
                r"\bstrings\.TrimSpace\(([\w.]+)\)",
                "$1.trim()",
            )
            .statement(),
            Rule::new(
                "strings-join",
                r"\bstrings\.Join\(([\w.]+),\s*([^)]+)\)",
                "String.join($2, $1)",
            )
            .statement(),
            // strconv / time / os / panic
            Rule::new("strconv-atoi", r"\bstrconv\.Atoi\(", "Integer.parseInt(").statement(),
            Rule::new("strconv-itoa", r"\bstrconv\.Itoa\(", "String.valueOf(").statement(),
            Rule::new("time-now", r"\btime\.Now\(\)", "System.currentTimeMillis()").statement(),
            Rule::new("time-sleep", r"\btime\.Sleep\(", "Thread.sleep(").statement(),
            Rule::new("os-getenv", r"\bos\.Getenv\(", "System.getenv(").statement(),
            Rule::new("os-exit", r"\bos\.Exit\(", "System.exit(").statement(),
            Rule::new("panic", r"\bpanic\(", "throw new RuntimeException(").statement(),
            // Composite types before the bare names they contain
            Rule::new("byte-slice", r"\[\]byte\b", "byte[]"),
            Rule::new("string-slice", r"\[\]string\b", "String[]"),
            Rule::new("int-slice", r"\[\]int\b", "int[]"),
            Rule::new(
                "map-string-object",
                r"\bmap\[string\](?:interface\{\}|any\b)",
                "Map<String, Object>",
            ),
            Rule::new("map-string-string", r"\bmap\[string\]string\b", "Map<String, String>"),
            Rule::new("empty-interface", r"\binterface\{\}", "Object"),
            Rule::new("any", r"\bany\b", "Object"),
            // Primitives
            Rule::new("string", r"\bstring\b", "String"),
            Rule::new("int8", r"\bint8\b", "byte"),
            Rule::new("int16", r"\bint16\b", "short"),
            Rule::new("int32", r"\bint32\b", "int"),
            Rule::new("int64", r"\bint64\b", "long"),
            Rule::new("uint", r"\buint\b", "int"),
            Rule::new("uint8", r"\buint8\b", "byte"),
            Rule::new("uint16", r"\buint16\b", "short"),
            Rule::new("uint32", r"\buint32\b", "int"),
            Rule::new("uint64", r"\buint64\b", "long"),
            Rule::new("float32", r"\bfloat32\b", "float"),
            Rule::new("float64", r"\bfloat64\b", "double"),
            Rule::new("bool", r"\bbool\b", "boolean"),
            Rule::new("rune", r"\brune\b", "char"),
            Rule::new("error", r"\berror\b", "Exception"),
            // Literals
            Rule::new("nil", r"\bnil\b", "null"),
        ],
    )
});
