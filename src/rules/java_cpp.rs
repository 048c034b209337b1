//! Java → C++ rule tables

use super::{Rule, RuleSet};
use crate::lexer::split_top_level;
use once_cell::sync::Lazy;
use regex::Captures;

fn type_rules() -> Vec<Rule> {
    vec![
        // Collections (one level; more specific names first)
        Rule::new("array-list", r"\bArrayList<(.+?)>", "std::vector<$1>"),
        Rule::new("linked-list", r"\bLinkedList<(.+?)>", "std::list<$1>"),
        Rule::new("list", r"\bList<(.+?)>", "std::vector<$1>"),
        Rule::new("array-deque", r"\b(?:ArrayDeque|Deque)<(.+?)>", "std::deque<$1>"),
        Rule::new("hash-map", r"\bHashMap<(.+?),\s*(.+?)>", "std::unordered_map<$1, $2>"),
        Rule::new("tree-map", r"\b(?:TreeMap|Map)<(.+?),\s*(.+?)>", "std::map<$1, $2>"),
        Rule::new("hash-set", r"\bHashSet<(.+?)>", "std::unordered_set<$1>"),
        Rule::new("tree-set", r"\b(?:TreeSet|Set)<(.+?)>", "std::set<$1>"),
        Rule::new("optional", r"\bOptional<(.+?)>", "std::optional<$1>"),
        // Primitive and boxed types
        Rule::new("string", r"\bString\b", "std::string"),
        Rule::new("boolean", r"\b(?:boolean|Boolean)\b", "bool"),
        Rule::new("final", r"\bfinal\b", "const"),
        Rule::new("integer", r"\bInteger\b", "int"),
        Rule::new("long", r"\bLong\b", "long"),
        Rule::new("double", r"\bDouble\b", "double"),
        Rule::new("float", r"\bFloat\b", "float"),
        Rule::new("short", r"\bShort\b", "short"),
        Rule::new("character", r"\bCharacter\b", "char"),
        Rule::new("byte", r"\b(?:byte|Byte)\b", "uint8_t"),
        Rule::new("object", r"\bObject\b", "void*"),
        Rule::new("null", r"\bnull\b", "nullptr"),
    ]
}

/// Types only: used for declarations and for element types inside
/// allocation rewrites.
pub static JAVA_TYPES_TO_CPP: Lazy<RuleSet> =
    Lazy::new(|| RuleSet::new("java-cpp-types", type_rules()));

fn map_type(java: &str) -> String {
    JAVA_TYPES_TO_CPP.apply(java.trim())
}

/// `List<Integer> xs = new ArrayList<>();` → `std::vector<int> xs;`
fn collection_declaration(c: &Captures) -> String {
    let declared = format!("{}<{}>", &c[2], &c[3]);
    format!("{}{} {};", &c[1], map_type(&declared), &c[4])
}

/// `int[] xs = new int[n];` → `std::vector<int> xs(n);`
fn array_declaration(c: &Captures) -> String {
    format!("{}std::vector<{}> {}({});", &c[1], map_type(&c[2]), &c[3], c[4].trim())
}

/// `Foo f = new Foo(a);` → `auto f = std::make_shared<Foo>(a);`
fn object_declaration(c: &Captures) -> String {
    format!(
        "{}auto {} = std::make_shared<{}>({});",
        &c[1],
        &c[2],
        map_type(&c[3]),
        &c[4]
    )
}

/// Library types keep their declared (mapped) type; user classes become `auto`
fn user_local(c: &Captures) -> String {
    const LIBRARY: &[&str] = &[
        "String", "Integer", "Long", "Double", "Float", "Boolean", "Character", "Short", "Byte",
        "Object",
    ];
    if LIBRARY.contains(&&c[2]) {
        c[0].to_string()
    } else {
        format!("{}auto {} =", &c[1], &c[3])
    }
}

fn make_shared_expr(c: &Captures) -> String {
    format!("std::make_shared<{}>(", map_type(&c[1]))
}

/// Operands joined with `+` print as a stream chain when any operand is a
/// string literal (masked literals start with U+E000).
fn stream_operands(args: &str) -> String {
    let parts = split_top_level(args, '+');
    if parts.len() > 1 && parts.iter().any(|p| p.starts_with('\u{E000}') || p.starts_with('"')) {
        parts.join(" << ")
    } else {
        args.trim().to_string()
    }
}

fn println_out(c: &Captures) -> String {
    if c[1].trim().is_empty() {
        return "std::cout << std::endl".to_string();
    }
    format!("std::cout << {} << std::endl", stream_operands(&c[1]))
}

fn print_out(c: &Captures) -> String {
    format!("std::cout << {}", stream_operands(&c[1]))
}

fn println_err(c: &Captures) -> String {
    format!("std::cerr << {} << std::endl", stream_operands(&c[1]))
}

/// Ordered Java → C++ statement rules.
///
/// Exceptions and allocations come first: they capture class names that the
/// type rules would otherwise rewrite out from under them.
pub static JAVA_TO_CPP: Lazy<RuleSet> = Lazy::new(|| {
    let mut rules = vec![
        Rule::new(
            "throw-new",
            r"\bthrow\s+new\s+[\w.]+\((.*)\)",
            "throw std::runtime_error($1)",
        )
        .statement(),
        Rule::new(
            "catch",
            r"\bcatch\s*\(\s*(?:final\s+)?[\w.]+(?:\s*\|\s*[\w.]+)*\s+(\w+)\s*\)",
            "catch (const std::exception& $1)",
        )
        .statement(),
        Rule::with(
            "collection-construction",
            r"^(\s*)(?:final\s+)?((?:Array|Linked)?List|(?:Hash|Tree)?(?:Map|Set)|(?:Array)?Deque)<(.+)>\s+(\w+)\s*=\s*new\s+\w+<.*>\(\s*\)\s*;",
            collection_declaration,
        )
        .statement(),
        Rule::with(
            "array-construction",
            r"^(\s*)(?:final\s+)?(\w+)\[\]\s+(\w+)\s*=\s*new\s+\w+\[(.+)\]\s*;",
            array_declaration,
        )
        .statement(),
        Rule::with(
            "object-construction",
            r"^(\s*)(?:final\s+)?[A-Z][\w.]*(?:<.*>)?\s+(\w+)\s*=\s*new\s+([\w.]+)(?:<.*>)?\((.*)\)\s*;",
            object_declaration,
        )
        .statement(),
        Rule::with("new-expression", r"\bnew\s+([\w.]+)(?:<[^>]*>)?\(", make_shared_expr)
            .statement(),
        // Console and library idioms, before `String`/`Integer` are rewritten
        Rule::with("println", r"\bSystem\.out\.println\((.*)\)", println_out).statement(),
        Rule::with("print", r"\bSystem\.out\.print\((.*)\)", print_out).statement(),
        Rule::with("eprintln", r"\bSystem\.err\.println\((.*)\)", println_err).statement(),
        Rule::new("printf", r"\bSystem\.out\.printf\(", "printf(").statement(),
        Rule::new("parse-int", r"\bInteger\.parseInt\(", "std::stoi(").statement(),
        Rule::new("parse-double", r"\bDouble\.parseDouble\(", "std::stod(").statement(),
        Rule::new("value-of", r"\bString\.valueOf\(", "std::to_string(").statement(),
        Rule::new("math", r"\bMath\.(\w+)\(", "std::$1(").statement(),
        Rule::new("system-exit", r"\bSystem\.exit\(", "std::exit(").statement(),
        // Collection and string methods
        Rule::new(
            "enhanced-for",
            r"\bfor\s*\(\s*(?:final\s+)?[\w.<>,\[\] ]+?\s+(\w+)\s*:\s*",
            "for (auto& $1 : ",
        )
        .statement(),
        Rule::with(
            "user-local",
            r"^(\s*)(?:final\s+)?([A-Z]\w*)\s+(\w+)\s*=",
            user_local,
        )
        .statement(),
        Rule::new("put", r"\b([\w.]+)\.put\(([^,()]+),\s*(.+)\)", "$1[$2] = $3").statement(),
        Rule::new("get", r"\.get\(([^()]*)\)", "[$1]").statement(),
        Rule::new("add", r"\.add\(", ".push_back(").statement(),
        Rule::new("is-empty", r"\.isEmpty\(\)", ".empty()").statement(),
        Rule::new("contains-key", r"\.containsKey\(", ".count(").statement(),
        Rule::new("equals", r"\b([\w.]+)\.equals\(([^()]*)\)", "$1 == $2").statement(),
        Rule::new("array-length", r"\.length\b([^(]|$)", ".size()$1").statement(),
        Rule::new("this", r"\bthis\.", "this->").statement(),
        // Entry point and compilation-unit lines
        Rule::new(
            "main",
            r"\bpublic\s+static\s+void\s+main\s*\(\s*(?:final\s+)?String\s*(?:\[\]\s*\w+|\.\.\.\s*\w+|\w+\s*\[\])\s*\)",
            "int main(int argc, char* argv[])",
        ),
        Rule::new(
            "package-import",
            r"^\s*(?:package|import)\s+(?:static\s+)?[\w.*]+\s*;\s*$",
            "",
        ),
    ];
    rules.extend(type_rules());
    RuleSet::new("java-cpp", rules)
});
