//! C++ declaration recognizers
//!
//! Anchored patterns over masked code. Callers only try them where a
//! declaration can appear (top level or directly inside a class body), so
//! statements inside function bodies never reach them.

use super::{DeclKind, DeclarationRecord, Param};
use crate::lexer::split_top_level;
use crate::rules::{cpp_java::CPP_TO_JAVA, static_regex, RuleContext};
use once_cell::sync::Lazy;
use regex::Regex;

static CLASS_HEADER: Lazy<Regex> = Lazy::new(|| {
    static_regex(
        r"^\s*(?:template\s*<[^>]*>\s*)?(class|struct)\s+(\w+)(?:\s+final)?(?:\s*:\s*(?:public|protected|private)?\s*(?:virtual\s+)?([\w:<>]+)[^{]*)?\s*(\{.*)?$",
    )
});

static ACCESS_LABEL: Lazy<Regex> =
    Lazy::new(|| static_regex(r"^\s*(public|private|protected)\s*:\s*$"));

static FUNCTION: Lazy<Regex> = Lazy::new(|| {
    static_regex(
        r"^\s*((?:(?:static|virtual|inline|explicit|constexpr|friend)\s+)*)((?:const\s+)?[\w:]+(?:<[\w:<>,\s\*&]*>)?[\s\*&]+?)(?:(\w+)::)?(\w+)\s*\(([^()]*)\)\s*(const)?\s*(?:noexcept)?\s*(?:override)?\s*(?:final)?\s*(\{.*|;|=\s*0\s*;|=\s*default\s*;|=\s*delete\s*;)\s*$",
    )
});

static CONSTRUCTOR: Lazy<Regex> = Lazy::new(|| {
    static_regex(
        r"^\s*(?:(?:explicit|inline|virtual)\s+)*(?:(\w+)::)?(~?)(\w+)\s*\(([^()]*)\)\s*(?::\s*(.*?))?\s*(?:noexcept\s*)?(\{.*|;|=\s*default\s*;|=\s*delete\s*;)\s*$",
    )
});

static INITIALIZER: Lazy<Regex> = Lazy::new(|| static_regex(r"^(\w+)\s*[({](.*)[)}]$"));

/// Words that can start a statement but never a return type
const NOT_A_TYPE: &[&str] = &[
    "return", "else", "new", "delete", "throw", "case", "goto", "using", "typedef", "namespace",
];

/// Names that look like calls but are statements
const NOT_A_NAME: &[&str] = &["if", "for", "while", "switch", "catch", "return", "sizeof"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
    Private,
}

impl Access {
    pub fn keyword(self) -> &'static str {
        match self {
            Access::Public => "public",
            Access::Protected => "protected",
            Access::Private => "private",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHeader {
    pub name: String,
    /// `struct` members default to public, `class` members to private
    pub is_struct: bool,
    pub base: Option<String>,
    pub opens_body: bool,
}

impl ClassHeader {
    pub fn default_access(&self) -> Access {
        if self.is_struct {
            Access::Public
        } else {
            Access::Private
        }
    }
}

/// How a function declaration ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `{` (possibly with statements after it)
    Opens,
    /// `;`
    Prototype,
    /// `= 0;`
    PureVirtual,
    /// `= default;` / `= delete;`
    Defaulted,
}

fn body_kind(tail: &str) -> BodyKind {
    let compact: String = tail.split_whitespace().collect();
    if compact.starts_with('{') {
        BodyKind::Opens
    } else if compact == "=0;" {
        BodyKind::PureVirtual
    } else if compact.starts_with('=') {
        BodyKind::Defaulted
    } else {
        BodyKind::Prototype
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionHeader {
    pub record: DeclarationRecord,
    pub is_static: bool,
    /// `Owner::name` definitions
    pub owner: Option<String>,
    pub body: BodyKind,
}

pub fn parse_class_header(code: &str) -> Option<ClassHeader> {
    let caps = CLASS_HEADER.captures(code)?;
    Some(ClassHeader {
        name: caps[2].to_string(),
        is_struct: &caps[1] == "struct",
        base: caps.get(3).map(|m| map_cpp_type(m.as_str())),
        opens_body: caps.get(4).is_some(),
    })
}

pub fn parse_access_label(code: &str) -> Option<Access> {
    let caps = ACCESS_LABEL.captures(code)?;
    match &caps[1] {
        "public" => Some(Access::Public),
        "protected" => Some(Access::Protected),
        _ => Some(Access::Private),
    }
}

/// A function or method declaration/definition with a return type
pub fn parse_function(code: &str) -> Option<FunctionHeader> {
    let caps = FUNCTION.captures(code)?;
    let ret = caps[2].trim();
    let name = &caps[4];
    let first_word = ret.split_whitespace().next().unwrap_or(ret);
    if NOT_A_TYPE.contains(&first_word) || NOT_A_NAME.contains(&name) || ret.contains("<<") {
        return None;
    }

    let owner = caps.get(3).map(|m| m.as_str().to_string());
    let kind = match name {
        "main" if owner.is_none() => DeclKind::EntryPoint,
        _ if owner.is_some() => DeclKind::Method,
        _ => DeclKind::Function,
    };
    let mut record = DeclarationRecord::new(kind, name);
    record.params = convert_cpp_params(&caps[5]);
    let ret = map_cpp_type(ret);
    if ret != "void" {
        record.returns.push(ret);
    }
    Some(FunctionHeader {
        record,
        is_static: caps[1].contains("static"),
        owner,
        body: body_kind(&caps[7]),
    })
}

/// A constructor or destructor of `class_name`, inside the class or as an
/// out-of-class `Class::Class(...)` definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorHeader {
    pub record: DeclarationRecord,
    pub destructor: bool,
    /// `name(value)` pairs from the initializer list
    pub initializers: Vec<(String, String)>,
    pub body: BodyKind,
}

pub fn parse_constructor(code: &str, class_name: Option<&str>) -> Option<ConstructorHeader> {
    let caps = CONSTRUCTOR.captures(code)?;
    let name = &caps[3];
    let owner = caps.get(1).map(|m| m.as_str());
    let belongs = match (owner, class_name) {
        (Some(owner), _) => owner == name,
        (None, Some(class)) => class == name,
        (None, None) => false,
    };
    if !belongs {
        return None;
    }

    let mut record = DeclarationRecord::new(DeclKind::Constructor, name);
    record.params = convert_cpp_params(&caps[4]);
    let initializers = caps
        .get(5)
        .map(|m| {
            split_top_level(m.as_str(), ',')
                .into_iter()
                .filter_map(|init| {
                    INITIALIZER
                        .captures(init)
                        .map(|c| (c[1].to_string(), c[2].trim().to_string()))
                })
                .collect()
        })
        .unwrap_or_default();
    Some(ConstructorHeader {
        record,
        destructor: !caps[2].is_empty(),
        initializers,
        body: body_kind(&caps[6]),
    })
}

/// Map a C++ type to Java through the declaration-safe rules
pub fn map_cpp_type(cpp: &str) -> String {
    let stripped: String = cpp.replace(['*', '&'], " ");
    let stripped = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    let stripped = stripped
        .strip_prefix("const ")
        .unwrap_or(&stripped)
        .trim()
        .to_string();
    CPP_TO_JAVA.apply_in(&stripped, RuleContext::Declaration)
}

/// `const std::string& name, int* p, int xs[]` → Java parameters
pub fn convert_cpp_params(raw: &str) -> Vec<Param> {
    let parts = split_top_level(raw, ',');
    if parts.len() == 1 && parts[0] == "void" {
        return Vec::new();
    }
    parts
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            // Default arguments have no Java equivalent
            let decl = split_top_level(part, '=').into_iter().next().unwrap_or(part);
            let (decl, array) = match decl.strip_suffix("[]") {
                Some(d) => (d.trim_end(), true),
                None => (decl, false),
            };
            let split_at = decl.rfind(|c: char| c.is_whitespace() || c == '*' || c == '&');
            let (ty, name) = match split_at {
                Some(pos) if is_name(&decl[pos + 1..]) => (&decl[..=pos], &decl[pos + 1..]),
                _ => (decl, ""),
            };
            let mut ty = map_cpp_type(ty);
            if array {
                ty.push_str("[]");
            }
            let name = if name.is_empty() {
                format!("arg{i}")
            } else {
                name.to_string()
            };
            Param::new(name, ty)
        })
        .collect()
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_alphanumeric() || c == '_')
        && !s.starts_with(|c: char| c.is_ascii_digit())
        && !matches!(s, "int" | "char" | "double" | "float" | "long" | "bool" | "short")
}
