//! Java declaration recognizers and Java → C++ type conversion

use super::{DeclKind, DeclarationRecord, Param};
use crate::lexer::split_top_level;
use crate::rules::{java_cpp::JAVA_TYPES_TO_CPP, static_regex, RuleContext};
use once_cell::sync::Lazy;
use regex::Regex;

static TYPE_HEADER: Lazy<Regex> = Lazy::new(|| {
    static_regex(
        r"^\s*((?:(?:public|protected|private|abstract|final|static|sealed|strictfp)\s+)*)(class|interface|enum|record)\s+(\w+)(?:<[^{]*?>)?(?:\s*\([^)]*\))?(?:\s+extends\s+([\w.<>, ]+?))?(?:\s+implements\s+([\w.<>, ]+?))?\s*(\{.*)?$",
    )
});

static FIELD: Lazy<Regex> = Lazy::new(|| {
    static_regex(
        r"^\s*((?:(?:public|protected|private|static|final|transient|volatile)\s+)*)([\w.]+(?:<.*>)?(?:\[\])*)\s+(\w+)\s*(?:=\s*(.+?))?\s*;\s*$",
    )
});

static METHOD: Lazy<Regex> = Lazy::new(|| {
    static_regex(
        r"^\s*((?:(?:public|protected|private|static|final|abstract|synchronized|native|default)\s+)*)(?:<[^>]+>\s+)?([\w.]+(?:<.*>)?(?:\[\])*)\s+(\w+)\s*\(([^)]*)\)\s*(?:throws\s+[\w.,\s]+?)?\s*(\{.*|;)\s*$",
    )
});

static CONSTRUCTOR: Lazy<Regex> = Lazy::new(|| {
    static_regex(
        r"^\s*((?:(?:public|protected|private)\s+)*)(\w+)\s*\(([^)]*)\)\s*(?:throws\s+[\w.,\s]+?)?\s*(\{.*)$",
    )
});

static ANNOTATION: Lazy<Regex> = Lazy::new(|| static_regex(r"@\w+(?:\([^)]*\))?\s*"));

/// Statement keywords that can look like a return type
const STATEMENT_WORDS: &[&str] = &["return", "new", "throw", "else", "case", "yield"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JavaTypeKind {
    Class,
    Interface,
    Enum,
    Record,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHeader {
    pub kind: JavaTypeKind,
    pub name: String,
    pub modifiers: Vec<String>,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub opens_body: bool,
}

impl TypeHeader {
    pub fn is_abstract(&self) -> bool {
        self.modifiers.iter().any(|m| m == "abstract")
    }
}

/// Modifier words of a member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers(pub Vec<String>);

impl Modifiers {
    fn parse(text: &str) -> Self {
        Self(text.split_whitespace().map(str::to_string).collect())
    }

    pub fn has(&self, word: &str) -> bool {
        self.0.iter().any(|m| m == word)
    }

    /// C++ section the member goes into. Package-private maps to public,
    /// matching how same-package callers use it.
    pub fn visibility(&self) -> &'static str {
        if self.has("private") {
            "private"
        } else if self.has("protected") {
            "protected"
        } else {
            "public"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Field {
        modifiers: Modifiers,
        ty: String,
        name: String,
        init: Option<String>,
    },
    Method {
        modifiers: Modifiers,
        record: DeclarationRecord,
        /// `;` instead of a body (interfaces, abstract methods)
        is_abstract: bool,
    },
    Constructor {
        modifiers: Modifiers,
        record: DeclarationRecord,
    },
}

pub fn parse_type_header(code: &str) -> Option<TypeHeader> {
    let caps = TYPE_HEADER.captures(code)?;
    let kind = match &caps[2] {
        "interface" => JavaTypeKind::Interface,
        "enum" => JavaTypeKind::Enum,
        "record" => JavaTypeKind::Record,
        _ => JavaTypeKind::Class,
    };
    Some(TypeHeader {
        kind,
        name: caps[3].to_string(),
        modifiers: Modifiers::parse(&caps[1]).0,
        extends: caps.get(4).map(|m| m.as_str().trim().to_string()),
        implements: caps
            .get(5)
            .map(|m| {
                split_top_level(m.as_str(), ',')
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        opens_body: caps.get(6).is_some(),
    })
}

/// A member declaration directly inside the body of `class_name`
pub fn parse_member(code: &str, class_name: &str) -> Option<Member> {
    let code = ANNOTATION.replace_all(code, "");
    let code = code.as_ref();

    if let Some(caps) = CONSTRUCTOR.captures(code) {
        if &caps[2] == class_name {
            let mut record = DeclarationRecord::new(DeclKind::Constructor, class_name);
            record.params = convert_java_params(&caps[3]);
            return Some(Member::Constructor {
                modifiers: Modifiers::parse(&caps[1]),
                record,
            });
        }
    }

    if let Some(caps) = METHOD.captures(code) {
        let ret = &caps[2];
        if STATEMENT_WORDS.contains(&ret) {
            return None;
        }
        let modifiers = Modifiers::parse(&caps[1]);
        let name = &caps[3];
        let kind = if name == "main" && modifiers.has("static") {
            DeclKind::EntryPoint
        } else {
            DeclKind::Method
        };
        let mut record = DeclarationRecord::new(kind, name);
        record.params = convert_java_params(&caps[4]);
        let ret = java_type_to_cpp(ret);
        if ret != "void" {
            record.returns.push(ret);
        }
        return Some(Member::Method {
            modifiers,
            record,
            is_abstract: caps[5].starts_with(';'),
        });
    }

    let caps = FIELD.captures(code)?;
    if STATEMENT_WORDS.contains(&&caps[2]) {
        return None;
    }
    Some(Member::Field {
        modifiers: Modifiers::parse(&caps[1]),
        ty: java_type_to_cpp(&caps[2]),
        name: caps[3].to_string(),
        init: caps.get(4).map(|m| m.as_str().to_string()),
    })
}

/// Map a Java type to C++. Arrays and varargs become `std::vector`, and
/// user classes are held through `std::shared_ptr`.
pub fn java_type_to_cpp(java: &str) -> String {
    let t = java.trim();
    let t = t.strip_prefix("final ").unwrap_or(t).trim();
    if let Some(inner) = t.strip_suffix("...").or_else(|| t.strip_suffix("[]")) {
        return format!("std::vector<{}>", java_type_to_cpp(inner));
    }
    let mapped = JAVA_TYPES_TO_CPP.apply_in(t, RuleContext::Declaration);
    if is_user_class(&mapped) {
        format!("std::shared_ptr<{mapped}>")
    } else {
        mapped
    }
}

fn is_user_class(t: &str) -> bool {
    let mut chars = t.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && t.len() > 1
        && t.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// `final String name, int... xs` → C++ parameters
pub fn convert_java_params(raw: &str) -> Vec<Param> {
    split_top_level(raw, ',')
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            let part = ANNOTATION.replace_all(part, "");
            let part = part.trim();
            let part = part.strip_prefix("final ").unwrap_or(part).trim();
            match part.rsplit_once(char::is_whitespace) {
                Some((ty, name)) => Param::new(name, java_type_to_cpp(ty)),
                None => Param::new(format!("arg{i}"), java_type_to_cpp(part)),
            }
        })
        .collect()
}
