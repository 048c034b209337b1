//! Declaration translation - structural recognizers and skeleton emitters
//!
//! Recognizers turn one declaration header into a [`DeclarationRecord`];
//! the language-pair drivers decide where the emitted skeleton goes. Go
//! headers are parsed with a pest grammar ([`go`]), C++ and Java headers with
//! anchored patterns ([`cpp`], [`java`]).

pub mod cpp;
pub mod go;
pub mod java;

#[cfg(test)]
mod tests;

use crate::lexer::split_top_level;
use crate::rules::map_go_type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Function,
    Method,
    Constructor,
    EntryPoint,
    Initializer,
}

/// One parameter in target-language terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// `Type name`
    pub fn declaration(&self) -> String {
        format!("{} {}", self.ty, self.name)
    }
}

/// Go method receiver `(s *T)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    pub name: String,
    pub ty: String,
    pub pointer: bool,
}

impl Receiver {
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (name, ty) = match text.split_once(char::is_whitespace) {
            Some((name, ty)) => (name.trim(), ty.trim()),
            // Unnamed receiver: `(T)`
            None => ("", text),
        };
        if ty.is_empty() {
            return None;
        }
        let pointer = ty.starts_with('*');
        let ty = ty.trim_start_matches('*');
        // Generic receivers `(l *List[T])` name the base type
        let ty = ty.split('[').next().unwrap_or(ty).trim();
        Some(Self {
            name: name.to_string(),
            ty: ty.to_string(),
            pointer,
        })
    }
}

/// A recognized declaration, in target-language types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationRecord {
    pub kind: DeclKind,
    pub name: String,
    pub params: Vec<Param>,
    pub returns: Vec<String>,
    pub receiver: Option<Receiver>,
}

impl DeclarationRecord {
    pub fn new(kind: DeclKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            params: Vec::new(),
            returns: Vec::new(),
            receiver: None,
        }
    }

    /// Comma-separated `Type name` list
    pub fn param_list(&self) -> String {
        self.params
            .iter()
            .map(Param::declaration)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Single target return type. A multi-value return keeps its first type
    /// and reports the rest as dropped.
    pub fn return_type(&self) -> ReturnType {
        reduce_returns(&self.returns)
    }

    /// Build from a parsed Go function header
    pub fn from_go_func(header: &go::FuncHeader) -> Self {
        let receiver = header.receiver.as_deref().and_then(Receiver::parse);
        let kind = match (&receiver, header.name.as_str()) {
            (Some(_), _) => DeclKind::Method,
            (None, "main") if header.params.is_empty() => DeclKind::EntryPoint,
            (None, "init") if header.params.is_empty() => DeclKind::Initializer,
            _ => DeclKind::Function,
        };
        Self {
            kind,
            name: header.name.clone(),
            params: convert_go_params(&header.params),
            returns: go_return_types(header.results.as_deref()),
            receiver,
        }
    }

    /// Build from a Go interface method spec
    pub fn from_go_method_spec(spec: &go::MethodSpec) -> Self {
        Self {
            kind: DeclKind::Method,
            name: spec.name.clone(),
            params: convert_go_params(&spec.params),
            returns: go_return_types(spec.results.as_deref()),
            receiver: None,
        }
    }
}

/// Return type after reduction to a single value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnType {
    pub ty: String,
    /// Types dropped from a multi-value return
    pub dropped: Vec<String>,
}

impl ReturnType {
    pub fn is_lossy(&self) -> bool {
        !self.dropped.is_empty()
    }
}

/// No value → `void`; one → itself; several → the first, others dropped
pub fn reduce_returns(returns: &[String]) -> ReturnType {
    match returns {
        [] => ReturnType {
            ty: "void".to_string(),
            dropped: Vec::new(),
        },
        [first, rest @ ..] => ReturnType {
            ty: first.clone(),
            dropped: rest.to_vec(),
        },
    }
}

/// Convert a Go parameter list to typed Java parameters.
///
/// Parts are scanned right to left so a name without a type inherits the
/// type declared after it: `a, b int, s string` → `int a, int b, String s`.
/// A list made only of types (`int, string`) gets generated names.
pub fn convert_go_params(raw: &str) -> Vec<Param> {
    let parts = split_top_level(raw, ',');
    if parts.is_empty() {
        return Vec::new();
    }

    // Go lists are all named or all unnamed: bare names alone must be types
    if parts.iter().all(|p| split_name_type(p).is_none()) {
        return parts
            .iter()
            .enumerate()
            .map(|(i, ty)| Param::new(format!("arg{i}"), map_go_type(ty)))
            .collect();
    }

    let mut params = Vec::with_capacity(parts.len());
    let mut last_type = "Object".to_string();
    for part in parts.iter().rev() {
        match split_name_type(part) {
            Some((name, ty)) => {
                last_type = map_go_type(ty);
                params.push(Param::new(name, last_type.clone()));
            }
            None => params.push(Param::new(*part, last_type.clone())),
        }
    }
    params.reverse();
    params
}

/// `name type` → (`name`, `type`); `None` for a bare name or bare type
fn split_name_type(part: &str) -> Option<(&str, &str)> {
    let part = part.trim();
    let (name, ty) = part.split_once(char::is_whitespace)?;
    if !is_plain_ident(name) || matches!(name, "chan" | "func" | "map" | "struct" | "interface") {
        return None;
    }
    Some((name, ty.trim()))
}

/// `int x, *y = 0;` becomes `["int x;", "int *y = 0;"]`. Lines that are not
/// a multi-name declaration come back whole.
pub fn split_declarators(code: &str) -> Vec<String> {
    let whole = || vec![code.to_string()];
    let Some(body) = code.trim().strip_suffix(';') else {
        return whole();
    };
    if body.starts_with("typedef ") || body.starts_with("using ") {
        return whole();
    }
    let parts = split_top_level(body, ',');
    let [first, rest @ ..] = parts.as_slice() else {
        return whole();
    };
    let first = *first;
    if rest.is_empty() {
        return whole();
    }
    let mut decl = split_top_level(first, '=').into_iter().next().unwrap_or(first);
    // `a[3][4]`
    while decl.ends_with(']') {
        match decl.rfind('[') {
            Some(open) => decl = decl[..open].trim_end(),
            None => return whole(),
        }
    }
    let sigil = |c: char| c.is_whitespace() || c == '*' || c == '&';
    let Some(pos) = decl.rfind(sigil) else {
        return whole();
    };
    if !is_plain_ident(&decl[pos + 1..]) {
        return whole();
    }
    let base = decl[..=pos].trim_end_matches(sigil);
    if base.is_empty() {
        return whole();
    }
    let first_declarator = first[base.len()..].trim();
    std::iter::once(first_declarator)
        .chain(rest.iter().copied())
        .map(|d| format!("{base} {d};"))
        .collect()
}

fn is_plain_ident(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Java types of a Go result list (`int`, `(int, error)`, `(n int, err error)`)
pub fn go_return_types(results: Option<&str>) -> Vec<String> {
    let Some(raw) = results.map(str::trim).filter(|r| !r.is_empty()) else {
        return Vec::new();
    };
    match raw.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        Some(inner) => convert_go_params(inner).into_iter().map(|p| p.ty).collect(),
        None => vec![map_go_type(raw)],
    }
}

/// Java method header text (without modifiers) for a record
pub fn java_signature(record: &DeclarationRecord) -> String {
    format!(
        "{} {}({})",
        record.return_type().ty,
        record.name,
        record.param_list()
    )
}
