//! Go declaration recognizers (pest grammar)
//!
//! Every function takes the masked code of one line (literals replaced by
//! placeholders, trailing comment removed) and returns `None` when the line
//! is not the declaration it looks for.

use crate::lexer::{mask_line, LexState};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "declarations/go_signature.pest"]
pub struct GoSignatureParser;

/// `func (r *T) name(params) results {`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuncHeader {
    /// Receiver text between the parentheses
    pub receiver: Option<String>,
    pub name: String,
    /// Parameter text between the parentheses
    pub params: String,
    /// Result text as written: a single type or a parenthesized list
    pub results: Option<String>,
    pub opens_body: bool,
    /// Statements written on the header line after `{`
    pub inline_body: Option<String>,
    pub closes_body: bool,
}

/// `Name(params) results` inside an interface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodSpec {
    pub name: String,
    pub params: String,
    pub results: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDecl {
    Struct { name: String, closed: bool },
    Interface { name: String, closed: bool },
    Alias { name: String, target: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// `a, b int`
    Named { names: Vec<String>, ty: String },
    /// `Base`, `*pkg.Base`
    Embedded(String),
}

/// `a, b int = 1, 2`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueSpec {
    pub names: Vec<String>,
    pub ty: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueDecl {
    /// `const (` / `var (`
    Group { constant: bool },
    Single { constant: bool, spec: ValueSpec },
}

fn parse_one(rule: Rule, code: &str) -> Option<Pair<'_, Rule>> {
    GoSignatureParser::parse(rule, code.trim()).ok()?.next()
}

/// Text between the parentheses of a `receiver`/`params` pair
fn paren_text(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .find(|p| p.as_rule() == Rule::paren_inner)
        .map(|p| p.as_str().trim().to_string())
        .unwrap_or_default()
}

fn ident_list(pair: Pair<Rule>) -> Vec<String> {
    pair.into_inner().map(|p| p.as_str().to_string()).collect()
}

pub fn parse_func_header(code: &str) -> Option<FuncHeader> {
    let decl = parse_one(Rule::func_decl, code)?;
    let mut header = FuncHeader::default();
    for part in decl.into_inner() {
        match part.as_rule() {
            Rule::receiver => header.receiver = Some(paren_text(part)),
            Rule::ident => header.name = part.as_str().to_string(),
            Rule::params => header.params = paren_text(part),
            Rule::results => header.results = Some(part.as_str().trim().to_string()),
            Rule::body => {
                header.opens_body = true;
                for inner in part.into_inner() {
                    match inner.as_rule() {
                        Rule::inline_body if !inner.as_str().trim().is_empty() => {
                            header.inline_body = Some(inner.as_str().trim().to_string())
                        }
                        Rule::body_close => header.closes_body = true,
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
    Some(header)
}

pub fn parse_method_spec(code: &str) -> Option<MethodSpec> {
    let decl = parse_one(Rule::method_spec, code)?;
    let mut spec = MethodSpec::default();
    for part in decl.into_inner() {
        match part.as_rule() {
            Rule::ident => spec.name = part.as_str().to_string(),
            Rule::params => spec.params = paren_text(part),
            Rule::results => spec.results = Some(part.as_str().trim().to_string()),
            _ => {}
        }
    }
    Some(spec)
}

pub fn parse_type_decl(code: &str) -> Option<TypeDecl> {
    let decl = parse_one(Rule::type_decl, code)?;
    let mut name = String::new();
    for part in decl.into_inner() {
        match part.as_rule() {
            Rule::ident => name = part.as_str().to_string(),
            Rule::struct_open => {
                let closed = part.into_inner().any(|p| p.as_rule() == Rule::closed_brace);
                return Some(TypeDecl::Struct { name, closed });
            }
            Rule::interface_open => {
                let closed = part.into_inner().any(|p| p.as_rule() == Rule::closed_brace);
                return Some(TypeDecl::Interface { name, closed });
            }
            Rule::alias => {
                let target = part
                    .into_inner()
                    .find(|p| p.as_rule() == Rule::type_expr)
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                return Some(TypeDecl::Alias { name, target });
            }
            _ => {}
        }
    }
    None
}

pub fn parse_field(code: &str) -> Option<FieldSpec> {
    if let Some(field) = parse_one(Rule::field, code) {
        let mut names = Vec::new();
        let mut ty = String::new();
        for part in field.into_inner() {
            match part.as_rule() {
                Rule::ident_list => names = ident_list(part),
                Rule::type_expr => ty = part.as_str().to_string(),
                _ => {}
            }
        }
        return Some(FieldSpec::Named { names, ty });
    }
    let embedded = parse_one(Rule::embedded_field, code)?;
    let name = embedded
        .into_inner()
        .find(|p| p.as_rule() == Rule::qualified_ident)?
        .as_str()
        .to_string();
    Some(FieldSpec::Embedded(name))
}

fn value_spec(pair: Pair<Rule>) -> ValueSpec {
    let mut spec = ValueSpec::default();
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::ident_list => spec.names = ident_list(part),
            Rule::type_expr => spec.ty = Some(part.as_str().to_string()),
            Rule::value => spec.value = Some(part.as_str().trim().to_string()),
            _ => {}
        }
    }
    spec
}

/// A line inside a `const (` / `var (` group
pub fn parse_spec_line(code: &str) -> Option<ValueSpec> {
    let line = parse_one(Rule::spec_line, code)?;
    line.into_inner()
        .find(|p| p.as_rule() == Rule::value_spec)
        .map(value_spec)
}

pub fn parse_value_decl(code: &str) -> Option<ValueDecl> {
    let decl = parse_one(Rule::value_decl, code)?;
    let mut constant = false;
    for part in decl.into_inner() {
        match part.as_rule() {
            Rule::kw_const => constant = true,
            Rule::kw_var => constant = false,
            Rule::group_open => return Some(ValueDecl::Group { constant }),
            Rule::value_spec => {
                return Some(ValueDecl::Single {
                    constant,
                    spec: value_spec(part),
                })
            }
            _ => {}
        }
    }
    None
}

/// Struct names declared anywhere in `lines` (receivers may precede their
/// type)
pub fn declared_structs<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut state = LexState::default();
    lines
        .into_iter()
        .map(|l| mask_line(l, &mut state))
        .filter(|m| m.code.trim_start().starts_with("type "))
        .filter_map(|m| match parse_type_decl(&m.code) {
            Some(TypeDecl::Struct { name, .. }) => Some(name),
            _ => None,
        })
        .collect()
}
