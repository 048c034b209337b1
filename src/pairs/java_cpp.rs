//! Java → C++
//!
//! Every Java file yields a header with the class declarations and a source
//! file with the member definitions. Nested types stay inline in the header;
//! their members are defined with qualified names (`Outer::Inner::m`).

use super::{
    Language, LanguagePair, OutputFile, Route, SourceUnit, TranslationStats, UnitTranslation,
};
use crate::declarations::java::{self as decl, JavaTypeKind, Member, Modifiers, TypeHeader};
use crate::declarations::{split_declarators, DeclKind, DeclarationRecord};
use crate::diagnostics::{codes, info_diag, warning_diag, Diagnostics};
use crate::emitter::{CodeWriter, Target};
use crate::lexer::{mask_line, LexState, MaskedLine};
use crate::path_map::PathMapper;
use crate::rules::java_cpp::JAVA_TO_CPP;
use crate::scope::{Observed, ScopeKind, ScopeTracker};
use crate::statements::java as stmt;
use crate::unsupported_features::UnsupportedConstructGuard;

const PHASE: &str = "java-cpp";

/// Standard headers every translated header pulls in
const STD_INCLUDES: &[&str] = &[
    "#include <iostream>",
    "#include <map>",
    "#include <memory>",
    "#include <stdexcept>",
    "#include <string>",
    "#include <vector>",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaToCpp;

impl LanguagePair for JavaToCpp {
    fn name(&self) -> &'static str {
        "java-cpp"
    }

    fn source(&self) -> Language {
        Language::Java
    }

    fn target(&self) -> Language {
        Language::Cpp
    }

    fn translate(
        &self,
        unit: &SourceUnit<'_>,
        mapper: &PathMapper,
        guard: &UnsupportedConstructGuard,
    ) -> UnitTranslation {
        let target = mapper.cpp_target(unit.rel_path);
        let mut file = JavaFile::new(guard);
        for (index, line) in unit.lines().enumerate() {
            file.line(index + 1, line);
        }
        for scope in file.tracker.finish() {
            file.diagnostics.add(warning_diag(
                codes::UNCLOSED_SCOPE,
                format!("{:?} {} is never closed", scope.kind, scope.name),
                scope.open_line,
                PHASE,
            ));
        }

        let guard_name = format!("{}_H", include_guard(&target.stem));
        let mut header = CodeWriter::new();
        header.line(&format!("#ifndef {guard_name}"));
        header.line(&format!("#define {guard_name}"));
        header.blank();
        for include in STD_INCLUDES {
            header.line(include);
        }
        header.blank();
        header.line(&format!("// Translated from Java: {}", unit.rel_path.display()));
        header.blank();
        header.append(file.header);
        header.blank();
        header.line(&format!("#endif // {guard_name}"));

        let mut source = CodeWriter::new();
        source.line(&format!("#include \"{}.h\"", target.stem));
        if !file.statics.is_empty() {
            source.blank();
            for line in &file.statics {
                source.line(line);
            }
        }
        if !file.source.is_empty() {
            source.blank();
            source.append(file.source);
        }

        let mut stats = file.stats;
        stats.files_converted = 1;
        let mut diagnostics = file.diagnostics;
        diagnostics.set_file(unit.rel_path);
        UnitTranslation {
            outputs: vec![
                OutputFile {
                    path: target.header,
                    contents: header.finish(),
                },
                OutputFile {
                    path: target.source,
                    contents: source.finish(),
                },
            ],
            stats,
            diagnostics,
        }
    }
}

/// `bank_account` → `BANK_ACCOUNT`
fn include_guard(stem: &str) -> String {
    stem.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[derive(Debug)]
struct JavaClass {
    name: String,
    kind: JavaTypeKind,
    /// Header level of the `class X {` line
    level: usize,
    /// Visibility label currently in effect
    section: Option<&'static str>,
}

struct JavaFile<'g> {
    guard: &'g UnsupportedConstructGuard,
    tracker: ScopeTracker,
    lex: LexState,
    header: CodeWriter,
    source: CodeWriter,
    /// Out-of-class definitions of static fields
    statics: Vec<String>,
    classes: Vec<JavaClass>,
    /// Indentation of the method body being written to the source
    body: Route,
    stats: TranslationStats,
    diagnostics: Diagnostics,
}

impl<'g> JavaFile<'g> {
    fn new(guard: &'g UnsupportedConstructGuard) -> Self {
        Self {
            guard,
            tracker: ScopeTracker::new(),
            lex: LexState::default(),
            header: CodeWriter::new(),
            source: CodeWriter::new(),
            statics: Vec::new(),
            classes: Vec::new(),
            body: Route::new(Target::File, 0, 0),
            stats: TranslationStats::default(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// `Outer::Inner` for the innermost class
    fn qualified_name(&self) -> String {
        self.classes
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join("::")
    }

    fn member_level(&self) -> usize {
        self.classes.last().map(|c| c.level + 1).unwrap_or(0)
    }

    fn line(&mut self, line_no: usize, raw: &str) {
        let before = self.lex;
        let masked = mask_line(raw, &mut self.lex);
        let code = masked.code.trim().to_string();
        let in_body = self.tracker.state() == ScopeKind::Function;

        if code.is_empty() || masked.is_comment_only() {
            let text = masked.restore_with_comment(&code);
            let observed = self.tracker.observe(raw);
            if in_body {
                self.source.line_at(self.body.level(&observed), &text);
            } else if text.is_empty() && self.classes.is_empty() {
                // blank lines between package, imports and the type
            } else {
                let level = self.member_level();
                self.header.line_at(level, &text);
            }
            return;
        }

        if code == "{" && self.tracker.current().is_some_and(|s| !s.opened) {
            self.tracker.observe(raw);
            return;
        }

        if in_body {
            self.body_line(line_no, &code, &masked, raw, &before);
            return;
        }

        let enum_body = self
            .classes
            .last()
            .is_some_and(|c| c.kind == JavaTypeKind::Enum);
        match self.tracker.state() {
            ScopeKind::TopLevel => self.top_level(line_no, &code, &masked, raw),
            ScopeKind::Struct if enum_body => self.enum_line(&code, &masked, raw),
            ScopeKind::Struct if self.tracker.at_body_level() => {
                self.class_member(line_no, &code, &masked, raw)
            }
            _ => {
                // nested block outside a method (initializer expressions)
                let observed = self.tracker.observe(raw);
                let level = self.member_level() + 1;
                self.header.line_at(level, &format!("// {}", masked.restore(&code)));
                self.close_classes(&observed);
            }
        }
    }

    fn top_level(&mut self, line_no: usize, code: &str, masked: &MaskedLine, raw: &str) {
        if code.starts_with("package ") || code.starts_with("import ") || code.starts_with('@') {
            self.tracker.observe(raw);
            return;
        }
        match decl::parse_type_header(code) {
            Some(header) => self.type_header(line_no, &header, masked, raw),
            None => {
                let observed = self.tracker.observe(raw);
                self.header
                    .line_at(0, &format!("// {}", masked.restore_with_comment(code)));
                self.close_classes(&observed);
            }
        }
    }

    fn type_header(&mut self, line_no: usize, header: &TypeHeader, masked: &MaskedLine, raw: &str) {
        self.stats.classes_found += 1;
        let level = self.member_level();
        if let Some(parent) = self.classes.last() {
            // a nested type needs a section of its own visibility
            let visibility = Modifiers(header.modifiers.clone()).visibility();
            if parent.section != Some(visibility) {
                self.header.line_at(parent.level, &format!("{visibility}:"));
                if let Some(parent) = self.classes.last_mut() {
                    parent.section = Some(visibility);
                }
            }
        }

        let observed = self.tracker.enter(ScopeKind::Struct, &header.name, line_no, raw);
        let closed = !observed.closed.is_empty();

        if header.kind == JavaTypeKind::Enum {
            let text = match (closed, enum_constants(masked, raw)) {
                (true, Some(constants)) => format!("enum class {} {{ {constants} }};", header.name),
                _ => format!("enum class {} {{", header.name),
            };
            self.header.line_at(level, &text);
        } else {
            let bases: Vec<String> = header
                .extends
                .iter()
                .chain(header.implements.iter())
                .map(|b| format!("public {}", strip_generics(b)))
                .collect();
            let mut text = format!("class {}", header.name);
            if !bases.is_empty() {
                text.push_str(&format!(" : {}", bases.join(", ")));
            }
            text.push_str(if closed { " {};" } else { " {" });
            self.header.line_at(level, &text);
        }
        if closed {
            return;
        }

        let mut class = JavaClass {
            name: header.name.clone(),
            kind: header.kind,
            level,
            section: None,
        };
        if header.kind == JavaTypeKind::Interface || header.is_abstract() {
            self.header.line_at(level, "public:");
            self.header
                .line_at(level + 1, &format!("virtual ~{}() = default;", header.name));
            class.section = Some("public");
        }
        self.classes.push(class);
    }

    fn enum_line(&mut self, code: &str, masked: &MaskedLine, raw: &str) {
        let observed = self.tracker.observe(raw);
        if self.close_classes(&observed) {
            return;
        }
        let level = self.member_level();
        let text = if self.tracker.depth() == observed.depth_before && !code.contains('(') {
            masked.restore_with_comment(code.trim_end_matches(';').trim_end())
        } else {
            format!("// {}", masked.restore_with_comment(code))
        };
        self.header.line_at(level, &text);
    }

    fn class_member(&mut self, line_no: usize, code: &str, masked: &MaskedLine, raw: &str) {
        if code.starts_with('}') {
            let observed = self.tracker.observe(raw);
            self.close_classes(&observed);
            return;
        }
        if code.starts_with('@') && !code.contains(' ') {
            self.tracker.observe(raw);
            return;
        }
        if let Some(header) = decl::parse_type_header(code) {
            self.type_header(line_no, &header, masked, raw);
            return;
        }
        if code == "static {" {
            self.static_initializer(line_no, raw);
            return;
        }

        let class_name = self.classes.last().map(|c| c.name.clone()).unwrap_or_default();
        // `int a, b;` is one C++ member per name
        let pieces = split_declarators(code);
        if pieces.len() > 1 {
            let fields: Option<Vec<Member>> = pieces
                .iter()
                .map(|p| {
                    decl::parse_member(p, &class_name)
                        .filter(|m| matches!(m, Member::Field { .. }))
                })
                .collect();
            if let Some(fields) = fields {
                for (piece, field) in pieces.iter().zip(fields) {
                    if let Member::Field {
                        modifiers,
                        ty,
                        name,
                        init,
                    } = field
                    {
                        self.field(&modifiers, &ty, &name, init.as_deref(), piece, masked, raw);
                    }
                }
                return;
            }
        }
        match decl::parse_member(code, &class_name) {
            Some(Member::Field {
                modifiers,
                ty,
                name,
                init,
            }) => self.field(&modifiers, &ty, &name, init.as_deref(), code, masked, raw),
            Some(Member::Method {
                modifiers,
                record,
                is_abstract,
            }) => self.method(line_no, &modifiers, &record, is_abstract, code, masked, raw),
            Some(Member::Constructor { modifiers, record }) => {
                self.constructor(line_no, &modifiers, &record, code, masked, raw)
            }
            None => {
                self.tracker.observe(raw);
                let level = self.member_level();
                self.header
                    .line_at(level, &format!("// {}", masked.restore_with_comment(code)));
            }
        }
    }

    /// Emit `public:` / `private:` when the visibility changes
    fn section(&mut self, visibility: &'static str) {
        let Some(class) = self.classes.last_mut() else {
            return;
        };
        if class.section != Some(visibility) {
            class.section = Some(visibility);
            let level = class.level;
            self.header.line_at(level, &format!("{visibility}:"));
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn field(
        &mut self,
        modifiers: &Modifiers,
        ty: &str,
        name: &str,
        init: Option<&str>,
        code: &str,
        masked: &MaskedLine,
        raw: &str,
    ) {
        self.tracker.observe(raw);
        self.section(modifiers.visibility());
        let constant = if modifiers.has("final") { "const " } else { "" };

        let declaration = if modifiers.has("static") {
            let qualified = self.qualified_name();
            let definition = match init {
                Some(init) => format!("{constant}{ty} {qualified}::{name} = {};", JAVA_TO_CPP.apply(init)),
                None => format!("{constant}{ty} {qualified}::{name};"),
            };
            self.statics.push(masked.restore(&definition));
            format!("static {constant}{ty} {name};")
        } else if init.is_some() {
            // the rule table knows collection and object construction
            let translated = stmt::translate(strip_modifiers(code)).code;
            let translated = translated
                .strip_prefix("auto ")
                .map(|rest| format!("{ty} {rest}"))
                .unwrap_or(translated);
            format!("{constant}{translated}")
        } else {
            format!("{ty} {name};")
        };

        let level = self.member_level();
        self.header
            .line_at(level, &masked.restore_with_comment(&declaration));
    }

    #[allow(clippy::too_many_arguments)]
    fn method(
        &mut self,
        line_no: usize,
        modifiers: &Modifiers,
        record: &DeclarationRecord,
        is_abstract: bool,
        code: &str,
        masked: &MaskedLine,
        raw: &str,
    ) {
        self.stats.functions_found += 1;
        if modifiers.has("synchronized") {
            self.diagnostics.add(info_diag(
                codes::UNSUPPORTED,
                format!("synchronized dropped from {}", record.name),
                line_no,
                PHASE,
            ));
        }

        if record.kind == DeclKind::EntryPoint {
            let head = "int main(int argc, char* argv[])".to_string();
            self.definition(line_no, &record.name, &head, code, masked, raw);
            return;
        }

        let ret = record.return_type().ty;
        let params = record.param_list();
        let interface = self
            .classes
            .last()
            .is_some_and(|c| c.kind == JavaTypeKind::Interface);
        self.section(modifiers.visibility());

        let prototype = if modifiers.has("static") {
            format!("static {ret} {}({params});", record.name)
        } else if is_abstract && (interface || modifiers.has("abstract")) {
            format!("virtual {ret} {}({params}) = 0;", record.name)
        } else if modifiers.has("private") || modifiers.has("final") {
            format!("{ret} {}({params});", record.name)
        } else {
            format!("virtual {ret} {}({params});", record.name)
        };
        let level = self.member_level();
        self.header.line_at(level, &prototype);

        if is_abstract {
            self.tracker.observe(raw);
            return;
        }
        let head = format!("{ret} {}::{}({params})", self.qualified_name(), record.name);
        self.definition(line_no, &record.name, &head, code, masked, raw);
    }

    fn constructor(
        &mut self,
        line_no: usize,
        modifiers: &Modifiers,
        record: &DeclarationRecord,
        code: &str,
        masked: &MaskedLine,
        raw: &str,
    ) {
        self.stats.functions_found += 1;
        self.section(modifiers.visibility());
        let params = record.param_list();
        let level = self.member_level();
        self.header
            .line_at(level, &format!("{}({params});", record.name));
        let head = format!("{}::{}({params})", self.qualified_name(), record.name);
        self.definition(line_no, &record.name, &head, code, masked, raw);
    }

    fn static_initializer(&mut self, line_no: usize, raw: &str) {
        self.section("public");
        let level = self.member_level();
        self.header.line_at(level, "static void static_init();");
        let head = format!("void {}::static_init()", self.qualified_name());
        let masked = MaskedLine::default();
        self.definition(line_no, "static_init", &head, "static {", &masked, raw);
    }

    /// Out-of-class definition in the source file; the body follows
    fn definition(
        &mut self,
        line_no: usize,
        name: &str,
        head: &str,
        code: &str,
        masked: &MaskedLine,
        raw: &str,
    ) {
        let mut text = format!("{head} {{");
        if let Some(rest) = code.find('{').map(|i| code[i + 1..].trim()) {
            if !rest.is_empty() {
                text.push(' ');
                text.push_str(&stmt::translate(rest).render());
            }
        }
        if !self.source.is_empty() {
            self.source.blank();
        }
        let observed = self.tracker.enter(ScopeKind::Function, name, line_no, raw);
        self.body = Route::new(Target::File, 0, observed.depth_before);
        self.source
            .line_at(0, &masked.restore_with_comment(&text));
    }

    fn body_line(
        &mut self,
        line_no: usize,
        code: &str,
        masked: &MaskedLine,
        raw: &str,
        before: &LexState,
    ) {
        if let Some(hit) = self.guard.check(raw, before, Language::Java) {
            self.diagnostics.add(info_diag(
                codes::UNSUPPORTED,
                format!("{} has no C++ equivalent: {}", hit.construct.category(), raw.trim()),
                line_no,
                PHASE,
            ));
            let observed = self.tracker.observe(raw);
            self.source
                .line_at(self.body.level(&observed), &hit.placeholder);
            return;
        }

        let statement = stmt::translate(code);
        let observed = self.tracker.observe(raw);
        let text = masked.restore_with_comment(&statement.render());
        self.source.line_at(self.body.level(&observed), &text);
        self.close_classes(&observed);
    }

    /// Close the header bodies of classes ended by this line. Returns true
    /// when any class closed.
    fn close_classes(&mut self, observed: &Observed) -> bool {
        let mut any = false;
        for scope in &observed.closed {
            if scope.kind != ScopeKind::Struct {
                continue;
            }
            if let Some(class) = self.classes.pop() {
                self.header.line_at(class.level, "};");
                any = true;
            }
        }
        any
    }
}

/// Constants of a one-line enum: `enum Color { RED, GREEN }`
fn enum_constants(masked: &MaskedLine, raw: &str) -> Option<String> {
    let open = raw.find('{')?;
    let close = raw.rfind('}')?;
    let inner = masked.restore(raw[open + 1..close].trim());
    Some(inner.trim().trim_end_matches(';').trim().to_string())
}

fn strip_generics(name: &str) -> &str {
    name.split('<').next().unwrap_or(name).trim()
}

/// Member declaration without its leading modifier words
fn strip_modifiers(code: &str) -> &str {
    let mut rest = code.trim();
    loop {
        let Some((word, tail)) = rest.split_once(char::is_whitespace) else {
            return rest;
        };
        if matches!(
            word,
            "public" | "protected" | "private" | "static" | "final" | "transient" | "volatile"
        ) {
            rest = tail.trim_start();
        } else {
            return rest;
        }
    }
}
