//! C++ → Java
//!
//! Headers and sources are translated independently. Classes and structs
//! become nested `public static class` types; a class named like the file is
//! merged into the file class itself, which is the common `shape.h` /
//! `shape.cpp` layout. Out-of-class `Class::method` definitions are routed
//! into the class body when the class is known.

use super::{
    Language, LanguagePair, OutputFile, Route, SourceUnit, TranslationStats, UnitTranslation,
};
use crate::declarations::cpp::{
    self as decl, Access, BodyKind, ClassHeader, ConstructorHeader, FunctionHeader,
};
use crate::declarations::{java_signature, split_declarators, DeclKind};
use crate::diagnostics::{codes, info_diag, warning_diag, Diagnostics};
use crate::emitter::{JavaUnitWriter, Target};
use crate::lexer::{mask_line, LexState, MaskedLine};
use crate::path_map::PathMapper;
use crate::rules::cpp_java::CPP_PREPROCESSOR;
use crate::rules::static_regex;
use crate::scope::{Observed, ScopeKind, ScopeTracker};
use crate::statements::{cpp as stmt, Statement};
use crate::unsupported_features::UnsupportedConstructGuard;
use once_cell::sync::Lazy;
use regex::Regex;

static NAMESPACE: Lazy<Regex> = Lazy::new(|| static_regex(r"^namespace\s*([\w:]*)\s*\{$"));
static FORWARD_DECL: Lazy<Regex> = Lazy::new(|| static_regex(r"^(?:class|struct)\s+\w+\s*;$"));
static TEMPLATE_LINE: Lazy<Regex> = Lazy::new(|| static_regex(r"^template\s*<[^>]*>$"));
static GLOBAL_VAR: Lazy<Regex> = Lazy::new(|| {
    static_regex(r"^(?:static\s+)?(?:const(?:expr)?\s+)?[\w:<>, ]+?[\s*&]+\w+(?:\[\w*\])?\s*(?:=[^(]*|\{.*\})?;$")
});
static TYPE_ALIAS: Lazy<Regex> = Lazy::new(|| {
    static_regex(r"^(?:typedef\s+(.+?)\s+(\w+)|using\s+(\w+)\s*=\s*(.+?))\s*;$")
});
static RETURN_VALUE: Lazy<Regex> = Lazy::new(|| static_regex(r"^return\b[^;]*;"));

const PHASE: &str = "cpp-java";

#[derive(Debug, Clone, Copy, Default)]
pub struct CppToJava;

impl LanguagePair for CppToJava {
    fn name(&self) -> &'static str {
        "cpp-java"
    }

    fn source(&self) -> Language {
        Language::Cpp
    }

    fn target(&self) -> Language {
        Language::Java
    }

    fn translate(
        &self,
        unit: &SourceUnit<'_>,
        mapper: &PathMapper,
        guard: &UnsupportedConstructGuard,
    ) -> UnitTranslation {
        let target = mapper.java_target(unit.rel_path);
        let mut file = CppFile::new(guard, &target.type_name);
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

        let mut preamble = target.package_lines();
        preamble.push("import java.util.*;".to_string());
        preamble.extend(file.imports.iter().cloned());
        preamble.extend([
            String::new(),
            "/**".to_string(),
            format!(" * Translated from C++: {}", unit.rel_path.display()),
            " */".to_string(),
        ]);
        let contents = file.writer.finish(&preamble, &target.type_name);

        let mut stats = file.stats;
        stats.files_converted = 1;
        let mut diagnostics = file.diagnostics;
        diagnostics.set_file(unit.rel_path);
        UnitTranslation {
            outputs: vec![OutputFile {
                path: target.file,
                contents,
            }],
            stats,
            diagnostics,
        }
    }
}

/// Where a class body is being written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassSlot {
    /// Nested class buffered in the writer
    Nested(usize),
    /// Merged into the file class
    FileClass,
    /// Written inline inside another class body
    Inline,
}

#[derive(Debug)]
struct ClassContext {
    name: String,
    slot: ClassSlot,
    access: Access,
}

struct CppFile<'g> {
    guard: &'g UnsupportedConstructGuard,
    file_type: String,
    writer: JavaUnitWriter,
    tracker: ScopeTracker,
    lex: LexState,
    route: Route,
    classes: Vec<ClassContext>,
    /// Entry depths of open namespaces
    namespaces: Vec<usize>,
    imports: Vec<String>,
    in_entry_point: bool,
    stats: TranslationStats,
    diagnostics: Diagnostics,
}

impl<'g> CppFile<'g> {
    fn new(guard: &'g UnsupportedConstructGuard, file_type: &str) -> Self {
        Self {
            guard,
            file_type: file_type.to_string(),
            writer: JavaUnitWriter::new(),
            tracker: ScopeTracker::new(),
            lex: LexState::default(),
            route: Route::FILE,
            classes: Vec::new(),
            namespaces: Vec::new(),
            imports: Vec::new(),
            in_entry_point: false,
            stats: TranslationStats::default(),
            diagnostics: Diagnostics::new(),
        }
    }

    fn file_route(&self) -> Route {
        Route::new(Target::File, 1, self.namespaces.len())
    }

    fn line(&mut self, line_no: usize, raw: &str) {
        let before = self.lex;
        let masked = mask_line(raw, &mut self.lex);
        let code = masked.code.trim().to_string();

        if code.is_empty() || masked.is_comment_only() {
            let text = masked.restore_with_comment(&code);
            let observed = self.tracker.observe(raw);
            self.emit(&observed, &text);
            return;
        }

        if code.starts_with('#') {
            let import = CPP_PREPROCESSOR.apply(raw.trim());
            if !import.is_empty() && !self.imports.contains(&import) {
                self.imports.push(import);
            }
            self.tracker.observe(raw);
            return;
        }

        // `{` on its own line after a header that already emitted one
        if code == "{" && self.tracker.current().is_some_and(|s| !s.opened) {
            self.tracker.observe(raw);
            return;
        }

        let top_level = self.tracker.state() == ScopeKind::TopLevel
            && self.tracker.depth() == self.namespaces.len();
        if top_level {
            self.top_level(line_no, &code, &masked, raw, &before);
        } else if self.tracker.state() == ScopeKind::Struct && self.tracker.at_body_level() {
            self.class_member(line_no, &code, &masked, raw, &before);
        } else {
            self.body_line(line_no, &code, &masked, raw, &before);
        }
    }

    fn top_level(
        &mut self,
        line_no: usize,
        code: &str,
        masked: &MaskedLine,
        raw: &str,
        before: &LexState,
    ) {
        if code.starts_with('}') && !self.namespaces.is_empty() {
            let observed = self.tracker.observe(raw);
            if observed.braces.leading_closes > 0 {
                self.namespaces.pop();
                self.route = self.file_route();
            }
            return;
        }
        if let Some(caps) = NAMESPACE.captures(code) {
            let text = format!("// namespace {}", &caps[1]);
            let observed = self.tracker.observe(raw);
            self.emit(&observed, &masked.restore_with_comment(&text));
            self.namespaces.push(observed.depth_before);
            self.route = self.file_route();
            return;
        }
        if FORWARD_DECL.is_match(code) || TEMPLATE_LINE.is_match(code) {
            self.tracker.observe(raw);
            return;
        }
        if let Some(header) = decl::parse_class_header(code) {
            self.class_header(line_no, &header, masked, raw);
            return;
        }
        if let Some(ctor) = decl::parse_constructor(code, None) {
            let owner = ctor.record.name.clone();
            self.constructor(line_no, &owner, &ctor, code, masked, raw);
            return;
        }
        if let Some(header) = parse_function_header(code) {
            self.function(line_no, &header, code, masked, raw);
            return;
        }
        if let Some(caps) = TYPE_ALIAS.captures(code) {
            let (name, target) = match (caps.get(2), caps.get(3)) {
                (Some(name), _) => (name.as_str(), &caps[1]),
                (None, Some(name)) => (name.as_str(), &caps[4]),
                _ => return,
            };
            let text = format!("// Type alias: {name} = {}", decl::map_cpp_type(target));
            let observed = self.tracker.observe(raw);
            self.emit(&observed, &masked.restore_with_comment(&text));
            return;
        }
        if GLOBAL_VAR.is_match(code) && !code.starts_with("using ") {
            let translated = stmt::translate(code.trim_start_matches("static ").trim());
            let text = format!("public static {}", translated.render());
            self.note_pointer(&translated, line_no);
            let observed = self.tracker.observe(raw);
            self.emit(&observed, &masked.restore_with_comment(&text));
            return;
        }
        self.body_line(line_no, code, masked, raw, before);
    }

    fn class_header(&mut self, line_no: usize, header: &ClassHeader, masked: &MaskedLine, raw: &str) {
        if header.is_struct {
            self.stats.structs_found += 1;
        } else {
            self.stats.classes_found += 1;
        }
        let extends = header
            .base
            .as_ref()
            .map(|b| format!(" extends {b}"))
            .unwrap_or_default();

        let nested = !self.classes.is_empty();
        let observed;
        let slot = if nested {
            let text = format!("public static class {}{extends} {{", header.name);
            observed = self.tracker.enter(ScopeKind::Struct, &header.name, line_no, raw);
            self.emit(&observed, &masked.restore_with_comment(&text));
            ClassSlot::Inline
        } else if header.name == self.file_type {
            self.writer
                .set_file_header(&format!("public class {}{extends} {{", header.name));
            observed = self.tracker.enter(ScopeKind::Struct, &header.name, line_no, raw);
            self.route = Route::new(Target::File, 1, observed.depth_before + 1);
            ClassSlot::FileClass
        } else {
            let index = self.writer.class(&header.name);
            let text = format!("public static class {}{extends} {{", header.name);
            self.writer
                .set_header(index, 1, &masked.restore_with_comment(&text));
            observed = self.tracker.enter(ScopeKind::Struct, &header.name, line_no, raw);
            self.route = Route::new(Target::Class(index), 1, observed.depth_before);
            ClassSlot::Nested(index)
        };

        self.classes.push(ClassContext {
            name: header.name.clone(),
            slot,
            access: header.default_access(),
        });
        if !observed.closed.is_empty() {
            self.close_class(&observed, masked);
        }
    }

    /// Footer for the innermost class; `observed` is the line closing it
    fn close_class(&mut self, observed: &Observed, masked: &MaskedLine) {
        let Some(class) = self.classes.pop() else {
            return;
        };
        let footer = masked.restore_with_comment("}");
        match class.slot {
            ClassSlot::Nested(index) => {
                self.writer.set_footer(index, 1, &footer);
                self.route = self.file_route();
            }
            ClassSlot::FileClass => self.route = self.file_route(),
            ClassSlot::Inline => self.emit(observed, &footer),
        }
    }

    fn class_member(
        &mut self,
        line_no: usize,
        code: &str,
        masked: &MaskedLine,
        raw: &str,
        before: &LexState,
    ) {
        if let Some(access) = decl::parse_access_label(code) {
            if let Some(class) = self.classes.last_mut() {
                class.access = access;
            }
            self.tracker.observe(raw);
            return;
        }
        if let Some(header) = decl::parse_class_header(code) {
            self.class_header(line_no, &header, masked, raw);
            return;
        }
        let class_name = self.classes.last().map(|c| c.name.clone());
        if let Some(ctor) = decl::parse_constructor(code, class_name.as_deref()) {
            let owner = ctor.record.name.clone();
            self.constructor(line_no, &owner, &ctor, code, masked, raw);
            return;
        }
        if let Some(header) = parse_function_header(code) {
            self.function(line_no, &header, code, masked, raw);
            return;
        }

        if code.starts_with('}') {
            let observed = self.tracker.observe(raw);
            if observed.closed.iter().any(|s| s.kind == ScopeKind::Struct) {
                self.close_class(&observed, masked);
            } else {
                self.emit(&observed, &masked.restore_with_comment(code));
            }
            return;
        }
        if FORWARD_DECL.is_match(code) || TEMPLATE_LINE.is_match(code) {
            self.tracker.observe(raw);
            return;
        }
        if self.guard.check(raw, before, Language::Cpp).is_some() {
            self.body_line(line_no, code, masked, raw, before);
            return;
        }

        // field, one Java declaration per declarator
        let access = self.access().keyword();
        let mut field = Statement::default();
        let mut decls = Vec::new();
        for piece in split_declarators(code.trim_start_matches("mutable ")) {
            let translated = stmt::translate(&piece);
            field.pointer_stripped |= translated.pointer_stripped;
            for note in translated.notes {
                if !field.notes.contains(&note) {
                    field.notes.push(note);
                }
            }
            decls.push(format!("{access} {}", translated.code));
        }
        field.code = decls.join(" ");
        self.note_pointer(&field, line_no);
        let text = field.render();
        let observed = self.tracker.observe(raw);
        self.emit(&observed, &masked.restore_with_comment(&text));
    }

    fn access(&self) -> Access {
        self.classes
            .last()
            .map(|c| c.access)
            .unwrap_or(Access::Public)
    }

    /// Route for a member of `owner` defined at the current position
    fn member_route(&mut self, owner: &str) -> Option<Route> {
        if !self.classes.is_empty() {
            return Some(self.route);
        }
        if owner == self.file_type {
            return Some(self.file_route());
        }
        let index = self.writer.find_class(owner)?;
        Some(Route::new(Target::Class(index), 2, self.tracker.depth()))
    }

    fn function(
        &mut self,
        line_no: usize,
        header: &FunctionHeader,
        code: &str,
        masked: &MaskedLine,
        raw: &str,
    ) {
        let record = &header.record;
        let signature = java_signature(record);
        let in_class = !self.classes.is_empty();
        let visibility = if in_class {
            self.access().keyword()
        } else {
            "public"
        };
        let statik = if header.is_static { "static " } else { "" };

        let mut annotation = None;
        let (head, route) = match (record.kind, &header.owner) {
            (DeclKind::EntryPoint, _) => (
                "public static void main(String[] args) throws Exception".to_string(),
                self.file_route(),
            ),
            (_, Some(owner)) => match self.member_route(owner) {
                Some(route) => (format!("public {signature}"), route),
                None => {
                    annotation = Some(format!("// Method on {owner}"));
                    (format!("public {signature}"), self.file_route())
                }
            },
            _ if in_class => (format!("{visibility} {statik}{signature}"), self.route),
            _ => (format!("public static {signature}"), self.file_route()),
        };

        let text = match header.body {
            BodyKind::Opens => {
                self.stats.functions_found += 1;
                self.in_entry_point = record.kind == DeclKind::EntryPoint;
                let mut text = format!("{head} {{");
                if let Some(rest) = inline_body(code) {
                    text.push(' ');
                    text.push_str(&self.inline_statement(rest, line_no).render());
                }
                text
            }
            BodyKind::PureVirtual => {
                self.stats.functions_found += 1;
                self.mark_abstract();
                format!("{visibility} abstract {signature};")
            }
            BodyKind::Prototype => format!("// prototype: {head};"),
            BodyKind::Defaulted => format!("// defaulted: {head}"),
        };
        let text = match annotation {
            Some(note) => format!("{text} {note}"),
            None => text,
        };

        self.route = route;
        let text = masked.restore_with_comment(&text);
        let observed = if header.body == BodyKind::Opens {
            self.tracker
                .enter(ScopeKind::Function, &record.name, line_no, raw)
        } else {
            self.tracker.observe(raw)
        };
        self.emit(&observed, &text);
        self.after(&observed);
    }

    fn constructor(
        &mut self,
        line_no: usize,
        owner: &str,
        ctor: &ConstructorHeader,
        code: &str,
        masked: &MaskedLine,
        raw: &str,
    ) {
        let visibility = if self.classes.is_empty() {
            "public"
        } else {
            self.access().keyword()
        };
        let route = self.member_route(owner);
        let head = if ctor.destructor {
            "public void close()".to_string()
        } else {
            format!("{visibility} {}({})", owner, ctor.record.param_list())
        };

        let text = match ctor.body {
            BodyKind::Opens => {
                self.stats.functions_found += 1;
                let mut text = format!("{head} {{");
                for (field, value) in &ctor.initializers {
                    let value = stmt::translate(value).code;
                    text.push_str(&format!(" this.{field} = {value};"));
                }
                if let Some(rest) = inline_body(code) {
                    text.push(' ');
                    text.push_str(&self.inline_statement(rest, line_no).render());
                }
                text
            }
            BodyKind::Defaulted if !ctor.destructor => format!("{head} {{}}"),
            BodyKind::Defaulted | BodyKind::PureVirtual | BodyKind::Prototype => {
                format!("// prototype: {head};")
            }
        };
        let text = match route {
            Some(_) => text,
            None => format!("{text} // Constructor of {owner}"),
        };

        self.route = route.unwrap_or_else(|| self.file_route());
        let text = masked.restore_with_comment(&text);
        let observed = if ctor.body == BodyKind::Opens {
            self.tracker.enter(ScopeKind::Function, owner, line_no, raw)
        } else {
            self.tracker.observe(raw)
        };
        self.emit(&observed, &text);
        self.after(&observed);
    }

    fn body_line(
        &mut self,
        line_no: usize,
        code: &str,
        masked: &MaskedLine,
        raw: &str,
        before: &LexState,
    ) {
        if let Some(hit) = self.guard.check(raw, before, Language::Cpp) {
            self.diagnostics.add(info_diag(
                codes::UNSUPPORTED,
                format!("{} has no Java equivalent: {}", hit.construct.category(), raw.trim()),
                line_no,
                PHASE,
            ));
            let observed = self.tracker.observe(raw);
            self.emit(&observed, &hit.placeholder);
            self.after(&observed);
            return;
        }

        let statement = if self.in_entry_point && RETURN_VALUE.is_match(code) {
            Statement::new("return;")
        } else {
            stmt::translate(code)
        };
        self.note_pointer(&statement, line_no);
        let observed = self.tracker.observe(raw);
        if statement.code.is_empty() && statement.notes.is_empty() {
            self.after(&observed);
            return;
        }
        self.emit(&observed, &masked.restore_with_comment(&statement.render()));
        self.after(&observed);
    }

    fn inline_statement(&mut self, code: &str, line_no: usize) -> Statement {
        let statement = stmt::translate(code);
        self.note_pointer(&statement, line_no);
        statement
    }

    fn note_pointer(&mut self, statement: &Statement, line_no: usize) {
        if statement.pointer_stripped {
            self.diagnostics.add(info_diag(
                codes::POINTER_STRIPPED,
                format!("pointer declarator removed: {}", statement.code),
                line_no,
                PHASE,
            ));
        }
    }

    /// A pure virtual member makes the enclosing class abstract
    fn mark_abstract(&mut self) {
        let Some(class) = self.classes.last() else {
            return;
        };
        match class.slot {
            ClassSlot::Nested(index) => self.writer.patch_header(index, |h| {
                h.replacen("public static class", "public static abstract class", 1)
            }),
            ClassSlot::FileClass => {
                let name = class.name.clone();
                self.writer.patch_file_header(&name, |h| {
                    h.replacen("public class", "public abstract class", 1)
                })
            }
            ClassSlot::Inline => {}
        }
    }

    fn emit(&mut self, observed: &Observed, text: &str) {
        self.writer
            .push(self.route.target, self.route.level(observed), text);
    }

    /// Leave a function body: back to the enclosing class or the file
    fn after(&mut self, observed: &Observed) {
        if !observed
            .closed
            .iter()
            .any(|s| s.kind == ScopeKind::Function)
        {
            return;
        }
        self.in_entry_point = false;
        self.route = match self.classes.last().map(|c| c.slot) {
            Some(ClassSlot::Nested(index)) => {
                let anchor = self
                    .tracker
                    .current()
                    .map(|s| s.entry_depth)
                    .unwrap_or_default();
                Route::new(Target::Class(index), 1, anchor)
            }
            Some(_) => self.route,
            None => self.file_route(),
        };
    }
}

/// Function header, also in Allman style where `{` comes on the next line
fn parse_function_header(code: &str) -> Option<FunctionHeader> {
    decl::parse_function(code).or_else(|| {
        if code.ends_with(';') || code.ends_with('{') {
            return None;
        }
        decl::parse_function(&format!("{code} {{"))
    })
}

/// Statements written after `{` on a header line
fn inline_body(code: &str) -> Option<&str> {
    let open = code.find('{')?;
    let rest = code[open + 1..].trim();
    (!rest.is_empty()).then_some(rest)
}
