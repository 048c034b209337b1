//! Go → Java
//!
//! One Go file becomes one Java class named after the file. Structs become
//! nested `public static class` types, package-level functions become static
//! methods, and methods whose receiver type is declared in the same file are
//! moved into that type's body.

use super::{
    Language, LanguagePair, OutputFile, Route, SourceUnit, TranslationStats, UnitTranslation,
};
use crate::declarations::go::{
    self as decl, FieldSpec, FuncHeader, TypeDecl, ValueDecl, ValueSpec,
};
use crate::declarations::{java_signature, DeclKind, DeclarationRecord, ReturnType};
use crate::diagnostics::{codes, info_diag, warning_diag, Diagnostic, Diagnostics};
use crate::emitter::{JavaUnitWriter, Target};
use crate::lexer::{mask_line, LexState, MaskedLine};
use crate::path_map::PathMapper;
use crate::rules::{infer_literal_type, map_go_type, static_regex};
use crate::scope::{Observed, ScopeKind, ScopeTracker};
use crate::statements::go as stmt;
use crate::unsupported_features::UnsupportedConstructGuard;
use once_cell::sync::Lazy;
use regex::Regex;

static IOTA: Lazy<Regex> = Lazy::new(|| static_regex(r"\biota\b"));

const PHASE: &str = "go-java";

#[derive(Debug, Clone, Copy, Default)]
pub struct GoToJava;

impl LanguagePair for GoToJava {
    fn name(&self) -> &'static str {
        "go-java"
    }

    fn source(&self) -> Language {
        Language::Go
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
        let mut file = GoFile::new(guard, decl::declared_structs(unit.lines()), &target.type_name);
        for (index, line) in unit.lines().enumerate() {
            file.line(index + 1, line);
        }
        file.close_open_scopes();

        let mut preamble = target.package_lines();
        preamble.extend([
            "import java.util.*;".to_string(),
            "import java.util.concurrent.*;".to_string(),
            "import java.io.*;".to_string(),
            String::new(),
            "/**".to_string(),
            format!(" * Translated from Go: {}", unit.rel_path.display()),
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

/// An open `const (` / `var (` group
#[derive(Debug, Default)]
struct ValueGroup {
    constant: bool,
    local: bool,
    iota: usize,
    last_value: Option<String>,
    last_type: Option<String>,
}

struct GoFile<'g> {
    guard: &'g UnsupportedConstructGuard,
    /// Structs declared anywhere in the file
    structs: Vec<String>,
    /// Name of the file class; a struct with this name is merged into it
    file_type: String,
    writer: JavaUnitWriter,
    tracker: ScopeTracker,
    lex: LexState,
    route: Route,
    receiver: Option<Regex>,
    import_group: bool,
    type_group: bool,
    value_group: Option<ValueGroup>,
    stats: TranslationStats,
    diagnostics: Diagnostics,
}

impl<'g> GoFile<'g> {
    fn new(guard: &'g UnsupportedConstructGuard, structs: Vec<String>, file_type: &str) -> Self {
        Self {
            guard,
            structs,
            file_type: file_type.to_string(),
            writer: JavaUnitWriter::new(),
            tracker: ScopeTracker::new(),
            lex: LexState::default(),
            route: Route::FILE,
            receiver: None,
            import_group: false,
            type_group: false,
            value_group: None,
            stats: TranslationStats::default(),
            diagnostics: Diagnostics::new(),
        }
    }

    fn line(&mut self, line_no: usize, raw: &str) {
        let before = self.lex;
        let mut masked = mask_line(raw, &mut self.lex);
        masked.map_literals(raw_string_to_java);

        // continuation of a multi-line raw string
        if before.in_raw_string {
            self.tracker.observe(raw);
            self.writer.push_verbatim(self.route.target, raw);
            return;
        }

        let code = masked.code.trim().to_string();
        if code.is_empty() || masked.is_comment_only() {
            let text = masked.restore_with_comment(&code);
            let observed = self.tracker.observe(raw);
            self.emit(&observed, &text);
            return;
        }

        if self.import_group {
            if code.starts_with(')') {
                self.import_group = false;
            }
            self.tracker.observe(raw);
            return;
        }
        if self.value_group.is_some() {
            self.value_group_line(&code, &masked, raw);
            return;
        }

        let state = self.tracker.state();
        let at_body = self.tracker.at_body_level();
        match state {
            ScopeKind::Struct if at_body => self.struct_member(&code, &masked, raw),
            ScopeKind::Interface if at_body => self.interface_member(line_no, &code, &masked, raw),
            ScopeKind::TopLevel if self.tracker.depth() == 0 => {
                self.top_level(line_no, &code, &masked, raw, &before)
            }
            _ => self.body_line(line_no, &code, &masked, raw, &before),
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
        if self.type_group && code.starts_with(')') {
            self.type_group = false;
            self.tracker.observe(raw);
            return;
        }
        if code.starts_with("package ") || code.starts_with("import ") {
            if code.trim_end().ends_with('(') {
                self.import_group = true;
            }
            self.tracker.observe(raw);
            return;
        }
        if code == "type (" {
            self.type_group = true;
            self.tracker.observe(raw);
            return;
        }
        if let Some(header) = decl::parse_func_header(code) {
            self.function(line_no, &header, masked, raw);
            return;
        }
        let type_decl = if self.type_group {
            decl::parse_type_decl(&format!("type {code}"))
        } else if code.starts_with("type ") {
            decl::parse_type_decl(code)
        } else {
            None
        };
        if let Some(type_decl) = type_decl {
            self.type_declaration(line_no, type_decl, masked, raw);
            return;
        }
        match decl::parse_value_decl(code) {
            Some(ValueDecl::Group { constant }) => {
                self.value_group = Some(ValueGroup {
                    constant,
                    ..ValueGroup::default()
                });
                self.tracker.observe(raw);
            }
            Some(ValueDecl::Single { constant, spec }) => {
                let spec = with_literal_type(spec, masked);
                let text = stmt::value_declaration(&spec, "public static ", constant, true).render();
                let text = masked.restore_with_comment(&text);
                let observed = self.tracker.observe(raw);
                self.emit(&observed, &text);
            }
            None => self.body_line(line_no, code, masked, raw, before),
        }
    }

    fn function(&mut self, line_no: usize, header: &FuncHeader, masked: &MaskedLine, raw: &str) {
        let record = DeclarationRecord::from_go_func(header);
        let returns = record.return_type();
        if returns.is_lossy() {
            self.diagnostics.add(multi_return_diag(&record, &returns, line_no));
        }

        let signature = java_signature(&record);
        let mut annotation = None;
        let (head, route) = match record.kind {
            DeclKind::EntryPoint => (
                "public static void main(String[] args) throws Exception".to_string(),
                Route::FILE,
            ),
            DeclKind::Initializer => ("static".to_string(), Route::FILE),
            DeclKind::Method => {
                let head = format!("public {signature} throws Exception");
                match &record.receiver {
                    Some(receiver) if self.structs.contains(&receiver.ty) => {
                        self.receiver = receiver_pattern(&receiver.name);
                        if receiver.ty == self.file_type {
                            (head, Route::FILE)
                        } else {
                            let index = self.writer.class(&receiver.ty);
                            let route = Route::new(Target::Class(index), 2, self.tracker.depth());
                            (head, route)
                        }
                    }
                    Some(receiver) => {
                        annotation = Some(format!("// Method on {}", receiver.ty));
                        (head, Route::FILE)
                    }
                    None => (head, Route::FILE),
                }
            }
            _ => (format!("public static {signature} throws Exception"), Route::FILE),
        };

        let mut text = head;
        if header.opens_body {
            text.push_str(" {");
        }
        if let Some(body) = &header.inline_body {
            let body = self.rewrite_receiver(stmt::translate(body).render());
            text.push(' ');
            text.push_str(&body);
        }
        if header.closes_body {
            text.push_str(" }");
        }
        if let Some(note) = annotation {
            text.push(' ');
            text.push_str(&note);
        }

        self.route = route;
        let text = masked.restore_with_comment(&text);
        let observed = self.tracker.enter(ScopeKind::Function, &record.name, line_no, raw);
        self.emit(&observed, &text);
        self.after(&observed);
        self.stats.functions_found += 1;
    }

    fn type_declaration(&mut self, line_no: usize, type_decl: TypeDecl, masked: &MaskedLine, raw: &str) {
        match type_decl {
            TypeDecl::Struct { name, .. } => {
                self.stats.structs_found += 1;
                if name == self.file_type {
                    // members land directly in the file class
                    let observed = self.tracker.enter(ScopeKind::Struct, &name, line_no, raw);
                    self.route = Route::new(Target::File, 1, observed.depth_before + 1);
                    if let Some(comment) = &masked.comment {
                        self.writer.push(Target::File, 1, comment);
                    }
                    self.after(&observed);
                    return;
                }
                let index = self.writer.class(&name);
                let header = masked.restore_with_comment(&format!("public static class {name} {{"));
                self.writer.set_header(index, 1, &header);
                let observed = self.tracker.enter(ScopeKind::Struct, &name, line_no, raw);
                self.route = Route::new(Target::Class(index), 1, observed.depth_before);
                if !observed.closed.is_empty() {
                    self.writer.set_footer(index, 1, "}");
                }
                self.after(&observed);
            }
            TypeDecl::Interface { name, closed } => {
                self.stats.classes_found += 1;
                let mut text = format!("public interface {name} {{");
                if closed {
                    text.push_str(" }");
                }
                let text = masked.restore_with_comment(&text);
                let observed = self.tracker.enter(ScopeKind::Interface, &name, line_no, raw);
                self.emit(&observed, &text);
                self.after(&observed);
            }
            TypeDecl::Alias { name, target } => {
                let text = masked.restore_with_comment(&format!(
                    "// Type alias: {name} = {}",
                    map_go_type(&target)
                ));
                let observed = self.tracker.observe(raw);
                self.emit(&observed, &text);
            }
        }
    }

    fn struct_member(&mut self, code: &str, masked: &MaskedLine, raw: &str) {
        let observed = self.tracker.observe(raw);
        if let Some(scope) = observed.closed.first() {
            if scope.name != self.file_type {
                let text = masked.restore_with_comment("}");
                if let Target::Class(index) = self.route.target {
                    self.writer.set_footer(index, 1, &text);
                }
            }
            self.after(&observed);
            return;
        }

        let text = match decl::parse_field(code) {
            Some(FieldSpec::Named { names, ty }) => {
                let ty = map_go_type(&ty);
                names
                    .iter()
                    .map(|name| format!("public {ty} {name};"))
                    .collect::<Vec<_>>()
                    .join(" ")
            }
            Some(FieldSpec::Embedded(name)) => format!("// embedded: {name}"),
            None => format!("// {code}"),
        };
        let text = masked.restore_with_comment(&text);
        self.emit(&observed, &text);
    }

    fn interface_member(&mut self, line_no: usize, code: &str, masked: &MaskedLine, raw: &str) {
        let observed = self.tracker.observe(raw);
        if !observed.closed.is_empty() {
            self.emit(&observed, &masked.restore_with_comment("}"));
            self.after(&observed);
            return;
        }

        let text = match decl::parse_method_spec(code) {
            Some(spec) => {
                let record = DeclarationRecord::from_go_method_spec(&spec);
                let returns = record.return_type();
                if returns.is_lossy() {
                    self.diagnostics.add(multi_return_diag(&record, &returns, line_no));
                }
                format!("{};", java_signature(&record))
            }
            None => format!("// embeds: {code}"),
        };
        self.emit(&observed, &masked.restore_with_comment(&text));
    }

    fn body_line(
        &mut self,
        line_no: usize,
        code: &str,
        masked: &MaskedLine,
        raw: &str,
        before: &LexState,
    ) {
        if let Some(hit) = self.guard.check(raw, before, Language::Go) {
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

        if let Some(ValueDecl::Group { constant }) = decl::parse_value_decl(code) {
            self.value_group = Some(ValueGroup {
                constant,
                local: true,
                ..ValueGroup::default()
            });
            self.tracker.observe(raw);
            return;
        }

        let text = self.rewrite_receiver(stmt::translate(code).render());
        let text = masked.restore_with_comment(&text);
        let observed = self.tracker.observe(raw);
        self.emit(&observed, &text);
        self.after(&observed);
    }

    fn value_group_line(&mut self, code: &str, masked: &MaskedLine, raw: &str) {
        let observed = self.tracker.observe(raw);
        if code.starts_with(')') {
            self.value_group = None;
            return;
        }
        let Some(group) = self.value_group.as_mut() else {
            return;
        };

        let text = match decl::parse_spec_line(code) {
            Some(spec) => {
                let mut spec = group.resolve(spec);
                if !group.local {
                    spec = with_literal_type(spec, masked);
                }
                let modifiers = if group.local { "" } else { "public static " };
                stmt::value_declaration(&spec, modifiers, group.constant, !group.local).render()
            }
            None => format!("// {code}"),
        };
        let text = masked.restore_with_comment(&text);
        self.emit(&observed, &text);
    }

    /// Write one line at the indent of its depth within the current route
    fn emit(&mut self, observed: &Observed, text: &str) {
        self.writer
            .push(self.route.target, self.route.level(observed), text);
    }

    /// Reset routing once the declaration that set it has closed
    fn after(&mut self, observed: &Observed) {
        if observed
            .closed
            .iter()
            .any(|s| matches!(s.kind, ScopeKind::Function | ScopeKind::Struct))
        {
            self.route = Route::FILE;
            self.receiver = None;
        }
    }

    fn rewrite_receiver(&self, text: String) -> String {
        match &self.receiver {
            Some(pattern) => pattern.replace_all(&text, "${1}this").into_owned(),
            None => text,
        }
    }

    fn close_open_scopes(&mut self) {
        for scope in self.tracker.finish() {
            self.diagnostics.add(warning_diag(
                codes::UNCLOSED_SCOPE,
                format!("{:?} {} is never closed", scope.kind, scope.name),
                scope.open_line,
                PHASE,
            ));
        }
    }
}

impl ValueGroup {
    /// Fill in implicit repeats and substitute `iota`
    fn resolve(&mut self, mut spec: ValueSpec) -> ValueSpec {
        if spec.value.is_some() {
            self.last_value = spec.value.clone();
            self.last_type = spec.ty.clone();
        } else if self.constant {
            spec.value = self.last_value.clone();
            if spec.ty.is_none() {
                spec.ty = self.last_type.clone();
            }
        }

        let uses_iota = spec.value.as_deref().is_some_and(|v| IOTA.is_match(v));
        if uses_iota {
            let index = self.iota.to_string();
            spec.value = spec
                .value
                .map(|v| IOTA.replace_all(&v, index.as_str()).into_owned());
            if spec.ty.is_none() {
                spec.ty = Some("int".to_string());
            }
        }
        self.iota += 1;
        spec
    }
}

/// Type of a single untyped initializer, read from its unmasked text
/// `BW-MULTI-RETURN` with the kept and dropped types under `meta`
fn multi_return_diag(
    record: &DeclarationRecord,
    returns: &ReturnType,
    line_no: usize,
) -> Diagnostic {
    warning_diag(
        codes::MULTI_RETURN,
        format!(
            "{} returns ({}); only {} is kept",
            record.name,
            record.returns.join(", "),
            returns.ty
        ),
        line_no,
        PHASE,
    )
    .with_meta(serde_json::json!({
        "kept": returns.ty,
        "dropped": returns.dropped,
    }))
}

fn with_literal_type(mut spec: ValueSpec, masked: &MaskedLine) -> ValueSpec {
    if spec.ty.is_none() && spec.names.len() == 1 {
        if let Some(value) = &spec.value {
            spec.ty = Some(infer_literal_type(&masked.restore(value)).to_string());
        }
    }
    spec
}

/// `(^|non-member)name\b`; `None` for blank receivers
fn receiver_pattern(name: &str) -> Option<Regex> {
    if name.is_empty() || name == "_" {
        return None;
    }
    Regex::new(&format!(r"(^|[^.\w]){}\b", regex::escape(name))).ok()
}

/// A single-line Go raw string as a Java string literal
fn raw_string_to_java(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('`')?.strip_suffix('`')?;
    let escaped = inner.replace('\\', "\\\\").replace('"', "\\\"");
    Some(format!("\"{escaped}\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn translate(rel: &str, source: &str) -> UnitTranslation {
        let mapper = PathMapper::new("/out", "transpiled");
        let unit = SourceUnit::new(Path::new(rel), source);
        GoToJava.translate(&unit, &mapper, &UnsupportedConstructGuard::default())
    }

    /// Output lines after the preamble, without the file class wrapper
    fn body(translation: &UnitTranslation) -> Vec<String> {
        let contents = &translation.outputs[0].contents;
        let lines: Vec<&str> = contents.lines().collect();
        let start = lines
            .iter()
            .position(|l| l.starts_with("public class") || l.starts_with("public abstract class"))
            .unwrap();
        lines[start + 1..lines.len() - 1]
            .iter()
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn test_struct_with_methods() {
        let src = "package geo\n\
                   \n\
                   import \"fmt\"\n\
                   \n\
                   type Point struct {\n\
                   \tX, Y int\n\
                   \tLabel string // shown\n\
                   }\n\
                   \n\
                   func (p *Point) Shift(dx int) {\n\
                   \tp.X += dx\n\
                   \tfmt.Println(p.Label)\n\
                   }\n";
        let out = translate("shapes.go", src);
        assert_eq!(
            body(&out),
            vec![
                "",
                "",
                "    public static class Point {",
                "        public int X; public int Y;",
                "        public String Label; // shown",
                "        public void Shift(int dx) throws Exception {",
                "            this.X += dx;",
                "            System.out.println(this.Label);",
                "        }",
                "    }",
                "",
            ]
        );
        assert_eq!(out.stats.structs_found, 1);
        assert_eq!(out.stats.functions_found, 1);
        assert_eq!(out.stats.files_converted, 1);
        assert_eq!(
            out.outputs[0].path,
            Path::new("/out/transpiled/Shapes.java").to_path_buf()
        );
    }

    #[test]
    fn test_preamble() {
        let out = translate("util/str_tools.go", "package util\n");
        let contents = &out.outputs[0].contents;
        assert!(contents.starts_with("package transpiled.util;\n\nimport java.util.*;\n"));
        assert!(contents.contains(" * Translated from Go: util/str_tools.go\n"));
        assert!(contents.contains("public class StrTools {\n"));
    }

    #[test]
    fn test_default_package_has_no_package_line() {
        let mapper = PathMapper::new("/out", "");
        let unit = SourceUnit::new(Path::new("main.go"), "package main\n");
        let out = GoToJava.translate(&unit, &mapper, &UnsupportedConstructGuard::default());
        let contents = &out.outputs[0].contents;
        assert!(contents.starts_with("import java.util.*;\n"));
        assert!(!contents.contains("package "));
    }

    #[test]
    fn test_func_typed_fields_are_members() {
        let src = "type Bus struct {\n\
                   \thandlers []func()\n\
                   \tonErr map[string]func(error)\n\
                   \tname string\n\
                   }\n";
        let out = translate("bus.go", src);
        assert_eq!(
            body(&out),
            vec![
                "    public static class Bus {",
                "        public List<Object> handlers;",
                "        public Map<String, Object> onErr;",
                "        public String name;",
                "    }",
            ]
        );
    }

    #[test]
    fn test_functions_and_entry_points() {
        let src = "func add(a, b int) int {\n\
                   \treturn a + b\n\
                   }\n\
                   func init() {\n\
                   \tready = true\n\
                   }\n\
                   func main() {\n\
                   \tfor i := 0; i < 3; i++ {\n\
                   \t\tfmt.Println(i)\n\
                   \t}\n\
                   }\n";
        let out = translate("main.go", src);
        assert_eq!(
            body(&out),
            vec![
                "    public static int add(int a, int b) throws Exception {",
                "        return a + b;",
                "    }",
                "    static {",
                "        ready = true;",
                "    }",
                "    public static void main(String[] args) throws Exception {",
                "        for (int i = 0; i < 3; i++) {",
                "            System.out.println(i);",
                "        }",
                "    }",
            ]
        );
        assert_eq!(out.stats.functions_found, 3);
    }

    #[test]
    fn test_multi_return_warns() {
        let src = "func split(s string) (string, error) {\n\
                   \treturn s, nil\n\
                   }\n";
        let out = translate("split.go", src);
        assert_eq!(
            body(&out),
            vec![
                "    public static String split(String s) throws Exception {",
                "        return s; // dropped: nil",
                "    }",
            ]
        );
        assert_eq!(out.diagnostics.count(codes::MULTI_RETURN), 1);
        let diag = out
            .diagnostics
            .iter()
            .find(|d| d.code == codes::MULTI_RETURN)
            .unwrap();
        let meta = diag.meta.clone().unwrap();
        assert_eq!(meta["kept"], "String");
        assert_eq!(meta["dropped"], serde_json::json!(["Exception"]));
    }

    #[test]
    fn test_goroutine_placeholder_keeps_line_count() {
        let src = "func run() {\n\
                   \tgo worker(jobs)\n\
                   \tdone()\n\
                   }\n";
        let out = translate("run.go", src);
        let lines = body(&out);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "        // TODO: goroutine — go worker(jobs)");
        assert_eq!(out.diagnostics.count(codes::UNSUPPORTED), 1);
    }

    #[test]
    fn test_method_on_unknown_receiver() {
        let src = "func (c *Client) Close() error {\n\
                   \treturn nil\n\
                   }\n";
        let out = translate("client_ext.go", src);
        assert_eq!(
            body(&out)[0],
            "    public Exception Close() throws Exception { // Method on Client"
        );
    }

    #[test]
    fn test_struct_named_like_file_merges() {
        let src = "type Counter struct {\n\
                   \tn int\n\
                   }\n\
                   func (c *Counter) Inc() {\n\
                   \tc.n++\n\
                   }\n";
        let out = translate("counter.go", src);
        assert_eq!(
            body(&out),
            vec![
                "    public int n;",
                "    public void Inc() throws Exception {",
                "        this.n++;",
                "    }",
            ]
        );
    }

    #[test]
    fn test_interface_and_alias() {
        let src = "type Shape interface {\n\
                   \tArea() float64\n\
                   \tfmt.Stringer\n\
                   }\n\
                   type Celsius float64\n";
        let out = translate("shape.go", src);
        assert_eq!(
            body(&out),
            vec![
                "    public interface Shape {",
                "        double Area();",
                "        // embeds: fmt.Stringer",
                "    }",
                "    // Type alias: Celsius = double",
            ]
        );
        assert_eq!(out.stats.classes_found, 1);
    }

    #[test]
    fn test_const_group_with_iota() {
        let src = "const (\n\
                   \tLow = iota\n\
                   \tMid\n\
                   \tHigh\n\
                   )\n\
                   var debug = false\n\
                   const greeting = \"hi\"\n";
        let out = translate("levels.go", src);
        assert_eq!(
            body(&out),
            vec![
                "    public static final int Low = 0;",
                "    public static final int Mid = 1;",
                "    public static final int High = 2;",
                "    public static boolean debug = false;",
                "    public static final String greeting = \"hi\";",
            ]
        );
    }

    #[test]
    fn test_raw_string_literal() {
        let src = "func pattern() string {\n\
                   \treturn `\\d+\"`\n\
                   }\n";
        let out = translate("re.go", src);
        assert_eq!(body(&out)[1], "        return \"\\\\d+\\\"\";");
    }

    #[test]
    fn test_unclosed_scope_reported() {
        let out = translate("broken.go", "func f() {\n\tx := 1\n");
        assert_eq!(out.diagnostics.count(codes::UNCLOSED_SCOPE), 1);
        let diag = out.diagnostics.iter().next().unwrap();
        assert_eq!(diag.span.file.as_deref(), Some("broken.go"));
    }
}
