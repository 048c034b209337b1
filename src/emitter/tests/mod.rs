//! emitter module tests

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_indent_line() {
    assert_eq!(indent_line(2, "\tx++;"), "        x++;");
    assert_eq!(indent_line(3, "   "), "");
}

#[test]
fn test_code_writer_levels() {
    let mut w = CodeWriter::new();
    w.line("class A {");
    w.indent();
    w.line("int x;");
    w.dedent();
    w.dedent();
    assert_eq!(w.level(), 0);
    w.line("}");
    assert_eq!(w.len(), 3);
    assert_eq!(w.finish(), "class A {\n    int x;\n}\n");
}

#[test]
fn test_code_writer_append_keeps_indent() {
    let mut body = CodeWriter::new();
    body.line_at(1, "x = 1;");
    let mut out = CodeWriter::new();
    out.line("{");
    out.append(body);
    out.line("}");
    assert_eq!(out.finish(), "{\n    x = 1;\n}\n");
}

#[test]
fn test_code_writer_patch() {
    let mut w = CodeWriter::new();
    w.line("public static class Shape {");
    w.patch(0, |l| l.replace("static class", "static abstract class"));
    assert_eq!(w.lines()[0], "public static abstract class Shape {");
}

#[test]
fn test_unit_writer_places_class_at_first_use() {
    let mut w = JavaUnitWriter::new();
    w.push(Target::File, 1, "// before");
    let point = w.class("Point");
    w.push(Target::File, 1, "public static void main(String[] args) throws Exception {");
    w.push(Target::File, 1, "}");
    // Members can arrive after the file-level code that follows the class.
    w.push(Target::Class(point), 2, "public int x;");
    w.set_header(point, 1, "public static class Point {");
    w.set_footer(point, 1, "}");

    let out = w.finish(&["package demo;".to_string(), String::new()], "Main");
    assert_eq!(
        out,
        "package demo;\n\
         \n\
         public class Main {\n    \
         // before\n    \
         public static class Point {\n        \
         public int x;\n    \
         }\n    \
         public static void main(String[] args) throws Exception {\n    \
         }\n\
         }\n"
    );
}

#[test]
fn test_unit_writer_reuses_class() {
    let mut w = JavaUnitWriter::new();
    let a = w.class("A");
    assert_eq!(w.class("A"), a);
    assert_eq!(w.find_class("B"), None);
    w.set_header(a, 1, "public static class A {");
    w.patch_header(a, |h| h.replace("class", "abstract class"));
    let out = w.finish(&[], "Unit");
    assert!(out.contains("    public static abstract class A {\n    }\n"));
}

#[test]
fn test_unit_writer_file_header_and_verbatim() {
    let mut w = JavaUnitWriter::new();
    w.patch_file_header("Shape", |h| h.replace("public class", "public abstract class"));
    w.push(Target::File, 1, "String s = \"\"\"");
    w.push_verbatim(Target::File, "  raw  text");
    let out = w.finish(&[], "Shape");
    assert_eq!(
        out,
        "public abstract class Shape {\n    String s = \"\"\"\n  raw  text\n}\n"
    );
}

#[test]
fn test_unit_writer_keeps_preamble_verbatim() {
    let w = JavaUnitWriter::new();
    let preamble = [
        "/**".to_string(),
        " * Translated from C++: geo/shape.cc".to_string(),
        " */".to_string(),
    ];
    let out = w.finish(&preamble, "Shape");
    assert_eq!(
        out,
        "/**\n * Translated from C++: geo/shape.cc\n */\npublic class Shape {\n}\n"
    );
}
