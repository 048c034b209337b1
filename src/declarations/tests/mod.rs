//! declarations module tests

use super::cpp::{self, Access, BodyKind};
use super::go::{self, FieldSpec, TypeDecl, ValueDecl};
use super::java::{self, JavaTypeKind, Member};
use super::*;
use pretty_assertions::assert_eq;

fn params(list: &[Param]) -> Vec<String> {
    list.iter().map(Param::declaration).collect()
}

// --- Go ---

#[test]
fn test_go_params_inherit_type_from_the_right() {
    let converted = convert_go_params("a, b int, s string");
    assert_eq!(params(&converted), vec!["int a", "int b", "String s"]);
}

#[test]
fn test_go_params_unnamed() {
    let converted = convert_go_params("int, string");
    assert_eq!(params(&converted), vec!["int arg0", "String arg1"]);
    assert!(convert_go_params("").is_empty());
}

#[test]
fn test_go_params_composite_types() {
    let converted = convert_go_params("xs []int, m map[string]bool, f func(int) int");
    assert_eq!(
        params(&converted),
        vec!["List<Integer> xs", "Map<String, Boolean> m", "Object f"]
    );
}

#[test]
fn test_go_func_header_with_receiver() {
    let header = go::parse_func_header("func (s *Stack) Push(v int) {").unwrap();
    assert_eq!(header.receiver.as_deref(), Some("s *Stack"));
    assert_eq!(header.name, "Push");
    assert_eq!(header.params, "v int");
    assert_eq!(header.results, None);
    assert!(header.opens_body);
    assert!(!header.closes_body);

    let record = DeclarationRecord::from_go_func(&header);
    assert_eq!(record.kind, DeclKind::Method);
    assert_eq!(
        record.receiver,
        Some(Receiver {
            name: "s".to_string(),
            ty: "Stack".to_string(),
            pointer: true,
        })
    );
    assert_eq!(java_signature(&record), "void Push(int v)");
}

#[test]
fn test_go_multi_value_return_is_lossy() {
    let header = go::parse_func_header("func divide(a, b int) (int, error) {").unwrap();
    assert_eq!(header.results.as_deref(), Some("(int, error)"));
    let record = DeclarationRecord::from_go_func(&header);
    assert_eq!(record.kind, DeclKind::Function);
    let ret = record.return_type();
    assert_eq!(ret.ty, "int");
    assert_eq!(ret.dropped, vec!["Exception".to_string()]);
    assert!(ret.is_lossy());
    assert_eq!(java_signature(&record), "int divide(int a, int b)");
}

#[test]
fn test_go_entry_point_and_initializer() {
    let main = go::parse_func_header("func main() {").unwrap();
    assert_eq!(DeclarationRecord::from_go_func(&main).kind, DeclKind::EntryPoint);
    let init = go::parse_func_header("func init() {").unwrap();
    assert_eq!(DeclarationRecord::from_go_func(&init).kind, DeclKind::Initializer);
}

#[test]
fn test_go_one_line_function() {
    let header = go::parse_func_header("func id(x int) int { return x }").unwrap();
    assert_eq!(header.inline_body.as_deref(), Some("return x"));
    assert!(header.closes_body);
}

#[test]
fn test_go_not_a_func_header() {
    assert_eq!(go::parse_func_header("x := func() {"), None);
    assert_eq!(go::parse_func_header("fmt.Println(x)"), None);
}

#[test]
fn test_generic_receiver_names_base_type() {
    let receiver = Receiver::parse("l *List[T]").unwrap();
    assert_eq!(receiver.ty, "List");
    assert!(receiver.pointer);

    let unnamed = Receiver::parse("Point").unwrap();
    assert_eq!(unnamed.name, "");
    assert_eq!(unnamed.ty, "Point");
    assert!(!unnamed.pointer);
}

#[test]
fn test_go_type_decls() {
    assert_eq!(
        go::parse_type_decl("type Point struct {"),
        Some(TypeDecl::Struct {
            name: "Point".to_string(),
            closed: false
        })
    );
    assert_eq!(
        go::parse_type_decl("type Empty struct{}"),
        Some(TypeDecl::Struct {
            name: "Empty".to_string(),
            closed: true
        })
    );
    assert_eq!(
        go::parse_type_decl("type Shape interface {"),
        Some(TypeDecl::Interface {
            name: "Shape".to_string(),
            closed: false
        })
    );
    assert_eq!(
        go::parse_type_decl("type Celsius float64"),
        Some(TypeDecl::Alias {
            name: "Celsius".to_string(),
            target: "float64".to_string()
        })
    );
}

#[test]
fn test_go_fields() {
    assert_eq!(
        go::parse_field("X, Y int"),
        Some(FieldSpec::Named {
            names: vec!["X".to_string(), "Y".to_string()],
            ty: "int".to_string()
        })
    );
    assert_eq!(
        go::parse_field("*Base"),
        Some(FieldSpec::Embedded("Base".to_string()))
    );
    assert_eq!(
        go::parse_field("sync.Mutex"),
        Some(FieldSpec::Embedded("sync.Mutex".to_string()))
    );
}

#[test]
fn test_go_fields_with_nested_func_types() {
    for (line, name, ty) in [
        ("handlers []func()", "handlers", "[]func()"),
        ("onErr map[string]func(error)", "onErr", "map[string]func(error)"),
        ("hooks [4]func(int) bool", "hooks", "[4]func(int) bool"),
    ] {
        assert_eq!(
            go::parse_field(line),
            Some(FieldSpec::Named {
                names: vec![name.to_string()],
                ty: ty.to_string()
            }),
            "{line}"
        );
    }

    let spec = go::parse_spec_line("listeners []func(string) = nil").unwrap();
    assert_eq!(spec.ty.as_deref(), Some("[]func(string)"));
    assert_eq!(spec.value.as_deref(), Some("nil"));
}

#[test]
fn test_go_method_spec() {
    let spec = go::parse_method_spec("Area() float64").unwrap();
    assert_eq!(spec.name, "Area");
    assert_eq!(spec.params, "");
    let record = DeclarationRecord::from_go_method_spec(&spec);
    assert_eq!(java_signature(&record), "double Area()");
}

#[test]
fn test_go_value_decls() {
    assert_eq!(
        go::parse_value_decl("const ("),
        Some(ValueDecl::Group { constant: true })
    );
    match go::parse_value_decl("var x int = 5") {
        Some(ValueDecl::Single { constant, spec }) => {
            assert!(!constant);
            assert_eq!(spec.names, vec!["x".to_string()]);
            assert_eq!(spec.ty.as_deref(), Some("int"));
            assert_eq!(spec.value.as_deref(), Some("5"));
        }
        other => panic!("expected a single var, got {other:?}"),
    }

    let spec = go::parse_spec_line("A = iota").unwrap();
    assert_eq!(spec.names, vec!["A".to_string()]);
    assert_eq!(spec.ty, None);
    assert_eq!(spec.value.as_deref(), Some("iota"));
}

#[test]
fn test_declared_structs_prescan() {
    let src = ["type A struct {", "    n int", "}", "type B int", "type C struct{}"];
    assert_eq!(
        go::declared_structs(src),
        vec!["A".to_string(), "C".to_string()]
    );
}

// --- C++ ---

#[test]
fn test_cpp_class_header() {
    let header = cpp::parse_class_header("class Circle : public Shape {").unwrap();
    assert_eq!(header.name, "Circle");
    assert!(!header.is_struct);
    assert_eq!(header.base.as_deref(), Some("Shape"));
    assert!(header.opens_body);
    assert_eq!(header.default_access(), Access::Private);

    let point = cpp::parse_class_header("struct Point {").unwrap();
    assert_eq!(point.default_access(), Access::Public);

    // forward declaration
    assert_eq!(cpp::parse_class_header("class Node;"), None);
}

#[test]
fn test_cpp_access_label() {
    assert_eq!(cpp::parse_access_label("  public:"), Some(Access::Public));
    assert_eq!(cpp::parse_access_label("protected :"), Some(Access::Protected));
    assert_eq!(cpp::parse_access_label("x = y;"), None);
}

#[test]
fn test_cpp_functions() {
    let add = cpp::parse_function("int add(int a, int b) {").unwrap();
    assert_eq!(add.record.kind, DeclKind::Function);
    assert_eq!(params(&add.record.params), vec!["int a", "int b"]);
    assert_eq!(add.record.returns, vec!["int".to_string()]);
    assert_eq!(add.body, BodyKind::Opens);

    let area = cpp::parse_function("virtual double area() const = 0;").unwrap();
    assert_eq!(area.body, BodyKind::PureVirtual);

    let deposit = cpp::parse_function("void Account::deposit(double amount) {").unwrap();
    assert_eq!(deposit.owner.as_deref(), Some("Account"));
    assert_eq!(deposit.record.kind, DeclKind::Method);
    assert!(deposit.record.returns.is_empty());

    let main = cpp::parse_function("int main() {").unwrap();
    assert_eq!(main.record.kind, DeclKind::EntryPoint);
}

#[test]
fn test_cpp_statements_are_not_functions() {
    assert_eq!(cpp::parse_function("return compute(x);"), None);
    assert_eq!(cpp::parse_function("if (ready) {"), None);
}

#[test]
fn test_cpp_constructors() {
    let ctor = cpp::parse_constructor("Point(int x, int y) : x_(x), y_(y) {", Some("Point"))
        .unwrap();
    assert!(!ctor.destructor);
    assert_eq!(
        ctor.initializers,
        vec![
            ("x_".to_string(), "x".to_string()),
            ("y_".to_string(), "y".to_string())
        ]
    );
    assert_eq!(ctor.body, BodyKind::Opens);

    let dtor = cpp::parse_constructor("~Point() {", Some("Point")).unwrap();
    assert!(dtor.destructor);

    let outside = cpp::parse_constructor("Point::Point(int x) {", None).unwrap();
    assert_eq!(params(&outside.record.params), vec!["int x"]);

    assert_eq!(cpp::parse_constructor("draw(1, 2);", Some("Point")), None);
}

#[test]
fn test_cpp_params() {
    let converted = cpp::convert_cpp_params("const std::string& name, int* p, int xs[], int n = 5");
    assert_eq!(
        params(&converted),
        vec!["String name", "int p", "int[] xs", "int n"]
    );
    assert!(cpp::convert_cpp_params("void").is_empty());
}

// --- Java ---

#[test]
fn test_java_type_header() {
    let header = java::parse_type_header(
        "public abstract class Shape extends Base implements Drawable, Comparable<Shape> {",
    )
    .unwrap();
    assert_eq!(header.kind, JavaTypeKind::Class);
    assert_eq!(header.name, "Shape");
    assert!(header.is_abstract());
    assert_eq!(header.extends.as_deref(), Some("Base"));
    assert_eq!(
        header.implements,
        vec!["Drawable".to_string(), "Comparable<Shape>".to_string()]
    );
    assert!(header.opens_body);

    let color = java::parse_type_header("enum Color {").unwrap();
    assert_eq!(color.kind, JavaTypeKind::Enum);
    assert_eq!(java::parse_type_header("int x = 1;"), None);
}

#[test]
fn test_java_fields() {
    match java::parse_member("private int count;", "Counter") {
        Some(Member::Field {
            modifiers,
            ty,
            name,
            init,
        }) => {
            assert_eq!(modifiers.visibility(), "private");
            assert_eq!(ty, "int");
            assert_eq!(name, "count");
            assert_eq!(init, None);
        }
        other => panic!("expected a field, got {other:?}"),
    }

    match java::parse_member("static final String NAME = \"x\";", "Counter") {
        Some(Member::Field {
            modifiers, ty, init, ..
        }) => {
            assert!(modifiers.has("static"));
            assert!(modifiers.has("final"));
            // package-private members land in the public section
            assert_eq!(modifiers.visibility(), "public");
            assert_eq!(ty, "std::string");
            assert_eq!(init.as_deref(), Some("\"x\""));
        }
        other => panic!("expected a field, got {other:?}"),
    }
}

#[test]
fn test_java_methods_and_constructors() {
    match java::parse_member("public Counter(int start) {", "Counter") {
        Some(Member::Constructor { record, .. }) => {
            assert_eq!(params(&record.params), vec!["int start"]);
        }
        other => panic!("expected a constructor, got {other:?}"),
    }

    match java::parse_member("public abstract double area();", "Shape") {
        Some(Member::Method {
            record,
            is_abstract,
            ..
        }) => {
            assert!(is_abstract);
            assert_eq!(record.returns, vec!["double".to_string()]);
        }
        other => panic!("expected a method, got {other:?}"),
    }

    match java::parse_member("@Override public String toString() {", "Shape") {
        Some(Member::Method { record, .. }) => {
            assert_eq!(record.name, "toString");
            assert_eq!(record.returns, vec!["std::string".to_string()]);
        }
        other => panic!("expected a method, got {other:?}"),
    }

    match java::parse_member("public static void main(String[] args) {", "App") {
        Some(Member::Method { record, .. }) => {
            assert_eq!(record.kind, DeclKind::EntryPoint);
            assert_eq!(params(&record.params), vec!["std::vector<std::string> args"]);
        }
        other => panic!("expected main, got {other:?}"),
    }

    assert_eq!(java::parse_member("return count;", "Counter"), None);
}

#[test]
fn test_java_types_to_cpp() {
    assert_eq!(java::java_type_to_cpp("int[]"), "std::vector<int>");
    assert_eq!(java::java_type_to_cpp("String"), "std::string");
    assert_eq!(java::java_type_to_cpp("Node"), "std::shared_ptr<Node>");
    assert_eq!(java::java_type_to_cpp("List<Integer>"), "std::vector<int>");

    let converted = java::convert_java_params("final String name, int... xs");
    assert_eq!(
        params(&converted),
        vec!["std::string name", "std::vector<int> xs"]
    );
}

// --- shared ---

#[test]
fn test_split_declarators() {
    assert_eq!(split_declarators("int x, y;"), vec!["int x;", "int y;"]);
    assert_eq!(
        split_declarators("double *a, *b = nullptr;"),
        vec!["double *a;", "double *b = nullptr;"]
    );
    assert_eq!(
        split_declarators("private static int a[3], b;"),
        vec!["private static int a[3];", "private static int b;"]
    );
    assert_eq!(
        split_declarators("Map<String, Integer> m, n;"),
        vec!["Map<String, Integer> m;", "Map<String, Integer> n;"]
    );
}

#[test]
fn test_split_declarators_keeps_single_lines() {
    for line in [
        "int x;",
        "std::map<int, int> m;",
        "int f(int a, int b);",
        "typedef int A, *B;",
        "ON, OFF;",
        "int x, y",
    ] {
        assert_eq!(split_declarators(line), vec![line.to_string()], "{line}");
    }
}
