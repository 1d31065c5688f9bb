use cppgraph::core::{FileSymbols, Symbol};
use cppgraph::parsers::cpp::CppParser;

const WIDGET_HEADER: &str = r#"#include <vector>
#include "Shape.h"

namespace app {

class Widget {
public:
    virtual void draw() {}
    int size() const { return 0; }
};

struct Point {
    int x;
    int y;
};

}
"#;

const WIDGET_SOURCE: &str = r#"#include "Widget.h"

static int helper(int a, int b) {
    return a + b;
}

void Widget::draw() {
    helper(1, 2);
}

template <typename T>
T maxOf(T a, T b) {
    return a > b ? a : b;
}

const char* label(int id) {
    return "widget";
}

int main() {
    Widget w;
    w.draw();
    return maxOf(1, 2);
}
"#;

const ACCESSORS: &str = r#"#include <string>

class Widget {
public:
    const std::string& name() const { return name_; }
    Widget* self() { return this; }
    int id() const { return 7; }
};

Widget& Widget::get(int index) {
    return *this;
}

Widget* Widget::clone() {
    return new Widget(*this);
}

int* make(int count) {
    return new int[count];
}
"#;

fn extract(path: &str, source: &str) -> FileSymbols {
    let parser = CppParser::new().unwrap();
    parser.extract_source(path, source.as_bytes())
}

fn function<'a>(symbols: &'a FileSymbols, name: &str) -> &'a Symbol {
    symbols
        .functions
        .iter()
        .find(|f| f.name == name)
        .unwrap_or_else(|| panic!("function {name} not extracted"))
}

#[test]
fn header_includes_are_split_into_system_and_local() {
    let symbols = extract("Widget.h", WIDGET_HEADER);

    assert_eq!(symbols.includes.len(), 2);
    assert_eq!(symbols.includes[0].path, "vector");
    assert!(symbols.includes[0].is_system);
    assert_eq!(symbols.includes[0].line, 1);
    assert_eq!(symbols.includes[1].path, "Shape.h");
    assert!(!symbols.includes[1].is_system);
    assert_eq!(symbols.includes[1].line, 2);
}

#[test]
fn header_classes_carry_nearest_scope() {
    let symbols = extract("Widget.h", WIDGET_HEADER);

    assert_eq!(symbols.namespaces.len(), 1);
    assert_eq!(symbols.namespaces[0].name, "app");
    assert_eq!(symbols.namespaces[0].start_line, 4);

    assert_eq!(symbols.classes.len(), 1);
    let widget = &symbols.classes[0];
    assert_eq!(widget.name, "Widget");
    assert_eq!(widget.scope.as_deref(), Some("app"));
    assert_eq!((widget.start_line, widget.end_line), (6, 10));

    assert_eq!(symbols.structs.len(), 1);
    assert_eq!(symbols.structs[0].name, "Point");
    assert_eq!(symbols.structs[0].scope, None);
}

#[test]
fn inline_methods_are_scoped_to_their_class() {
    let symbols = extract("Widget.h", WIDGET_HEADER);

    let draw = function(&symbols, "draw");
    assert_eq!(draw.scope.as_deref(), Some("Widget"));
    assert!(draw.is_virtual);
    assert_eq!(draw.return_type.as_deref(), Some("void"));
    assert_eq!(draw.start_line, 8);

    let size = function(&symbols, "size");
    assert!(!size.is_virtual);
    assert_eq!(size.return_type.as_deref(), Some("int"));
}

#[test]
fn source_functions_capture_signature_details() {
    let symbols = extract("Widget.cpp", WIDGET_SOURCE);

    let names: Vec<&str> = symbols.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["helper", "draw", "maxOf", "label", "main"]);

    let helper = function(&symbols, "helper");
    assert!(helper.is_static);
    assert_eq!(helper.params, vec!["int a", "int b"]);
    assert_eq!(helper.return_type.as_deref(), Some("int"));
    assert_eq!(helper.scope, None);
    assert_eq!((helper.start_line, helper.end_line), (3, 5));

    let draw = function(&symbols, "draw");
    assert_eq!(draw.scope.as_deref(), Some("Widget"));
    assert!(draw.params.is_empty());

    let max_of = function(&symbols, "maxOf");
    assert!(max_of.is_template);
    assert_eq!(max_of.return_type.as_deref(), Some("T"));
    assert_eq!(max_of.params, vec!["T a", "T b"]);

    let label = function(&symbols, "label");
    assert_eq!(label.params, vec!["int id"]);

    let main = function(&symbols, "main");
    assert!(!main.is_static && !main.is_template && !main.is_virtual);
}

#[test]
fn called_names_are_unique_and_sorted() {
    let symbols = extract("Widget.cpp", WIDGET_SOURCE);

    let called: Vec<&str> = symbols.called_names.iter().map(String::as_str).collect();
    assert_eq!(called, vec!["draw", "helper", "maxOf"]);
}

#[test]
fn function_declaration_is_not_a_call() {
    let symbols = extract("B.cpp", "#include \"A.h\"\nWidget doThing();\n");

    assert!(symbols.functions.is_empty());
    assert!(symbols.called_names.is_empty());
    assert_eq!(symbols.includes.len(), 1);
}

#[test]
fn empty_source_yields_empty_symbols() {
    let symbols = extract("empty.cpp", "");
    assert_eq!(symbols.file_path, "empty.cpp");
    assert!(symbols.is_empty());
}

#[test]
fn pointer_and_reference_returns_are_captured() {
    let symbols = extract("w.h", ACCESSORS);

    let names: Vec<&str> = symbols.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["name", "self", "id", "get", "clone", "make"]);

    let name = function(&symbols, "name");
    assert_eq!(name.scope.as_deref(), Some("Widget"));
    assert_eq!(name.return_type.as_deref(), Some("std::string"));
    assert!(name.params.is_empty());

    assert_eq!(function(&symbols, "self").scope.as_deref(), Some("Widget"));

    let get = function(&symbols, "get");
    assert_eq!(get.scope.as_deref(), Some("Widget"));
    assert_eq!(get.params, vec!["int index"]);
    assert_eq!((get.start_line, get.end_line), (10, 12));

    let clone = function(&symbols, "clone");
    assert_eq!(clone.scope.as_deref(), Some("Widget"));
    assert!(clone.params.is_empty());

    let make = function(&symbols, "make");
    assert_eq!(make.scope, None);
    assert_eq!(make.params, vec!["int count"]);
}

#[test]
fn nested_namespace_names_the_scope() {
    let symbols = extract("g.cpp", "namespace a::b {\nvoid g() {}\n}\n");

    assert_eq!(symbols.namespaces.len(), 1);
    assert_eq!(symbols.namespaces[0].name, "a::b");
    assert_eq!(function(&symbols, "g").scope.as_deref(), Some("a::b"));
}
