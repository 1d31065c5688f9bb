use cppgraph::config::{AnalysisConfig, CONFIG_FILE_NAME};
use cppgraph::core::{CodebaseAnalyzer, DependencyReason, GraphAnalyzer};
use cppgraph::formatters::GraphJsonFormatter;
use std::fs;
use std::path::Path;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn small_project(root: &Path) {
    write(root, "include/A.h", "#pragma once\nclass Widget {};\n");
    write(root, "src/B.cpp", "#include \"A.h\"\nWidget doThing();\n");
    write(
        root,
        "src/math.h",
        "#pragma once\n#include \"vector.h\"\nint add(int a, int b);\n",
    );
    write(
        root,
        "src/vector.h",
        "#pragma once\n#include \"math.h\"\nstruct Vec2 { float x; float y; };\n",
    );
    write(
        root,
        "src/math.cpp",
        "int add(int a, int b) {\n    return a + b;\n}\n",
    );
    write(
        root,
        "src/main.cpp",
        "#include <cstdio>\n\nint main() {\n    return add(1, 2);\n}\n",
    );
    write(root, "build/generated.h", "class Generated {};\n");
}

#[test]
fn analyzer_end_to_end_on_small_project() {
    let dir = tempfile::TempDir::new().unwrap();
    small_project(dir.path());

    let analyzer = CodebaseAnalyzer::new(&AnalysisConfig::default()).unwrap();
    let graph = analyzer.analyze(dir.path()).unwrap();

    let files: Vec<&str> = graph.files().map(|(path, _)| path).collect();
    assert_eq!(
        files,
        vec![
            "include/A.h",
            "src/B.cpp",
            "src/main.cpp",
            "src/math.cpp",
            "src/math.h",
            "src/vector.h",
        ]
    );

    let a = graph.file("include/A.h").unwrap();
    assert_eq!(a.classes.len(), 1);
    assert_eq!(a.classes[0].name, "Widget");

    let b_edges: Vec<_> = graph
        .dependencies()
        .iter()
        .filter(|dep| dep.source == "src/B.cpp")
        .collect();
    assert_eq!(b_edges.len(), 1);
    assert_eq!(b_edges[0].target, "include/A.h");
    assert_eq!(b_edges[0].reason, DependencyReason::Include);
    assert_eq!(b_edges[0].line, Some(1));

    let main_edges: Vec<_> = graph
        .dependencies()
        .iter()
        .filter(|dep| dep.source == "src/main.cpp")
        .map(|dep| (dep.target.as_str(), dep.reason))
        .collect();
    assert_eq!(main_edges, vec![("src/math.cpp", DependencyReason::Call)]);

    let cycles = GraphAnalyzer::new(&graph).find_cycles(&AnalysisConfig::default().cycles);
    assert_eq!(cycles.cycles, vec![vec!["src/math.h", "src/vector.h"]]);
}

#[test]
fn analyzer_writes_export_document() {
    let dir = tempfile::TempDir::new().unwrap();
    small_project(dir.path());

    let analyzer = CodebaseAnalyzer::new(&AnalysisConfig::default()).unwrap();
    let graph = analyzer.analyze(dir.path()).unwrap();

    let out = dir.path().join("dependency_graph.json");
    GraphJsonFormatter::new().format_to_file(&graph, &out).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["metadata"]["total_files"], 6);
    assert_eq!(value["metadata"]["circular_dependencies"], 1);
    assert_eq!(
        value["metadata"]["total_dependencies"],
        value["links"].as_array().unwrap().len()
    );
}

#[test]
fn config_file_controls_scan() {
    let dir = tempfile::TempDir::new().unwrap();
    small_project(dir.path());
    write(
        dir.path(),
        CONFIG_FILE_NAME,
        "exclude_dirs = [\"include\"]\nextensions = [\"cpp\", \"h\"]\n",
    );

    let config = AnalysisConfig::load(dir.path());
    let analyzer = CodebaseAnalyzer::new(&config).unwrap();
    let graph = analyzer.analyze(dir.path()).unwrap();

    assert!(graph.file("include/A.h").is_none());
    // `build` is no longer excluded once the list is overridden.
    assert!(graph.file("build/generated.h").is_some());
    assert!(graph
        .dependencies()
        .iter()
        .all(|dep| dep.source != "src/B.cpp"));
}

#[test]
fn unreadable_bytes_do_not_abort_the_batch() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "ok.cpp", "int ok() { return 1; }\n");
    fs::write(dir.path().join("binary.h"), [0xff, 0xfe, 0x00, 0x9c]).unwrap();

    let analyzer = CodebaseAnalyzer::new(&AnalysisConfig::default()).unwrap();
    let graph = analyzer.analyze(dir.path()).unwrap();

    assert_eq!(graph.file_count(), 2);
    assert_eq!(graph.file("ok.cpp").unwrap().functions[0].name, "ok");
    assert!(graph.file("binary.h").unwrap().functions.is_empty());
}

#[test]
fn single_file_analysis() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "solo.cpp", "#include <map>\nstatic void tick() {}\n");

    let analyzer = CodebaseAnalyzer::new(&AnalysisConfig::default()).unwrap();
    let symbols = analyzer.analyze_file(&dir.path().join("solo.cpp")).unwrap();

    assert_eq!(symbols.includes.len(), 1);
    assert!(symbols.includes[0].is_system);
    assert_eq!(symbols.functions.len(), 1);
    assert!(symbols.functions[0].is_static);
    assert!(symbols.file_path.ends_with("solo.cpp"));

    assert!(analyzer.analyze_file(&dir.path().join("absent.cpp")).is_err());
}
