use cppgraph::config::AnalysisConfig;
use cppgraph::core::scanner::FileScanner;
use std::fs;
use std::path::Path;

fn touch<P: AsRef<Path>>(p: P) {
    fs::write(p, "// test").unwrap();
}

#[test]
fn scanner_filters_by_extension_and_excluded_dirs() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src/net")).unwrap();
    fs::create_dir_all(root.join("build/gen")).unwrap();
    fs::create_dir_all(root.join("node_modules")).unwrap();

    touch(root.join("src/main.cpp"));
    touch(root.join("src/net/Socket.H"));
    touch(root.join("src/net/Socket.cc"));
    touch(root.join("src/notes.txt")); // ignored
    touch(root.join("build/gen/config.h")); // excluded dir
    touch(root.join("node_modules/shim.c")); // excluded dir

    let scanner = FileScanner::new(&AnalysisConfig::default());
    let files = scanner.scan_directory(root).unwrap();

    let keys: Vec<&str> = files.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["src/main.cpp", "src/net/Socket.H", "src/net/Socket.cc"]
    );
}

#[test]
fn scanner_honours_configured_extensions() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    touch(root.join("a.cpp"));
    touch(root.join("b.h"));
    touch(root.join("c.ipp"));

    let config = AnalysisConfig {
        extensions: vec![".ipp".to_string(), "h".to_string()],
        ..AnalysisConfig::default()
    };
    let files = FileScanner::new(&config).scan_directory(root).unwrap();

    let keys: Vec<&str> = files.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, vec!["b.h", "c.ipp"]);
}

#[test]
fn excluded_name_only_applies_to_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src")).unwrap();
    touch(root.join("src/build.cpp"));

    let config = AnalysisConfig {
        exclude_dirs: vec!["build.cpp".to_string()],
        ..AnalysisConfig::default()
    };
    let files = FileScanner::new(&config).scan_directory(root).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].key, "src/build.cpp");
}
