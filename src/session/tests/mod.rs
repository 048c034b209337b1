//! session module tests

use super::*;
use crate::unsupported_features::UnsupportedConstruct;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn session(src: &Path, dest: &Path, direction: Direction) -> TranslationSession {
    let mut config = SessionConfig::new(src, dest);
    config.direction = direction;
    TranslationSession::new(config).unwrap()
}

#[test]
fn test_missing_source_root() {
    let tmp = TempDir::new().unwrap();
    let config = SessionConfig::new(tmp.path().join("nowhere"), tmp.path().join("out"));
    match TranslationSession::new(config) {
        Err(TranspileError::SourceRootMissing(path)) => {
            assert_eq!(path, tmp.path().join("nowhere"))
        }
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("session started without a source root"),
    }
}

#[test]
fn test_source_files_skip_hidden_testdata_and_tests() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path();
    write(src, "main.go", "package main\n");
    write(src, "main_test.go", "package main\n");
    write(src, "pkg/util.go", "package pkg\n");
    write(src, "testdata/fixture.go", "package fixture\n");
    write(src, ".git/hooks/x.go", "package x\n");
    write(src, "App.java", "class App {}\n");
    write(src, "AppTest.java", "class AppTest {}\n");
    write(src, "shape_test.cpp", "int x;\n");

    let s = session(src, &tmp.path().join("out"), Direction::Auto);
    assert_eq!(
        s.source_files(),
        vec![
            PathBuf::from("App.java"),
            PathBuf::from("main.go"),
            PathBuf::from("pkg/util.go"),
        ]
    );
}

#[test]
fn test_include_tests() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "main_test.go", "package main\n");
    let mut config = SessionConfig::new(tmp.path(), tmp.path().join("out"));
    config.skip_tests = false;
    let s = TranslationSession::new(config).unwrap();
    assert_eq!(s.source_files(), vec![PathBuf::from("main_test.go")]);
}

#[test]
fn test_output_inside_source_is_not_walked() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path();
    write(src, "a.go", "package main\n");
    write(src, "out/transpiled/A.java", "class A {}\n");

    let s = session(src, &src.join("out"), Direction::Auto);
    assert_eq!(s.source_files(), vec![PathBuf::from("a.go")]);
}

#[test]
fn test_is_test_file() {
    assert!(is_test_file(Path::new("x/server_test.go")));
    assert!(is_test_file(Path::new("BankTest.java")));
    assert!(is_test_file(Path::new("BankTests.java")));
    assert!(is_test_file(Path::new("list_test.hpp")));
    assert!(!is_test_file(Path::new("server.go")));
    assert!(!is_test_file(Path::new("Testing.java")));
    assert!(!is_test_file(Path::new("README")));
}

#[test]
fn test_direction_selects_pairs() {
    let tmp = TempDir::new().unwrap();
    let forward = session(tmp.path(), tmp.path(), Direction::Forward);
    assert!(forward.pair_for(Path::new("a.go")).is_some());
    assert!(forward.pair_for(Path::new("a.cc")).is_some());
    assert!(forward.pair_for(Path::new("A.java")).is_none());

    let reverse = session(tmp.path(), tmp.path(), Direction::Reverse);
    assert!(reverse.pair_for(Path::new("a.go")).is_none());
    assert_eq!(
        reverse.pair_for(Path::new("A.java")).map(|p| p.name()),
        Some("java-cpp")
    );
}

#[test]
fn test_run_writes_outputs_and_folds_stats() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    let dest = tmp.path().join("out");
    write(
        &src,
        "geo/point.go",
        "package geo\n\ntype Point struct {\n\tX, Y int\n}\n\nfunc Origin() Point {\n\treturn Point{}\n}\n",
    );
    write(&src, "notes.txt", "not code\n");

    let report = session(&src, &dest, Direction::Forward).run();
    assert_eq!(report.translated(), 1);
    assert_eq!(report.failed(), 0);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.stats.files_converted, 1);
    assert_eq!(report.stats.structs_found, 1);
    assert_eq!(report.stats.functions_found, 1);

    let out = dest.join("transpiled/geo/Point.java");
    assert_eq!(report.files[0].outputs, vec![out.clone()]);
    let java = fs::read_to_string(out).unwrap();
    assert!(java.starts_with("package transpiled.geo;"));
}

#[test]
fn test_check_mode_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    let dest = tmp.path().join("out");
    write(&src, "main.go", "package main\n\nfunc main() {\n}\n");

    let mut config = SessionConfig::new(&src, &dest);
    config.check = true;
    let report = TranslationSession::new(config).unwrap().run();
    assert_eq!(report.translated(), 1);
    assert!(report.check);
    assert!(!dest.exists());
}

#[test]
fn test_invalid_utf8_is_recorded_not_fatal() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("bad.go"), [0x66, 0x75, 0xff, 0xfe]).unwrap();
    write(&src, "good.go", "package main\n");

    let report = session(&src, &tmp.path().join("out"), Direction::Auto).run();
    assert_eq!(report.failed(), 1);
    assert_eq!(report.translated(), 1);
    assert_eq!(report.files[0].status, FileStatus::Failed);
    assert_eq!(report.diagnostics.count(codes::DECODE_ERROR), 1);
}

#[test]
fn test_output_collision_warns() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    // both map to Shape.java
    write(&src, "shape.h", "struct Shape {\n    int sides;\n};\n");
    write(&src, "shape.cpp", "int area() {\n    return 0;\n}\n");

    let report = session(&src, &tmp.path().join("out"), Direction::Forward).run();
    assert_eq!(report.translated(), 2);
    assert_eq!(report.diagnostics.count(codes::OUTPUT_COLLISION), 1);
}

#[test]
fn test_guard_registry_is_respected() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    write(&src, "main.go", "package main\n\nfunc main() {\n\tgo work()\n}\n");

    let mut enabled: HashSet<UnsupportedConstruct> = UnsupportedConstruct::ALL.into_iter().collect();
    enabled.remove(&UnsupportedConstruct::Goroutine);
    let guard = UnsupportedConstructGuard::new(enabled);
    let mut config = SessionConfig::new(&src, tmp.path().join("out"));
    config.check = true;
    let report = TranslationSession::new(config).unwrap().with_guard(guard).run();
    assert_eq!(report.diagnostics.count(codes::UNSUPPORTED), 0);
}

#[test]
fn test_report_json() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    write(&src, "Main.java", "public class Main {\n}\n");
    let report = session(&src, &tmp.path().join("out"), Direction::Reverse).run();

    let path = tmp.path().join("report.json");
    report.write_json(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(value["direction"], "reverse");
    assert_eq!(value["stats"]["files_converted"], 1);
    assert_eq!(value["files"][0]["status"], "translated");
    assert_eq!(value["files"][0]["pair"], "java-cpp");
}
