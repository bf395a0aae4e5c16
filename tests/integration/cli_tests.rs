//! CLI tests driving the compiled binary end to end.

mod support;

use assert_cmd::Command;
use predicates::prelude::*;

use support::{make_jar, write_source};

fn cmd() -> Command {
    Command::cargo_bin("jardiet").unwrap()
}

/// A project directory with one source importing one of three lib classes.
fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();

    write_source(
        &dir.path().join("src"),
        "App.java",
        "package app;\n\nimport com.acme.Widget;\n\npublic class App {}\n",
    );

    let lib_dir = dir.path().join("lib");
    std::fs::create_dir_all(&lib_dir).unwrap();
    make_jar(
        &lib_dir.join("core.jar"),
        &[
            ("com/acme/Widget", &["com/acme/Gear"] as &[&str]),
            ("com/acme/Gear", &[]),
            ("com/acme/Unused", &[]),
        ],
    );

    dir
}

#[test]
fn test_help_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("jardiet"))
        .stdout(predicate::str::contains("--strategy"));
}

#[test]
fn test_indexed_run_writes_output_jar() {
    let project = project();
    let output = project.path().join("out/minimized.jar");

    cmd()
        .current_dir(project.path())
        .args(["src", "--libs", "lib", "--quiet"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert!(output.is_file());
}

#[test]
fn test_linear_run_matches_indexed_run() {
    let project = project();
    let indexed_out = project.path().join("indexed.jar");
    let linear_out = project.path().join("linear.jar");

    cmd()
        .current_dir(project.path())
        .args(["src", "--libs", "lib", "--quiet", "--strategy", "indexed"])
        .arg("--output")
        .arg(&indexed_out)
        .assert()
        .success();

    cmd()
        .current_dir(project.path())
        .args(["src", "--libs", "lib", "--quiet", "--strategy", "linear"])
        .arg("--work-dir")
        .arg(project.path().join("work"))
        .arg("--output")
        .arg(&linear_out)
        .assert()
        .success();

    let indexed_entries = jar_class_entries(&indexed_out);
    let linear_entries = jar_class_entries(&linear_out);
    assert_eq!(indexed_entries, linear_entries);
    assert_eq!(indexed_entries.len(), 2);
}

#[test]
fn test_json_report_written_to_file() {
    let project = project();
    let output = project.path().join("minimized.jar");
    let report = project.path().join("report.json");

    cmd()
        .current_dir(project.path())
        .args(["src", "--libs", "lib", "--format", "json"])
        .arg("--output")
        .arg(&output)
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(parsed["candidates_after"], 2);
    assert!(parsed["classes"]
        .as_array()
        .unwrap()
        .iter()
        .any(|name| name == "com.acme.Widget"));
}

#[test]
fn test_missing_forced_include_fails_the_run() {
    let project = project();

    cmd()
        .current_dir(project.path())
        .args([
            "src",
            "--libs",
            "lib",
            "--quiet",
            "--force-include",
            "no.such.Thing",
        ])
        .assert()
        .failure();
}

#[test]
fn test_invalid_strategy_is_rejected() {
    cmd()
        .args(["src", "--strategy", "quantum"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

fn jar_class_entries(path: &std::path::Path) -> Vec<String> {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let entry = archive.by_index(i).unwrap();
        if entry.name().ends_with(".class") {
            entries.push(entry.name().to_string());
        }
    }
    entries.sort();
    entries
}
