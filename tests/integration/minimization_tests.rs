//! End-to-end tests of the minimization strategies.
//!
//! Both strategies run against the same synthetic sources and jars; the
//! closure they compute and the jar that gets packaged are checked here.

mod support;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use jardiet::bundle::list_entries;
use jardiet::model::CLASS_EXTENSION;
use jardiet::{
    ClassArtifact, ClassName, ConcurrentSourceResolver, Files, IndexedStrategy, JarExploder,
    JarMaker, LinearStrategy, MinimizationStrategy, MinimizeOptions, SourceArtifact,
    UnanimousMatcher,
};

use support::{make_jar, write_source};

fn resolver() -> ConcurrentSourceResolver {
    let pool = Arc::new(
        rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .build()
            .unwrap(),
    );
    ConcurrentSourceResolver::new(pool).with_timeout(Duration::from_secs(30))
}

fn source(text: &str) -> SourceArtifact {
    SourceArtifact::from_text(text, "test").unwrap()
}

/// A library spanning two jars, with a cross-jar reference and dead weight.
fn fixture_jars(dir: &std::path::Path) -> Vec<PathBuf> {
    let core = make_jar(
        &dir.join("core.jar"),
        &[
            ("com/acme/Widget", &["com/acme/Gear", "java/lang/Object"] as &[&str]),
            ("com/acme/Gear", &["org/vendor/Bolt"]),
            ("com/acme/Unused", &["com/acme/AlsoUnused"]),
            ("com/acme/AlsoUnused", &[]),
        ],
    );
    let vendor = make_jar(
        &dir.join("vendor.jar"),
        &[
            ("org/vendor/Bolt", &[] as &[&str]),
            ("org/vendor/Nut", &[]),
        ],
    );
    vec![core, vendor]
}

fn fixture_sources() -> Vec<SourceArtifact> {
    vec![source(
        "package app;\n\nimport com.acme.Widget;\n\npublic class App {\n    Widget widget;\n}\n",
    )]
}

fn expected_names() -> BTreeSet<ClassName> {
    ["com.acme.Widget", "com.acme.Gear", "org.vendor.Bolt"]
        .into_iter()
        .map(|name| ClassName::new(name).unwrap())
        .collect()
}

/// Materialize the jars the way the CLI does for the linear strategy.
fn explode_to_artifacts(dir: &std::path::Path, jars: &[PathBuf]) -> Vec<ClassArtifact> {
    let exploder = JarExploder::new(dir.join("work"));
    let exploded = exploder.explode_all(jars).unwrap();

    let mut artifacts = Vec::new();
    for jar in &exploded {
        for path in Files::under(&jar.extracted_to)
            .with_extension(CLASS_EXTENSION)
            .list()
        {
            artifacts.push(ClassArtifact::from_file(&path).unwrap());
        }
    }
    artifacts
}

#[test]
fn test_indexed_strategy_computes_closure() {
    let dir = tempfile::tempdir().unwrap();
    let jars = fixture_jars(dir.path());

    let result = IndexedStrategy::new(resolver())
        .minimize(fixture_sources(), jars)
        .unwrap();

    assert_eq!(result.names(), expected_names());
    assert_eq!(result.source_count(), 1);
    assert_eq!(result.candidates_before(), 6);
    assert_eq!(result.candidates_after(), 3);
}

#[test]
fn test_linear_strategy_computes_closure() {
    let dir = tempfile::tempdir().unwrap();
    let jars = fixture_jars(dir.path());
    let candidates = explode_to_artifacts(dir.path(), &jars);

    let result = LinearStrategy::new(UnanimousMatcher::standard(), resolver())
        .minimize(fixture_sources(), candidates)
        .unwrap();

    assert_eq!(result.names(), expected_names());
}

#[test]
fn test_strategies_agree_on_name_set() {
    let dir = tempfile::tempdir().unwrap();
    let jars = fixture_jars(dir.path());

    let indexed = IndexedStrategy::new(resolver())
        .minimize(fixture_sources(), jars.clone())
        .unwrap();

    let candidates = explode_to_artifacts(dir.path(), &jars);
    let linear = LinearStrategy::new(UnanimousMatcher::standard(), resolver())
        .minimize(fixture_sources(), candidates)
        .unwrap();

    assert_eq!(indexed.names(), linear.names());
}

#[test]
fn test_empty_sources_give_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let jars = fixture_jars(dir.path());

    let indexed = IndexedStrategy::new(resolver())
        .minimize(Vec::new(), jars.clone())
        .unwrap();
    assert!(indexed.artifacts().is_empty());

    let candidates = explode_to_artifacts(dir.path(), &jars);
    let linear = LinearStrategy::new(UnanimousMatcher::standard(), resolver())
        .minimize(Vec::new(), candidates)
        .unwrap();
    assert!(linear.artifacts().is_empty());
}

#[test]
fn test_linear_fixed_point_on_own_output() {
    let dir = tempfile::tempdir().unwrap();
    let jars = fixture_jars(dir.path());
    let candidates = explode_to_artifacts(dir.path(), &jars);

    let first = LinearStrategy::new(UnanimousMatcher::standard(), resolver())
        .minimize(fixture_sources(), candidates)
        .unwrap();

    let again = LinearStrategy::new(UnanimousMatcher::standard(), resolver())
        .minimize(
            fixture_sources(),
            first.artifacts().iter().cloned().collect(),
        )
        .unwrap();

    assert_eq!(first.names(), again.names());
}

#[test]
fn test_forced_class_pulls_its_dependencies() {
    let dir = tempfile::tempdir().unwrap();
    let jars = fixture_jars(dir.path());

    let options =
        MinimizeOptions::default().force_class(ClassName::new("com.acme.Unused").unwrap());
    let result = IndexedStrategy::new(resolver())
        .with_options(options)
        .minimize(fixture_sources(), jars)
        .unwrap();

    let names = result.names();
    assert!(names.contains(&ClassName::new("com.acme.Unused").unwrap()));
    assert!(names.contains(&ClassName::new("com.acme.AlsoUnused").unwrap()));
    assert_eq!(names.len(), 5);
}

#[test]
fn test_missing_forced_class_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    let jars = fixture_jars(dir.path());

    let options =
        MinimizeOptions::default().force_class(ClassName::new("no.such.Thing").unwrap());
    let result = IndexedStrategy::new(resolver())
        .with_options(options)
        .minimize(fixture_sources(), jars);
    assert!(result.is_err());
}

#[test]
fn test_packaged_jar_holds_exactly_the_closure() {
    let dir = tempfile::tempdir().unwrap();
    let jars = fixture_jars(dir.path());

    let result = IndexedStrategy::new(resolver())
        .minimize(fixture_sources(), jars)
        .unwrap();

    let output = dir.path().join("minimized.jar");
    JarMaker::new(&output).make(result.artifacts()).unwrap();

    let entries = list_entries(&output).unwrap();
    let class_paths: BTreeSet<String> = entries
        .iter()
        .filter(|entry| !entry.is_dir)
        .map(|entry| entry.path.clone())
        .collect();

    let expected: BTreeSet<String> = expected_names()
        .iter()
        .map(|name| name.to_entry_path())
        .collect();
    assert_eq!(class_paths, expected);
}

#[test]
fn test_sources_discovered_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let jars = fixture_jars(dir.path());

    let src_dir = dir.path().join("src");
    write_source(
        &src_dir,
        "App.java",
        "package app;\n\nimport com.acme.Widget;\n\npublic class App {}\n",
    );

    let sources: Vec<SourceArtifact> = Files::under(&src_dir)
        .with_extension("java")
        .list()
        .iter()
        .map(|path| SourceArtifact::from_file(path).unwrap())
        .collect();

    let result = IndexedStrategy::new(resolver())
        .minimize(sources, jars)
        .unwrap();
    assert_eq!(result.names(), expected_names());
}
