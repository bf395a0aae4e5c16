//! Component-level tests across the public API: extraction, matching and
//! indexing behavior on realistic inputs.

mod support;

use jardiet::{ClassArtifact, ClassName, LibraryIndex, SourceArtifact, UnanimousMatcher};

use support::{class_bytes, make_jar};

#[test]
fn test_import_resolves_to_single_name() {
    let text = "import a.b.C;\n\npublic class App {}\n";
    let artifact = SourceArtifact::from_text(text, "App.java").unwrap();

    let deps = artifact.dependencies().unwrap();
    assert_eq!(deps.len(), 1);
    assert!(deps.contains(&ClassName::new("a.b.C").unwrap()));
}

#[test]
fn test_wildcard_import_is_rejected() {
    let text = "import a.b.*;\n\npublic class App {}\n";
    let artifact = SourceArtifact::from_text(text, "App.java").unwrap();
    assert!(artifact.dependencies().is_err());
}

#[test]
fn test_array_reference_resolves_to_element_class() {
    let bytes = class_bytes("app/Main", &["[Lcom/x/Y;"]);
    let artifact = ClassArtifact::from_bytes(bytes, "Main").unwrap();

    let deps = artifact.dependencies().unwrap();
    assert_eq!(deps.len(), 1);
    assert!(deps.contains(&ClassName::new("com.x.Y").unwrap()));
}

#[test]
fn test_extraction_never_reports_self_or_platform() {
    let bytes = class_bytes(
        "app/Main",
        &["app/Main", "java/lang/Object", "java/util/List", "com/acme/Widget"],
    );
    let artifact = ClassArtifact::from_bytes(bytes, "Main").unwrap();

    let deps = artifact.dependencies().unwrap();
    assert!(!deps.contains(&ClassName::new("app.Main").unwrap()));
    assert!(!deps.contains(&ClassName::new("java.lang.Object").unwrap()));
    assert!(!deps.contains(&ClassName::new("java.util.List").unwrap()));
    assert!(deps.contains(&ClassName::new("com.acme.Widget").unwrap()));
}

#[test]
fn test_index_spans_archives_and_reports_absence() {
    let dir = tempfile::tempdir().unwrap();
    let first = make_jar(&dir.path().join("first.jar"), &[("com/acme/Widget", &[])]);
    let second = make_jar(&dir.path().join("second.jar"), &[("org/other/Thing", &[])]);

    let mut index = LibraryIndex::new();
    index.index(&[first, second]).unwrap();

    // present only in the second archive
    assert!(index.contains(&ClassName::new("org.other.Thing").unwrap()));
    // never indexed
    assert!(!index.contains(&ClassName::new("com.acme.Gear").unwrap()));
    assert_eq!(index.size(), 2);
}

#[test]
fn test_index_get_fails_for_missing_name() {
    let dir = tempfile::tempdir().unwrap();
    let jar = make_jar(&dir.path().join("lib.jar"), &[("com/acme/Widget", &[])]);

    let mut index = LibraryIndex::new();
    index.index(&[jar]).unwrap();

    assert!(index.get(&ClassName::new("com.acme.Widget").unwrap()).is_ok());
    assert!(index.get(&ClassName::new("com.acme.Gear").unwrap()).is_err());
}

#[test]
fn test_matcher_needs_unanimous_agreement() {
    use jardiet::matcher::{QualifiedNameEquality, ShortNameVsFileName};

    // equality holds, the filename condition fails without an origin path
    let matcher = UnanimousMatcher::new(vec![
        Box::new(QualifiedNameEquality),
        Box::new(ShortNameVsFileName),
    ]);

    let artifact =
        ClassArtifact::from_bytes(class_bytes("com/acme/Widget", &[]), "Widget").unwrap();
    let name = ClassName::new("com.acme.Widget").unwrap();
    assert!(!matcher.matches(&name, &artifact));

    // with only the equality condition the same pair matches
    let matcher = UnanimousMatcher::new(vec![Box::new(QualifiedNameEquality)]);
    assert!(matcher.matches(&name, &artifact));
}

#[test]
fn test_inner_class_round_trips_through_index() {
    let dir = tempfile::tempdir().unwrap();
    let jar = make_jar(
        &dir.path().join("lib.jar"),
        &[("com/acme/Outer$Inner", &[])],
    );

    let mut index = LibraryIndex::new();
    index.index(&[jar]).unwrap();

    let name = ClassName::new("com.acme.Outer$Inner").unwrap();
    assert!(index.contains(&name));
    assert_eq!(index.get(&name).unwrap().name(), &name);
}
