use super::*;
use crate::outcome::FileChange;
use sb_core::Config;
use tempfile::{tempdir, TempDir};

const TEST_FIXTURE_JAVA: &str = r#"package org.operaton.bpm.qa.upgrade;

public class TestFixture {

  public static final String ENGINE_VERSION = "1.2.0";

  public static void main(String[] args) {
  }
}
"#;

fn project() -> (TempDir, Layout) {
    let dir = tempdir().unwrap();
    let layout = Layout::new(dir.path(), Config::default());
    (dir, layout)
}

fn seed_fixture(layout: &Layout, key: &str) -> PathBuf {
    let fixture = layout.fixture_dir(key);
    let java = fixture.join(layout.fixture_constant_file());
    fs::create_dir_all(java.parent().unwrap()).unwrap();
    fs::write(&java, TEST_FIXTURE_JAVA).unwrap();
    fs::create_dir_all(fixture.join("src/main/resources")).unwrap();
    fs::write(fixture.join("src/main/resources/process.bpmn"), "<definitions/>").unwrap();
    fs::write(fixture.join("pom.xml"), "<project/>").unwrap();
    fixture
}

#[test]
fn test_clone_copies_tree_and_rewrites_constant() {
    let (_dir, layout) = project();
    seed_fixture(&layout, "12");

    let outcome = FixtureCloner::new(&layout)
        .clone_fixture("12", "13", "1.2.0", "1.3.0")
        .unwrap();

    let target = layout.fixture_dir("13");
    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
    assert_eq!(outcome.changes[0], FileChange::Created(target.clone()));
    assert_eq!(
        fs::read_to_string(target.join("src/main/resources/process.bpmn")).unwrap(),
        "<definitions/>"
    );
    assert_eq!(
        fs::read_to_string(target.join("pom.xml")).unwrap(),
        "<project/>"
    );

    let java = fs::read_to_string(target.join(layout.fixture_constant_file())).unwrap();
    assert_eq!(java, TEST_FIXTURE_JAVA.replace("\"1.2.0\"", "\"1.3.0\""));

    // the source baseline is untouched
    let source_java =
        fs::read_to_string(layout.fixture_dir("12").join(layout.fixture_constant_file())).unwrap();
    assert_eq!(source_java, TEST_FIXTURE_JAVA);

    assert_eq!(outcome.reminders.len(), 1);
    assert!(outcome.reminders[0].contains("git add"));
    assert!(outcome.reminders[0].contains("test-fixture-13"));
}

#[test]
fn test_existing_destination_is_not_touched() {
    let (_dir, layout) = project();
    seed_fixture(&layout, "12");
    let target = layout.fixture_dir("13");
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("marker.txt"), "keep").unwrap();

    let outcome = FixtureCloner::new(&layout)
        .clone_fixture("12", "13", "1.2.0", "1.3.0")
        .unwrap();

    assert!(outcome.is_noop());
    assert!(matches!(
        outcome.warnings.as_slice(),
        [ArtifactWarning::FixtureTargetExists { .. }]
    ));
    let entries: Vec<_> = fs::read_dir(&target).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(fs::read_to_string(target.join("marker.txt")).unwrap(), "keep");
}

#[test]
fn test_missing_source_aborts() {
    let (_dir, layout) = project();

    let outcome = FixtureCloner::new(&layout)
        .clone_fixture("12", "13", "1.2.0", "1.3.0")
        .unwrap();

    assert!(outcome.is_noop());
    assert!(!layout.fixture_dir("13").exists());
    assert!(matches!(
        outcome.warnings.as_slice(),
        [ArtifactWarning::FixtureSourceMissing { .. }]
    ));
}

#[test]
fn test_missing_constant_file_still_copies() {
    let (_dir, layout) = project();
    let source = layout.fixture_dir("12");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("pom.xml"), "<project/>").unwrap();

    let outcome = FixtureCloner::new(&layout)
        .clone_fixture("12", "13", "1.2.0", "1.3.0")
        .unwrap();

    assert!(layout.fixture_dir("13").join("pom.xml").exists());
    assert!(matches!(
        outcome.warnings.as_slice(),
        [ArtifactWarning::FixtureConstantFileMissing { .. }]
    ));
}

#[test]
fn test_constant_file_found_after_package_move() {
    let (_dir, layout) = project();
    let source = layout.fixture_dir("12");
    let moved = source.join("src/main/java/org/example/TestFixture.java");
    fs::create_dir_all(moved.parent().unwrap()).unwrap();
    fs::write(&moved, TEST_FIXTURE_JAVA).unwrap();

    let outcome = FixtureCloner::new(&layout)
        .clone_fixture("12", "13", "1.2.0", "1.3.0")
        .unwrap();

    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
    let copied = layout
        .fixture_dir("13")
        .join("src/main/java/org/example/TestFixture.java");
    assert!(fs::read_to_string(copied).unwrap().contains("ENGINE_VERSION = \"1.3.0\""));
}

#[test]
fn test_unexpected_constant_value_is_a_warning() {
    let (_dir, layout) = project();
    seed_fixture(&layout, "12");

    let outcome = FixtureCloner::new(&layout)
        .clone_fixture("12", "13", "1.2.5", "1.3.0")
        .unwrap();

    match outcome.warnings.as_slice() {
        [ArtifactWarning::FixtureConstantNotFound {
            found, expected, ..
        }] => {
            assert_eq!(found.as_deref(), Some("1.2.0"));
            assert_eq!(expected, "1.2.5");
        }
        other => panic!("unexpected warnings: {other:?}"),
    }
    let java =
        fs::read_to_string(layout.fixture_dir("13").join(layout.fixture_constant_file())).unwrap();
    assert_eq!(java, TEST_FIXTURE_JAVA);
}

#[test]
fn test_rewrite_version_constant() {
    let rewritten =
        rewrite_version_constant(TEST_FIXTURE_JAVA, "ENGINE_VERSION", "1.2.0", "1.3.0").unwrap();
    assert!(rewritten.contains("public static final String ENGINE_VERSION = \"1.3.0\";"));
    assert_eq!(rewritten.len(), TEST_FIXTURE_JAVA.len());
}

#[test]
fn test_rewrite_version_constant_without_declaration() {
    assert_eq!(
        rewrite_version_constant("class A {}", "ENGINE_VERSION", "1.2.0", "1.3.0"),
        Err(None)
    );
}

#[test]
fn test_rewrite_version_constant_requires_whole_name() {
    let source = "String OLD_ENGINE_VERSION_X = \"1.2.0\";";
    assert_eq!(
        rewrite_version_constant(source, "ENGINE_VERSION", "1.2.0", "1.3.0"),
        Err(None)
    );
}

#[test]
fn test_rewrite_version_constant_skips_other_assignments() {
    let source = "\
String ENGINE_VERSION_OLD = \"1.1.0\";
String NAME = \"fixture\"; String ENGINE_VERSION = \"1.2.0\";
";
    let rewritten =
        rewrite_version_constant(source, "ENGINE_VERSION", "1.2.0", "1.3.0").unwrap();
    assert_eq!(
        rewritten,
        source.replace("ENGINE_VERSION = \"1.2.0\"", "ENGINE_VERSION = \"1.3.0\"")
    );
    assert!(rewritten.contains("ENGINE_VERSION_OLD = \"1.1.0\""));
}

#[test]
fn test_rewrite_version_constant_with_pattern_characters_in_name() {
    assert_eq!(
        rewrite_version_constant(TEST_FIXTURE_JAVA, "ENGINE.VERSION(", "1.2.0", "1.3.0"),
        Err(None)
    );
}

#[cfg(unix)]
#[test]
fn test_failed_copy_removes_partial_destination() {
    let (_dir, layout) = project();
    let source = seed_fixture(&layout, "12");
    std::os::unix::fs::symlink(source.join("missing.txt"), source.join("dangling.txt")).unwrap();

    let err = FixtureCloner::new(&layout)
        .clone_fixture("12", "13", "1.2.0", "1.3.0")
        .unwrap_err();

    assert!(matches!(err, ArtifactError::IoWithPath { .. }), "{err}");
    assert!(!layout.fixture_dir("13").exists());
    assert!(source.join(layout.fixture_constant_file()).is_file());

    // the next run starts from a clean slate instead of reporting a stale copy
    fs::remove_file(source.join("dangling.txt")).unwrap();
    let outcome = FixtureCloner::new(&layout)
        .clone_fixture("12", "13", "1.2.0", "1.3.0")
        .unwrap();
    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
    assert!(layout.fixture_dir("13").join("pom.xml").is_file());
}
