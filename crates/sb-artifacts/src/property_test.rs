use super::*;
use std::fs;
use tempfile::tempdir;

const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <!-- database schema versions -->
  <modelVersion>4.0.0</modelVersion>
  <version>1.2.0-SNAPSHOT</version>
  <properties>
    <operaton.version.current>1.2.0</operaton.version.current>
    <operaton.version.previous>
      1.1.0
    </operaton.version.previous>
    <operaton.version.old/>
    <note>a &amp; b</note>
  </properties>
  <profiles>
    <profile>
      <properties>
        <shadowed>inner</shadowed>
      </properties>
    </profile>
  </profiles>
</project>
"#;

fn document() -> PropertyDocument {
    PropertyDocument::from_string("pom.xml", POM.to_string())
}

#[test]
fn test_get_property() {
    let doc = document();
    assert_eq!(doc.get("operaton.version.current").unwrap(), "1.2.0");
}

#[test]
fn test_get_property_trims_whitespace() {
    assert_eq!(document().get("operaton.version.previous").unwrap(), "1.1.0");
}

#[test]
fn test_get_property_unescapes_entities() {
    assert_eq!(document().get("note").unwrap(), "a & b");
}

#[test]
fn test_get_self_closing_property_is_empty() {
    assert_eq!(document().get("operaton.version.old").unwrap(), "");
}

#[test]
fn test_get_ignores_elements_outside_properties() {
    let err = document().get("modelVersion").unwrap_err();
    assert!(matches!(err, ArtifactError::PropertyNotFound { .. }));
}

#[test]
fn test_get_nested_properties_block() {
    // Any <properties> parent qualifies, the first match wins
    assert_eq!(document().get("shadowed").unwrap(), "inner");
}

#[test]
fn test_get_missing_property() {
    match document().get("does.not.exist").unwrap_err() {
        ArtifactError::PropertyNotFound { key, path } => {
            assert_eq!(key, "does.not.exist");
            assert_eq!(path, "pom.xml");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_set_changes_only_the_value() {
    let mut doc = document();
    doc.set("operaton.version.current", "1.3.0").unwrap();
    let expected = POM.replace(
        "<operaton.version.current>1.2.0</operaton.version.current>",
        "<operaton.version.current>1.3.0</operaton.version.current>",
    );
    assert_eq!(doc.content(), expected);
}

#[test]
fn test_set_replaces_padded_value() {
    let mut doc = document();
    doc.set("operaton.version.previous", "1.2.0").unwrap();
    assert!(doc
        .content()
        .contains("<operaton.version.previous>1.2.0</operaton.version.previous>"));
    assert_eq!(doc.get("operaton.version.previous").unwrap(), "1.2.0");
}

#[test]
fn test_set_expands_self_closing_property() {
    let mut doc = document();
    doc.set("operaton.version.old", "1.2.0").unwrap();
    assert!(doc
        .content()
        .contains("    <operaton.version.old>1.2.0</operaton.version.old>\n"));
    assert_eq!(doc.get("operaton.version.old").unwrap(), "1.2.0");
}

#[test]
fn test_set_escapes_value() {
    let mut doc = document();
    doc.set("note", "<x>").unwrap();
    assert!(doc.content().contains("<note>&lt;x&gt;</note>"));
    assert_eq!(doc.get("note").unwrap(), "<x>");
}

#[test]
fn test_set_missing_property_leaves_content() {
    let mut doc = document();
    assert!(doc.set("missing", "1").is_err());
    assert_eq!(doc.content(), POM);
}

#[test]
fn test_set_preserves_declaration_and_comments() {
    let mut doc = document();
    doc.set("operaton.version.current", "2.0.0").unwrap();
    assert!(doc
        .content()
        .starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(doc.content().contains("<!-- database schema versions -->"));
}

#[test]
fn test_malformed_document() {
    let doc = PropertyDocument::from_string(
        "broken.xml",
        "<project><properties><a>1</b></properties></project>".to_string(),
    );
    assert!(matches!(
        doc.get("a").unwrap_err(),
        ArtifactError::XmlParse { .. }
    ));
}

#[test]
fn test_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pom.xml");
    fs::write(&path, POM).unwrap();

    set_property(&path, "operaton.version.current", "1.3.0").unwrap();
    assert_eq!(
        get_property(&path, "operaton.version.current").unwrap(),
        "1.3.0"
    );
    assert_eq!(
        get_property(&path, "operaton.version.previous").unwrap(),
        "1.1.0"
    );
}

#[test]
fn test_open_missing_document() {
    let dir = tempdir().unwrap();
    let err = PropertyDocument::open(&dir.path().join("absent.xml")).unwrap_err();
    assert!(matches!(err, ArtifactError::DocumentNotFound { .. }));
}
