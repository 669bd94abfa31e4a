//! Loading ontology documents from disk.

use std::io::Write;

use fcamap_model::{ModelError, Ontology, PropertyKind};

const CONFERENCE: &str = r#"{
  "iri": "http://conference",
  "classes": [
    { "id": "http://conference#Paper", "labels": ["Paper"] },
    { "id": "http://conference#Conference_member", "subclass_of": ["http://conference#Person"] }
  ],
  "properties": [
    { "id": "http://conference#has_title", "kind": "datatype",
      "domain": "http://conference#Paper",
      "range": "http://www.w3.org/2001/XMLSchema#string" },
    { "id": "http://conference#has_author", "kind": "object",
      "domain": "http://conference#Paper", "range": "http://conference#Person" }
  ],
  "individuals": [
    { "id": "http://conference#p1", "types": ["http://conference#Paper"] }
  ]
}"#;

#[test]
fn load_reads_a_json_document() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFERENCE.as_bytes()).unwrap();

    let ontology = Ontology::load(file.path()).unwrap();
    assert_eq!(ontology.iri, "http://conference");
    assert_eq!(ontology.classes.len(), 2);
    assert_eq!(ontology.properties_of_kind(PropertyKind::Datatype).count(), 1);
    assert_eq!(ontology.properties_of_kind(PropertyKind::Object).count(), 1);
    assert_eq!(ontology.types_of("http://conference#p1"), ["http://conference#Paper"]);
}

#[test]
fn missing_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = Ontology::load(&path).unwrap_err();
    assert!(matches!(err, ModelError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_file_reports_its_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[1, 2").unwrap();

    let err = Ontology::load(file.path()).unwrap_err();
    assert!(matches!(err, ModelError::Parse { .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}
