use std::io::Write;

use fcamap_matching::{ConfigError, MatchConfig};

#[test]
fn loads_configuration_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "refine_classes = true").unwrap();
    writeln!(file, "match_instances = false").unwrap();

    let config = MatchConfig::load(file.path()).unwrap();
    assert!(config.refine_classes);
    assert!(!config.match_instances);
    assert!(config.additional_properties);
}

#[test]
fn missing_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = MatchConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}
