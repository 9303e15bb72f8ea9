use elftai_core::{CatalogConfig, ErrorKind, TitleCatalog};
use std::path::PathBuf;

#[test]
fn config_deserializes_with_optional_backup() {
    let full: CatalogConfig = serde_json::from_value(serde_json::json!({
        "primary_path": "/data/titles.csv",
        "backup_path": "/data/titles.bak"
    }))
    .unwrap();
    assert_eq!(full.primary_path, PathBuf::from("/data/titles.csv"));
    assert_eq!(full.backup_path, Some(PathBuf::from("/data/titles.bak")));

    let minimal: CatalogConfig =
        serde_json::from_value(serde_json::json!({ "primary_path": "titles.csv" })).unwrap();
    assert_eq!(minimal, CatalogConfig::new("titles.csv"));
}

#[test]
fn default_backup_appends_extension() {
    let config = CatalogConfig::new("/data/titles.csv").with_default_backup();
    assert_eq!(
        config.backup_path,
        Some(PathBuf::from("/data/titles.csv.bak"))
    );
}

#[test]
fn validate_rejects_empty_and_identical_paths() {
    let empty = CatalogConfig::new("");
    assert_eq!(empty.validate().unwrap_err().kind(), ErrorKind::InvalidArgument);

    let same = CatalogConfig::new("titles.csv").with_backup("titles.csv");
    assert!(same
        .validate()
        .unwrap_err()
        .to_string()
        .contains("must differ"));

    let blank_backup = CatalogConfig::new("titles.csv").with_backup("");
    assert!(blank_backup.validate().is_err());
}

#[test]
fn open_with_config_uses_configured_paths() {
    let dir = tempfile::tempdir().unwrap();
    let config = CatalogConfig::new(dir.path().join("titles.csv")).with_default_backup();

    let mut catalog = TitleCatalog::open_with_config(&config).unwrap();
    assert_eq!(catalog.primary_path(), config.primary_path.as_path());
    assert_eq!(catalog.backup_path(), config.backup_path.as_deref());

    catalog.add_node("Foo").unwrap();
    catalog.close().unwrap();
    assert!(dir.path().join("titles.csv.bak").exists());
}

#[test]
fn open_with_invalid_config_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("titles.csv");
    let config = CatalogConfig::new(&path).with_backup(&path);

    let err = TitleCatalog::open_with_config(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(!path.exists());
}
