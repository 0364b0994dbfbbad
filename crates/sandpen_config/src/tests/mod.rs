//! Tests for loading and saving `sandpen.json`

use camino::{Utf8Path, Utf8PathBuf};

use crate::{Config, DEFAULT_PROJECT_FILE, GeneratorConfig};

fn temp_path(dir: &tempfile::TempDir, name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("Temp dir should be UTF-8")
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = temp_path(&dir, "sandpen.json");

    let err = Config::load(&path).expect_err("Missing config should fail");
    assert!(
        err.to_string().contains("sandpen init"),
        "Error should point at init, got: {err}"
    );
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = temp_path(&dir, "nested/sandpen.json");

    let mut cfg = Config::default().with_path(&path);
    cfg.name = "demo".into();
    cfg.server.port = 9000;
    cfg.debounce_ms = 250;
    cfg.save().expect("Should save config");

    let loaded = Config::load(&path).expect("Should load saved config");
    assert_eq!(loaded, cfg);
    assert_eq!(loaded.path(), path);
}

#[test]
fn test_partial_config_uses_defaults() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = temp_path(&dir, "sandpen.json");
    std::fs::write(&path, r#"{"name": "tiny", "server": {"port": 3000}}"#)
        .expect("Should write config");

    let cfg = Config::load(&path).expect("Partial config should load");
    assert_eq!(cfg.name, "tiny");
    assert_eq!(cfg.server.port, 3000);
    assert_eq!(cfg.server.host, "127.0.0.1");
    assert_eq!(cfg.debounce_ms, 500);
    assert_eq!(cfg.generator, GeneratorConfig::default());
}

#[test]
fn test_invalid_json_fails() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = temp_path(&dir, "sandpen.json");
    std::fs::write(&path, "{ not json").expect("Should write config");

    let err = Config::load(&path).expect_err("Invalid config should fail");
    assert!(err.to_string().contains("Failed to parse"), "Got: {err}");
}

#[test]
fn test_project_path_is_relative_to_config() {
    let cfg = Config::default().with_path(Utf8Path::new("some/dir/sandpen.json"));
    assert_eq!(
        cfg.project_path(),
        Utf8PathBuf::from("some/dir").join(DEFAULT_PROJECT_FILE)
    );

    let cfg = Config::default();
    assert_eq!(cfg.project_path(), Utf8PathBuf::from(DEFAULT_PROJECT_FILE));
}

#[test]
fn test_path_is_not_serialized() {
    let cfg = Config::default().with_path(Utf8Path::new("elsewhere/sandpen.json"));
    let json = serde_json::to_string(&cfg).expect("Should serialize");
    assert!(!json.contains("elsewhere"));
}
