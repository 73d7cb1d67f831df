use crate::conf::{ConfigError, ConfigOverrides, MonitorConfig, load_config};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn empty_file_uses_defaults() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logwatch.toml");
    fs::write(&path, "").unwrap();

    // Act
    let cfg = load_config(&path).unwrap();

    // Assert
    assert_eq!(
        cfg,
        MonitorConfig {
            bucket_size_seconds: 10,
            window_size_seconds: 120,
            alert_threshold: 10.0,
            grace_seconds: 30,
        }
    );
}

#[test]
fn file_values_replace_defaults() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logwatch.toml");
    fs::write(
        &path,
        r#"
bucket_size_seconds = 5
window_size_seconds = 60
alert_threshold = 2.5
"#,
    )
    .unwrap();

    // Act
    let cfg = load_config(&path).unwrap();

    // Assert
    assert_eq!(cfg.bucket_size_seconds, 5);
    assert_eq!(cfg.window_size_seconds, 60);
    assert_eq!(cfg.alert_threshold, 2.5);
    assert_eq!(cfg.grace_seconds, 30);
}

#[test]
fn missing_file_is_read_error() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    // Act
    let err = load_config(&path).unwrap_err();

    // Assert
    match err {
        ConfigError::ReadFile { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn unknown_field_is_parse_error() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logwatch.toml");
    fs::write(&path, "bucket_seconds = 10\n").unwrap();

    // Act
    let err = load_config(&path).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn invalid_values_fail_with_full_report() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logwatch.toml");
    fs::write(
        &path,
        "bucket_size_seconds = 0\nalert_threshold = -1.0\ngrace_seconds = -5\n",
    )
    .unwrap();

    // Act
    let err = load_config(&path).unwrap_err();

    // Assert
    match err {
        ConfigError::Validation { report } => {
            let fields: Vec<&str> = report.errors.iter().map(|i| i.field).collect();
            assert_eq!(
                fields,
                vec!["bucket_size_seconds", "grace_seconds", "alert_threshold"]
            );
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn overrides_take_precedence() {
    let cfg = MonitorConfig::default().with_overrides(&ConfigOverrides {
        window_size_seconds: Some(30),
        alert_threshold: Some(1.5),
        ..Default::default()
    });

    assert_eq!(cfg.bucket_size_seconds, 10);
    assert_eq!(cfg.window_size_seconds, 30);
    assert_eq!(cfg.alert_threshold, 1.5);
    assert_eq!(cfg.grace_seconds, 30);
}
