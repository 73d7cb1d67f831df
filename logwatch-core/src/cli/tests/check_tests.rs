use crate::cli::CheckArgs;
use crate::cli::check::check;
use std::fs;
use tempfile::tempdir;

fn args(path: std::path::PathBuf, json: bool) -> CheckArgs {
    CheckArgs { path, json }
}

#[test]
fn valid_config_passes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logwatch.toml");
    fs::write(&path, "window_size_seconds = 60\n").unwrap();

    assert!(check(&args(path.clone(), false)).is_ok());
    assert!(check(&args(path, true)).is_ok());
}

#[test]
fn out_of_range_config_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logwatch.toml");
    fs::write(&path, "alert_threshold = -1.0\n").unwrap();

    let err = check(&args(path, true)).unwrap_err();

    assert!(err.to_string().contains("is not a valid config"));
}

#[test]
fn unknown_field_fails_to_parse() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logwatch.toml");
    fs::write(&path, "threshold = 5.0\n").unwrap();

    assert!(check(&args(path, false)).is_err());
}

#[test]
fn missing_file_fails() {
    let dir = tempdir().unwrap();

    assert!(check(&args(dir.path().join("nope.toml"), false)).is_err());
}
