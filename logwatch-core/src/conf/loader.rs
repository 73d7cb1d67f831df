use crate::conf::{ConfigError, MonitorConfig, validate};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Reads, parses and validates a TOML config file.
///
/// Warnings are logged; any error fails the load with the full report.
pub fn load_config(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let cfg = parse_config(path, &s)?;

    let report = validate(&cfg);
    for issue in &report.warnings {
        warn!(field = issue.field, "{}", issue.message);
    }
    if !report.errors.is_empty() {
        return Err(ConfigError::Validation { report });
    }

    Ok(cfg)
}

pub fn parse_config(path: &Path, s: &str) -> Result<MonitorConfig, ConfigError> {
    toml::from_str(s).map_err(|e| ConfigError::parse(path, e))
}
