use logwatch_core::conf::MonitorConfig;
use logwatch_core::event::AccessEvent;
use logwatch_core::source::{InputFormat, open_source};
use std::path::PathBuf;

pub const ACCESS_LOG: &str = "access_log.csv";

pub fn fixture_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(file)
}

/// Every event of a fixture log, in file order.
pub fn fixture_events(file: &str) -> Vec<AccessEvent> {
    let path = fixture_path(file);
    let (events, _) = open_source(&path, InputFormat::from_path(&path))
        .expect("failed to open fixture log");
    events.collect()
}

/// Defaults of the `run` command: 10s buckets, 120s window, 10 req/s, 30s grace.
pub fn fixture_config() -> MonitorConfig {
    MonitorConfig::default()
}
