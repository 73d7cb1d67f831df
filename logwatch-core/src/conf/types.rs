use crate::aggregate::DEFAULT_GRACE_SECONDS;
use serde::{Deserialize, Serialize};

/// Parameters of the aggregation and alerting stages.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    /// Width of the aggregation buckets, in seconds.
    #[serde(default = "default_bucket_size_seconds")]
    pub bucket_size_seconds: i64,

    /// Span of the sliding window over which alerts are evaluated, in seconds.
    #[serde(default = "default_window_size_seconds")]
    pub window_size_seconds: i64,

    /// Average requests per second over the window above which to alert.
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,

    /// How long after a bucket ends late events are still accepted.
    #[serde(default = "default_grace_seconds")]
    pub grace_seconds: i64,
}

fn default_bucket_size_seconds() -> i64 {
    10
}
fn default_window_size_seconds() -> i64 {
    120
}
fn default_alert_threshold() -> f64 {
    10.0
}
fn default_grace_seconds() -> i64 {
    DEFAULT_GRACE_SECONDS
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            bucket_size_seconds: default_bucket_size_seconds(),
            window_size_seconds: default_window_size_seconds(),
            alert_threshold: default_alert_threshold(),
            grace_seconds: default_grace_seconds(),
        }
    }
}

/// Values that take precedence over the config file, typically from CLI flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub bucket_size_seconds: Option<i64>,
    pub window_size_seconds: Option<i64>,
    pub alert_threshold: Option<f64>,
    pub grace_seconds: Option<i64>,
}

impl MonitorConfig {
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(v) = overrides.bucket_size_seconds {
            self.bucket_size_seconds = v;
        }
        if let Some(v) = overrides.window_size_seconds {
            self.window_size_seconds = v;
        }
        if let Some(v) = overrides.alert_threshold {
            self.alert_threshold = v;
        }
        if let Some(v) = overrides.grace_seconds {
            self.grace_seconds = v;
        }
        self
    }
}
