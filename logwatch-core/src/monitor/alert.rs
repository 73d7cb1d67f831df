use crate::event::Timestamp;
use serde::Serialize;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertState {
    Normal,
    Alerting,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Triggered,
    Resolved,
}

/// Emitted once per alert state transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertSignal {
    pub kind: AlertKind,
    /// Average events per second over the window.
    pub rate: f64,
    pub timestamp: Timestamp,
    pub threshold: f64,
    pub window_events: u64,
    pub window_span_seconds: i64,
}
