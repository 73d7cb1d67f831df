use crate::monitor::AlertState;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub events_read: u64,
    pub events_accepted: u64,
    pub events_rejected: u64,
    pub buckets_closed: u64,
    pub alerts_triggered: u64,
    pub alerts_resolved: u64,
    pub final_state: AlertState,
}
