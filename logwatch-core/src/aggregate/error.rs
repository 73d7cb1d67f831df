use crate::event::Timestamp;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error(
        "aggregate for bucket {bucket} is closed; rejected {rejected_events} event(s) from {rejected_bucket}"
    )]
    Closed {
        bucket: Timestamp,
        rejected_bucket: Timestamp,
        rejected_events: u64,
    },
}
