use crate::aggregate::AggregateError;
use crate::event::Timestamp;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BucketizeError {
    /// The unit belongs to a bucket that has already been closed, or whose
    /// grace period expired before it was ever opened.
    #[error(
        "stale event at {timestamp} for bucket {bucket} (close deadline {close_deadline}, watermark {watermark})"
    )]
    StaleBucket {
        bucket: Timestamp,
        timestamp: Timestamp,
        close_deadline: Timestamp,
        watermark: Timestamp,
    },

    #[error(transparent)]
    Merge(#[from] AggregateError),
}
