use crate::aggregate::{Aggregate, Availability};
use crate::event::Timestamp;
use serde::Serialize;

pub const REPORT_TOP_N: usize = 5;

/// Final statistics of a closed bucket, as handed to sinks and renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketReport {
    pub bucket: Timestamp,
    pub bucket_size_seconds: i64,
    pub total_events: u64,
    pub top_sections: Vec<(String, u64)>,
    pub top_hosts: Vec<(String, u64)>,
    pub top_status_codes: Vec<(String, u64)>,
    pub availability: Availability,
    pub bytes: u64,
}

impl BucketReport {
    pub fn from_aggregate(aggregate: &Aggregate, top_n: usize) -> Self {
        Self {
            bucket: aggregate.bucket(),
            bucket_size_seconds: aggregate.bucket_size_seconds(),
            total_events: aggregate.total_events(),
            top_sections: aggregate.top_sections().top(top_n),
            top_hosts: aggregate.top_hosts().top(top_n),
            top_status_codes: aggregate.top_status_codes().top(top_n),
            availability: aggregate.availability(),
            bytes: aggregate.bytes(),
        }
    }

    pub fn success_ratio(&self) -> f64 {
        if self.availability.total == 0 {
            return 1.0;
        }
        self.availability.successes as f64 / self.availability.total as f64
    }
}
