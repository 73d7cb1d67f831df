use crate::aggregate::report::REPORT_TOP_N;
use crate::aggregate::{AggregateError, BucketReport, CountMap};
use crate::event::{AccessEvent, Timestamp};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Events may join a bucket up to this long after the bucket has ended.
pub const DEFAULT_GRACE_SECONDS: i64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub total: u64,
    pub successes: u64,
    pub failures: u64,
}

impl Availability {
    fn merge(&mut self, other: &Availability) {
        self.total += other.total;
        self.successes += other.successes;
        self.failures += other.failures;
    }
}

/// Accumulated statistics over a single event or a whole time bucket.
///
/// A `bucket_size_seconds` of 0 marks an aggregate that wraps exactly one raw
/// event; its `bucket` is then the event timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    bucket: Timestamp,
    bucket_size_seconds: i64,
    close_deadline: Timestamp,
    top_sections: CountMap,
    top_hosts: CountMap,
    top_status_codes: CountMap,
    availability: Availability,
    bytes: u64,
    is_closed: bool,
}

impl Aggregate {
    pub fn from_event(event: &AccessEvent) -> Self {
        let success = event.is_success();

        Self {
            bucket: event.timestamp(),
            bucket_size_seconds: 0,
            close_deadline: event.timestamp() + DEFAULT_GRACE_SECONDS,
            top_sections: CountMap::single(event.section()),
            top_hosts: CountMap::single(event.remote_host()),
            top_status_codes: CountMap::single(event.status()),
            availability: Availability {
                total: 1,
                successes: u64::from(success),
                failures: u64::from(!success),
            },
            bytes: event.bytes(),
            is_closed: false,
        }
    }

    pub fn empty(bucket_size_seconds: i64, bucket: Timestamp, grace_seconds: i64) -> Self {
        Self {
            bucket,
            bucket_size_seconds,
            close_deadline: bucket + bucket_size_seconds + grace_seconds,
            top_sections: CountMap::new(),
            top_hosts: CountMap::new(),
            top_status_codes: CountMap::new(),
            availability: Availability::default(),
            bytes: 0,
            is_closed: false,
        }
    }

    pub fn bucket(&self) -> Timestamp {
        self.bucket
    }

    pub fn bucket_size_seconds(&self) -> i64 {
        self.bucket_size_seconds
    }

    pub fn is_unbucketed(&self) -> bool {
        self.bucket_size_seconds == 0
    }

    /// Latest watermark at which this aggregate may still accept data.
    pub fn close_deadline(&self) -> Timestamp {
        self.close_deadline
    }

    pub fn top_sections(&self) -> &CountMap {
        &self.top_sections
    }

    pub fn top_hosts(&self) -> &CountMap {
        &self.top_hosts
    }

    pub fn top_status_codes(&self) -> &CountMap {
        &self.top_status_codes
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn total_events(&self) -> u64 {
        self.availability.total
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Adds the counters of `other` into `self`.
    ///
    /// A closed aggregate keeps its counters and reports the rejected merge at
    /// warn level, once per call.
    pub fn merge(&mut self, other: &Aggregate) -> Result<(), AggregateError> {
        if self.is_closed {
            warn!(
                bucket = self.bucket,
                bucket_size_seconds = self.bucket_size_seconds,
                rejected_bucket = other.bucket,
                rejected_events = other.total_events(),
                "received event for already-closed aggregation bucket"
            );
            return Err(AggregateError::Closed {
                bucket: self.bucket,
                rejected_bucket: other.bucket,
                rejected_events: other.total_events(),
            });
        }

        self.top_sections.merge(&other.top_sections);
        self.top_hosts.merge(&other.top_hosts);
        self.top_status_codes.merge(&other.top_status_codes);
        self.availability.merge(&other.availability);
        self.bytes += other.bytes;

        Ok(())
    }

    /// Marks the aggregate terminal and logs its final statistics.
    ///
    /// Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        if self.is_closed {
            debug!(bucket = self.bucket, "aggregate already closed");
            return false;
        }
        self.is_closed = true;

        let report = self.report();
        info!(
            event = "bucket_closed",
            bucket = report.bucket,
            bucket_size_seconds = report.bucket_size_seconds,
            total_events = report.total_events,
            top_sections = ?report.top_sections,
            top_hosts = ?report.top_hosts,
            top_status_codes = ?report.top_status_codes,
            successes = report.availability.successes,
            failures = report.availability.failures,
            bytes = report.bytes,
            "bucket closed"
        );

        true
    }

    pub fn report(&self) -> BucketReport {
        BucketReport::from_aggregate(self, REPORT_TOP_N)
    }
}
