use crate::aggregate::Aggregate;
use crate::bucketize::BucketizeError;
use crate::event::Timestamp;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketizerStats {
    pub accepted: u64,
    pub rejected: u64,
    pub buckets_closed: u64,
}

/// Groups per-event aggregates into fixed-width time buckets.
///
/// Time is driven by the watermark (the largest timestamp accepted so far), so
/// the same input always produces the same buckets. A bucket closes once the
/// watermark passes its close deadline. Closed keys stay tombstoned through
/// `closed_through`, so a late unit can never reopen them.
#[derive(Debug)]
pub struct Bucketizer {
    bucket_size_seconds: i64,
    grace_seconds: i64,
    open: BTreeMap<Timestamp, Aggregate>,
    watermark: Option<Timestamp>,
    closed_through: Option<Timestamp>,
    stats: BucketizerStats,
}

impl Bucketizer {
    /// `bucket_size_seconds` must be positive and `grace_seconds` non-negative;
    /// callers go through the validated `MonitorConfig`.
    pub fn new(bucket_size_seconds: i64, grace_seconds: i64) -> Self {
        debug_assert!(bucket_size_seconds > 0);
        debug_assert!(grace_seconds >= 0);

        Self {
            bucket_size_seconds,
            grace_seconds,
            open: BTreeMap::new(),
            watermark: None,
            closed_through: None,
            stats: BucketizerStats::default(),
        }
    }

    pub fn bucket_size_seconds(&self) -> i64 {
        self.bucket_size_seconds
    }

    pub fn grace_seconds(&self) -> i64 {
        self.grace_seconds
    }

    pub fn watermark(&self) -> Option<Timestamp> {
        self.watermark
    }

    pub fn open_buckets(&self) -> usize {
        self.open.len()
    }

    pub fn is_open(&self, bucket: Timestamp) -> bool {
        self.open.contains_key(&bucket)
    }

    pub fn stats(&self) -> BucketizerStats {
        self.stats
    }

    pub fn bucket_start(&self, timestamp: Timestamp) -> Timestamp {
        timestamp - timestamp.rem_euclid(self.bucket_size_seconds)
    }

    /// Merges `unit` into its bucket and returns every bucket closed as a
    /// result, in ascending bucket order.
    pub fn push(&mut self, unit: Aggregate) -> Result<Vec<Aggregate>, BucketizeError> {
        let timestamp = unit.bucket();
        let bucket = self.bucket_start(timestamp);
        let close_deadline = bucket + self.bucket_size_seconds + self.grace_seconds;
        let watermark = self.watermark.map_or(timestamp, |w| w.max(timestamp));

        let tombstoned = self.closed_through.is_some_and(|closed| bucket <= closed);
        if tombstoned || close_deadline < watermark {
            self.stats.rejected += 1;
            warn!(
                bucket,
                timestamp,
                close_deadline,
                watermark,
                "dropping stale event for a bucket that can no longer be reopened"
            );
            return Err(BucketizeError::StaleBucket {
                bucket,
                timestamp,
                close_deadline,
                watermark,
            });
        }

        self.watermark = Some(watermark);

        let (size, grace) = (self.bucket_size_seconds, self.grace_seconds);
        self.open
            .entry(bucket)
            .or_insert_with(|| {
                debug!(bucket, "opening bucket");
                Aggregate::empty(size, bucket, grace)
            })
            .merge(&unit)?;
        self.stats.accepted += 1;

        Ok(self.close_expired(watermark))
    }

    /// Closes every remaining bucket. Used at end of input.
    pub fn finish(mut self) -> Vec<Aggregate> {
        let buckets: Vec<Timestamp> = self.open.keys().copied().collect();
        self.close_buckets(buckets)
    }

    fn close_expired(&mut self, watermark: Timestamp) -> Vec<Aggregate> {
        let expired: Vec<Timestamp> = self
            .open
            .values()
            .filter(|agg| agg.close_deadline() < watermark)
            .map(Aggregate::bucket)
            .collect();

        self.close_buckets(expired)
    }

    fn close_buckets(&mut self, buckets: Vec<Timestamp>) -> Vec<Aggregate> {
        let mut closed = Vec::with_capacity(buckets.len());

        for bucket in buckets {
            let Some(mut aggregate) = self.open.remove(&bucket) else {
                continue;
            };
            aggregate.close();

            self.closed_through = Some(self.closed_through.map_or(bucket, |c| c.max(bucket)));
            self.stats.buckets_closed += 1;
            closed.push(aggregate);
        }

        closed
    }
}
