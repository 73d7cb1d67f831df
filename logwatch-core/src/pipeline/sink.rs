use crate::aggregate::Aggregate;
use crate::bucketize::BucketizeError;
use crate::monitor::AlertSignal;

/// Receives everything the pipeline makes visible downstream.
pub trait Sink {
    fn bucket_closed(&mut self, aggregate: &Aggregate);

    fn alert(&mut self, signal: &AlertSignal);

    fn rejected(&mut self, _error: &BucketizeError) {}

    /// Returning `false` stops the pipeline after the current output. Open
    /// buckets are then dropped without being reported.
    fn wants_more(&self) -> bool {
        true
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn bucket_closed(&mut self, aggregate: &Aggregate) {
        (**self).bucket_closed(aggregate)
    }

    fn alert(&mut self, signal: &AlertSignal) {
        (**self).alert(signal)
    }

    fn rejected(&mut self, error: &BucketizeError) {
        (**self).rejected(error)
    }

    fn wants_more(&self) -> bool {
        (**self).wants_more()
    }
}

/// Keeps every output in memory, optionally stopping after a number of
/// closed buckets.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub buckets: Vec<Aggregate>,
    pub alerts: Vec<AlertSignal>,
    pub rejections: Vec<BucketizeError>,
    bucket_limit: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket_limit(limit: usize) -> Self {
        Self {
            bucket_limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn total_events(&self) -> u64 {
        self.buckets.iter().map(Aggregate::total_events).sum()
    }
}

impl Sink for RecordingSink {
    fn bucket_closed(&mut self, aggregate: &Aggregate) {
        self.buckets.push(aggregate.clone());
    }

    fn alert(&mut self, signal: &AlertSignal) {
        self.alerts.push(signal.clone());
    }

    fn rejected(&mut self, error: &BucketizeError) {
        self.rejections.push(error.clone());
    }

    fn wants_more(&self) -> bool {
        self.bucket_limit
            .is_none_or(|limit| self.buckets.len() < limit)
    }
}

/// Discards output; the core's own tracing events are the only record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn bucket_closed(&mut self, _aggregate: &Aggregate) {}

    fn alert(&mut self, _signal: &AlertSignal) {}
}
