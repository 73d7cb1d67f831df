use crate::aggregate::Aggregate;
use crate::bucketize::Bucketizer;
use crate::conf::MonitorConfig;
use crate::event::AccessEvent;
use crate::monitor::Monitor;
use crate::pipeline::{PipelineSummary, Sink};
use tracing::debug;

/// Single-threaded driver: each pushed event flows through every stage before
/// `push` returns.
#[derive(Debug)]
pub struct Pipeline {
    bucketizer: Bucketizer,
    monitor: Monitor,
    events_read: u64,
}

impl Pipeline {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            bucketizer: Bucketizer::new(config.bucket_size_seconds, config.grace_seconds),
            monitor: Monitor::new(config.window_size_seconds, config.alert_threshold),
            events_read: 0,
        }
    }

    /// Runs `events` to completion, or until `sink` stops wanting output.
    pub fn run<I, S>(config: &MonitorConfig, events: I, sink: &mut S) -> PipelineSummary
    where
        I: IntoIterator<Item = AccessEvent>,
        S: Sink + ?Sized,
    {
        let mut pipeline = Self::new(config);
        for event in events {
            pipeline.push(&event, sink);
            if !sink.wants_more() {
                debug!(
                    events_read = pipeline.events_read,
                    open_buckets = pipeline.bucketizer.open_buckets(),
                    "sink stopped; dropping open buckets"
                );
                return pipeline.summary();
            }
        }
        pipeline.finish(sink)
    }

    /// Counters so far. Buckets still open are not included.
    pub fn summary(&self) -> PipelineSummary {
        let stats = self.bucketizer.stats();

        PipelineSummary {
            events_read: self.events_read,
            events_accepted: stats.accepted,
            events_rejected: stats.rejected,
            buckets_closed: stats.buckets_closed,
            alerts_triggered: self.monitor.alerts_triggered(),
            alerts_resolved: self.monitor.alerts_resolved(),
            final_state: self.monitor.state(),
        }
    }

    pub fn bucketizer(&self) -> &Bucketizer {
        &self.bucketizer
    }

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    pub fn push<S: Sink + ?Sized>(&mut self, event: &AccessEvent, sink: &mut S) {
        self.push_unit(Aggregate::from_event(event), sink);
    }

    pub fn push_unit<S: Sink + ?Sized>(&mut self, unit: Aggregate, sink: &mut S) {
        self.events_read += 1;

        match self.bucketizer.push(unit) {
            Ok(closed) => self.emit(closed, sink),
            Err(e) => sink.rejected(&e),
        }
    }

    /// Flushes the open buckets through the monitor.
    pub fn finish<S: Sink + ?Sized>(self, sink: &mut S) -> PipelineSummary {
        let Self {
            bucketizer,
            mut monitor,
            events_read,
        } = self;

        let stats = bucketizer.stats();
        let remaining = bucketizer.finish();
        let buckets_closed = stats.buckets_closed + remaining.len() as u64;
        for aggregate in remaining {
            deliver(&mut monitor, aggregate, sink);
        }

        PipelineSummary {
            events_read,
            events_accepted: stats.accepted,
            events_rejected: stats.rejected,
            buckets_closed,
            alerts_triggered: monitor.alerts_triggered(),
            alerts_resolved: monitor.alerts_resolved(),
            final_state: monitor.state(),
        }
    }

    fn emit<S: Sink + ?Sized>(&mut self, closed: Vec<Aggregate>, sink: &mut S) {
        for aggregate in closed {
            deliver(&mut self.monitor, aggregate, sink);
        }
    }
}

pub(crate) fn deliver<S: Sink + ?Sized>(monitor: &mut Monitor, aggregate: Aggregate, sink: &mut S) {
    sink.bucket_closed(&aggregate);
    if let Some(signal) = monitor.observe(aggregate) {
        sink.alert(&signal);
    }
}
