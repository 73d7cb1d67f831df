use crate::aggregate::Aggregate;
use crate::bucketize::{BucketizeError, Bucketizer, BucketizerStats};
use crate::conf::MonitorConfig;
use crate::event::AccessEvent;
use crate::monitor::Monitor;
use crate::pipeline::driver::deliver;
use crate::pipeline::{PipelineSummary, Sink};
use anyhow::{Result, anyhow};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use tracing::debug;

pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

enum BucketOutput {
    Closed(Aggregate),
    Rejected(BucketizeError),
}

/// Runs source, bucketizer and monitor as three threads joined by bounded
/// channels. The monitor stage runs on the calling thread and owns `sink`.
///
/// Each channel has a single producer and a single consumer, so arrival order
/// is preserved end to end. When `sink` stops wanting output the monitor
/// drops its receiver and the upstream stages wind down on their next send.
pub fn run_staged<I, S>(
    config: &MonitorConfig,
    events: I,
    sink: &mut S,
    capacity: usize,
) -> Result<PipelineSummary>
where
    I: IntoIterator<Item = AccessEvent>,
    I::IntoIter: Send + 'static,
    S: Sink + ?Sized,
{
    let capacity = capacity.max(1);
    let (unit_tx, unit_rx) = mpsc::sync_channel::<Aggregate>(capacity);
    let (bucket_tx, bucket_rx) = mpsc::sync_channel::<BucketOutput>(capacity);
    let stopped = Arc::new(AtomicBool::new(false));

    // Source stage: events -> per-event aggregates
    let events = events.into_iter();
    let source = thread::Builder::new()
        .name("logwatch-source".into())
        .spawn(move || {
            let mut read = 0u64;
            for event in events {
                read += 1;
                // If the bucketizer is gone, stop early.
                if unit_tx.send(Aggregate::from_event(&event)).is_err() {
                    debug!(read, "bucketizer stage stopped; source exiting");
                    break;
                }
            }
            read
        })?;

    // Bucketizer stage
    let mut bucketizer = Bucketizer::new(config.bucket_size_seconds, config.grace_seconds);
    let monitor_stopped = Arc::clone(&stopped);
    let bucketize = thread::Builder::new()
        .name("logwatch-bucketizer".into())
        .spawn(move || -> BucketizerStats {
            for unit in unit_rx {
                // A failed send alone misses a stop while no bucket closes.
                if monitor_stopped.load(Ordering::Relaxed) {
                    debug!("monitor stage stopped; bucketizer exiting");
                    return bucketizer.stats();
                }
                let out = match bucketizer.push(unit) {
                    Ok(closed) => closed.into_iter().map(BucketOutput::Closed).collect(),
                    Err(e) => vec![BucketOutput::Rejected(e)],
                };
                for item in out {
                    if bucket_tx.send(item).is_err() {
                        debug!("monitor stage stopped; bucketizer exiting");
                        return bucketizer.stats();
                    }
                }
            }

            let mut stats = bucketizer.stats();
            let remaining = bucketizer.finish();
            stats.buckets_closed += remaining.len() as u64;
            for aggregate in remaining {
                if bucket_tx.send(BucketOutput::Closed(aggregate)).is_err() {
                    break;
                }
            }
            stats
        })?;

    // Monitor stage
    let mut monitor = Monitor::new(config.window_size_seconds, config.alert_threshold);
    for item in bucket_rx {
        match item {
            BucketOutput::Closed(aggregate) => deliver(&mut monitor, aggregate, sink),
            BucketOutput::Rejected(e) => sink.rejected(&e),
        }
        if !sink.wants_more() {
            stopped.store(true, Ordering::Relaxed);
            debug!("sink stopped; shutting down upstream stages");
            break;
        }
    }

    let events_read = source
        .join()
        .map_err(|_| anyhow!("source stage panicked"))?;
    let stats = bucketize
        .join()
        .map_err(|_| anyhow!("bucketizer stage panicked"))?;

    Ok(PipelineSummary {
        events_read,
        events_accepted: stats.accepted,
        events_rejected: stats.rejected,
        buckets_closed: stats.buckets_closed,
        alerts_triggered: monitor.alerts_triggered(),
        alerts_resolved: monitor.alerts_resolved(),
        final_state: monitor.state(),
    })
}
