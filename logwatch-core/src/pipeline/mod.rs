//! Event pipeline
//!
//! Wires the aggregation stages together:
//!
//! AccessEvent
//! Aggregate::from_event
//! Bucketizer (closed buckets, stale rejections)
//! Monitor (alert transitions)
//! Sink
//!
//! [`Pipeline`] drives every stage on the calling thread. [`run_staged`] runs
//! the source, the bucketizer and the monitor on separate threads joined by
//! bounded channels.

mod driver;
mod sink;
mod staged;
mod summary;


pub use driver::Pipeline;
pub use sink::*;
pub use staged::{DEFAULT_CHANNEL_CAPACITY, run_staged};
pub use summary::PipelineSummary;
