//! Output rendering
//!
//! Bucket reports, alert transitions and the end-of-run summary, either as
//! human-readable text or as one JSON object per line.

mod sink;
mod text;

#[cfg(test)]
mod tests;

pub use sink::RenderSink;
pub use text::{format_timestamp, render_alert, render_bucket, render_summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputMode {
    Pretty,
    Json,
}
