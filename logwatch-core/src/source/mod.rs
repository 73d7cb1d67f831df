//! Event sources
//!
//! Turn access-log files into a lazy stream of [`AccessEvent`]s. Rows that
//! cannot be turned into a valid event are skipped here, logged at warn level
//! and counted, so the aggregation core only ever sees well-formed events.

mod csv_source;
mod error;
mod jsonl_source;
mod playback;


pub use csv_source::CsvSource;
pub use error::SourceError;
pub use jsonl_source::JsonLinesSource;
pub use playback::Playback;

use crate::event::AccessEvent;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    Csv,
    Jsonl,
}

impl InputFormat {
    /// `.json`, `.jsonl` and `.ndjson` files are JSON lines; anything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json" | "jsonl" | "ndjson") => Self::Jsonl,
            _ => Self::Csv,
        }
    }
}

/// Row counters shared between a source and whoever reports on it. The source
/// may run on another thread.
#[derive(Debug, Default)]
pub struct SourceCounters {
    read: AtomicU64,
    skipped: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceStats {
    pub rows_read: u64,
    pub rows_skipped: u64,
}

impl SourceCounters {
    pub(crate) fn record_read(&self) {
        self.read.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> SourceStats {
        SourceStats {
            rows_read: self.read.load(Ordering::Relaxed),
            rows_skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}

pub type BoxedEvents = Box<dyn Iterator<Item = AccessEvent> + Send>;

/// Opens `path` in the given format.
pub fn open_source(
    path: &Path,
    format: InputFormat,
) -> Result<(BoxedEvents, Arc<SourceCounters>), SourceError> {
    let file = File::open(path).map_err(|e| SourceError::open(path, e))?;

    Ok(match format {
        InputFormat::Csv => {
            let source = CsvSource::new(file);
            let counters = source.counters();
            (Box::new(source), counters)
        }
        InputFormat::Jsonl => {
            let source = JsonLinesSource::new(BufReader::new(file));
            let counters = source.counters();
            (Box::new(source), counters)
        }
    })
}
