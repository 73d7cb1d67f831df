use crate::aggregate::{Aggregate, BucketReport};
use crate::monitor::AlertSignal;
use crate::pipeline::{PipelineSummary, Sink};
use crate::render::{OutputMode, render_alert, render_bucket, render_summary};
use crate::source::SourceStats;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record<'a> {
    Bucket(&'a BucketReport),
    Alert(&'a AlertSignal),
    Summary {
        #[serde(flatten)]
        summary: &'a PipelineSummary,
        source: &'a SourceStats,
    },
}

/// Writes bucket reports and alerts to `W` as they happen.
///
/// The `Sink` callbacks cannot fail, so the first write error is kept and
/// all later output is dropped. Check it with [`RenderSink::finish`].
pub struct RenderSink<W: Write> {
    writer: W,
    mode: OutputMode,
    color: bool,
    error: Option<io::Error>,
}

impl<W: Write> RenderSink<W> {
    pub fn new(writer: W, mode: OutputMode) -> Self {
        Self {
            writer,
            mode,
            color: false,
            error: None,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn write_summary(&mut self, summary: &PipelineSummary, source: &SourceStats) {
        match self.mode {
            OutputMode::Pretty => {
                let text = format!("\n{}", render_summary(summary, source));
                self.write_text(&text);
            }
            OutputMode::Json => self.write_record(&Record::Summary { summary, source }),
        }
    }

    /// Flushes and hands back the writer, or the first error hit on the way.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_text(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.writer.write_all(text.as_bytes()) {
            self.error = Some(e);
        }
    }

    fn write_record(&mut self, record: &Record<'_>) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.writer, record)
            .map_err(io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"));
        if let Err(e) = result {
            self.error = Some(e);
        }
    }
}

impl<W: Write> Sink for RenderSink<W> {
    fn bucket_closed(&mut self, aggregate: &Aggregate) {
        let report = aggregate.report();
        match self.mode {
            OutputMode::Pretty => self.write_text(&render_bucket(&report)),
            OutputMode::Json => self.write_record(&Record::Bucket(&report)),
        }
    }

    fn alert(&mut self, signal: &AlertSignal) {
        match self.mode {
            OutputMode::Pretty => {
                let text = render_alert(signal, self.color);
                self.write_text(&text);
            }
            OutputMode::Json => self.write_record(&Record::Alert(signal)),
        }
    }
}
