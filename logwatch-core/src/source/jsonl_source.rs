use crate::event::{AccessEvent, Timestamp};
use crate::source::SourceCounters;
use serde_json::Value;
use std::io::BufRead;
use std::sync::Arc;
use tracing::warn;

/// Reads one JSON object per line with the same field names as the CSV log.
///
/// `date` (or `timestamp`) may be epoch seconds, a numeric string, or an
/// RFC 3339 string. `status` and `bytes` may be numbers or strings.
pub struct JsonLinesSource<R: BufRead> {
    lines: std::io::Lines<R>,
    counters: Arc<SourceCounters>,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            counters: Arc::new(SourceCounters::default()),
        }
    }

    pub fn counters(&self) -> Arc<SourceCounters> {
        Arc::clone(&self.counters)
    }
}

impl<R: BufRead> Iterator for JsonLinesSource<R> {
    type Item = AccessEvent;

    fn next(&mut self) -> Option<AccessEvent> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "stopping log read after I/O error");
                    return None;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            self.counters.record_read();

            let Ok(json) = serde_json::from_str::<Value>(&line) else {
                self.counters.record_skipped();
                warn!(line = %line, "skipping non-JSON log line");
                continue;
            };

            match parse_event(&json) {
                Ok(event) => return Some(event),
                Err(reason) => {
                    self.counters.record_skipped();
                    warn!(reason = %reason, "skipping malformed log row");
                }
            }
        }
    }
}

fn parse_event(event: &Value) -> Result<AccessEvent, String> {
    let remote_host = event
        .get("remotehost")
        .and_then(Value::as_str)
        .ok_or("missing remotehost")?;

    let request = event
        .get("request")
        .and_then(Value::as_str)
        .ok_or("missing request")?;

    // status is a string in most logs (e.g. "200") but tolerate numbers
    let status = match event.get("status") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err("missing status".to_string()),
    };

    let bytes = match event.get("bytes") {
        Some(Value::Number(n)) => n.as_u64().ok_or("bytes is not a non-negative integer")?,
        Some(Value::String(s)) => s.parse::<u64>().map_err(|e| format!("bytes: {e}"))?,
        None => 0,
        _ => return Err("bytes has an unsupported type".to_string()),
    };

    let timestamp = event
        .get("date")
        .or_else(|| event.get("timestamp"))
        .and_then(parse_timestamp)
        .ok_or("missing or invalid date")?;

    AccessEvent::new(remote_host, request, status, bytes, timestamp).map_err(|e| e.to_string())
}

fn parse_timestamp(value: &Value) -> Option<Timestamp> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse::<i64>().ok().or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.timestamp())
        }),
        _ => None,
    }
}
