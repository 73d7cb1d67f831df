use crate::event::AccessEvent;
use crate::source::SourceCounters;
use serde::Deserialize;
use std::io::Read;
use std::sync::Arc;
use tracing::warn;

/// One row of the CSV access log. Column names follow the common log format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    remotehost: String,
    #[serde(rename = "rfc931")]
    _rfc931: String,
    #[serde(rename = "authuser")]
    _authuser: String,
    date: i64,
    request: String,
    status: String,
    bytes: u64,
}

/// Reads `remotehost,rfc931,authuser,date,request,status,bytes` rows.
pub struct CsvSource<R: Read> {
    records: csv::DeserializeRecordsIntoIter<R, CsvRecord>,
    counters: Arc<SourceCounters>,
}

impl<R: Read> CsvSource<R> {
    pub fn new(reader: R) -> Self {
        let records = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader)
            .into_deserialize();

        Self {
            records,
            counters: Arc::new(SourceCounters::default()),
        }
    }

    pub fn counters(&self) -> Arc<SourceCounters> {
        Arc::clone(&self.counters)
    }
}

impl<R: Read> Iterator for CsvSource<R> {
    type Item = AccessEvent;

    fn next(&mut self) -> Option<AccessEvent> {
        loop {
            let record = self.records.next()?;
            self.counters.record_read();

            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    self.counters.record_skipped();
                    warn!(error = %e, "skipping malformed log row");
                    continue;
                }
            };

            match AccessEvent::new(
                record.remotehost,
                record.request,
                record.status,
                record.bytes,
                record.date,
            ) {
                Ok(event) => return Some(event),
                Err(e) => {
                    self.counters.record_skipped();
                    warn!(error = %e, "skipping malformed log row");
                }
            }
        }
    }
}
