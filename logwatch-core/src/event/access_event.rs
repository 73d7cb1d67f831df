use crate::event::EventError;
use serde::Serialize;

/// Epoch seconds.
pub type Timestamp = i64;

pub const SUCCESS_STATUS: &str = "200";

/// A single parsed access-log record.
///
/// Built only through [`AccessEvent::new`], which derives the section from the
/// request line and bounds the timestamp to the calendar range `chrono` can
/// represent, so every event that reaches the aggregation core is well formed
/// and bucket arithmetic on its timestamp cannot overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessEvent {
    remote_host: String,
    request: String,
    section: String,
    status: String,
    bytes: u64,
    timestamp: Timestamp,
}

impl AccessEvent {
    pub fn new(
        remote_host: impl Into<String>,
        request: impl Into<String>,
        status: impl Into<String>,
        bytes: u64,
        timestamp: Timestamp,
    ) -> Result<Self, EventError> {
        if chrono::DateTime::from_timestamp(timestamp, 0).is_none() {
            return Err(EventError::TimestampOutOfRange { timestamp });
        }

        let request = request.into();
        let Some(section) = section_from_request(&request) else {
            return Err(EventError::MalformedRequest { request });
        };

        Ok(Self {
            remote_host: remote_host.into(),
            request,
            section,
            status: status.into(),
            bytes,
            timestamp,
        })
    }

    pub fn remote_host(&self) -> &str {
        &self.remote_host
    }

    pub fn request(&self) -> &str {
        &self.request
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// Returns the first path segment of a request line, prefixed with `/`.
///
/// `"GET /api/user HTTP/1.0"` yields `"/api"`. Returns `None` when the line has
/// fewer than two whitespace-separated tokens or the target contains no `/`.
pub fn section_from_request(request: &str) -> Option<String> {
    let target = request.split_whitespace().nth(1)?;
    let segment = target.split('/').nth(1)?;
    Some(format!("/{segment}"))
}
