use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("malformed request line '{request}': no section could be derived")]
    MalformedRequest { request: String },

    #[error("timestamp {timestamp} is outside the representable date range")]
    TimestampOutOfRange { timestamp: i64 },
}
