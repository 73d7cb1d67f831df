mod access_event;
mod error;


pub use access_event::*;
pub use error::EventError;
