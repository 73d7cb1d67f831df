pub mod fixtures;
pub mod tracing;

pub use self::fixtures::{ACCESS_LOG, fixture_config, fixture_events, fixture_path};
pub use self::tracing::{CaptureLayer, CapturedEvent, capture_events, warnings};
