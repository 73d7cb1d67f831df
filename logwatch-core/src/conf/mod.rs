mod error;
mod loader;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::{load_config, parse_config};
pub use types::*;
pub use validation::{RangeConstraint, Severity, ValidationIssue, ValidationReport, validate};
