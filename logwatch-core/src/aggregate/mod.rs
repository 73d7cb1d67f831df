mod aggregate;
mod count_map;
mod error;
mod report;

#[cfg(test)]
mod tests;

pub use aggregate::*;
pub use count_map::CountMap;
pub use error::AggregateError;
pub use report::BucketReport;
