mod bucketizer;
mod error;


pub use bucketizer::*;
pub use error::BucketizeError;
