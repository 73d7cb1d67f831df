pub mod aggregate;
pub mod bucketize;
pub mod cli;
pub mod conf;
pub mod event;
pub mod logging;
pub mod monitor;
pub mod pipeline;
pub mod render;
pub mod source;

#[cfg(test)]
pub(crate) mod test_tracing;
