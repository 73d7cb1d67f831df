pub mod check;
pub mod run;

#[cfg(test)]
mod tests;

use crate::conf::ConfigOverrides;
use crate::pipeline::DEFAULT_CHANNEL_CAPACITY;
use crate::render::OutputMode;
use crate::source::InputFormat;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aggregate an access log and report traffic alerts
    Run(RunArgs),

    /// Validate a configuration file and exit
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Access log to read
    pub input: PathBuf,

    /// TOML file with monitor settings; flags below take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Average requests per second over the window that triggers an alert
    #[arg(short = 'a', long)]
    pub alert_threshold: Option<f64>,

    /// Sliding window span, in seconds
    #[arg(short = 'w', long = "window")]
    pub window_size_seconds: Option<i64>,

    /// Aggregation bucket width, in seconds
    #[arg(short = 'b', long = "bucket")]
    pub bucket_size_seconds: Option<i64>,

    /// How long late events are accepted after a bucket ends, in seconds
    #[arg(short = 'g', long = "grace")]
    pub grace_seconds: Option<i64>,

    /// Replay speed relative to the log timestamps; 0 reads as fast as possible
    #[arg(short = 't', long, default_value_t = 0.0, value_parser = parse_timescale)]
    pub timescale: f64,

    /// Input format; inferred from the file extension when omitted
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,

    #[arg(long, value_enum, default_value_t = OutputMode::Pretty)]
    pub output: OutputMode,

    /// Run source, bucketizer and monitor on separate threads
    #[arg(long)]
    pub staged: bool,

    /// Bound of the channels between stages when `--staged` is set
    #[arg(long, default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    pub channel_capacity: usize,
}

impl RunArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bucket_size_seconds: self.bucket_size_seconds,
            window_size_seconds: self.window_size_seconds,
            alert_threshold: self.alert_threshold,
            grace_seconds: self.grace_seconds,
        }
    }

    pub fn input_format(&self) -> InputFormat {
        self.format
            .unwrap_or_else(|| InputFormat::from_path(&self.input))
    }
}

/// Largest accepted `--timescale`.
pub const MAX_TIMESCALE: f64 = 1000.0;

fn parse_timescale(s: &str) -> Result<f64, String> {
    let timescale: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !(0.0..=MAX_TIMESCALE).contains(&timescale) {
        return Err(format!("must be a number between 0 and {MAX_TIMESCALE}"));
    }
    Ok(timescale)
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Path to the config file
    #[arg(default_value = "logwatch.toml")]
    pub path: PathBuf,

    /// Print the validation report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn dispatch(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Run(args) => run::run(&args).map(|_| ()),
        Command::Check(args) => check::check(&args),
    }
}
