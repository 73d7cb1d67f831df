use crate::cli::RunArgs;
use crate::conf::{MonitorConfig, load_config, validate};
use crate::pipeline::{Pipeline, PipelineSummary, run_staged};
use crate::render::{OutputMode, RenderSink};
use crate::source::{Playback, open_source};
use anyhow::{Context, Result, bail};
use std::io::{self, IsTerminal};
use tracing::info;

/// Resolves the settings for a run: config file (or defaults), then flags.
pub fn resolve_config(args: &RunArgs) -> Result<MonitorConfig> {
    let base = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MonitorConfig::default(),
    };
    let config = base.with_overrides(&args.overrides());

    // Flags can still break a valid file.
    let report = validate(&config);
    if !report.is_valid() {
        bail!("invalid monitor settings\n{}", report.render_plain());
    }

    Ok(config)
}

pub fn run(args: &RunArgs) -> Result<PipelineSummary> {
    let config = resolve_config(args)?;
    let format = args.input_format();

    let (events, counters) = open_source(&args.input, format)?;
    let events = Playback::new(events, args.timescale);

    info!(
        input = %args.input.display(),
        format = ?format,
        bucket_size_seconds = config.bucket_size_seconds,
        window_size_seconds = config.window_size_seconds,
        alert_threshold = config.alert_threshold,
        grace_seconds = config.grace_seconds,
        staged = args.staged,
        "starting log monitor"
    );

    let stdout = io::stdout();
    let color = args.output == OutputMode::Pretty && stdout.is_terminal();
    let mut sink = RenderSink::new(stdout.lock(), args.output).with_color(color);

    let summary = if args.staged {
        run_staged(&config, events, &mut sink, args.channel_capacity)?
    } else {
        Pipeline::run(&config, events, &mut sink)
    };

    let source = counters.snapshot();
    sink.write_summary(&summary, &source);
    sink.finish().context("writing report to stdout")?;

    info!(
        events_read = summary.events_read,
        events_rejected = summary.events_rejected,
        rows_skipped = source.rows_skipped,
        buckets_closed = summary.buckets_closed,
        alerts_triggered = summary.alerts_triggered,
        "log monitor finished"
    );

    Ok(summary)
}
