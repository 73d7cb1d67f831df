use crate::aggregate::BucketReport;
use crate::event::Timestamp;
use crate::monitor::{AlertKind, AlertSignal};
use crate::pipeline::PipelineSummary;
use crate::source::SourceStats;
use chrono::DateTime;
use owo_colors::OwoColorize;

pub fn format_timestamp(ts: Timestamp) -> String {
    match DateTime::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => ts.to_string(),
    }
}

pub fn render_bucket(report: &BucketReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "[{}] {}s bucket: {} events | {} bytes | {:.1}% ok\n",
        format_timestamp(report.bucket),
        report.bucket_size_seconds,
        report.total_events,
        report.bytes,
        report.success_ratio() * 100.0
    ));
    push_counts(&mut out, "sections", &report.top_sections);
    push_counts(&mut out, "hosts", &report.top_hosts);
    push_counts(&mut out, "status", &report.top_status_codes);

    out
}

fn push_counts(out: &mut String, label: &str, counts: &[(String, u64)]) {
    if counts.is_empty() {
        return;
    }
    out.push_str(&format!("  {label:<9}"));
    for (key, count) in counts {
        out.push_str(&format!(" {key}={count}"));
    }
    out.push('\n');
}

pub fn render_alert(signal: &AlertSignal, color: bool) -> String {
    let line = match signal.kind {
        AlertKind::Triggered => format!(
            "High traffic generated an alert - hits = {:.2}/s, triggered at {}",
            signal.rate, signal.timestamp
        ),
        AlertKind::Resolved => format!(
            "Reduced traffic resolved an alert - hits = {:.2}/s, resolved at {}",
            signal.rate, signal.timestamp
        ),
    };

    if !color {
        return format!("{line}\n");
    }
    match signal.kind {
        AlertKind::Triggered => format!("{}\n", line.red().bold()),
        AlertKind::Resolved => format!("{}\n", line.green().bold()),
    }
}

pub fn render_summary(summary: &PipelineSummary, source: &SourceStats) -> String {
    format!(
        "Summary\n\
         =======\n\
         rows: {} read | {} skipped\n\
         events: {} read | {} accepted | {} stale\n\
         buckets closed: {}\n\
         alerts: {} triggered | {} resolved | final state: {:?}\n",
        source.rows_read,
        source.rows_skipped,
        summary.events_read,
        summary.events_accepted,
        summary.events_rejected,
        summary.buckets_closed,
        summary.alerts_triggered,
        summary.alerts_resolved,
        summary.final_state,
    )
}
