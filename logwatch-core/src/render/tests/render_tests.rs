use crate::aggregate::Aggregate;
use crate::event::AccessEvent;
use crate::monitor::{AlertKind, AlertSignal, AlertState};
use crate::pipeline::{PipelineSummary, Sink};
use crate::render::{OutputMode, RenderSink, format_timestamp, render_alert, render_bucket};
use crate::source::SourceStats;
use pretty_assertions::assert_eq;
use serde_json::Value;

fn closed_bucket() -> Aggregate {
    let mut bucket = Aggregate::empty(10, 1549573860, 30);
    for (host, request, status, bytes) in [
        ("10.0.0.1", "GET /api/user HTTP/1.0", "200", 100),
        ("10.0.0.1", "GET /api/list HTTP/1.0", "200", 200),
        ("10.0.0.2", "GET /report HTTP/1.0", "500", 50),
    ] {
        let event = AccessEvent::new(host, request, status, bytes, 1549573861).unwrap();
        bucket.merge(&Aggregate::from_event(&event)).unwrap();
    }
    bucket.close();
    bucket
}

fn triggered() -> AlertSignal {
    AlertSignal {
        kind: AlertKind::Triggered,
        rate: 10.6417,
        timestamp: 1549574110,
        threshold: 10.0,
        window_events: 1277,
        window_span_seconds: 120,
    }
}

fn summary() -> PipelineSummary {
    PipelineSummary {
        events_read: 3,
        events_accepted: 3,
        events_rejected: 0,
        buckets_closed: 1,
        alerts_triggered: 1,
        alerts_resolved: 0,
        final_state: AlertState::Alerting,
    }
}

#[test]
fn timestamps_render_as_utc() {
    assert_eq!(format_timestamp(1549573860), "2019-02-07 21:11:00 UTC");
}

#[test]
fn bucket_text_lists_top_categories() {
    let text = render_bucket(&closed_bucket().report());

    assert!(text.starts_with("[2019-02-07 21:11:00 UTC] 10s bucket: 3 events | 350 bytes | 66.7% ok\n"));
    assert!(text.contains("sections  /api=2 /report=1\n"));
    assert!(text.contains("hosts     10.0.0.1=2 10.0.0.2=1\n"));
    assert!(text.contains("status    200=2 500=1\n"));
}

#[test]
fn alert_text_matches_transition() {
    assert_eq!(
        render_alert(&triggered(), false),
        "High traffic generated an alert - hits = 10.64/s, triggered at 1549574110\n"
    );

    let resolved = AlertSignal {
        kind: AlertKind::Resolved,
        rate: 9.708,
        timestamp: 1549574210,
        ..triggered()
    };
    assert_eq!(
        render_alert(&resolved, false),
        "Reduced traffic resolved an alert - hits = 9.71/s, resolved at 1549574210\n"
    );
}

#[test]
fn json_mode_writes_one_tagged_object_per_line() {
    let mut sink = RenderSink::new(Vec::new(), OutputMode::Json);

    sink.bucket_closed(&closed_bucket());
    sink.alert(&triggered());
    sink.write_summary(&summary(), &SourceStats { rows_read: 3, rows_skipped: 0 });
    let out = String::from_utf8(sink.finish().unwrap()).unwrap();

    let records: Vec<Value> = out
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0]["type"], "bucket");
    assert_eq!(records[0]["bucket"], 1549573860);
    assert_eq!(records[0]["total_events"], 3);
    assert_eq!(records[0]["availability"]["failures"], 1);

    assert_eq!(records[1]["type"], "alert");
    assert_eq!(records[1]["kind"], "triggered");
    assert_eq!(records[1]["timestamp"], 1549574110);

    assert_eq!(records[2]["type"], "summary");
    assert_eq!(records[2]["final_state"], "alerting");
    assert_eq!(records[2]["source"]["rows_read"], 3);
}

#[test]
fn pretty_mode_writes_text() {
    let mut sink = RenderSink::new(Vec::new(), OutputMode::Pretty);

    sink.alert(&triggered());
    sink.write_summary(&summary(), &SourceStats::default());
    let out = String::from_utf8(sink.finish().unwrap()).unwrap();

    assert!(out.starts_with("High traffic generated an alert"));
    assert!(out.contains("alerts: 1 triggered | 0 resolved | final state: Alerting\n"));
}

#[test]
fn write_errors_surface_on_finish() {
    struct Broken;

    impl std::io::Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let mut sink = RenderSink::new(Broken, OutputMode::Pretty);
    sink.alert(&triggered());

    assert!(sink.finish().is_err());
}
