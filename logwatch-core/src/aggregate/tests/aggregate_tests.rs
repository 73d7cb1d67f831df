use crate::aggregate::{Aggregate, AggregateError, Availability, DEFAULT_GRACE_SECONDS};
use crate::event::AccessEvent;
use crate::test_tracing::{capture_events, warnings};
use pretty_assertions::assert_eq;

fn event(host: &str, request: &str, status: &str, bytes: u64, ts: i64) -> AccessEvent {
    AccessEvent::new(host, request, status, bytes, ts).unwrap()
}

fn api_hit(ts: i64) -> Aggregate {
    Aggregate::from_event(&event("10.0.0.1", "GET /api/user HTTP/1.0", "200", 1234, ts))
}

#[test]
fn from_event_initializes_counters() {
    let agg = Aggregate::from_event(&event(
        "10.0.0.2",
        "GET /api/user HTTP/1.0",
        "200",
        1234,
        1549573860,
    ));

    assert_eq!(agg.bucket(), 1549573860);
    assert_eq!(agg.bucket_size_seconds(), 0);
    assert!(agg.is_unbucketed());
    assert_eq!(agg.top_sections().get("/api"), 1);
    assert_eq!(agg.top_hosts().get("10.0.0.2"), 1);
    assert_eq!(agg.top_status_codes().get("200"), 1);
    assert_eq!(
        agg.availability(),
        Availability {
            total: 1,
            successes: 1,
            failures: 0
        }
    );
    assert_eq!(agg.bytes(), 1234);
    assert!(!agg.is_closed());
    assert_eq!(agg.close_deadline(), 1549573860 + DEFAULT_GRACE_SECONDS);
}

#[test]
fn failed_status_counts_as_failure() {
    let agg = Aggregate::from_event(&event("10.0.0.1", "GET /api HTTP/1.0", "500", 10, 1));

    assert_eq!(
        agg.availability(),
        Availability {
            total: 1,
            successes: 0,
            failures: 1
        }
    );
}

#[test]
fn empty_aggregate_deadline_includes_bucket_and_grace() {
    let agg = Aggregate::empty(10, 1000, 30);

    assert_eq!(agg.close_deadline(), 1040);
    assert_eq!(agg.total_events(), 0);
    assert!(agg.top_sections().is_empty());
}

#[test]
fn merging_two_identical_events() {
    let mut agg = api_hit(12345);
    agg.merge(&api_hit(12346)).unwrap();

    assert_eq!(agg.total_events(), 2);
    assert_eq!(agg.top_sections().get("/api"), 2);
    assert_eq!(agg.top_hosts().get("10.0.0.1"), 2);
    assert_eq!(agg.top_status_codes().get("200"), 2);
    assert_eq!(
        agg.availability(),
        Availability {
            total: 2,
            successes: 2,
            failures: 0
        }
    );
    assert_eq!(agg.bytes(), 2468);
}

#[test]
fn merge_is_commutative_and_associative() {
    let a = Aggregate::from_event(&event("10.0.0.1", "GET /api/user HTTP/1.0", "200", 100, 5));
    let b = Aggregate::from_event(&event("10.0.0.2", "POST /report HTTP/1.0", "404", 200, 7));
    let c = Aggregate::from_event(&event("10.0.0.1", "GET /report HTTP/1.0", "503", 300, 3));

    let orders = [[&a, &b, &c], [&c, &b, &a], [&b, &a, &c], [&c, &a, &b]];
    let results: Vec<Aggregate> = orders
        .iter()
        .map(|order| {
            let mut bucket = Aggregate::empty(10, 0, 30);
            for unit in order {
                bucket.merge(unit).unwrap();
            }
            bucket
        })
        .collect();

    for result in &results[1..] {
        assert_eq!(result, &results[0]);
    }

    // (a + b) + c == a + (b + c)
    let mut left = a.clone();
    left.merge(&b).unwrap();
    left.merge(&c).unwrap();

    let mut right_tail = b.clone();
    right_tail.merge(&c).unwrap();
    let mut right = a.clone();
    right.merge(&right_tail).unwrap();

    assert_eq!(left, right);
    assert_eq!(left.bytes(), 600);
    assert_eq!(left.availability().failures, 2);
}

#[test]
fn merge_into_closed_aggregate_is_rejected_and_warned() {
    let mut bucket = Aggregate::empty(10, 0, 30);
    bucket.merge(&api_hit(3)).unwrap();
    let before = bucket.clone();
    bucket.close();

    let (results, events) = capture_events(|| {
        let first = bucket.merge(&api_hit(4));
        let second = bucket.merge(&api_hit(5));
        (first, second)
    });

    assert_eq!(
        results.0,
        Err(AggregateError::Closed {
            bucket: 0,
            rejected_bucket: 4,
            rejected_events: 1
        })
    );
    assert!(results.1.is_err());

    let warned = warnings(&events);
    assert_eq!(warned.len(), 2);
    assert_eq!(warned[0].field("rejected_bucket"), Some("4"));
    assert_eq!(warned[1].field("rejected_bucket"), Some("5"));

    assert_eq!(bucket.total_events(), before.total_events());
    assert_eq!(bucket.top_sections(), before.top_sections());
    assert_eq!(bucket.bytes(), before.bytes());
}

#[test]
fn close_is_terminal_and_reported_once() {
    let mut bucket = Aggregate::empty(10, 100, 30);
    bucket.merge(&api_hit(101)).unwrap();

    let ((first, second), events) = capture_events(|| (bucket.close(), bucket.close()));

    assert!(first);
    assert!(!second);
    assert!(bucket.is_closed());

    let reports: Vec<_> = events
        .iter()
        .filter(|e| e.field("event") == Some("bucket_closed"))
        .collect();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].field("total_events"), Some("1"));
}

#[test]
fn report_lists_top_categories() {
    let mut bucket = Aggregate::empty(10, 0, 30);
    bucket.merge(&api_hit(1)).unwrap();
    bucket.merge(&api_hit(2)).unwrap();
    bucket
        .merge(&Aggregate::from_event(&event(
            "10.0.0.9",
            "POST /report HTTP/1.0",
            "404",
            10,
            3,
        )))
        .unwrap();

    let report = bucket.report();

    assert_eq!(report.total_events, 3);
    assert_eq!(
        report.top_sections,
        vec![("/api".to_string(), 2), ("/report".to_string(), 1)]
    );
    assert_eq!(report.bytes, 2478);
    assert!((report.success_ratio() - 2.0 / 3.0).abs() < f64::EPSILON);
}
