use crate::aggregate::Aggregate;
use crate::event::Timestamp;
use crate::monitor::{AlertKind, AlertSignal, AlertState};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Sliding-window traffic monitor with an edge-triggered alert.
///
/// The window keeps every aggregate whose bucket lies within
/// `window_size_seconds` of the newest one. Alerts are only evaluated once the
/// window spans the full configured size, so a sparse start cannot fire.
#[derive(Debug)]
pub struct Monitor {
    min_window_size_seconds: i64,
    threshold: f64,
    window: VecDeque<Aggregate>,

    first_timestamp: Timestamp,
    last_timestamp: Timestamp,
    window_span_seconds: i64,

    state: AlertState,
    alerts_triggered: u64,
    alerts_resolved: u64,
}

impl Monitor {
    pub fn new(window_size_seconds: i64, threshold: f64) -> Self {
        Self {
            min_window_size_seconds: window_size_seconds,
            threshold,
            window: VecDeque::new(),
            first_timestamp: 0,
            last_timestamp: 0,
            window_span_seconds: 0,
            state: AlertState::Normal,
            alerts_triggered: 0,
            alerts_resolved: 0,
        }
    }

    pub fn state(&self) -> AlertState {
        self.state
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn window(&self) -> impl Iterator<Item = &Aggregate> {
        self.window.iter()
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    pub fn first_timestamp(&self) -> Timestamp {
        self.first_timestamp
    }

    pub fn last_timestamp(&self) -> Timestamp {
        self.last_timestamp
    }

    pub fn window_span_seconds(&self) -> i64 {
        self.window_span_seconds
    }

    pub fn alerts_triggered(&self) -> u64 {
        self.alerts_triggered
    }

    pub fn alerts_resolved(&self) -> u64 {
        self.alerts_resolved
    }

    pub fn is_window_full(&self) -> bool {
        !self.window.is_empty() && self.window_span_seconds >= self.min_window_size_seconds
    }

    pub fn window_events(&self) -> u64 {
        self.window.iter().map(Aggregate::total_events).sum()
    }

    /// Average events per second across the window. A zero span counts as one
    /// second. The span runs between bucket starts, so the newest bucket's own
    /// width is not part of the divisor.
    pub fn rate(&self) -> f64 {
        self.window_events() as f64 / self.window_span_seconds.max(1) as f64
    }

    /// Adds `aggregate` to the window and evaluates the alert at its bucket time.
    pub fn observe(&mut self, aggregate: Aggregate) -> Option<AlertSignal> {
        let now = aggregate.bucket();
        self.update_window(aggregate);
        self.evaluate(now)
    }

    pub fn update_window(&mut self, aggregate: Aggregate) {
        let oldest_allowed = aggregate.bucket() - self.min_window_size_seconds;
        self.window.retain(|a| a.bucket() >= oldest_allowed);
        self.window.push_back(aggregate);

        // Arrival order is not guaranteed to be bucket order.
        let (first, last) = self
            .window
            .iter()
            .map(Aggregate::bucket)
            .fold((Timestamp::MAX, Timestamp::MIN), |(lo, hi), b| {
                (lo.min(b), hi.max(b))
            });

        self.first_timestamp = first;
        self.last_timestamp = last;
        self.window_span_seconds = last - first;
    }

    /// Returns a signal only when the alert state changes. Skipped entirely while
    /// the window has not yet filled.
    pub fn evaluate(&mut self, current_time: Timestamp) -> Option<AlertSignal> {
        if !self.is_window_full() {
            return None;
        }

        let rate = self.rate();
        match self.state {
            AlertState::Normal if rate > self.threshold => {
                Some(self.trigger_alert(rate, current_time))
            }
            AlertState::Alerting if rate <= self.threshold => {
                Some(self.resolve_alert(rate, current_time))
            }
            _ => None,
        }
    }

    fn trigger_alert(&mut self, rate: f64, current_time: Timestamp) -> AlertSignal {
        self.state = AlertState::Alerting;
        self.alerts_triggered += 1;

        warn!(
            event = "alert_triggered",
            rate = format_args!("{rate:.2}"),
            timestamp = current_time,
            "High traffic generated an alert - hits = {rate:.2}/s, triggered at {current_time}"
        );
        self.log_window_detail(rate, "more");

        self.signal(AlertKind::Triggered, rate, current_time)
    }

    fn resolve_alert(&mut self, rate: f64, current_time: Timestamp) -> AlertSignal {
        self.state = AlertState::Normal;
        self.alerts_resolved += 1;

        warn!(
            event = "alert_resolved",
            rate = format_args!("{rate:.2}"),
            timestamp = current_time,
            "Reduced traffic resolved an alert - hits = {rate:.2}/s, resolved at {current_time}"
        );
        self.log_window_detail(rate, "fewer");

        self.signal(AlertKind::Resolved, rate, current_time)
    }

    fn log_window_detail(&self, rate: f64, comparison: &str) {
        debug!(
            window_span_seconds = self.window_span_seconds,
            window_buckets = self.window.len(),
            window_events = self.window_events(),
            rate,
            threshold = self.threshold,
            "{comparison} than {} events per second over the window",
            self.threshold
        );
    }

    fn signal(&self, kind: AlertKind, rate: f64, timestamp: Timestamp) -> AlertSignal {
        AlertSignal {
            kind,
            rate,
            timestamp,
            threshold: self.threshold,
            window_events: self.window_events(),
            window_span_seconds: self.window_span_seconds,
        }
    }
}
