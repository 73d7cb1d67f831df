use crate::event::{AccessEvent, Timestamp};
use std::thread;
use std::time::Duration;
use tracing::warn;

/// Replays events with delays proportional to the gaps between their
/// timestamps, to simulate live arrival.
///
/// A `timescale` of 1.0 replays in real time, 0.5 twice as fast; 0 disables
/// the delay entirely, as does a non-finite timescale. Events that go back in
/// time are not delayed, nor are gaps whose delay cannot be represented.
pub struct Playback<I> {
    inner: I,
    timescale: f64,
    previous: Option<Timestamp>,
}

impl<I> Playback<I>
where
    I: Iterator<Item = AccessEvent>,
{
    pub fn new(inner: I, timescale: f64) -> Self {
        Self {
            inner,
            timescale: if timescale.is_finite() {
                timescale.max(0.0)
            } else {
                0.0
            },
            previous: None,
        }
    }

    pub fn delay_between(&self, previous: Timestamp, next: Timestamp) -> Duration {
        let gap = next.saturating_sub(previous).max(0) as f64;
        match Duration::try_from_secs_f64(gap * self.timescale) {
            Ok(delay) => delay,
            Err(e) => {
                warn!(
                    previous,
                    next,
                    timescale = self.timescale,
                    error = %e,
                    "skipping playback delay"
                );
                Duration::ZERO
            }
        }
    }
}

impl<I> Iterator for Playback<I>
where
    I: Iterator<Item = AccessEvent>,
{
    type Item = AccessEvent;

    fn next(&mut self) -> Option<AccessEvent> {
        let event = self.inner.next()?;

        if self.timescale > 0.0 {
            if let Some(previous) = self.previous {
                let delay = self.delay_between(previous, event.timestamp());
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
            }
        }
        self.previous = Some(event.timestamp());

        Some(event)
    }
}
