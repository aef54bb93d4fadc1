//! Debounce and throttle controllers for bursty UI input.
//!
//! Both are driven by an `Instant` supplied by the caller instead of reading
//! the clock themselves, so the event loop passes one timestamp per frame
//! and tests can simulate elapsed time deterministically.

use std::time::{Duration, Instant};

/// Collapses a burst of calls into a single delivery of the most recent
/// value once `wait` has passed without further calls.
#[derive(Debug)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Record a call. Any previously pending value is dropped and the quiet
    /// period restarts from `now`.
    pub fn call(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.wait,
        });
    }

    /// Deliver the pending value if the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline)
        {
            return self.pending.take().map(|pending| pending.value);
        }
        None
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Leading-edge throttle: the first call passes immediately, further calls
/// are dropped until `limit` has elapsed.
#[derive(Debug)]
pub struct Throttle {
    limit: Duration,
    last_fired: Option<Instant>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            last_fired: None,
        }
    }

    /// Returns true if a call at `now` is allowed through. Dropped calls are
    /// not queued.
    pub fn allow(&mut self, now: Instant) -> bool {
        let open = self
            .last_fired
            .is_none_or(|last| now.duration_since(last) >= self.limit);
        if open {
            self.last_fired = Some(now);
        }
        open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn debounce_fires_last_value_of_burst_once() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(200));

        // Five calls within 100ms total.
        for i in 1..=5u32 {
            debouncer.call(i, t0 + ms(u64::from(i) * 20));
        }

        // Quiet period has not elapsed yet (deadline is t0+100+200).
        assert_eq!(debouncer.poll(t0 + ms(250)), None);
        assert!(debouncer.is_pending());

        assert_eq!(debouncer.poll(t0 + ms(300)), Some(5));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(t0 + ms(1000)), None);
    }

    #[test]
    fn debounce_rearms_on_each_call() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(200));

        debouncer.call("a", t0);
        assert_eq!(debouncer.poll(t0 + ms(199)), None);
        debouncer.call("b", t0 + ms(199));
        // Old deadline has passed, but the new call restarted the clock.
        assert_eq!(debouncer.poll(t0 + ms(200)), None);
        assert_eq!(debouncer.poll(t0 + ms(399)), Some("b"));
    }

    #[test]
    fn throttle_passes_leading_edge_only() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(ms(200));
        let mut fired = 0;

        // Five calls within 50ms total: only the first passes.
        for i in 0..5u64 {
            if throttle.allow(t0 + ms(i * 10)) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);

        // A sixth call after the window fires again, immediately.
        assert!(throttle.allow(t0 + ms(250)));
    }

    #[test]
    fn throttle_window_restarts_on_fire() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(ms(100));

        assert!(throttle.allow(t0));
        assert!(throttle.allow(t0 + ms(100)));
        assert!(!throttle.allow(t0 + ms(150)));
        assert!(throttle.allow(t0 + ms(200)));
    }
}
