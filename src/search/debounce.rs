use std::time::{Duration, Instant};

/// Trailing-edge debounce driven by an external clock.
///
/// `schedule` replaces whatever was pending and restarts the quiet period;
/// `poll` hands the latest value back once the period has elapsed. The UI
/// loop polls on every tick, so nothing here sleeps or spawns.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Queue `value`, cancelling anything queued earlier
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Time left before the pending value fires
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline().map(|at| at.saturating_duration_since(now))
    }

    /// Take the pending value if its quiet period is over
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now >= *at => self.cancel(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(200);

    #[test]
    fn fires_once_after_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.schedule("a", t0);

        assert_eq!(d.poll(t0 + Duration::from_millis(199)), None);
        assert_eq!(d.poll(t0 + DELAY), Some("a"));
        assert_eq!(d.poll(t0 + Duration::from_secs(5)), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn later_schedule_supersedes_earlier() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.schedule("j", t0);
        d.schedule("ja", t0 + Duration::from_millis(100));

        // The first deadline passes without firing.
        assert_eq!(d.poll(t0 + Duration::from_millis(250)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(300)), Some("ja"));
    }

    #[test]
    fn cancel_discards_pending_value() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.schedule(7, t0);
        assert_eq!(d.cancel(), Some(7));
        assert_eq!(d.poll(t0 + DELAY * 2), None);
    }

    #[test]
    fn remaining_counts_down() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        assert_eq!(d.remaining(t0), None);
        d.schedule((), t0);
        assert_eq!(d.remaining(t0 + Duration::from_millis(50)), Some(Duration::from_millis(150)));
        assert_eq!(d.remaining(t0 + Duration::from_secs(1)), Some(Duration::ZERO));
    }
}
