//! Query debouncer for typed input
//!
//! Each keystroke reschedules the pending query; the query is released only
//! after the input has been quiet for the whole window. Only the latest text
//! is kept, so at most one filter pass follows a burst of typing.

use std::time::{Duration, Instant};

/// Default quiet period before a typed query runs
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
struct Pending {
    query: String,
    scheduled_at: Instant,
}

/// Cancel-and-reschedule timer for query text
#[derive(Debug, Clone)]
pub struct QueryDebouncer {
    window: Duration,
    pending: Option<Pending>,
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl QueryDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replace any pending query and restart the window
    pub fn schedule(&mut self, query: impl Into<String>) {
        self.schedule_at(query, Instant::now());
    }

    pub fn schedule_at(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            query: query.into(),
            scheduled_at: now,
        });
    }

    /// Check if there is a query waiting to run
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Check if the debounce window has elapsed since the last schedule
    pub fn is_ready_at(&self, now: Instant) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| now.saturating_duration_since(p.scheduled_at) >= self.window)
    }

    /// Take the pending query if its window has elapsed
    pub fn take_ready(&mut self) -> Option<String> {
        self.take_ready_at(Instant::now())
    }

    pub fn take_ready_at(&mut self, now: Instant) -> Option<String> {
        if self.is_ready_at(now) {
            self.pending.take().map(|p| p.query)
        } else {
            None
        }
    }

    /// Time until the pending query is ready (None if nothing is pending)
    pub fn time_until_ready(&self) -> Option<Duration> {
        self.time_until_ready_at(Instant::now())
    }

    pub fn time_until_ready_at(&self, now: Instant) -> Option<Duration> {
        self.pending.as_ref().map(|p| {
            let elapsed = now.saturating_duration_since(p.scheduled_at);
            self.window.saturating_sub(elapsed)
        })
    }

    /// Drop the pending query without running it
    pub fn cancel(&mut self) -> Option<String> {
        self.pending.take().map(|p| p.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const WINDOW: Duration = Duration::from_millis(100);

    #[test]
    fn test_not_ready_before_window() {
        let start = Instant::now();
        let mut debouncer = QueryDebouncer::new(WINDOW);
        debouncer.schedule_at("gen", start);

        assert!(debouncer.has_pending());
        assert_eq!(debouncer.take_ready_at(start + Duration::from_millis(99)), None);
        assert_eq!(
            debouncer.time_until_ready_at(start + Duration::from_millis(40)),
            Some(Duration::from_millis(60))
        );
    }

    #[test]
    fn test_ready_after_window() {
        let start = Instant::now();
        let mut debouncer = QueryDebouncer::new(WINDOW);
        debouncer.schedule_at("gen", start);

        assert_eq!(
            debouncer.take_ready_at(start + WINDOW),
            Some("gen".to_string())
        );
        assert!(!debouncer.has_pending());
        assert_eq!(debouncer.take_ready_at(start + WINDOW * 2), None);
    }

    #[test]
    fn test_reschedule_keeps_latest_and_restarts_window() {
        let start = Instant::now();
        let mut debouncer = QueryDebouncer::new(WINDOW);
        debouncer.schedule_at("g", start);
        debouncer.schedule_at("ge", start + Duration::from_millis(60));
        debouncer.schedule_at("gen", start + Duration::from_millis(120));

        // 100ms after the first keystroke, but the window restarted
        assert_eq!(debouncer.take_ready_at(start + Duration::from_millis(150)), None);
        assert_eq!(
            debouncer.take_ready_at(start + Duration::from_millis(220)),
            Some("gen".to_string())
        );
    }

    #[test]
    fn test_cancel() {
        let mut debouncer = QueryDebouncer::default();
        debouncer.schedule("joh");
        assert_eq!(debouncer.cancel(), Some("joh".to_string()));
        assert!(!debouncer.has_pending());
        assert_eq!(debouncer.time_until_ready(), None);
    }

    #[test]
    fn test_default_window() {
        assert_eq!(QueryDebouncer::default().window(), Duration::from_millis(100));
    }

    #[test]
    fn test_real_clock() {
        let mut debouncer = QueryDebouncer::new(Duration::from_millis(20));
        debouncer.schedule("ps 23");
        assert_eq!(debouncer.take_ready(), None);

        sleep(Duration::from_millis(30));
        assert_eq!(debouncer.take_ready(), Some("ps 23".to_string()));
    }
}
