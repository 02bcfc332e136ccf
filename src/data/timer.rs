use std::time::{Duration, Instant};

use crate::game::Scheduler;

/// Deadline based scheduler for event loops that poll.
///
/// The front end asks [`TickTimer::fire`] on every wake up and calls
/// `Controller::tick` when it returns true.
#[derive(Debug, Default)]
pub struct TickTimer {
    next: Option<Instant>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self { next: None }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.next
    }

    pub fn due(&self, now: Instant) -> bool {
        self.next.is_some_and(|t| now >= t)
    }

    /// Consumes the deadline if it has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.due(now) {
            return false;
        }

        self.next = None;
        true
    }

    pub(crate) fn schedule_from(&mut self, now: Instant, after: Duration) {
        self.next = Some(now + after);
    }
}

impl Scheduler for TickTimer {
    fn schedule(&mut self, after: Duration) {
        self.schedule_from(Instant::now(), after);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS200: Duration = Duration::from_millis(200);

    #[test]
    fn idle_timer_never_fires() {
        let mut t = TickTimer::new();
        assert_eq!(t.deadline(), None);
        assert!(!t.fire(Instant::now() + Duration::from_secs(60)));
    }

    #[test]
    fn fires_once_after_deadline() {
        let now = Instant::now();
        let mut t = TickTimer::new();
        t.schedule_from(now, MS200);

        assert!(!t.fire(now + Duration::from_millis(199)));
        assert!(t.fire(now + MS200));
        assert!(!t.fire(now + MS200 * 2));
        assert_eq!(t.deadline(), None);
    }

    #[test]
    fn rescheduling_replaces_deadline() {
        let now = Instant::now();
        let mut t = TickTimer::new();
        t.schedule_from(now, MS200);
        t.schedule_from(now, MS200 * 3);

        assert!(!t.due(now + MS200));
        assert_eq!(t.deadline(), Some(now + MS200 * 3));
    }
}
