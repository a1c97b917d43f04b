//! Clock-injected timers
//!
//! Nothing here sleeps or spawns. Callers pass `now` in and poll, so the
//! same code runs under a terminal event loop and under tests that step a
//! synthetic clock.

use std::time::{Duration, Instant};

/// Trailing-edge debounce: only the last value pushed within the window fires.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
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

    /// Replace the pending value and restart the window.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    /// Take the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }
}

/// Handle returned by [`TimerQueue::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<A> {
    id: TimerId,
    at: Instant,
    action: A,
}

/// One-shot timers keyed by deadline.
#[derive(Debug)]
pub struct TimerQueue<A> {
    next_id: u64,
    entries: Vec<Entry<A>>,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<A> TimerQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: Instant, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, at, action });
        id
    }

    pub fn schedule_after(&mut self, now: Instant, delay: Duration, action: A) -> TimerId {
        self.schedule(now + delay, action)
    }

    /// Returns whether the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.at).min()
    }

    /// Remove and return every action due at `now`, earliest deadline first.
    /// Ties keep scheduling order.
    pub fn drain_due(&mut self, now: Instant) -> Vec<A> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| e.at <= now);
        self.entries = pending;
        due.sort_by_key(|e| (e.at, e.id.0));
        due.into_iter().map(|e| e.action).collect()
    }
}

/// A window during which some automatic behavior is held off.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuppressionWindow {
    until: Option<Instant>,
}

impl SuppressionWindow {
    pub fn arm(&mut self, now: Instant, duration: Duration) {
        self.until = Some(now + duration);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    pub fn clear(&mut self) {
        self.until = None;
    }
}
