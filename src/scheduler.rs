//! One ticker for every panel
//!
//! Counters want a tick every 100 ms, the zone views every second. Instead of a
//! timer per panel, subscribers register their period here and the UI loop
//! asks which of them are due and how long it may sleep.

use std::time::{Duration, Instant};

pub const FAST_TICK: Duration = Duration::from_millis(100);
pub const SLOW_TICK: Duration = Duration::from_millis(1000);

/// Index of a subscriber, in registration order
pub type SubscriberId = usize;

struct Subscription {
    period: Duration,
    next_due: Instant,
}

pub struct Scheduler {
    subscriptions: Vec<Subscription>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
        }
    }

    /// Register a subscriber, due immediately
    pub fn subscribe(&mut self, period: Duration, now: Instant) -> SubscriberId {
        let period = period.max(Duration::from_millis(1));
        self.subscriptions.push(Subscription { period, next_due: now });
        self.subscriptions.len() - 1
    }

    /// Subscribers due at `now`. Each one is rescheduled a whole number of
    /// periods ahead, so a stalled loop does not replay missed ticks.
    pub fn due(&mut self, now: Instant) -> Vec<SubscriberId> {
        let mut ready = Vec::new();
        for (id, sub) in self.subscriptions.iter_mut().enumerate() {
            if sub.next_due <= now {
                ready.push(id);
                while sub.next_due <= now {
                    sub.next_due += sub.period;
                }
            }
        }
        ready
    }

    /// Make every subscriber due on the next call to [`due`](Self::due)
    pub fn wake_all(&mut self, now: Instant) {
        for sub in &mut self.subscriptions {
            sub.next_due = now;
        }
    }

    /// Time until the earliest subscriber is due, capped at `max`
    pub fn until_next(&self, now: Instant, max: Duration) -> Duration {
        self.subscriptions
            .iter()
            .map(|s| s.next_due.saturating_duration_since(now))
            .min()
            .unwrap_or(max)
            .min(max)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
