//! Fixed-rate interval timers driven by an explicit clock
//!
//! Stand-ins for browser intervals: the owner asks whether a tick is due
//! and fires the handler itself, so timing stays deterministic in tests.

/// A cancellable repeating timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    period_ms: f64,
    next_due_ms: Option<f64>,
}

impl Interval {
    /// A stopped timer with the given period
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            next_due_ms: None,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Start (or restart); the first tick is due one period after `now_ms`.
    /// A non-positive period leaves the timer stopped.
    pub fn start(&mut self, period_ms: f64, now_ms: f64) {
        self.period_ms = period_ms;
        self.next_due_ms = (period_ms > 0.0).then_some(now_ms + period_ms);
    }

    /// Stop the timer; pending ticks never fire
    pub fn cancel(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// When the next tick is due, if active
    pub fn next_due(&self) -> Option<f64> {
        self.next_due_ms
    }

    /// Consume one tick due at or before `now_ms`, returning its due time
    pub fn take_due(&mut self, now_ms: f64) -> Option<f64> {
        let due = self.next_due_ms?;
        if due > now_ms {
            return None;
        }
        self.next_due_ms = Some(due + self.period_ms);
        Some(due)
    }
}
