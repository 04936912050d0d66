//! Gravity tick scheduling for a polling event loop.
//!
//! The session says which timer should run via
//! [`SessionController::timer`](russian_blocks_session::SessionController::timer).
//! [`TickScheduler`] turns that into deadlines on a millisecond clock. A new
//! epoch means a freshly armed timer: the pending deadline is dropped and the
//! first tick lands one full interval later.

use russian_blocks_session::TimerSpec;

#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    active: Option<TimerSpec>,
    next_due_ms: u64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow the timer the session wants at `now_ms`.
    pub fn sync(&mut self, timer: Option<TimerSpec>, now_ms: u64) {
        match (self.active, timer) {
            (Some(cur), Some(want)) if cur == want => {}
            (_, Some(want)) => {
                self.next_due_ms = now_ms.saturating_add(want.interval_ms as u64);
                self.active = Some(want);
            }
            (_, None) => self.active = None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.active.is_some()
    }

    /// Milliseconds until the next tick, `None` when stopped
    pub fn time_until(&self, now_ms: u64) -> Option<u64> {
        self.active.map(|_| self.next_due_ms.saturating_sub(now_ms))
    }

    /// Consume one due tick, if any.
    ///
    /// The next deadline advances from the previous one to keep the rate
    /// steady. A loop that stalled for a whole interval or more skips the
    /// missed ticks instead of replaying them.
    pub fn take_due(&mut self, now_ms: u64) -> bool {
        let Some(timer) = self.active else {
            return false;
        };
        if now_ms < self.next_due_ms {
            return false;
        }
        let interval = (timer.interval_ms as u64).max(1);
        let next = self.next_due_ms.saturating_add(interval);
        self.next_due_ms = if next <= now_ms {
            now_ms.saturating_add(interval)
        } else {
            next
        };
        true
    }
}
