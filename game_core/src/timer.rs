/// One-shot deadline polled against the host clock
///
/// Replaces deferred callbacks: the owner checks [`Timer::fire`] once per
/// tick, so a cancelled or reset timer can never act on stale state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    due_ms: Option<u64>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer, replacing any pending deadline
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64) {
        self.due_ms = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self) {
        self.due_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due_ms.is_some()
    }

    pub fn due_ms(&self) -> Option<u64> {
        self.due_ms
    }

    /// Returns true exactly once, on the first poll at or after the deadline
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.due_ms {
            Some(due) if now_ms >= due => {
                self.due_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Push the deadline back, e.g. by the time spent paused
    pub fn shift(&mut self, by_ms: u64) {
        if let Some(due) = self.due_ms.as_mut() {
            *due = due.saturating_add(by_ms);
        }
    }
}
