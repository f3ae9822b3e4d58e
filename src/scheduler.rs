/// Single-slot auto-commit timer. Arming replaces any outstanding slot, so
/// two timers can never be armed at once; the runtime tick polls it.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoCommit {
    armed: Option<Armed>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Armed {
    key: char,
    deadline_ms: u64,
}

impl AutoCommit {
    /// Arm the slot for `key`, cancelling any previously armed timer.
    pub fn arm(&mut self, key: char, deadline_ms: u64) {
        self.armed = Some(Armed { key, deadline_ms });
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Poll the slot. A due timer is consumed either way; it requests a
    /// commit only when the armed key still matches the live preview key,
    /// so a stale timer left behind by a newer press is discarded.
    pub fn poll(&mut self, now_ms: u64, preview_key: Option<char>) -> bool {
        match self.armed {
            Some(armed) if now_ms >= armed.deadline_ms => {
                self.armed = None;
                preview_key == Some(armed.key)
            }
            _ => false,
        }
    }
}
