use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_STATUS_TIMEOUT_SECS: u32 = 3;

/// A transient status line that clears itself after a fixed delay.
///
/// Each `show` schedules its own clear. A newer message does not cancel
/// clears scheduled by older ones, so an old clear can wipe a message that
/// has been visible for less than the full timeout.
#[derive(Debug)]
pub struct StatusBoard {
    timeout: Duration,
    message: String,
    pending_clears: Vec<DateTime<Utc>>,
}

impl StatusBoard {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            message: String::new(),
            pending_clears: Vec::new(),
        }
    }

    pub fn with_timeout_secs(secs: u32) -> Self {
        Self::new(Duration::seconds(i64::from(secs)))
    }

    pub fn show(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.message = message.into();
        self.pending_clears.push(now + self.timeout);
    }

    /// Fires every clear due at or before `now` and returns how many fired.
    pub fn tick(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.pending_clears.len();
        self.pending_clears.retain(|due| *due > now);
        let fired = before - self.pending_clears.len();
        if fired > 0 {
            self.message.clear();
        }
        fired
    }

    pub fn current(&self) -> Option<&str> {
        if self.message.is_empty() {
            None
        } else {
            Some(&self.message)
        }
    }

    pub fn pending_clears(&self) -> usize {
        self.pending_clears.len()
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::with_timeout_secs(DEFAULT_STATUS_TIMEOUT_SECS)
    }
}
