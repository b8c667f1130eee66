//! Last time any button was seen held, shared with whatever decides the device is idle.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_time::{Duration, Instant};

/// Stamp written by [`crate::Buttons::poll`] and read by idle detection
pub static LAST_BUTTON_ACTIVITY: ActivityStamp = ActivityStamp::new();

pub struct ActivityStamp {
    last: Mutex<Cell<Option<Instant>>>,
}

impl Default for ActivityStamp {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityStamp {
    pub const fn new() -> Self {
        Self {
            last: Mutex::new(Cell::new(None)),
        }
    }

    pub fn record(&self, at: Instant) {
        critical_section::with(|cs| self.last.borrow(cs).set(Some(at)));
    }

    /// `None` until a button has been held at least once
    pub fn last(&self) -> Option<Instant> {
        critical_section::with(|cs| self.last.borrow(cs).get())
    }

    /// How long ago a button was last held. With no activity at all this is the whole
    /// time since boot.
    pub fn idle_for(&self, now: Instant) -> Duration {
        let since = self.last().unwrap_or(Instant::from_ticks(0));
        now.saturating_duration_since(since)
    }

    pub fn is_idle(&self, now: Instant, timeout: Duration) -> bool {
        self.idle_for(now) >= timeout
    }
}
