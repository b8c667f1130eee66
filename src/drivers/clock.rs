use embassy_time::{Duration, Instant, Timer};

use crate::POLL_INTERVAL_MS;

/// Monotonic time source for the decoder
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hands control back to the scheduler between two polls of a wait loop
#[allow(async_fn_in_trait)]
pub trait Pacer {
    async fn pause(&mut self);
}

/// Sleeps a fixed interval between polls
#[derive(Debug, Clone, Copy)]
pub struct TimerPacer {
    interval: Duration,
}

impl TimerPacer {
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for TimerPacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(POLL_INTERVAL_MS))
    }
}

impl Pacer for TimerPacer {
    async fn pause(&mut self) {
        Timer::after(self.interval).await;
    }
}

/// Only yields to other tasks, polling again as soon as the executor comes back round
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldPacer;

impl Pacer for YieldPacer {
    async fn pause(&mut self) {
        embassy_futures::yield_now().await;
    }
}
