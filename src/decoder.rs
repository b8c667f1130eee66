//! Two button press decoder.
//!
//! The decoder is polled with the raw mask of held buttons and the current time and answers
//! with at most one [`ButtonEvent`] per call:
//!
//! - Short events fire on the poll where the last button goes up, and only if every poll of
//!   the episode saw it still under the long press threshold. Everything held during the
//!   episode is merged, so overlapping presses of A and B give a single `Both`.
//! - Long events fire on every poll while the exact same mask has been held for at least the
//!   threshold. The clock for this restarts on every mask change, so letting go of one of two
//!   held buttons does not immediately report a long press of the other one.
//! - Releasing after a long press is silent.

use embassy_time::{Duration, Instant};

use crate::{
    LONG_PRESS_MIN_MS,
    events::{ButtonEvent, ButtonMask},
};

/// Tunables for [`ButtonDecoder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderConfig {
    /// Hold time at which a press stops being short and starts reporting long events
    pub long_press: Duration,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            long_press: Duration::from_millis(LONG_PRESS_MIN_MS),
        }
    }
}

/// Holds the state carried between polls
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonDecoder {
    config: DecoderConfig,
    /// Mask seen on the previous poll
    held: ButtonMask,
    /// Every button seen down since everything was last released. Empty while `held` is.
    ever_held: ButtonMask,
    /// Whether the episode still counted as short on the last poll with something held.
    /// Only read when the last button goes up.
    was_short: bool,
    /// When the current episode started
    press_start: Instant,
    /// When `held` last changed value
    last_change: Instant,
    /// Last poll that saw any button held
    last_activity: Option<Instant>,
}

impl Default for ButtonDecoder {
    fn default() -> Self {
        Self::new(DecoderConfig::default())
    }
}

impl ButtonDecoder {
    pub const fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            held: ButtonMask::NONE,
            ever_held: ButtonMask::NONE,
            was_short: false,
            press_start: Instant::from_ticks(0),
            last_change: Instant::from_ticks(0),
            last_activity: None,
        }
    }

    /// Mask seen on the last poll
    pub fn held(&self) -> ButtonMask {
        self.held
    }

    /// Last time a poll saw any button held, `None` if none ever was
    pub fn last_activity(&self) -> Option<Instant> {
        self.last_activity
    }

    /// Feed one sample of the button lines taken at `now`.
    ///
    /// `now` must never go backwards between calls.
    pub fn poll(&mut self, raw: ButtonMask, now: Instant) -> Option<ButtonEvent> {
        if !raw.is_empty() {
            self.last_activity = Some(now);
        }

        if !raw.is_empty() && self.held.is_empty() {
            self.press_start = now;
        }

        let is_short =
            !raw.is_empty() && now.saturating_duration_since(self.press_start) < self.config.long_press;

        if raw != self.held {
            self.last_change = now;

            if !raw.is_empty() {
                // Nothing is reported until everything is up so overlapping presses merge
                trace!("DECODER: held {} -> {}", self.held, raw);
                self.held = raw;
                self.was_short = is_short;
                self.ever_held |= raw;
                return None;
            }

            // The stored flag, not `is_short`, decides. It is false once any poll of this
            // episode reached the threshold, in which case long events were already sent.
            let event = self.was_short.then(|| ButtonEvent::short(self.ever_held));
            debug!("DECODER: released after {}, event {}", self.ever_held, event);
            self.held = ButtonMask::NONE;
            self.ever_held = ButtonMask::NONE;
            self.was_short = is_short;
            return event;
        }

        if raw.is_empty() {
            return None;
        }

        self.was_short = is_short;
        if now.saturating_duration_since(self.last_change) >= self.config.long_press {
            Some(ButtonEvent::long(raw))
        } else {
            None
        }
    }
}
