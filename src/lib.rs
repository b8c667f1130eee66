#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod activity;
pub mod decoder;
pub mod drivers;
pub mod events;
#[cfg(feature = "esp32c3")]
pub mod tasks;

pub use activity::{ActivityStamp, LAST_BUTTON_ACTIVITY};
pub use decoder::{ButtonDecoder, DecoderConfig};
pub use drivers::button::{Buttons, wait_for_press, wait_for_press_or_timeout};
pub use events::{ButtonEvent, ButtonMask};

/// How long the exact same set of buttons must stay down before it counts as a long press
pub const LONG_PRESS_MIN_MS: u64 = 400;

/// Delay between polls in the wait loops and the button task, in milliseconds
pub const POLL_INTERVAL_MS: u64 = 50;

/// Time without any button held after which the device is reported idle, in milliseconds
pub const IDLE_TIMEOUT_MS: u64 = 30_000;

/// How long the firmware waits for a press at start-up before carrying on, in milliseconds
pub const STARTUP_WAIT_MS: u64 = 10_000;

/// The maximum number of decoded events waiting for the consumer
pub const EVENT_QUEUE_SIZE: usize = 8;
