use embassy_time::{Duration, Instant};
use embedded_hal::digital::InputPin;

use crate::{
    activity::{ActivityStamp, LAST_BUTTON_ACTIVITY},
    decoder::{ButtonDecoder, DecoderConfig},
    drivers::clock::{Clock, Pacer},
    events::{ButtonEvent, ButtonMask},
};

/// Something that can sample both button lines at once
pub trait ButtonLines {
    fn read(&mut self) -> ButtonMask;
}

/// Line level that means "held"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Button pulls the line to ground, the usual wiring with a pull-up
    Low,
    High,
}

/// Button A and button B wired to one GPIO each
pub struct PinPair<A, B> {
    a: A,
    b: B,
    active: ActiveLevel,
}

impl<A: InputPin, B: InputPin> PinPair<A, B> {
    pub fn new(a: A, b: B, active: ActiveLevel) -> Self {
        Self { a, b, active }
    }
}

/// A line that can't be read counts as released
fn is_held<P: InputPin>(pin: &mut P, active: ActiveLevel, name: &str) -> bool {
    let level = match active {
        ActiveLevel::Low => pin.is_low(),
        ActiveLevel::High => pin.is_high(),
    };
    level.unwrap_or_else(|_| {
        warn!("BUTTONS: failed to read line {}", name);
        false
    })
}

impl<A: InputPin, B: InputPin> ButtonLines for PinPair<A, B> {
    fn read(&mut self) -> ButtonMask {
        ButtonMask::from_levels(
            is_held(&mut self.a, self.active, "A"),
            is_held(&mut self.b, self.active, "B"),
        )
    }
}

/// The decoder together with the lines and clock it samples
pub struct Buttons<L, C> {
    lines: L,
    clock: C,
    decoder: ButtonDecoder,
    activity: &'static ActivityStamp,
}

impl<L: ButtonLines, C: Clock> Buttons<L, C> {
    pub fn new(lines: L, clock: C) -> Self {
        Self::with_config(lines, clock, DecoderConfig::default())
    }

    pub fn with_config(lines: L, clock: C, config: DecoderConfig) -> Self {
        Self {
            lines,
            clock,
            decoder: ButtonDecoder::new(config),
            activity: &LAST_BUTTON_ACTIVITY,
        }
    }

    /// Publish activity somewhere other than [`LAST_BUTTON_ACTIVITY`]
    pub fn with_activity(mut self, activity: &'static ActivityStamp) -> Self {
        self.activity = activity;
        self
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn decoder(&self) -> &ButtonDecoder {
        &self.decoder
    }

    /// Sample the lines and run one step of the decoder
    pub fn poll(&mut self) -> Option<ButtonEvent> {
        let raw = self.lines.read();
        let now = self.clock.now();
        let event = self.decoder.poll(raw, now);
        if !raw.is_empty() {
            if let Some(at) = self.decoder.last_activity() {
                self.activity.record(at);
            }
        }
        if let Some(event) = event {
            debug!("BUTTONS: {} at {}", event, now);
        }
        event
    }
}

/// Wait for the next button event.
///
/// A hold that is already being reported is drained first, so a button still down from
/// whatever came before can't end the wait straight away. Returns the event that did.
pub async fn wait_for_press<L, C, P>(buttons: &mut Buttons<L, C>, pacer: &mut P) -> ButtonEvent
where
    L: ButtonLines,
    C: Clock,
    P: Pacer,
{
    let mut event = buttons.poll();
    while event.is_some() {
        event = buttons.poll();
        pacer.pause().await;
    }
    loop {
        event = buttons.poll();
        pacer.pause().await;
        if let Some(event) = event {
            return event;
        }
    }
}

/// [`wait_for_press`] that gives up once more than `timeout` has passed.
///
/// Returns `None` on timeout. The decoder is left as it was at the last poll.
pub async fn wait_for_press_or_timeout<L, C, P>(
    buttons: &mut Buttons<L, C>,
    pacer: &mut P,
    timeout: Duration,
) -> Option<ButtonEvent>
where
    L: ButtonLines,
    C: Clock,
    P: Pacer,
{
    // A timeout too long to represent never expires
    let deadline = buttons.now().checked_add(timeout).unwrap_or(Instant::MAX);

    let mut event = buttons.poll();
    while event.is_some() {
        event = buttons.poll();
        pacer.pause().await;
        if buttons.now() > deadline {
            debug!("BUTTONS: timed out draining a hold");
            return None;
        }
    }
    loop {
        event = buttons.poll();
        pacer.pause().await;
        if event.is_some() {
            return event;
        }
        if buttons.now() > deadline {
            debug!("BUTTONS: timed out waiting for a press");
            return None;
        }
    }
}
