use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Receiver, Sender},
};
use embassy_time::{Duration, Ticker};
use esp_hal::gpio::Input;

use crate::{
    EVENT_QUEUE_SIZE, POLL_INTERVAL_MS,
    drivers::{Buttons, PinPair, SystemClock},
    events::ButtonEvent,
};

/// The two board buttons read through the embassy clock
pub type BoardButtons = Buttons<PinPair<Input<'static>, Input<'static>>, SystemClock>;

/// Channel types for decoded button events.
pub type ButtonChannel = Channel<CriticalSectionRawMutex, ButtonEvent, EVENT_QUEUE_SIZE>;
pub type ButtonChannelSender =
    Sender<'static, CriticalSectionRawMutex, ButtonEvent, EVENT_QUEUE_SIZE>;
pub type ButtonChannelReceiver =
    Receiver<'static, CriticalSectionRawMutex, ButtonEvent, EVENT_QUEUE_SIZE>;

/// Button polling task.
/// Samples the buttons at a fixed rate and forwards every decoded event to the channel.
///
/// # Parameters
/// * `buttons` - The board buttons, already configured
/// * `events` - Where decoded events go
#[embassy_executor::task]
pub async fn button_task(mut buttons: BoardButtons, events: ButtonChannelSender) {
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    info!("BUTTON_TASK: Polling every {} ms", POLL_INTERVAL_MS);
    loop {
        match buttons.poll() {
            // Long presses repeat on every poll, a slow consumer only misses repeats
            Some(event) if event.is_long() => {
                if events.try_send(event).is_err() {
                    trace!("BUTTON_TASK: Queue full, dropped repeat {}", event);
                }
            }
            Some(event) => events.send(event).await,
            None => {}
        }
        ticker.next().await;
    }
}
