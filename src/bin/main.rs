#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]

use defmt::{debug, info};
use dual_button_input::{
    Buttons, IDLE_TIMEOUT_MS, LAST_BUTTON_ACTIVITY, STARTUP_WAIT_MS,
    drivers::{ActiveLevel, PinPair, SystemClock, TimerPacer},
    tasks::{
        ButtonChannel,
        button::{ButtonChannelReceiver, button_task},
    },
    wait_for_press_or_timeout,
};
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Timer};
use esp_hal::{
    Config,
    clock::CpuClock,
    gpio::{Input, InputConfig, Pull},
    timer::systimer::SystemTimer,
};
use panic_rtt_target as _;
use static_cell::StaticCell;

/// Decoded events flow from the button task to the main loop through this channel
static BUTTON_CHANNEL: StaticCell<ButtonChannel> = StaticCell::new();
static BUTTON_RECEIVER: StaticCell<ButtonChannelReceiver> = StaticCell::new();

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    #[cfg(all(feature = "rtt", feature = "defmt"))]
    rtt_target::rtt_init_defmt!();

    let peripherals = esp_hal::init(Config::default().with_cpu_clock(CpuClock::max()));
    let timer0 = SystemTimer::new(peripherals.SYSTIMER);
    esp_hal_embassy::init(timer0.alarm0);

    // Both buttons short the line to ground
    let config = InputConfig::default().with_pull(Pull::Up);
    let button_a = Input::new(peripherals.GPIO9, config);
    let button_b = Input::new(peripherals.GPIO3, config);
    let mut buttons = Buttons::new(
        PinPair::new(button_a, button_b, ActiveLevel::Low),
        SystemClock,
    );

    info!("MAIN: Press any button to start");
    match wait_for_press_or_timeout(
        &mut buttons,
        &mut TimerPacer::default(),
        Duration::from_millis(STARTUP_WAIT_MS),
    )
    .await
    {
        Some(event) => info!("MAIN: Started by {}", event),
        None => info!("MAIN: No button pressed, starting anyway"),
    }

    let channel: &'static ButtonChannel = BUTTON_CHANNEL.init(Channel::new());
    let receiver = BUTTON_RECEIVER.init(channel.receiver());
    spawner
        .spawn(button_task(buttons, channel.sender()))
        .expect("Failed to spawn button task");

    let idle_timeout = Duration::from_millis(IDLE_TIMEOUT_MS);
    let mut idle = false;
    info!("MAIN: Starting main loop");
    loop {
        match select(receiver.receive(), Timer::after(idle_timeout)).await {
            Either::First(event) => {
                idle = false;
                if event.is_long() {
                    debug!("MAIN: Holding {}", event.buttons());
                } else {
                    info!("MAIN: {}", event);
                }
            }
            // Holds keep the activity stamp fresh without producing events, so check it
            // before calling the device idle
            Either::Second(_) => {
                let now = Instant::now();
                if !idle && LAST_BUTTON_ACTIVITY.is_idle(now, idle_timeout) {
                    idle = true;
                    info!(
                        "MAIN: Idle for {} ms",
                        LAST_BUTTON_ACTIVITY.idle_for(now).as_millis()
                    );
                }
            }
        }
    }
}
