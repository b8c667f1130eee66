use std::{cell::Cell, rc::Rc};

use dual_button_input::{
    ActivityStamp, ButtonEvent, ButtonMask, Buttons, DecoderConfig,
    drivers::{ButtonLines, Clock, Pacer},
    wait_for_press, wait_for_press_or_timeout,
};
use embassy_futures::block_on;
use embassy_time::{Duration, Instant};

/// Long press threshold used throughout, in ticks
const THRESHOLD: u64 = 4;

/// Held mask as a function of the current tick
type Script = fn(u64) -> ButtonMask;

/// Lines that follow a script against a shared fake tick counter
struct ScriptedLines {
    ticks: Rc<Cell<u64>>,
    script: Script,
}

impl ButtonLines for ScriptedLines {
    fn read(&mut self) -> ButtonMask {
        (self.script)(self.ticks.get())
    }
}

struct FakeClock(Rc<Cell<u64>>);

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(self.0.get())
    }
}

/// Moves the fake clock one tick forward per pause
struct TickPacer {
    ticks: Rc<Cell<u64>>,
    pauses: usize,
}

impl Pacer for TickPacer {
    async fn pause(&mut self) {
        self.pauses += 1;
        self.ticks.set(self.ticks.get() + 1);
    }
}

fn board(script: Script) -> (Buttons<ScriptedLines, FakeClock>, TickPacer) {
    let ticks = Rc::new(Cell::new(0));
    let lines = ScriptedLines {
        ticks: ticks.clone(),
        script,
    };
    let config = DecoderConfig {
        long_press: Duration::from_ticks(THRESHOLD),
    };
    let buttons = Buttons::with_config(lines, FakeClock(ticks.clone()), config);
    (buttons, TickPacer { ticks, pauses: 0 })
}

/// Poll on the caller's side until the clock reads `until`
fn poll_until(buttons: &mut Buttons<ScriptedLines, FakeClock>, pacer: &TickPacer, until: u64) {
    while pacer.ticks.get() < until {
        buttons.poll();
        pacer.ticks.set(pacer.ticks.get() + 1);
    }
}

#[test]
fn waits_for_short_press() {
    let (mut buttons, mut pacer) = board(|t| {
        if (3..5).contains(&t) {
            ButtonMask::A
        } else {
            ButtonMask::NONE
        }
    });
    let event = block_on(wait_for_press(&mut buttons, &mut pacer));
    assert_eq!(event, ButtonEvent::AShort);
    // Released at tick 5, one pause follows the poll that saw it
    assert_eq!(buttons.now(), Instant::from_ticks(6));
}

#[test]
fn waits_for_long_press() {
    let (mut buttons, mut pacer) = board(|t| {
        if t >= 2 {
            ButtonMask::BOTH
        } else {
            ButtonMask::NONE
        }
    });
    let event = block_on(wait_for_press(&mut buttons, &mut pacer));
    assert_eq!(event, ButtonEvent::BothLong);
}

#[test]
fn hold_in_progress_is_drained_first() {
    let (mut buttons, mut pacer) = board(|t| match t {
        0..10 => ButtonMask::A,
        12..14 => ButtonMask::B,
        _ => ButtonMask::NONE,
    });
    // A is already being reported as long when the wait starts
    poll_until(&mut buttons, &pacer, 5);
    assert_eq!(buttons.poll(), Some(ButtonEvent::ALong));

    let event = block_on(wait_for_press(&mut buttons, &mut pacer));
    assert_eq!(event, ButtonEvent::BShort);
}

#[test]
fn times_out_without_press() {
    let (mut buttons, mut pacer) = board(|_| ButtonMask::NONE);
    let event = block_on(wait_for_press_or_timeout(
        &mut buttons,
        &mut pacer,
        Duration::from_ticks(10),
    ));
    assert_eq!(event, None);
    // Gives up on the first check past the deadline
    assert_eq!(buttons.now(), Instant::from_ticks(11));
    assert_eq!(pacer.pauses, 11);
}

#[test]
fn press_inside_timeout_is_returned() {
    let (mut buttons, mut pacer) = board(|t| {
        if (1..3).contains(&t) {
            ButtonMask::B
        } else {
            ButtonMask::NONE
        }
    });
    let event = block_on(wait_for_press_or_timeout(
        &mut buttons,
        &mut pacer,
        Duration::from_ticks(10),
    ));
    assert_eq!(event, Some(ButtonEvent::BShort));
}

#[test]
fn unrepresentable_timeout_waits_without_deadline() {
    let (mut buttons, mut pacer) = board(|t| {
        if (7..9).contains(&t) {
            ButtonMask::B
        } else {
            ButtonMask::NONE
        }
    });
    poll_until(&mut buttons, &pacer, 5);
    let event = block_on(wait_for_press_or_timeout(
        &mut buttons,
        &mut pacer,
        Duration::MAX,
    ));
    assert_eq!(event, Some(ButtonEvent::BShort));
}

#[test]
fn timeout_while_draining_leaves_hold_alone() {
    let (mut buttons, mut pacer) = board(|_| ButtonMask::A);
    poll_until(&mut buttons, &pacer, 5);
    assert_eq!(buttons.poll(), Some(ButtonEvent::ALong));

    let event = block_on(wait_for_press_or_timeout(
        &mut buttons,
        &mut pacer,
        Duration::from_ticks(3),
    ));
    assert_eq!(event, None);
    assert_eq!(buttons.decoder().held(), ButtonMask::A);
    // The hold keeps reporting for whoever polls next
    assert_eq!(buttons.poll(), Some(ButtonEvent::ALong));
}

#[test]
fn polling_publishes_activity() {
    static STAMP: ActivityStamp = ActivityStamp::new();

    let (buttons, mut pacer) = board(|t| {
        if (2..4).contains(&t) {
            ButtonMask::B
        } else {
            ButtonMask::NONE
        }
    });
    let mut buttons = buttons.with_activity(&STAMP);
    assert_eq!(STAMP.last(), None);

    block_on(wait_for_press(&mut buttons, &mut pacer));
    assert_eq!(STAMP.last(), Some(Instant::from_ticks(3)));
    assert_eq!(STAMP.last(), buttons.decoder().last_activity());

    // Released polls leave the published stamp where the decoder's is
    buttons.poll();
    buttons.poll();
    assert_eq!(STAMP.last(), buttons.decoder().last_activity());
    assert!(STAMP.is_idle(Instant::from_ticks(13), Duration::from_ticks(10)));
}
