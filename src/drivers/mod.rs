pub mod button;
pub mod clock;

pub use button::{ActiveLevel, ButtonLines, Buttons, PinPair};
pub use clock::{Clock, Pacer, SystemClock, TimerPacer, YieldPacer};
