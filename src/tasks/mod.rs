pub mod button;

pub use button::{BoardButtons, ButtonChannel, button_task};
