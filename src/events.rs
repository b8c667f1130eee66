//! Button masks and the events decoded from them.

use core::ops::{BitOr, BitOrAssign};

/// Which of the two buttons are held. Bit 0 is button A, bit 1 is button B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(u8);

impl ButtonMask {
    pub const NONE: ButtonMask = ButtonMask(0b00);
    pub const A: ButtonMask = ButtonMask(0b01);
    pub const B: ButtonMask = ButtonMask(0b10);
    pub const BOTH: ButtonMask = ButtonMask(0b11);

    /// Build a mask from the two line levels, `true` meaning held
    pub const fn from_levels(a: bool, b: bool) -> Self {
        ButtonMask((a as u8) | ((b as u8) << 1))
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every button in `other` is also in `self`
    pub const fn contains(self, other: ButtonMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ButtonMask {
    type Output = ButtonMask;

    fn bitor(self, rhs: ButtonMask) -> ButtonMask {
        ButtonMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for ButtonMask {
    fn bitor_assign(&mut self, rhs: ButtonMask) {
        self.0 |= rhs.0;
    }
}

/// A classified button event. "No event" is `None` wherever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// A pressed and released before the long press threshold
    AShort,
    /// B pressed and released before the long press threshold
    BShort,
    /// A alone held past the threshold. Repeats on every poll while held.
    ALong,
    /// B alone held past the threshold. Repeats on every poll while held.
    BLong,
    /// Both buttons were down at some point in a short episode
    Both,
    /// Both held together past the threshold. Repeats on every poll while held.
    BothLong,
}

impl ButtonEvent {
    /// Short event for everything seen down during an episode
    pub(crate) fn short(seen: ButtonMask) -> Self {
        match seen {
            ButtonMask::A => ButtonEvent::AShort,
            ButtonMask::B => ButtonEvent::BShort,
            _ => ButtonEvent::Both,
        }
    }

    /// Long event for the exact set of buttons held right now
    pub(crate) fn long(held: ButtonMask) -> Self {
        match held {
            ButtonMask::A => ButtonEvent::ALong,
            ButtonMask::B => ButtonEvent::BLong,
            _ => ButtonEvent::BothLong,
        }
    }

    pub fn is_long(self) -> bool {
        matches!(
            self,
            ButtonEvent::ALong | ButtonEvent::BLong | ButtonEvent::BothLong
        )
    }

    /// The buttons this event is about
    pub fn buttons(self) -> ButtonMask {
        match self {
            ButtonEvent::AShort | ButtonEvent::ALong => ButtonMask::A,
            ButtonEvent::BShort | ButtonEvent::BLong => ButtonMask::B,
            ButtonEvent::Both | ButtonEvent::BothLong => ButtonMask::BOTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_bits() {
        assert_eq!(ButtonMask::from_levels(false, false), ButtonMask::NONE);
        assert_eq!(ButtonMask::from_levels(true, false), ButtonMask::A);
        assert_eq!(ButtonMask::from_levels(false, true), ButtonMask::B);
        assert_eq!(ButtonMask::from_levels(true, true).bits(), 0b11);
    }

    #[test]
    fn union_accumulates() {
        let mut seen = ButtonMask::NONE;
        seen |= ButtonMask::B;
        assert!(seen.contains(ButtonMask::B));
        assert!(!seen.contains(ButtonMask::A));
        seen |= ButtonMask::A;
        assert_eq!(seen, ButtonMask::BOTH);
    }

    #[test]
    fn classification_falls_back_to_both() {
        assert_eq!(ButtonEvent::short(ButtonMask::A), ButtonEvent::AShort);
        assert_eq!(ButtonEvent::short(ButtonMask::BOTH), ButtonEvent::Both);
        assert_eq!(ButtonEvent::long(ButtonMask::B), ButtonEvent::BLong);
        assert_eq!(ButtonEvent::long(ButtonMask::BOTH), ButtonEvent::BothLong);
        assert!(ButtonEvent::BothLong.is_long());
        assert!(!ButtonEvent::Both.is_long());
        assert_eq!(ButtonEvent::BShort.buttons(), ButtonMask::B);
    }
}
