//! Button inputs.
//!
//! Buttons pull their line low while pressed; [`ButtonPins::state`] turns the
//! eight lines into a [`ButtonSet`] bitmask.
use core::ops::{BitAnd, BitOr};

use embedded_hal::digital::InputPin;

/// A set of buttons, one bit each
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ButtonSet(u8);

impl ButtonSet {
    /// No buttons
    pub const NONE: ButtonSet = ButtonSet(0);
    /// Up
    pub const UP: ButtonSet = ButtonSet(1 << 7);
    /// Right
    pub const RIGHT: ButtonSet = ButtonSet(1 << 6);
    /// Left
    pub const LEFT: ButtonSet = ButtonSet(1 << 5);
    /// Down
    pub const DOWN: ButtonSet = ButtonSet(1 << 4);
    /// A
    pub const A: ButtonSet = ButtonSet(1 << 3);
    /// B
    pub const B: ButtonSet = ButtonSet(1 << 2);
    /// Start
    pub const START: ButtonSet = ButtonSet(1 << 1);
    /// Select
    pub const SELECT: ButtonSet = ButtonSet(1 << 0);

    /// Build from a raw bitmask
    pub const fn from_bits(bits: u8) -> Self {
        ButtonSet(bits)
    }

    /// The raw bitmask
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True if every button in `other` is also in `self`
    pub const fn contains(self, other: ButtonSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if no button is in the set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ButtonSet {
    type Output = ButtonSet;

    fn bitor(self, rhs: ButtonSet) -> ButtonSet {
        ButtonSet(self.0 | rhs.0)
    }
}

impl BitAnd for ButtonSet {
    type Output = ButtonSet;

    fn bitand(self, rhs: ButtonSet) -> ButtonSet {
        ButtonSet(self.0 & rhs.0)
    }
}

/// The eight button lines
pub struct ButtonPins<P> {
    /// Up
    pub up: P,
    /// Right
    pub right: P,
    /// Left
    pub left: P,
    /// Down
    pub down: P,
    /// A
    pub a: P,
    /// B
    pub b: P,
    /// Start
    pub start: P,
    /// Select
    pub select: P,
}

impl<P: InputPin> ButtonPins<P> {
    /// Sample every line and report which buttons are held
    pub fn state(&mut self) -> Result<ButtonSet, P::Error> {
        let mut held = ButtonSet::NONE;
        for (pin, button) in [
            (&mut self.up, ButtonSet::UP),
            (&mut self.right, ButtonSet::RIGHT),
            (&mut self.left, ButtonSet::LEFT),
            (&mut self.down, ButtonSet::DOWN),
            (&mut self.a, ButtonSet::A),
            (&mut self.b, ButtonSet::B),
            (&mut self.start, ButtonSet::START),
            (&mut self.select, ButtonSet::SELECT),
        ] {
            if pin.is_low()? {
                held = held | button;
            }
        }
        Ok(held)
    }
}
