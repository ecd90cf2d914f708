//! Persistent device state shared by every drawing operation.

use crate::color::Color;
use crate::flag::Flag;

/// Mirror of the panel's memory access control register.
///
/// Only the two mirror bits are driven. The register powers up with `MY` set,
/// which is the unflipped orientation for this mounting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Orientation(u8);

impl Default for Orientation {
    fn default() -> Self {
        Orientation(Flag::MADCTL_MY)
    }
}

impl Orientation {
    /// Register value sent with the orientation command
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Mirror columns. Flipping clears `MY`.
    pub fn set_horizontal_flip(&mut self, flipped: bool) {
        if flipped {
            self.0 &= !Flag::MADCTL_MY;
        } else {
            self.0 |= Flag::MADCTL_MY;
        }
    }

    /// Mirror rows. Flipping sets `MX`.
    pub fn set_vertical_flip(&mut self, flipped: bool) {
        if flipped {
            self.0 |= Flag::MADCTL_MX;
        } else {
            self.0 &= !Flag::MADCTL_MX;
        }
    }

    /// True after `set_horizontal_flip(true)`
    pub const fn is_horizontally_flipped(self) -> bool {
        self.0 & Flag::MADCTL_MY == 0
    }

    /// True after `set_vertical_flip(true)`
    pub const fn is_vertically_flipped(self) -> bool {
        self.0 & Flag::MADCTL_MX != 0
    }
}

/// The four persistent colors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// One pixel line around the drawing window
    pub border_line: Color,
    /// Everything outside the border line
    pub border_fill: Color,
    /// Set framebuffer bits
    pub ink: Color,
    /// Cleared framebuffer bits, and the gap inside the border line
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            border_line: Color::GRAY,
            border_fill: Color::BLACK,
            ink: Color::WHITE,
            background: Color::BLACK,
        }
    }
}

/// A channel of the on-screen RGB LED
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedChannel {
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
}

/// Intensities of the on-screen RGB LED
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RgbLed {
    /// Red intensity
    pub red: u8,
    /// Green intensity
    pub green: u8,
    /// Blue intensity
    pub blue: u8,
}

impl RgbLed {
    /// LED with all three channels set
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        RgbLed { red, green, blue }
    }

    /// Intensity of a single channel
    pub const fn channel(&self, channel: LedChannel) -> u8 {
        match channel {
            LedChannel::Red => self.red,
            LedChannel::Green => self.green,
            LedChannel::Blue => self.blue,
        }
    }

    /// Replace a single channel
    pub fn set_channel(&mut self, channel: LedChannel, value: u8) {
        match channel {
            LedChannel::Red => self.red = value,
            LedChannel::Green => self.green = value,
            LedChannel::Blue => self.blue = value,
        }
    }

    /// Color to write into panel RAM so the strip shows these intensities.
    ///
    /// While the panel inverts its output every channel is complemented first,
    /// so the inversion cancels out on screen.
    pub const fn displayed_color(&self, inverted: bool) -> Color {
        if inverted {
            Color::quantize(0xFF - self.red, 0xFF - self.green, 0xFF - self.blue)
        } else {
            Color::quantize(self.red, self.green, self.blue)
        }
    }
}

/// Everything the driver remembers between calls
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeviceState {
    /// Current colors
    pub palette: Palette,
    /// Current orientation register
    pub orientation: Orientation,
    /// Whether panel inversion is on
    pub inverted: bool,
    /// Current LED intensities
    pub led: RgbLed,
    /// Whether the border has been painted at least once
    pub border_drawn: bool,
}
