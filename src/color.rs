//! 12-bit panel colors
//!
//! The panel runs in its 12-bit interface mode, so every color is four bits
//! per channel packed as `0x0RGB`.

/// A 12-bit RGB444 color as understood by the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(u16);

impl Color {
    /// All channels off
    pub const BLACK: Color = Color(0x000);
    /// All channels at full intensity
    pub const WHITE: Color = Color(0xFFF);
    /// Mid gray, the default border line color
    pub const GRAY: Color = Color(0x888);
    /// Red
    pub const RED: Color = Color(0xF00);
    /// Green
    pub const GREEN: Color = Color(0x0F0);
    /// Blue
    pub const BLUE: Color = Color(0x00F);
    /// Yellow
    pub const YELLOW: Color = Color(0xFF0);
    /// Cyan
    pub const CYAN: Color = Color(0x0FF);
    /// Magenta
    pub const MAGENTA: Color = Color(0xF0F);
    /// Orange
    pub const ORANGE: Color = Color(0xF80);

    /// Build a color from a raw `0x0RGB` value. Bits above the low 12 are dropped.
    pub const fn new(raw: u16) -> Self {
        Color(raw & 0x0FFF)
    }

    /// Pack three 4-bit channels. Each channel is masked to its low nibble.
    pub const fn from_rgb4(red: u8, green: u8, blue: u8) -> Self {
        Color(((red as u16 & 0xF) << 8) | ((green as u16 & 0xF) << 4) | (blue as u16 & 0xF))
    }

    /// Quantize 8-bit channels to the panel's 4-bit range (`v * 15 / 255`)
    pub const fn quantize(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgb4(quantize_channel(red), quantize_channel(green), quantize_channel(blue))
    }

    /// The raw `0x0RGB` value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Red nibble
    pub const fn red(self) -> u8 {
        (self.0 >> 8) as u8 & 0xF
    }

    /// Green nibble
    pub const fn green(self) -> u8 {
        (self.0 >> 4) as u8 & 0xF
    }

    /// Blue nibble
    pub const fn blue(self) -> u8 {
        self.0 as u8 & 0xF
    }

    /// The color the panel shows for this value while display inversion is on
    pub const fn inverse(self) -> Self {
        Color(!self.0 & 0x0FFF)
    }
}

const fn quantize_channel(value: u8) -> u8 {
    (value as u16 * 0xF / 0xFF) as u8
}

#[cfg(feature = "graphics")]
mod graphics {
    use super::Color;
    use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

    // rescale between channel depths, rounding to the nearest step
    const fn rescale(value: u8, from_max: u16, to_max: u16) -> u8 {
        ((value as u16 * to_max + from_max / 2) / from_max) as u8
    }

    impl From<Rgb565> for Color {
        fn from(color: Rgb565) -> Self {
            Color::from_rgb4(
                rescale(color.r(), 31, 15),
                rescale(color.g(), 63, 15),
                rescale(color.b(), 31, 15),
            )
        }
    }

    impl From<Color> for Rgb565 {
        fn from(color: Color) -> Self {
            Rgb565::new(
                rescale(color.red(), 15, 31),
                rescale(color.green(), 15, 63),
                rescale(color.blue(), 15, 31),
            )
        }
    }
}
