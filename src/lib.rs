//! ST7735 driver for monochrome framebuffers
//!
//! Renders a 128x64 one-bit framebuffer onto a 160x128 ST7735 TFT in its
//! 12-bit color mode, centered inside a decorative border, with a strip along
//! one edge of the panel acting as an RGB LED.
//!
//! ## Architecture
//!
//! - **[`interface::SpiDisplayInterface`]** owns the SPI bus and the
//!   chip-select, data/command and reset lines. It frames commands, opens
//!   write windows and streams flat fills.
//! - **[`codec`]** packs pixels into the panel's three-bytes-per-two-pixels
//!   format and walks framebuffers in the order the panel consumes them.
//! - **[`driver::St7735Mono`]** holds the persistent state (colors,
//!   orientation, inversion, LED intensities) and composes the drawing area,
//!   the border and the LED strip from the two layers above.
//! - **`framebuffer::Framebuffer`** (feature `graphics`) is an
//!   embedded-graphics draw target in the layout the driver paints.
//!
//! Every operation is a blocking burst of SPI writes. Nothing is read back.
//!
//! ## Usage
//!
//! ```rust, ignore
//! use st7735_mono::prelude::*;
//! use embedded_graphics::{prelude::*, primitives::*, pixelcolor::BinaryColor};
//!
//! // 1. Create the driver and bring the panel up
//! let mut display = St7735Mono::new(spi, cs, dc, rst);
//! display.init(&mut delay)?;
//!
//! // 2. Draw into a framebuffer
//! let mut frame = Framebuffer::new();
//! Circle::new(Point::new(48, 16), 32)
//!     .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
//!     .draw(&mut frame)?;
//!
//! // 3. Push it to the panel
//! display.set_pixel_color(Color::ORANGE);
//! display.paint_screen(frame.buffer_mut(), true)?;
//!
//! // The LED strip and the border follow their own setters
//! display.set_rgb_led(0, 0xFF, 0)?;
//! display.set_border_line_color(Color::CYAN)?;
//! ```
//!
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

mod cmd;
pub mod buttons;
pub mod codec;
pub mod color;
pub mod driver;
#[cfg(feature = "graphics")]
pub mod framebuffer;
pub mod geometry;
pub mod interface;
pub mod state;

mod flag;

#[cfg(test)]
mod mock;

/// Useful exports
pub mod prelude {
    pub use crate::buttons::{ButtonPins, ButtonSet};
    pub use crate::color::Color;
    pub use crate::driver::{DisplayError, St7735Mono};
    pub use crate::geometry::{FRAME_BYTES, HEIGHT, WIDTH};
    pub use crate::state::LedChannel;

    #[cfg(feature = "graphics")]
    pub use crate::framebuffer::Framebuffer;
}
