//! Monochrome framebuffer with embedded-graphics support
//!
//! The buffer uses the layout [`St7735Mono::paint_image`] expects: eight rows
//! per byte, least significant bit on top, one byte per column per page.
//!
//! [`St7735Mono::paint_image`]: crate::driver::St7735Mono::paint_image

use display_interface::DisplayError;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::geometry::{FRAME_BYTES, HEIGHT, WIDTH};

/// A `WIDTH` x `HEIGHT` one-bit drawing surface
pub struct Framebuffer {
    buffer: [u8; FRAME_BYTES],
}

impl Default for Framebuffer {
    /// An all-off buffer
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// An all-off buffer
    pub const fn new() -> Self {
        Framebuffer {
            buffer: [0; FRAME_BYTES],
        }
    }

    /// Returns the buffer
    pub fn buffer(&self) -> &[u8; FRAME_BYTES] {
        &self.buffer
    }

    /// Returns a mutable buffer
    pub fn buffer_mut(&mut self) -> &mut [u8; FRAME_BYTES] {
        &mut self.buffer
    }

    /// Set every pixel to `color`
    pub fn clear_buffer(&mut self, color: BinaryColor) {
        let fill = if color.is_on() { 0xFF } else { 0x00 };
        self.buffer.fill(fill);
    }

    /// Read back one pixel. Points outside the buffer read as off.
    pub fn pixel(&self, point: Point) -> BinaryColor {
        match find_position(point) {
            Some((index, bit)) => BinaryColor::from(self.buffer[index] & bit != 0),
            None => BinaryColor::Off,
        }
    }

    fn set_pixel(&mut self, Pixel(point, color): Pixel<BinaryColor>) {
        let Some((index, bit)) = find_position(point) else {
            return;
        };
        if color.is_on() {
            self.buffer[index] |= bit;
        } else {
            self.buffer[index] &= !bit;
        }
    }
}

// index into the buffer and the bit inside that byte
fn find_position(point: Point) -> Option<(usize, u8)> {
    if point.x < 0 || point.y < 0 {
        return None;
    }
    let (x, y) = (point.x as usize, point.y as usize);
    if x >= usize::from(WIDTH) || y >= usize::from(HEIGHT) {
        return None;
    }
    Some((x + (y / 8) * usize::from(WIDTH), 1 << (y % 8)))
}

impl DrawTarget for Framebuffer {
    type Error = DisplayError;
    type Color = BinaryColor;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for pixel in pixels {
            self.set_pixel(pixel);
        }
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH.into(), HEIGHT.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::Rect;
    use crate::mock;
    use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

    #[test]
    fn buffer_clear() {
        let mut display = Framebuffer::new();
        assert!(display.buffer().iter().all(|&b| b == 0));

        display.clear_buffer(BinaryColor::On);
        assert!(display.buffer().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn top_row_sets_lowest_bit_of_first_page() {
        let mut display = Framebuffer::new();
        Line::new(Point::new(0, 0), Point::new(7, 0))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut display)
            .unwrap();

        let buffer = display.buffer();
        assert!(buffer[..8].iter().all(|&b| b == 0x01));
        assert!(buffer[8..].iter().all(|&b| b == 0));
    }

    #[test]
    fn rows_map_to_pages() {
        let mut display = Framebuffer::new();
        Pixel(Point::new(3, 9), BinaryColor::On)
            .draw(&mut display)
            .unwrap();
        Pixel(Point::new(127, 63), BinaryColor::On)
            .draw(&mut display)
            .unwrap();

        assert_eq!(display.buffer()[3 + 128], 0b10);
        assert_eq!(display.buffer()[FRAME_BYTES - 1], 0x80);
        assert_eq!(display.pixel(Point::new(3, 9)), BinaryColor::On);
        assert_eq!(display.pixel(Point::new(3, 8)), BinaryColor::Off);
    }

    #[test]
    fn off_pixels_clear_bits() {
        let mut display = Framebuffer::new();
        display.clear_buffer(BinaryColor::On);
        Pixel(Point::new(0, 0), BinaryColor::Off)
            .draw(&mut display)
            .unwrap();
        assert_eq!(display.buffer()[0], 0xFE);
    }

    #[test]
    fn outside_points_are_ignored() {
        let mut display = Framebuffer::new();
        for point in [
            Point::new(-1, 0),
            Point::new(0, -1),
            Point::new(128, 0),
            Point::new(0, 64),
        ] {
            Pixel(point, BinaryColor::On).draw(&mut display).unwrap();
            assert_eq!(display.pixel(point), BinaryColor::Off);
        }
        assert!(display.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn drawn_rectangle_reaches_the_panel() {
        let mut frame = Framebuffer::new();
        Rectangle::new(Point::new(10, 20), Size::new(2, 3))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut frame)
            .unwrap();

        let (mut display, _delay, wire) = mock::booted_display();
        display.paint_image(frame.buffer()).unwrap();

        let writes = mock::region_writes(&wire.events());
        assert_eq!(writes[0].region, Rect::ACTIVE);
        for (index, &color) in writes[0].pixels.iter().enumerate() {
            let (column, row) = (index / usize::from(HEIGHT), index % usize::from(HEIGHT));
            let inside = (10..12).contains(&column) && (20..23).contains(&row);
            let expected = if inside { Color::WHITE } else { Color::BLACK };
            assert_eq!(color, expected, "column {column} row {row}");
        }
    }
}
