//! Monochrome to 12-bit pixel packing.
//!
//! In 12-bit mode the panel takes two pixels per three bytes:
//!
//! ```text
//! byte 0: A[11:4]
//! byte 1: A[3:0] B[11:8]
//! byte 2: B[7:0]
//! ```
//!
//! Framebuffer bytes hold eight vertically stacked pixels, least significant
//! bit on top. The write window advances down a column first, so a frame is
//! streamed column by column, each column walking its cells top to bottom.

use crate::color::Color;
use crate::geometry::{FRAME_BYTES, HEIGHT, WIDTH};

/// Bytes emitted for one framebuffer byte (eight pixels)
pub const CELL_BYTES: usize = 12;

/// Bytes emitted for one column of the drawing area
pub const COLUMN_BYTES: usize = HEIGHT as usize / 8 * CELL_BYTES;

/// Pack two pixels into the panel's three-byte layout
pub const fn pack_pair(first: Color, second: Color) -> [u8; 3] {
    let a = first.raw();
    let b = second.raw();
    [(a >> 4) as u8, (((a & 0x0F) << 4) | (b >> 8)) as u8, b as u8]
}

/// Inverse of [`pack_pair`]
pub const fn decode_pair(bytes: [u8; 3]) -> (Color, Color) {
    let a = ((bytes[0] as u16) << 4) | (bytes[1] as u16 >> 4);
    let b = (((bytes[1] & 0x0F) as u16) << 8) | bytes[2] as u16;
    (Color::new(a), Color::new(b))
}

/// Bytes needed to send `pixels` pixels. The pixel count must be even.
pub const fn encoded_len(pixels: u32) -> u32 {
    pixels / 2 * 3
}

/// Expand one framebuffer byte into four pixel pairs, low bits first
pub fn encode_cell(cell: u8, ink: Color, paper: Color) -> [u8; CELL_BYTES] {
    let mut out = [0u8; CELL_BYTES];
    let mut bits = cell;
    for pair in out.chunks_exact_mut(3) {
        let first = if bits & 0b01 != 0 { ink } else { paper };
        let second = if bits & 0b10 != 0 { ink } else { paper };
        pair.copy_from_slice(&pack_pair(first, second));
        bits >>= 2;
    }
    out
}

/// Encode one column of the framebuffer, top to bottom
pub fn encode_column(
    image: &[u8; FRAME_BYTES],
    column: usize,
    ink: Color,
    paper: Color,
) -> [u8; COLUMN_BYTES] {
    let mut out = [0u8; COLUMN_BYTES];
    let cells = image[column..].iter().step_by(WIDTH as usize);
    for (chunk, &cell) in out.chunks_exact_mut(CELL_BYTES).zip(cells) {
        chunk.copy_from_slice(&encode_cell(cell, ink, paper));
    }
    out
}

/// All columns of a frame in the order the panel consumes them
pub fn columns(
    image: &[u8; FRAME_BYTES],
    ink: Color,
    paper: Color,
) -> impl Iterator<Item = [u8; COLUMN_BYTES]> + '_ {
    (0..WIDTH as usize).map(move |column| encode_column(image, column, ink, paper))
}
