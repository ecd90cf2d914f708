//! Panel geometry: the physical panel, the centered drawing window, the
//! decorative border around it and the LED strip.
//!
//! Coordinates use the driver's logical axes: `x` runs along the panel's
//! 160-pixel side and `y` along its 128-pixel side.

use crate::state::Orientation;

/// Width of the physical panel
pub const TFT_WIDTH: u8 = 160;
/// Height of the physical panel
pub const TFT_HEIGHT: u8 = 128;
/// Width of the monochrome drawing area
pub const WIDTH: u8 = 128;
/// Height of the monochrome drawing area
pub const HEIGHT: u8 = 64;
/// Length of a monochrome framebuffer: one bit per pixel, eight rows per byte
pub const FRAME_BYTES: usize = WIDTH as usize * HEIGHT as usize / 8;

/// Rows covered by the LED strip
pub const LED_STRIP_HEIGHT: u8 = 4;

/// Background-colored gap between the border line and the drawing area
const INNER_GAP: u8 = 1;
const WINDOW_WIDTH: u8 = WIDTH + INNER_GAP * 2;
const WINDOW_HEIGHT: u8 = HEIGHT + INNER_GAP * 2;
const MARGIN_X: u8 = (TFT_WIDTH - WINDOW_WIDTH) / 2;
const MARGIN_Y: u8 = (TFT_HEIGHT - WINDOW_HEIGHT) / 2;

/// An axis-aligned rectangle in panel coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Left edge
    pub x: u8,
    /// Top edge
    pub y: u8,
    /// Extent along x, at least one pixel
    pub width: u8,
    /// Extent along y, at least one pixel
    pub height: u8,
}

impl Rect {
    /// The whole panel
    pub const PANEL: Rect = Rect::new(0, 0, TFT_WIDTH, TFT_HEIGHT);

    /// The drawing area, centered on the panel
    pub const ACTIVE: Rect = Rect::new(
        (TFT_WIDTH - WIDTH) / 2,
        (TFT_HEIGHT - HEIGHT) / 2,
        WIDTH,
        HEIGHT,
    );

    /// Create a rectangle from its origin and extent
    pub const fn new(x: u8, y: u8, width: u8, height: u8) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Last column covered, inclusive.
    ///
    /// Only meaningful when [`fits_panel`](Self::fits_panel) holds; otherwise
    /// the result wraps instead of panicking.
    pub const fn right(&self) -> u8 {
        self.x.wrapping_add(self.width).wrapping_sub(1)
    }

    /// Last row covered, inclusive. Wraps like [`right`](Self::right).
    pub const fn bottom(&self) -> u8 {
        self.y.wrapping_add(self.height).wrapping_sub(1)
    }

    /// Number of pixels the panel expects after this region is opened
    pub const fn pixel_count(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// True if the rectangle is non-empty and lies inside the panel
    pub const fn fits_panel(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.x as u16 + self.width as u16 <= TFT_WIDTH as u16
            && self.y as u16 + self.height as u16 <= TFT_HEIGHT as u16
    }
}

/// Which border color a region is painted with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderLayer {
    /// Border fill color
    Fill,
    /// Border line color
    Line,
    /// Background color
    Gap,
}

/// Regions of a full border redraw, in paint order
pub const BORDER_REGIONS: [(Rect, BorderLayer); 12] = [
    // fill bars across the top and bottom margins
    (Rect::new(0, 0, TFT_WIDTH, MARGIN_Y - 1), BorderLayer::Fill),
    (
        Rect::new(0, TFT_HEIGHT - (MARGIN_Y - 1), TFT_WIDTH, MARGIN_Y - 1),
        BorderLayer::Fill,
    ),
    // side strips, four rows taller than the window to cover the corners
    (
        Rect::new(0, MARGIN_Y - 1, MARGIN_X - 1, WINDOW_HEIGHT + 4),
        BorderLayer::Fill,
    ),
    (
        Rect::new(
            TFT_WIDTH - (MARGIN_X - 1),
            MARGIN_Y - 1,
            MARGIN_X - 1,
            WINDOW_HEIGHT + 4,
        ),
        BorderLayer::Fill,
    ),
    (
        Rect::new(MARGIN_X - 1, MARGIN_Y - 1, WINDOW_WIDTH + 2, 1),
        BorderLayer::Line,
    ),
    (
        Rect::new(MARGIN_X - 1, TFT_HEIGHT - MARGIN_Y, WINDOW_WIDTH + 2, 1),
        BorderLayer::Line,
    ),
    (
        Rect::new(MARGIN_X - 1, MARGIN_Y, 1, WINDOW_HEIGHT),
        BorderLayer::Line,
    ),
    (
        Rect::new(TFT_WIDTH - MARGIN_X, MARGIN_Y, 1, WINDOW_HEIGHT),
        BorderLayer::Line,
    ),
    (
        Rect::new(MARGIN_X, MARGIN_Y, WINDOW_WIDTH, INNER_GAP),
        BorderLayer::Gap,
    ),
    (
        Rect::new(
            MARGIN_X,
            TFT_HEIGHT - MARGIN_Y - INNER_GAP,
            WINDOW_WIDTH,
            INNER_GAP,
        ),
        BorderLayer::Gap,
    ),
    (
        Rect::new(MARGIN_X, MARGIN_Y + INNER_GAP, INNER_GAP, HEIGHT),
        BorderLayer::Gap,
    ),
    (
        Rect::new(
            TFT_WIDTH - MARGIN_X - INNER_GAP,
            MARGIN_Y + INNER_GAP,
            INNER_GAP,
            HEIGHT,
        ),
        BorderLayer::Gap,
    ),
];

/// The strip used as the RGB LED.
///
/// It sits at the far end of the panel's address space, or at row 0 while
/// rows are mirrored, so it stays on the same physical edge.
pub const fn led_strip(orientation: Orientation) -> Rect {
    let y = if orientation.is_vertically_flipped() {
        0
    } else {
        TFT_HEIGHT - LED_STRIP_HEIGHT
    };
    Rect::new(0, y, TFT_WIDTH, LED_STRIP_HEIGHT)
}
