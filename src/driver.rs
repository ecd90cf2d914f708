//! Driver for an ST7735 panel showing a monochrome framebuffer
pub use display_interface::DisplayError;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::buttons::ButtonSet;
use crate::cmd::Cmd;
use crate::codec;
use crate::color::Color;
use crate::flag::{Flag, GAMMA_NEGATIVE, GAMMA_POSITIVE};
use crate::geometry::{self, BorderLayer, Rect, BORDER_REGIONS, FRAME_BYTES};
use crate::interface::SpiDisplayInterface;
use crate::state::{DeviceState, LedChannel, Orientation, Palette, RgbLed};

use log::debug;

/// Bring-up sequence run by [`St7735Mono::init`] after the reset pulse
pub const DEFAULT_INIT_SEQUENCE: &[InitStep] = &[
    InitStep::Cmd(Cmd::SWRESET),
    InitStep::DelayMs(150),
    InitStep::Cmd(Cmd::SLPOUT),
    InitStep::DelayMs(150),
    // rate = fosc / (1 * 2 + 40) * (LINE + 2C + 2D)
    InitStep::CmdData(Cmd::FRMCTR1, &Flag::FRAME_RATE_NORMAL),
    InitStep::Orientation,
    InitStep::CmdData(Cmd::COLMOD, &[Flag::COLMOD_12BIT]),
    InitStep::CmdData(Cmd::GMCTRP1, &GAMMA_POSITIVE),
    InitStep::CmdData(Cmd::GMCTRN1, &GAMMA_NEGATIVE),
    // panel RAM holds garbage after reset
    InitStep::BlankPanel,
    InitStep::Cmd(Cmd::DISPON),
    InitStep::DelayMs(100),
];

/// Steps that a bring-up sequence can contain.
/// Keep variants minimal and serializable as static arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitStep {
    /// Wait a fixed number of milliseconds
    DelayMs(u8),
    /// Send a bare command byte
    Cmd(u8),
    /// Send a command with a static data slice
    CmdData(u8, &'static [u8]),
    /// Send MADCTL with the current orientation register
    Orientation,
    /// Fill the whole panel with the background color
    BlankPanel,
}

/// A configured panel with its persistent drawing state.
pub struct St7735Mono<SPI, CS, DC, RST> {
    interface: SpiDisplayInterface<SPI, CS, DC, RST>,
    state: DeviceState,
    /// Panel-specific init sequence provided at construction time.
    init_sequence: &'static [InitStep],
}

impl<SPI, CS, DC, RST> St7735Mono<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create the driver from an SPI bus and the three control lines.
    ///
    /// Nothing is sent until [`init`](Self::init).
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST) -> Self {
        debug!("creating new St7735Mono instance");
        St7735Mono {
            interface: SpiDisplayInterface::new(spi, cs, dc, rst),
            state: DeviceState::default(),
            init_sequence: DEFAULT_INIT_SEQUENCE,
        }
    }

    /// Replace the bring-up sequence
    pub fn with_init_sequence(mut self, init_sequence: &'static [InitStep]) -> Self {
        self.init_sequence = init_sequence;
        self
    }

    /// Start from a different set of colors
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.state.palette = palette;
        self
    }

    /// Give the bus and pins back
    pub fn release(self) -> (SPI, CS, DC, RST) {
        self.interface.release()
    }

    /// Snapshot of the persistent state
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Reset and configure the panel, draw the border and clear the drawing
    /// area. Runs once at boot; nothing is read back from the panel.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        debug!("powering up st7735");
        self.interface.hard_reset(delay)?;

        let steps = self.init_sequence;
        let orientation = self.state.orientation;
        let background = self.state.palette.background;
        self.interface.transaction(|iface| {
            for step in steps {
                debug!("init step: {:?}", step);
                match *step {
                    InitStep::DelayMs(ms) => delay.delay_ms(u32::from(ms)),
                    InitStep::Cmd(c) => iface.cmd(c)?,
                    InitStep::CmdData(c, d) => iface.cmd_with_data(c, d)?,
                    InitStep::Orientation => {
                        iface.cmd_with_data(Cmd::MADCTL, &[orientation.bits()])?
                    }
                    InitStep::BlankPanel => iface.fill_region(Rect::PANEL, background)?,
                }
            }
            Ok(())
        })?;
        debug!("init sequence complete");

        self.draw_border()?;
        self.blank()
    }

    /// Put the panel to sleep
    pub fn display_off(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        debug!("sleeping st7735");
        self.interface.transaction(|iface| iface.cmd(Cmd::SLPIN))?;
        delay.delay_ms(150);
        Ok(())
    }

    /// Wake the panel after [`display_off`](Self::display_off)
    pub fn display_on(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        debug!("waking st7735");
        self.interface.transaction(|iface| iface.cmd(Cmd::SLPOUT))?;
        delay.delay_ms(150);
        Ok(())
    }

    /// Force every pixel on regardless of RAM contents, or go back to
    /// showing RAM
    pub fn all_pixels_on(
        &mut self,
        on: bool,
        delay: &mut impl DelayNs,
    ) -> Result<(), DisplayError> {
        debug!("all pixels on: {}", on);
        let command = if on { Cmd::DISPOFF } else { Cmd::DISPON };
        self.interface.transaction(|iface| iface.cmd(command))?;
        delay.delay_ms(100);
        Ok(())
    }

    /// Draw a framebuffer into the drawing area, then zero it if `clear` is set
    pub fn paint_screen(
        &mut self,
        image: &mut [u8; FRAME_BYTES],
        clear: bool,
    ) -> Result<(), DisplayError> {
        self.paint_image(image)?;
        if clear {
            image.fill(0);
        }
        Ok(())
    }

    /// Draw a framebuffer into the drawing area.
    ///
    /// Set bits use the ink color, clear bits the background color.
    pub fn paint_image(&mut self, image: &[u8; FRAME_BYTES]) -> Result<(), DisplayError> {
        debug!("painting framebuffer");
        let Palette {
            ink, background, ..
        } = self.state.palette;
        self.interface.transaction(|iface| {
            iface.set_write_region(Rect::ACTIVE)?;
            for column in codec::columns(image, ink, background) {
                iface.data(&column)?;
            }
            Ok(())
        })
    }

    /// Fill the drawing area with one color
    pub fn fill_screen(&mut self, color: Color) -> Result<(), DisplayError> {
        debug!("filling drawing area with {:?}", color);
        self.interface
            .transaction(|iface| iface.fill_region(Rect::ACTIVE, color))
    }

    /// Fill the drawing area with the background color
    pub fn blank(&mut self) -> Result<(), DisplayError> {
        self.fill_screen(self.state.palette.background)
    }

    /// Turn panel inversion on or off. The LED strip is repainted first so
    /// its apparent color does not change.
    pub fn invert(&mut self, inverse: bool) -> Result<(), DisplayError> {
        if inverse == self.state.inverted {
            return Ok(());
        }
        debug!("invert: {}", inverse);
        self.draw_leds_for(inverse)?;

        let command = if inverse { Cmd::INVON } else { Cmd::INVOFF };
        self.interface.transaction(|iface| iface.cmd(command))?;
        // only once the panel has taken the command
        self.state.inverted = inverse;
        Ok(())
    }

    /// Whether panel inversion is on
    pub fn is_inverted(&self) -> bool {
        self.state.inverted
    }

    /// Mirror the display horizontally, or restore it
    pub fn flip_horizontal(&mut self, flipped: bool) -> Result<(), DisplayError> {
        debug!("flip horizontal: {}", flipped);
        self.state.orientation.set_horizontal_flip(flipped);
        self.send_orientation()
    }

    /// Mirror the display vertically, or restore it
    pub fn flip_vertical(&mut self, flipped: bool) -> Result<(), DisplayError> {
        debug!("flip vertical: {}", flipped);
        self.state.orientation.set_vertical_flip(flipped);
        self.send_orientation()
    }

    /// Current orientation register
    pub fn orientation(&self) -> Orientation {
        self.state.orientation
    }

    fn send_orientation(&mut self) -> Result<(), DisplayError> {
        let bits = self.state.orientation.bits();
        self.interface
            .transaction(|iface| iface.cmd_with_data(Cmd::MADCTL, &[bits]))
    }

    /// Border line color
    pub fn border_line_color(&self) -> Color {
        self.state.palette.border_line
    }

    /// Change the border line color. Redraws the border once it exists.
    pub fn set_border_line_color(&mut self, color: Color) -> Result<(), DisplayError> {
        self.state.palette.border_line = color;
        self.redraw_border_if_drawn()
    }

    /// Border fill color
    pub fn border_fill_color(&self) -> Color {
        self.state.palette.border_fill
    }

    /// Change the border fill color. Redraws the border once it exists.
    pub fn set_border_fill_color(&mut self, color: Color) -> Result<(), DisplayError> {
        self.state.palette.border_fill = color;
        self.redraw_border_if_drawn()
    }

    /// Color of set framebuffer bits
    pub fn pixel_color(&self) -> Color {
        self.state.palette.ink
    }

    /// Change the color of set framebuffer bits. Takes effect on the next paint.
    pub fn set_pixel_color(&mut self, color: Color) {
        self.state.palette.ink = color;
    }

    /// Background color
    pub fn background_color(&self) -> Color {
        self.state.palette.background
    }

    /// Change the background color. Redraws the border once it exists, since
    /// the gap inside the border line uses it.
    pub fn set_background_color(&mut self, color: Color) -> Result<(), DisplayError> {
        self.state.palette.background = color;
        self.redraw_border_if_drawn()
    }

    /// Whether the border has been painted yet
    pub fn border_drawn(&self) -> bool {
        self.state.border_drawn
    }

    fn redraw_border_if_drawn(&mut self) -> Result<(), DisplayError> {
        if self.state.border_drawn {
            self.draw_border()?;
        }
        Ok(())
    }

    /// Paint every border region, then the LED strip that lies inside the fill
    fn draw_border(&mut self) -> Result<(), DisplayError> {
        debug!("drawing border");
        let palette = self.state.palette;
        self.interface.transaction(|iface| {
            for (region, layer) in BORDER_REGIONS {
                let color = match layer {
                    BorderLayer::Fill => palette.border_fill,
                    BorderLayer::Line => palette.border_line,
                    BorderLayer::Gap => palette.background,
                };
                iface.fill_region(region, color)?;
            }
            Ok(())
        })?;
        self.state.border_drawn = true;

        self.draw_leds()
    }

    /// Set all three LED channels (0 to 255)
    pub fn set_rgb_led(&mut self, red: u8, green: u8, blue: u8) -> Result<(), DisplayError> {
        self.state.led = RgbLed::new(red, green, blue);
        self.draw_leds()
    }

    /// Set one LED channel (0 to 255)
    pub fn set_rgb_led_channel(
        &mut self,
        channel: LedChannel,
        value: u8,
    ) -> Result<(), DisplayError> {
        self.state.led.set_channel(channel, value);
        self.draw_leds()
    }

    /// Switch all three LED channels fully on or off
    pub fn digital_write_rgb(
        &mut self,
        red: bool,
        green: bool,
        blue: bool,
    ) -> Result<(), DisplayError> {
        self.set_rgb_led(on_off(red), on_off(green), on_off(blue))
    }

    /// Switch one LED channel fully on or off
    pub fn digital_write_rgb_channel(
        &mut self,
        channel: LedChannel,
        on: bool,
    ) -> Result<(), DisplayError> {
        self.set_rgb_led_channel(channel, on_off(on))
    }

    /// Current LED intensities
    pub fn rgb_led(&self) -> RgbLed {
        self.state.led
    }

    fn draw_leds(&mut self) -> Result<(), DisplayError> {
        self.draw_leds_for(self.state.inverted)
    }

    fn draw_leds_for(&mut self, inverted: bool) -> Result<(), DisplayError> {
        let color = self.state.led.displayed_color(inverted);
        let strip = geometry::led_strip(self.state.orientation);
        debug!("drawing led strip {:?} at row {}", color, strip.y);
        self.interface
            .transaction(|iface| iface.fill_region(strip, color))
    }

    /// Stop here if exactly the UP button is held: light the red LED and
    /// spin forever. Returns normally otherwise.
    ///
    /// The halt happens even when the LED cannot be drawn.
    pub fn safe_mode(&mut self, buttons: ButtonSet) -> Result<(), DisplayError> {
        if buttons != ButtonSet::UP {
            return Ok(());
        }
        debug!("safe mode requested, halting");
        if let Err(err) = self.digital_write_rgb_channel(LedChannel::Red, true) {
            debug!("safe mode led not lit: {:?}", err);
        }
        halt()
    }
}

const fn on_off(on: bool) -> u8 {
    if on {
        0xFF
    } else {
        0
    }
}

fn halt() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
