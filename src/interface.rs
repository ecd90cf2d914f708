//! SPI plumbing for the panel: chip-select scoping, command/data framing,
//! write-window addressing and the reset pulse.
use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use log::trace;

use crate::cmd::Cmd;
use crate::codec;
use crate::color::Color;
use crate::geometry::Rect;

/// Pixel pairs buffered per bus write during flat fills
const FILL_CHUNK_PAIRS: usize = 32;

/// Connection to the panel: an SPI bus plus chip-select, data/command and
/// reset lines.
///
/// Chip-select is driven here rather than by an `SpiDevice` so that a whole
/// burst of commands and pixel data stays inside one selection.
pub struct SpiDisplayInterface<SPI, CS, DC, RST> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
}

impl<SPI, CS, DC, RST> SpiDisplayInterface<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Wrap the bus and control lines
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST) -> Self {
        SpiDisplayInterface { spi, cs, dc, rst }
    }

    /// Give the bus and pins back
    pub fn release(self) -> (SPI, CS, DC, RST) {
        (self.spi, self.cs, self.dc, self.rst)
    }

    /// Pulse the reset line with the panel deselected
    pub fn hard_reset(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        self.cs.set_high().map_err(|_| DisplayError::CSError)?;
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(5);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(5);
        Ok(())
    }

    /// Select the panel
    pub fn begin_transaction(&mut self) -> Result<(), DisplayError> {
        self.cs.set_low().map_err(|_| DisplayError::CSError)
    }

    /// Wait for the bus to drain, then deselect the panel. Chip-select is
    /// released even if the flush fails.
    pub fn end_transaction(&mut self) -> Result<(), DisplayError> {
        let flushed = self.spi.flush().map_err(|_| DisplayError::BusWriteError);
        let released = self.cs.set_high().map_err(|_| DisplayError::CSError);
        flushed.and(released)
    }

    /// Run `f` with the panel selected.
    ///
    /// The panel is deselected even if `f` fails; the error from `f` wins.
    /// Transactions do not nest.
    pub fn transaction<F>(&mut self, f: F) -> Result<(), DisplayError>
    where
        F: FnOnce(&mut Self) -> Result<(), DisplayError>,
    {
        self.begin_transaction()?;
        let result = f(self);
        let released = self.end_transaction();
        result.and(released)
    }

    /// Send a command byte. Returns with the data/command line in data mode.
    pub fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        // pending data must be on the wire before D/C moves
        self.spi.flush().map_err(|_| DisplayError::BusWriteError)?;
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(&[command])
            .map_err(|_| DisplayError::BusWriteError)?;
        self.spi.flush().map_err(|_| DisplayError::BusWriteError)?;
        self.dc.set_high().map_err(|_| DisplayError::DCError)
    }

    /// Send parameter or pixel bytes
    pub fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.spi
            .write(data)
            .map_err(|_| DisplayError::BusWriteError)
    }

    /// Send a command followed by its parameters
    pub fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Open a write window. The panel then expects exactly
    /// `region.pixel_count()` pixels.
    ///
    /// The column address takes the y range and the row address the x range;
    /// the panel is mounted rotated relative to the logical axes.
    pub fn set_write_region(&mut self, region: Rect) -> Result<(), DisplayError> {
        trace!(
            "set_write_region: x {}-{}, y {}-{}",
            region.x,
            region.right(),
            region.y,
            region.bottom()
        );
        self.cmd_with_data(Cmd::CASET, &[0, region.y, 0, region.bottom()])?;
        self.cmd_with_data(Cmd::RASET, &[0, region.x, 0, region.right()])?;
        self.cmd(Cmd::RAMWR)
    }

    /// Send `pixels` pixels of a single color. `pixels` must be even.
    pub fn fill(&mut self, color: Color, pixels: u32) -> Result<(), DisplayError> {
        let pattern = codec::pack_pair(color, color);
        let mut chunk = [0u8; FILL_CHUNK_PAIRS * 3];
        for triplet in chunk.chunks_exact_mut(3) {
            triplet.copy_from_slice(&pattern);
        }

        let mut pairs = (pixels / 2) as usize;
        while pairs > 0 {
            let now = pairs.min(FILL_CHUNK_PAIRS);
            self.data(&chunk[..now * 3])?;
            pairs -= now;
        }
        Ok(())
    }

    /// Open `region` and fill all of it with `color`
    pub fn fill_region(&mut self, region: Rect, color: Color) -> Result<(), DisplayError> {
        self.set_write_region(region)?;
        self.fill(color, region.pixel_count())
    }
}
