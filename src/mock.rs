//! Recording test doubles for the embedded-hal traits.
//!
//! Every double shares one [`Wire`] so tests see chip-select, reset, bus bytes
//! and delays as a single ordered stream.
extern crate std;

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::{self, SpiBus};

use crate::cmd::Cmd;
use crate::codec::decode_pair;
use crate::color::Color;
use crate::driver::St7735Mono;
use crate::geometry::Rect;
use crate::interface::SpiDisplayInterface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Select,
    Deselect,
    Reset(bool),
    Cmd(u8),
    Data(u8),
    DelayMs(u32),
}

#[derive(Default)]
struct WireState {
    events: Vec<Event>,
    dc_high: bool,
    fail_writes: bool,
    fail_flush: bool,
}

#[derive(Clone, Default)]
pub struct Wire(Rc<RefCell<WireState>>);

impl Wire {
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().events.clear();
    }

    pub fn data_mode(&self) -> bool {
        self.0.borrow().dc_high
    }

    /// Make every bus write fail until switched back
    pub fn fail_writes(&self, fail: bool) {
        self.0.borrow_mut().fail_writes = fail;
    }

    /// Make every bus flush fail until switched back
    pub fn fail_flush(&self, fail: bool) {
        self.0.borrow_mut().fail_flush = fail;
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().events.push(event);
    }
}

pub struct MockSpi(Wire);

#[derive(Debug)]
pub struct BusFault;

impl spi::Error for BusFault {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

impl spi::ErrorType for MockSpi {
    type Error = BusFault;
}

impl SpiBus for MockSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let mut state = self.0 .0.borrow_mut();
        if state.fail_writes {
            return Err(BusFault);
        }
        for &word in words {
            let event = if state.dc_high {
                Event::Data(word)
            } else {
                Event::Cmd(word)
            };
            state.events.push(event);
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.write(write)?;
        read.fill(0);
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let sent = words.to_vec();
        self.write(&sent)?;
        words.fill(0);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.0 .0.borrow().fail_flush {
            return Err(BusFault);
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Line {
    ChipSelect,
    DataCommand,
    Reset,
}

pub struct MockPin {
    line: Line,
    wire: Wire,
}

impl digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl MockPin {
    fn drive(&mut self, high: bool) {
        match self.line {
            Line::ChipSelect => self
                .wire
                .push(if high { Event::Deselect } else { Event::Select }),
            Line::DataCommand => self.wire.0.borrow_mut().dc_high = high,
            Line::Reset => self.wire.push(Event::Reset(high)),
        }
    }
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

pub struct MockDelay(Wire);

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(Event::DelayMs(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::DelayMs(ms));
    }
}

/// A button line; pressed pulls it low
pub struct MockButton(pub bool);

impl digital::ErrorType for MockButton {
    type Error = Infallible;
}

impl InputPin for MockButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0)
    }
}

pub type MockInterface = SpiDisplayInterface<MockSpi, MockPin, MockPin, MockPin>;
pub type MockDisplay = St7735Mono<MockSpi, MockPin, MockPin, MockPin>;

fn parts(wire: &Wire) -> (MockSpi, MockPin, MockPin, MockPin) {
    let pin = |line| MockPin {
        line,
        wire: wire.clone(),
    };
    (
        MockSpi(wire.clone()),
        pin(Line::ChipSelect),
        pin(Line::DataCommand),
        pin(Line::Reset),
    )
}

pub fn interface() -> (MockInterface, MockDelay, Wire) {
    let wire = Wire::default();
    let (spi, cs, dc, rst) = parts(&wire);
    (
        SpiDisplayInterface::new(spi, cs, dc, rst),
        MockDelay(wire.clone()),
        wire,
    )
}

pub fn display() -> (MockDisplay, MockDelay, Wire) {
    let wire = Wire::default();
    let (spi, cs, dc, rst) = parts(&wire);
    (
        St7735Mono::new(spi, cs, dc, rst),
        MockDelay(wire.clone()),
        wire,
    )
}

/// A display that has been through `init`, with the wire cleared
pub fn booted_display() -> (MockDisplay, MockDelay, Wire) {
    let (mut display, mut delay, wire) = display();
    display.init(&mut delay).unwrap();
    wire.clear();
    (display, delay, wire)
}

/// Pixels sent after one write window was opened
#[derive(Debug)]
pub struct RegionWrite {
    pub region: Rect,
    pub pixels: Vec<Color>,
}

/// Find every window opened on the wire and decode the pixels sent into it
pub fn region_writes(events: &[Event]) -> Vec<RegionWrite> {
    let mut writes = Vec::new();
    let mut i = 0;
    while i < events.len() {
        if let Some((region, consumed)) = window_at(&events[i..]) {
            i += consumed;
            let mut bytes = Vec::new();
            while let Some(Event::Data(byte)) = events.get(i) {
                bytes.push(*byte);
                i += 1;
            }
            let pixels = bytes
                .chunks_exact(3)
                .flat_map(|t| {
                    let (a, b) = decode_pair([t[0], t[1], t[2]]);
                    [a, b]
                })
                .collect();
            writes.push(RegionWrite { region, pixels });
        } else {
            i += 1;
        }
    }
    writes
}

fn window_at(events: &[Event]) -> Option<(Rect, usize)> {
    use Event::{Cmd as C, Data as D};
    match events.get(..11)? {
        [
            C(Cmd::CASET),
            D(0),
            D(y0),
            D(0),
            D(y1),
            C(Cmd::RASET),
            D(0),
            D(x0),
            D(0),
            D(x1),
            C(Cmd::RAMWR),
        ] => {
            let region = Rect::new(*x0, *y0, x1 - x0 + 1, y1 - y0 + 1);
            Some((region, 11))
        }
        _ => None,
    }
}

/// Command opcodes in the order they were sent
pub fn commands(events: &[Event]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Cmd(code) => Some(*code),
            _ => None,
        })
        .collect()
}
