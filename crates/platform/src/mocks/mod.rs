//! Mock implementations for testing
//!
//! [`MockTransport`] records everything a driver sends, split into command
//! and data events by the state of the DC line, and replays the MIPI DCS
//! addressing commands (CASET 0x2A, RASET 0x2B, RAMWR 0x2C) into an emulated
//! controller RAM so tests can check which pixels were actually painted.
//!
//! [`MockDelay`] records requested delays instead of sleeping.

#![allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]

use std::collections::BTreeMap;

use embedded_hal::delay::DelayNs;

use crate::{DisplayError, Transport};

const CASET: u8 = 0x2A;
const RASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;

/// One framed piece of bus traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// A byte written while DC selected command mode.
    Command(u8),
    /// One `write_bytes` call made while DC selected data mode.
    Data(Vec<u8>),
}

/// Inclusive column/row address range, in controller RAM coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RamWindow {
    /// First column.
    pub col_start: u16,
    /// Last column (inclusive).
    pub col_end: u16,
    /// First row.
    pub row_start: u16,
    /// Last row (inclusive).
    pub row_end: u16,
}

/// Recording [`Transport`] with an emulated controller RAM.
#[derive(Debug, Default)]
pub struct MockTransport {
    events: Vec<BusEvent>,
    writes: usize,
    bytes: usize,
    data_mode: bool,
    selected: bool,
    frames: usize,
    unselected_writes: usize,
    fail_after: Option<usize>,

    // Emulated controller state
    current: Option<u8>,
    params: Vec<u8>,
    window: RamWindow,
    cursor: Option<(u16, u16)>,
    pending: Option<u8>,
    painted: BTreeMap<(u16, u16), u16>,
    pixel_writes: usize,
    overflow: usize,
}

impl MockTransport {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `write_bytes` call after the first `writes` fail with
    /// [`DisplayError::Communication`].
    pub fn fail_after(mut self, writes: usize) -> Self {
        self.fail_after = Some(writes);
        self
    }

    /// Framed bus events in order.
    pub fn events(&self) -> &[BusEvent] {
        &self.events
    }

    /// Command opcodes in order.
    pub fn commands(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Command(c) => Some(*c),
                BusEvent::Data(_) => None,
            })
            .collect()
    }

    /// Parameter bytes that followed each occurrence of `opcode`.
    pub fn payloads(&self, opcode: u8) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        let mut collecting: Option<Vec<u8>> = None;
        for event in &self.events {
            match event {
                BusEvent::Command(c) => {
                    if let Some(done) = collecting.take() {
                        out.push(done);
                    }
                    if *c == opcode {
                        collecting = Some(Vec::new());
                    }
                }
                BusEvent::Data(bytes) => {
                    if let Some(buf) = collecting.as_mut() {
                        buf.extend_from_slice(bytes);
                    }
                }
            }
        }
        if let Some(done) = collecting {
            out.push(done);
        }
        out
    }

    /// Lengths of the data writes, in order.
    pub fn data_write_lengths(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Data(bytes) => Some(bytes.len()),
                BusEvent::Command(_) => None,
            })
            .collect()
    }

    /// Number of `write_bytes` calls.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Total bytes written.
    pub fn bytes_written(&self) -> usize {
        self.bytes
    }

    /// Number of completed select → release frames.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// `true` while chip select is asserted.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// `true` while the DC line selects data.
    pub fn is_data_mode(&self) -> bool {
        self.data_mode
    }

    /// Writes made while chip select was released (always a driver bug).
    pub fn unselected_writes(&self) -> usize {
        self.unselected_writes
    }

    /// Most recent CASET/RASET window.
    pub fn window(&self) -> RamWindow {
        self.window
    }

    /// Pixels written to emulated RAM, keyed by `(column, row)`.
    pub fn painted(&self) -> &BTreeMap<(u16, u16), u16> {
        &self.painted
    }

    /// Color samples written after RAMWR (overwrites included).
    pub fn pixel_writes(&self) -> usize {
        self.pixel_writes
    }

    /// Color samples that ran past the end of their window.
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    /// Forget all recorded traffic and RAM contents.
    pub fn clear(&mut self) {
        let fail_after = self.fail_after;
        *self = Self::default();
        self.fail_after = fail_after;
    }

    fn on_command(&mut self, opcode: u8) {
        self.apply_params();
        self.current = Some(opcode);
        self.params.clear();
        self.pending = None;
        if opcode == RAMWR {
            self.cursor = Some((self.window.col_start, self.window.row_start));
        } else {
            self.cursor = None;
        }
    }

    fn apply_params(&mut self) {
        if self.params.len() < 4 {
            return;
        }
        let start = u16::from_be_bytes([self.params[0], self.params[1]]);
        let end = u16::from_be_bytes([self.params[2], self.params[3]]);
        match self.current {
            Some(CASET) => {
                self.window.col_start = start;
                self.window.col_end = end;
            }
            Some(RASET) => {
                self.window.row_start = start;
                self.window.row_end = end;
            }
            _ => {}
        }
    }

    fn on_data(&mut self, bytes: &[u8]) {
        if self.current != Some(RAMWR) {
            self.params.extend_from_slice(bytes);
            return;
        }
        for &byte in bytes {
            match self.pending.take() {
                None => self.pending = Some(byte),
                Some(high) => self.store_pixel(u16::from_be_bytes([high, byte])),
            }
        }
    }

    fn store_pixel(&mut self, color: u16) {
        self.pixel_writes += 1;
        let Some((col, row)) = self.cursor else {
            self.overflow += 1;
            return;
        };
        self.painted.insert((col, row), color);
        self.cursor = if col < self.window.col_end {
            Some((col + 1, row))
        } else if row < self.window.row_end {
            Some((self.window.col_start, row + 1))
        } else {
            None
        };
    }
}

impl Transport for MockTransport {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        if self.fail_after.is_some_and(|limit| self.writes >= limit) {
            return Err(DisplayError::Communication);
        }
        self.writes += 1;
        self.bytes += bytes.len();
        if !self.selected {
            self.unselected_writes += 1;
        }
        if self.data_mode {
            self.events.push(BusEvent::Data(bytes.to_vec()));
            self.on_data(bytes);
        } else {
            for &opcode in bytes {
                self.events.push(BusEvent::Command(opcode));
                self.on_command(opcode);
            }
        }
        Ok(())
    }

    fn set_data_command(&mut self, data: bool) -> Result<(), DisplayError> {
        self.data_mode = data;
        Ok(())
    }

    fn set_chip_select(&mut self, selected: bool) -> Result<(), DisplayError> {
        if self.selected && !selected {
            self.frames += 1;
            // Parameters are latched when the frame ends.
            self.apply_params();
        }
        self.selected = selected;
        Ok(())
    }
}

/// [`DelayNs`] that returns immediately and remembers every request.
///
/// Millisecond requests are kept as-is; finer requests are recorded in
/// nanoseconds separately.
#[derive(Debug, Default, Clone)]
pub struct MockDelay {
    ms: Vec<u32>,
    ns: u64,
}

impl MockDelay {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Millisecond delays in request order.
    pub fn delays_ms(&self) -> &[u32] {
        &self.ms
    }

    /// Sum of all millisecond delays.
    pub fn total_ms(&self) -> u64 {
        self.ms.iter().map(|&ms| u64::from(ms)).sum()
    }

    /// Sum of all sub-millisecond delays, in nanoseconds.
    pub fn total_ns(&self) -> u64 {
        self.ns
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ms.push(ms);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn command(t: &mut MockTransport, opcode: u8, payload: &[u8]) {
        t.set_chip_select(true).unwrap();
        t.set_data_command(false).unwrap();
        t.write_bytes(&[opcode]).unwrap();
        if !payload.is_empty() {
            t.set_data_command(true).unwrap();
            t.write_bytes(payload).unwrap();
        }
        t.set_chip_select(false).unwrap();
    }

    #[test]
    fn test_mock_frames_commands_and_data() {
        let mut t = MockTransport::new();
        command(&mut t, 0x36, &[0x68]);
        command(&mut t, 0x11, &[]);

        assert_eq!(t.commands(), vec![0x36, 0x11]);
        assert_eq!(t.payloads(0x36), vec![vec![0x68]]);
        assert_eq!(t.payloads(0x11), vec![Vec::<u8>::new()]);
        assert_eq!(t.frames(), 2);
        assert_eq!(t.write_count(), 3);
        assert_eq!(t.unselected_writes(), 0);
    }

    #[test]
    fn test_mock_ram_window_paints_row_major() {
        let mut t = MockTransport::new();
        command(&mut t, CASET, &[0x00, 0x02, 0x00, 0x03]);
        command(&mut t, RASET, &[0x00, 0x05, 0x00, 0x06]);
        command(&mut t, RAMWR, &[]);
        t.set_chip_select(true).unwrap();
        t.set_data_command(true).unwrap();
        t.write_bytes(&[0xF8, 0x00, 0x07, 0xE0, 0x00, 0x1F]).unwrap();
        t.write_bytes(&[0xFF, 0xFF, 0x12, 0x34]).unwrap();
        t.set_chip_select(false).unwrap();

        assert_eq!(
            t.window(),
            RamWindow {
                col_start: 2,
                col_end: 3,
                row_start: 5,
                row_end: 6
            }
        );
        let painted = t.painted();
        assert_eq!(painted.len(), 4);
        assert_eq!(painted[&(2, 5)], 0xF800);
        assert_eq!(painted[&(3, 5)], 0x07E0);
        assert_eq!(painted[&(2, 6)], 0x001F);
        assert_eq!(painted[&(3, 6)], 0xFFFF);
        assert_eq!(t.pixel_writes(), 5);
        assert_eq!(t.overflow(), 1);
    }

    #[test]
    fn test_mock_fail_after() {
        let mut t = MockTransport::new().fail_after(1);
        assert!(t.write_bytes(&[0x01]).is_ok());
        assert_eq!(t.write_bytes(&[0x02]), Err(DisplayError::Communication));
        assert_eq!(t.write_count(), 1);
    }

    #[test]
    fn test_mock_delay_records_requests() {
        let mut delay = MockDelay::new();
        delay.delay_ms(150);
        delay.delay_ms(10);
        delay.delay_us(2);
        assert_eq!(delay.delays_ms(), &[150, 10]);
        assert_eq!(delay.total_ms(), 160);
        assert_eq!(delay.total_ns(), 2_000);
    }

    #[test]
    fn test_mock_clear_keeps_failure_injection() {
        let mut t = MockTransport::new().fail_after(0);
        t.clear();
        assert_eq!(t.write_bytes(&[0x01]), Err(DisplayError::Communication));
    }
}
