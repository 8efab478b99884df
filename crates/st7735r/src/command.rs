//! ST7735R opcodes and command/data framing
//!
//! Every transaction is one chip-select frame. A command frame sends the
//! opcode with DC low, then (if there is a payload) the parameters with DC
//! high. A data frame sends DC high straight away; it is used for pixel
//! streams after RAMWR.

use platform::{DisplayError, Transport};

/// ST7735R command codes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(dead_code)]
pub enum Command {
    /// Software reset: 0 data bytes; wait 150 ms.
    SoftReset = 0x01,
    /// Sleep in: 0 data bytes.
    SleepIn = 0x10,
    /// Sleep out: 0 data bytes; wait before the next command.
    SleepOut = 0x11,
    /// Partial display mode on: 0 data bytes.
    PartialModeOn = 0x12,
    /// Normal display mode on: 0 data bytes.
    NormalModeOn = 0x13,
    /// Display inversion off: 0 data bytes.
    InvertOff = 0x20,
    /// Display inversion on: 0 data bytes.
    InvertOn = 0x21,
    /// Display off: 0 data bytes.
    DisplayOff = 0x28,
    /// Display on: 0 data bytes.
    DisplayOn = 0x29,
    /// Column address set: 4 data bytes (start, end; big-endian u16).
    ColumnAddressSet = 0x2A,
    /// Row address set: 4 data bytes (start, end; big-endian u16).
    RowAddressSet = 0x2B,
    /// Memory write: pixel data follows as a data frame.
    MemoryWrite = 0x2C,
    /// Memory data access control (MADCTL): 1 data byte.
    MemoryAccessControl = 0x36,
    /// Interface pixel format (COLMOD): 1 data byte; 0x05 = 16 bit.
    PixelFormat = 0x3A,
    /// Frame rate control, normal mode: 3 data bytes.
    FrameRateNormal = 0xB1,
    /// Frame rate control, idle mode: 3 data bytes.
    FrameRateIdle = 0xB2,
    /// Frame rate control, partial mode: 6 data bytes.
    FrameRatePartial = 0xB3,
    /// Display inversion control: 1 data byte.
    InversionControl = 0xB4,
    /// Display function set 5: 2 data bytes.
    DisplaySet5 = 0xB6,
    /// Power control 1: 3 data bytes.
    PowerControl1 = 0xC0,
    /// Power control 2: 1 data byte.
    PowerControl2 = 0xC1,
    /// Power control 3, normal mode: 2 data bytes.
    PowerControl3 = 0xC2,
    /// Power control 4, idle mode: 2 data bytes.
    PowerControl4 = 0xC3,
    /// Power control 5, partial mode: 2 data bytes.
    PowerControl5 = 0xC4,
    /// VCOM control 1: 1 data byte.
    VcomControl1 = 0xC5,
    /// Positive gamma correction: 16 data bytes.
    GammaPositive = 0xE0,
    /// Negative gamma correction: 16 data bytes.
    GammaNegative = 0xE1,
    /// Power control 6: 2 data bytes.
    PowerControl6 = 0xFC,
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command as u8
    }
}

/// Send `command`, followed by `payload` in data mode when it is not empty.
pub fn send_command<T>(bus: &mut T, command: Command, payload: &[u8]) -> Result<(), DisplayError>
where
    T: Transport + ?Sized,
{
    frame(bus, |bus| {
        bus.set_data_command(false)?;
        bus.write_bytes(&[u8::from(command)])?;
        if !payload.is_empty() {
            bus.set_data_command(true)?;
            bus.write_bytes(payload)?;
        }
        Ok(())
    })
}

/// Send raw bytes in data mode, with no opcode.
pub fn send_data<T>(bus: &mut T, data: &[u8]) -> Result<(), DisplayError>
where
    T: Transport + ?Sized,
{
    data_frame(bus, |bus| bus.write_bytes(data))
}

/// Run `body` inside one data-mode chip-select frame.
pub(crate) fn data_frame<T, F>(bus: &mut T, body: F) -> Result<(), DisplayError>
where
    T: Transport + ?Sized,
    F: FnOnce(&mut T) -> Result<(), DisplayError>,
{
    frame(bus, |bus| {
        bus.set_data_command(true)?;
        body(bus)
    })
}

/// Select, run `body`, then release chip select even if `body` failed.
///
/// The first error wins.
fn frame<T, F>(bus: &mut T, body: F) -> Result<(), DisplayError>
where
    T: Transport + ?Sized,
    F: FnOnce(&mut T) -> Result<(), DisplayError>,
{
    bus.set_chip_select(true)?;
    let result = body(bus);
    let released = bus.set_chip_select(false);
    result.and(released)
}
