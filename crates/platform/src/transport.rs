//! Transport adapter: raw serial writes plus the panel's control lines
//!
//! The panel driver never talks to `embedded-hal` directly; it frames every
//! transaction through [`Transport`]. [`SpiTransport`] is the hardware
//! implementation, `mocks::MockTransport` the host-side one.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::DisplayError;

/// Byte-level link to the panel controller.
///
/// All calls are blocking and complete before returning.
pub trait Transport {
    /// Write raw bytes to the bus.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), DisplayError>;

    /// Drive the data/command line: `true` selects data, `false` selects command.
    fn set_data_command(&mut self, data: bool) -> Result<(), DisplayError>;

    /// Assert (`true`) or release (`false`) chip select.
    ///
    /// Implementations without a chip-select line treat this as a no-op and
    /// assume exclusive use of the bus.
    fn set_chip_select(&mut self, selected: bool) -> Result<(), DisplayError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        T::write_bytes(self, bytes)
    }

    fn set_data_command(&mut self, data: bool) -> Result<(), DisplayError> {
        T::set_data_command(self, data)
    }

    fn set_chip_select(&mut self, selected: bool) -> Result<(), DisplayError> {
        T::set_chip_select(self, selected)
    }
}

/// [`Transport`] over an `embedded-hal` SPI bus with a DC pin and an optional
/// active-low CS pin.
///
/// Generic over:
/// - `SPI`: an [`embedded_hal::spi::SpiBus`]; chip select is driven here,
///   not by an `SpiDevice`.
/// - `DC`: data/command [`embedded_hal::digital::OutputPin`] (high = data).
/// - `CS`: chip-select [`embedded_hal::digital::OutputPin`] (low = selected).
///   Use [`crate::NoPin`] with `None` when CS is tied low.
pub struct SpiTransport<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: Option<CS>,
}

impl<SPI, DC, CS> SpiTransport<SPI, DC, CS>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Create a transport from its bus and pins.
    pub fn new(spi: SPI, dc: DC, cs: Option<CS>) -> Self {
        Self { spi, dc, cs }
    }

    /// Give the bus and pins back.
    pub fn release(self) -> (SPI, DC, Option<CS>) {
        (self.spi, self.dc, self.cs)
    }
}

impl<SPI, DC, CS> Transport for SpiTransport<SPI, DC, CS>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
{
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.spi
            .write(bytes)
            .map_err(|_| DisplayError::Communication)
    }

    fn set_data_command(&mut self, data: bool) -> Result<(), DisplayError> {
        if data {
            self.dc.set_high().map_err(|_| DisplayError::Gpio)
        } else {
            self.dc.set_low().map_err(|_| DisplayError::Gpio)
        }
    }

    /// Selecting drives CS low. Releasing first flushes the bus so the last
    /// byte has left the shift register, then drives CS high.
    fn set_chip_select(&mut self, selected: bool) -> Result<(), DisplayError> {
        if !selected {
            self.spi.flush().map_err(|_| DisplayError::Communication)?;
        }
        match self.cs.as_mut() {
            Some(cs) if selected => cs.set_low().map_err(|_| DisplayError::Gpio),
            Some(cs) => cs.set_high().map_err(|_| DisplayError::Gpio),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::NoPin;

    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
    use embedded_hal_mock::eh1::MockError;

    // -----------------------------------------------------------------------
    // Test: one framed command with CS
    // -----------------------------------------------------------------------

    /// Select → command byte → data bytes → release must drive the pins and
    /// the bus in exactly that order.
    #[test]
    fn test_framed_write_with_cs() {
        let mut spi = SpiMock::new(&[
            SpiTransaction::write_vec(vec![0x2A]),
            SpiTransaction::write_vec(vec![0x00, 0x1A, 0x00, 0x69]),
            SpiTransaction::flush(),
        ]);
        let mut dc = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let mut cs = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);

        let mut transport = SpiTransport::new(spi.clone(), dc.clone(), Some(cs.clone()));
        transport.set_chip_select(true).unwrap();
        transport.set_data_command(false).unwrap();
        transport.write_bytes(&[0x2A]).unwrap();
        transport.set_data_command(true).unwrap();
        transport.write_bytes(&[0x00, 0x1A, 0x00, 0x69]).unwrap();
        transport.set_chip_select(false).unwrap();

        spi.done();
        dc.done();
        cs.done();
    }

    // -----------------------------------------------------------------------
    // Test: absent CS is a no-op
    // -----------------------------------------------------------------------

    #[test]
    fn test_absent_cs_only_flushes() {
        let mut spi = SpiMock::new(&[
            SpiTransaction::write_vec(vec![0x01]),
            SpiTransaction::flush(),
        ]);
        let mut dc = PinMock::new(&[PinTransaction::set(PinState::Low)]);

        let mut transport: SpiTransport<_, _, NoPin> =
            SpiTransport::new(spi.clone(), dc.clone(), None);
        transport.set_chip_select(true).unwrap();
        transport.set_data_command(false).unwrap();
        transport.write_bytes(&[0x01]).unwrap();
        transport.set_chip_select(false).unwrap();

        spi.done();
        dc.done();
    }

    // -----------------------------------------------------------------------
    // Test: error mapping
    // -----------------------------------------------------------------------

    #[test]
    fn test_dc_error_maps_to_gpio() {
        use std::io::ErrorKind;

        let mut spi = SpiMock::new(&[]);
        let mut dc = PinMock::new(&[PinTransaction::set(PinState::High)
            .with_error(MockError::Io(ErrorKind::NotConnected))]);

        let mut transport: SpiTransport<_, _, NoPin> =
            SpiTransport::new(spi.clone(), dc.clone(), None);
        assert_eq!(transport.set_data_command(true), Err(DisplayError::Gpio));

        spi.done();
        dc.done();
    }

    #[test]
    fn test_release_returns_parts() {
        let mut spi = SpiMock::new(&[]);
        let mut dc = PinMock::new(&[]);

        let transport: SpiTransport<_, _, NoPin> =
            SpiTransport::new(spi.clone(), dc.clone(), None);
        let (_spi, _dc, cs) = transport.release();
        assert!(cs.is_none());

        spi.done();
        dc.done();
    }
}
