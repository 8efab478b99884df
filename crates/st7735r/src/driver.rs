//! ST7735R device handle
//!
//! [`St7735r`] owns the transport, the optional reset line and the delay
//! source, plus an in-memory mirror of everything it has told the panel:
//! rotation (through [`Geometry`]), inversion, sleep and display power.
//! Nothing is ever read back from the controller.
//!
//! # Bring-up
//!
//! ```text
//! hard_reset   DC low; RST high 500 ms → low 500 ms → high 500 ms (skipped without RST)
//! soft_reset   SWRESET, 150 ms
//! SLPOUT       255 ms
//! registers    FRMCTR1-3 (10 ms), INVCTR, PWCTR1-5, VMCTR1, GMCTRP1/N1
//! INVON|INVOFF, MADCTL, COLMOD 16 bit, full-panel window
//! NORON        10 ms
//! DISPON       100 ms
//! ```
//!
//! The order matters: several registers only take effect after the
//! preceding settle delay.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use platform::{ColorOrder, DisplayError, PanelConfig, Rotation, Transport};

use crate::command::{send_command, Command};
use crate::fmt::{debug, info, trace};
use crate::geometry::{madctl, Geometry};

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Each phase of the hardware reset pulse.
pub const RESET_PULSE_MS: u32 = 500;

/// Settle time after SWRESET.
pub const SOFT_RESET_MS: u32 = 150;

/// Settle time after SLPOUT.
pub const WAKE_MS: u32 = 255;

/// Settle time after NORON.
pub const NORMAL_MODE_MS: u32 = 10;

/// Settle time after DISPON.
pub const DISPLAY_ON_MS: u32 = 100;

/// COLMOD parameter for 16 bits per pixel.
const PIXEL_FORMAT_16BIT: u8 = 0x05;

// ---------------------------------------------------------------------------
// Register table
// ---------------------------------------------------------------------------

struct Register {
    command: Command,
    params: &'static [u8],
    settle_ms: u32,
}

const fn reg(command: Command, params: &'static [u8]) -> Register {
    Register {
        command,
        params,
        settle_ms: 0,
    }
}

/// Panel-specific power, frame-rate and gamma setup for the 0.96" IPS module.
const REGISTERS: [Register; 12] = [
    reg(Command::FrameRateNormal, &[0x01, 0x2C, 0x2D]),
    reg(Command::FrameRateIdle, &[0x01, 0x2C, 0x2D]),
    Register {
        command: Command::FrameRatePartial,
        params: &[0x01, 0x2C, 0x2D, 0x01, 0x2C, 0x2D],
        settle_ms: 10,
    },
    reg(Command::InversionControl, &[0x07]),
    // -4.6 V, auto mode
    reg(Command::PowerControl1, &[0xA2, 0x02, 0x84]),
    reg(Command::PowerControl2, &[0xC5]),
    reg(Command::PowerControl3, &[0x8A, 0x00]),
    reg(Command::PowerControl4, &[0x8A, 0x2A]),
    reg(Command::PowerControl5, &[0x8A, 0xEE]),
    reg(Command::VcomControl1, &[0x0E]),
    reg(
        Command::GammaPositive,
        &[
            0x02, 0x1C, 0x07, 0x12, 0x37, 0x32, 0x29, 0x2D, 0x29, 0x25, 0x2B, 0x39, 0x00, 0x01,
            0x03, 0x10,
        ],
    ),
    reg(
        Command::GammaNegative,
        &[
            0x03, 0x1D, 0x07, 0x06, 0x2E, 0x2C, 0x29, 0x2D, 0x2E, 0x2E, 0x37, 0x3F, 0x00, 0x00,
            0x02, 0x10,
        ],
    ),
];

// ---------------------------------------------------------------------------
// Device state
// ---------------------------------------------------------------------------

/// Where the panel is in its bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    /// Constructed, nothing sent yet.
    Unreset,
    /// Reset pulse in progress.
    Resetting,
    /// Reset done; the controller is asleep with default registers.
    AsleepUninitialized,
    /// Running the register table.
    Initializing,
    /// Fully configured.
    Active,
}

/// In-memory mirror of the panel's mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
    /// Bring-up stage.
    pub lifecycle: Lifecycle,
    /// INVON was the last inversion command.
    pub inverted: bool,
    /// Channel order used for MADCTL.
    pub color_order: ColorOrder,
    /// SLPIN was the last sleep command (true at power-on).
    pub sleeping: bool,
    /// DISPON was the last display power command.
    pub powered: bool,
}

impl DeviceState {
    const fn power_on(color_order: ColorOrder) -> Self {
        Self {
            lifecycle: Lifecycle::Unreset,
            inverted: false,
            color_order,
            sleeping: true,
            powered: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Driver struct
// ---------------------------------------------------------------------------

/// ST7735R driver.
///
/// Type parameters:
/// - `T`: a [`Transport`], usually [`platform::SpiTransport`].
/// - `RST`: [`OutputPin`] for the reset line; pass `None::<platform::NoPin>`
///   when the line is not wired.
/// - `DELAY`: [`DelayNs`] used during reset and init.
///
/// One handle per panel. Methods take `&mut self`; the addressed RAM window
/// is shared state on the controller, so calls must not interleave.
pub struct St7735r<T, RST, DELAY> {
    pub(crate) bus: T,
    reset: Option<RST>,
    delay: DELAY,
    config: PanelConfig,
    pub(crate) geometry: Geometry,
    state: DeviceState,
}

impl<T, RST, DELAY> St7735r<T, RST, DELAY> {
    /// Create a driver. Nothing is sent until [`init`](Self::init) or a
    /// drawing call.
    pub fn new(bus: T, reset: Option<RST>, delay: DELAY, config: PanelConfig) -> Self {
        Self {
            bus,
            reset,
            delay,
            geometry: Geometry::new(&config),
            state: DeviceState::power_on(config.color_order),
            config,
        }
    }

    /// Give back the transport, reset pin and delay.
    pub fn release(self) -> (T, Option<RST>, DELAY) {
        (self.bus, self.reset, self.delay)
    }

    /// Construction parameters.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Current geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Logical width at the current rotation.
    pub fn width(&self) -> u16 {
        self.geometry.width()
    }

    /// Logical height at the current rotation.
    pub fn height(&self) -> u16 {
        self.geometry.height()
    }

    /// Current rotation.
    pub fn rotation(&self) -> Rotation {
        self.geometry.rotation()
    }

    /// Mirrored mode flags.
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Bring-up stage.
    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle
    }

    /// `true` after `invert(true)`.
    pub fn is_inverted(&self) -> bool {
        self.state.inverted
    }

    /// `true` until `sleep(false)`.
    pub fn is_sleeping(&self) -> bool {
        self.state.sleeping
    }

    /// `true` after `power(true)`.
    pub fn is_powered(&self) -> bool {
        self.state.powered
    }

    /// Borrow the transport.
    pub fn transport(&self) -> &T {
        &self.bus
    }

    /// Mutably borrow the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.bus
    }
}

// ---------------------------------------------------------------------------
// Commands and addressing
// ---------------------------------------------------------------------------

impl<T, RST, DELAY> St7735r<T, RST, DELAY>
where
    T: Transport,
{
    /// Send a raw command with parameters.
    pub fn command(&mut self, command: Command, params: &[u8]) -> Result<(), DisplayError> {
        send_command(&mut self.bus, command, params)
    }

    /// Address logical `x0..=x1`, `y0..=y1` and start a memory write.
    ///
    /// The next data burst fills the window row by row.
    pub fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError> {
        trace!("st7735r: window ({}, {})..=({}, {})", x0, y0, x1, y1);
        let columns = self.geometry.columns(x0, x1);
        let rows = self.geometry.rows(y0, y1);
        send_command(&mut self.bus, Command::ColumnAddressSet, &columns)?;
        send_command(&mut self.bus, Command::RowAddressSet, &rows)?;
        send_command(&mut self.bus, Command::MemoryWrite, &[])
    }

    /// Change orientation: send MADCTL, then update the logical geometry.
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        let value = madctl(rotation, self.state.color_order);
        send_command(&mut self.bus, Command::MemoryAccessControl, &[value])?;
        self.geometry.rotate(rotation);
        debug!(
            "st7735r: rotation {} ({}x{})",
            rotation.index(),
            self.geometry.width(),
            self.geometry.height()
        );
        Ok(())
    }

    /// INVON / INVOFF.
    pub fn invert(&mut self, invert: bool) -> Result<(), DisplayError> {
        let command = if invert {
            Command::InvertOn
        } else {
            Command::InvertOff
        };
        send_command(&mut self.bus, command, &[])?;
        self.state.inverted = invert;
        debug!("st7735r: invert {}", invert);
        Ok(())
    }

    /// SLPIN / SLPOUT. The caller owns the wake settle time.
    pub fn sleep(&mut self, sleep: bool) -> Result<(), DisplayError> {
        let command = if sleep {
            Command::SleepIn
        } else {
            Command::SleepOut
        };
        send_command(&mut self.bus, command, &[])?;
        self.state.sleeping = sleep;
        debug!("st7735r: sleep {}", sleep);
        Ok(())
    }

    /// DISPON / DISPOFF.
    pub fn power(&mut self, on: bool) -> Result<(), DisplayError> {
        let command = if on {
            Command::DisplayOn
        } else {
            Command::DisplayOff
        };
        send_command(&mut self.bus, command, &[])?;
        self.state.powered = on;
        debug!("st7735r: power {}", on);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Reset and initialisation
// ---------------------------------------------------------------------------

impl<T, RST, DELAY> St7735r<T, RST, DELAY>
where
    T: Transport,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Drive DC low, then pulse RST high → low → high. Without a reset line
    /// nothing is written and the panel is assumed to have come up reset.
    pub fn hard_reset(&mut self) -> Result<(), DisplayError> {
        self.state.lifecycle = Lifecycle::Resetting;
        self.bus.set_data_command(false)?;
        if let Some(reset) = self.reset.as_mut() {
            debug!("st7735r: hardware reset");
            reset.set_high().map_err(|_| DisplayError::Gpio)?;
            self.delay.delay_ms(RESET_PULSE_MS);
            reset.set_low().map_err(|_| DisplayError::Gpio)?;
            self.delay.delay_ms(RESET_PULSE_MS);
            reset.set_high().map_err(|_| DisplayError::Gpio)?;
            self.delay.delay_ms(RESET_PULSE_MS);
        }
        self.state = DeviceState::power_on(self.state.color_order);
        self.state.lifecycle = Lifecycle::AsleepUninitialized;
        Ok(())
    }

    /// SWRESET and wait for it to settle.
    pub fn soft_reset(&mut self) -> Result<(), DisplayError> {
        debug!("st7735r: software reset");
        send_command(&mut self.bus, Command::SoftReset, &[])?;
        self.delay.delay_ms(SOFT_RESET_MS);
        self.state = DeviceState::power_on(self.state.color_order);
        self.state.lifecycle = Lifecycle::AsleepUninitialized;
        Ok(())
    }

    /// Full bring-up from any state. See the module docs for the sequence.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        info!(
            "st7735r: init {}x{} offset ({}, {})",
            self.config.width,
            self.config.height,
            self.config.x_offset,
            self.config.y_offset
        );
        self.hard_reset()?;
        self.soft_reset()?;
        self.state.lifecycle = Lifecycle::Initializing;

        self.sleep(false)?;
        self.delay.delay_ms(WAKE_MS);

        for register in &REGISTERS {
            send_command(&mut self.bus, register.command, register.params)?;
            if register.settle_ms > 0 {
                self.delay.delay_ms(register.settle_ms);
            }
        }

        self.invert(self.config.invert)?;
        self.set_rotation(self.geometry.rotation())?;
        send_command(&mut self.bus, Command::PixelFormat, &[PIXEL_FORMAT_16BIT])?;
        self.set_window(
            0,
            0,
            self.geometry.width().saturating_sub(1),
            self.geometry.height().saturating_sub(1),
        )?;

        send_command(&mut self.bus, Command::NormalModeOn, &[])?;
        self.delay.delay_ms(NORMAL_MODE_MS);
        self.power(true)?;
        self.delay.delay_ms(DISPLAY_ON_MS);

        self.state.lifecycle = Lifecycle::Active;
        info!("st7735r: init complete");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use platform::mocks::{MockDelay, MockTransport, RamWindow};
    use platform::NoPin;

    use crate::command::send_data;

    type TestDriver = St7735r<MockTransport, NoPin, MockDelay>;

    fn driver(config: PanelConfig) -> TestDriver {
        St7735r::new(MockTransport::new(), None, MockDelay::new(), config)
    }

    /// RST pin mock that expects high, low, high.
    fn rst_reset_sequence() -> PinMock {
        PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ])
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn test_new_sends_nothing() {
        let d = driver(PanelConfig::default());
        assert!(d.transport().events().is_empty());
        assert_eq!(d.lifecycle(), Lifecycle::Unreset);
        assert!(d.is_sleeping());
        assert!(!d.is_powered());
        assert!(!d.is_inverted());
        assert_eq!((d.width(), d.height()), (80, 160));
    }

    #[test]
    fn test_initial_rotation_applies_to_geometry() {
        let d = driver(PanelConfig::default().with_rotation(Rotation::Deg90));
        assert_eq!((d.width(), d.height()), (160, 80));
        assert_eq!(d.rotation(), Rotation::Deg90);
    }

    // -----------------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------------

    #[test]
    fn test_hard_reset_pulses_rst() {
        let mut d = St7735r::new(
            MockTransport::new(),
            Some(rst_reset_sequence()),
            MockDelay::new(),
            PanelConfig::default(),
        );
        d.hard_reset().unwrap();
        assert_eq!(d.lifecycle(), Lifecycle::AsleepUninitialized);

        let (bus, rst, delay) = d.release();
        assert_eq!(delay.delays_ms(), &[500, 500, 500]);
        assert_eq!(bus.write_count(), 0);
        rst.unwrap().done();
    }

    #[test]
    fn test_hard_reset_without_rst_is_silent() {
        let mut d = driver(PanelConfig::default());
        d.hard_reset().unwrap();
        assert_eq!(d.lifecycle(), Lifecycle::AsleepUninitialized);
        let (bus, _, delay) = d.release();
        assert!(bus.events().is_empty());
        assert!(delay.delays_ms().is_empty());
    }

    #[test]
    fn test_hard_reset_drives_dc_low_without_rst() {
        let mut d = driver(PanelConfig::default());
        send_data(d.transport_mut(), &[0x00]).unwrap();
        assert!(d.transport().is_data_mode());

        d.hard_reset().unwrap();
        assert!(!d.transport().is_data_mode());
    }

    #[test]
    fn test_soft_reset() {
        let mut d = driver(PanelConfig::default());
        d.soft_reset().unwrap();
        let (bus, _, delay) = d.release();
        assert_eq!(bus.commands(), vec![0x01]);
        assert_eq!(delay.delays_ms(), &[SOFT_RESET_MS]);
    }

    // -----------------------------------------------------------------------
    // Init
    // -----------------------------------------------------------------------

    #[test]
    fn test_init_command_order() {
        let mut d = driver(PanelConfig::default());
        d.init().unwrap();
        assert_eq!(d.lifecycle(), Lifecycle::Active);
        assert!(!d.is_sleeping());
        assert!(d.is_powered());
        assert!(d.is_inverted());

        let (bus, _, delay) = d.release();
        assert_eq!(
            bus.commands(),
            vec![
                0x01, // SWRESET
                0x11, // SLPOUT
                0xB1, 0xB2, 0xB3, 0xB4, 0xC0, 0xC1, 0xC2, 0xC3, 0xC4, 0xC5, 0xE0, 0xE1,
                0x21, // INVON
                0x36, // MADCTL
                0x3A, // COLMOD
                0x2A, 0x2B, 0x2C, // full window
                0x13, // NORON
                0x29, // DISPON
            ]
        );
        assert_eq!(delay.delays_ms(), &[150, 255, 10, 10, 100]);
        assert_eq!(bus.unselected_writes(), 0);
    }

    #[test]
    fn test_init_payloads() {
        let mut d = driver(PanelConfig::default());
        d.init().unwrap();
        let bus = d.transport();

        assert_eq!(bus.payloads(0xB3), vec![vec![0x01, 0x2C, 0x2D, 0x01, 0x2C, 0x2D]]);
        assert_eq!(bus.payloads(0xC0), vec![vec![0xA2, 0x02, 0x84]]);
        assert_eq!(bus.payloads(0xE0)[0].len(), 16);
        assert_eq!(bus.payloads(0xE1)[0].len(), 16);
        // BGR, rotation 0
        assert_eq!(bus.payloads(0x36), vec![vec![0x08]]);
        assert_eq!(bus.payloads(0x3A), vec![vec![0x05]]);
        assert_eq!(
            bus.window(),
            RamWindow {
                col_start: 26,
                col_end: 105,
                row_start: 1,
                row_end: 160,
            }
        );
    }

    #[test]
    fn test_init_with_reset_line() {
        let mut d = St7735r::new(
            MockTransport::new(),
            Some(rst_reset_sequence()),
            MockDelay::new(),
            PanelConfig::default(),
        );
        d.init().unwrap();
        let (_, rst, delay) = d.release();
        assert_eq!(delay.delays_ms(), &[500, 500, 500, 150, 255, 10, 10, 100]);
        rst.unwrap().done();
    }

    #[test]
    fn test_init_without_inversion_sends_invoff() {
        let mut d = driver(PanelConfig::default().with_invert(false));
        d.init().unwrap();
        let commands = d.transport().commands();
        assert!(commands.contains(&0x20));
        assert!(!commands.contains(&0x21));
        assert!(!d.is_inverted());
    }

    #[test]
    fn test_init_failure_stops_in_initializing() {
        let mut d = St7735r::new(
            MockTransport::new().fail_after(4),
            None::<NoPin>,
            MockDelay::new(),
            PanelConfig::default(),
        );
        assert_eq!(d.init(), Err(DisplayError::Communication));
        assert_eq!(d.lifecycle(), Lifecycle::Initializing);
    }

    // -----------------------------------------------------------------------
    // Mode commands
    // -----------------------------------------------------------------------

    #[test]
    fn test_mode_commands_update_flags() {
        let mut d = driver(PanelConfig::default());
        d.sleep(false).unwrap();
        d.power(true).unwrap();
        d.invert(true).unwrap();
        assert!(!d.is_sleeping());
        assert!(d.is_powered());
        assert!(d.is_inverted());

        d.sleep(true).unwrap();
        d.power(false).unwrap();
        d.invert(false).unwrap();
        assert!(d.is_sleeping());
        assert!(!d.is_powered());
        assert!(!d.is_inverted());

        assert_eq!(
            d.transport().commands(),
            vec![0x11, 0x29, 0x21, 0x10, 0x28, 0x20]
        );
        // One opcode each, no parameters.
        assert_eq!(d.transport().write_count(), 6);
    }

    #[test]
    fn test_failed_command_keeps_flag() {
        let mut d = St7735r::new(
            MockTransport::new().fail_after(0),
            None::<NoPin>,
            MockDelay::new(),
            PanelConfig::default(),
        );
        assert!(d.power(true).is_err());
        assert!(!d.is_powered());
    }

    #[test]
    fn test_failed_rotation_keeps_geometry() {
        let mut d = St7735r::new(
            MockTransport::new().fail_after(0),
            None::<NoPin>,
            MockDelay::new(),
            PanelConfig::default(),
        );
        assert!(d.set_rotation(Rotation::Deg90).is_err());
        assert_eq!(d.rotation(), Rotation::Deg0);
        assert_eq!((d.width(), d.height()), (80, 160));
        assert!(!d.transport().is_selected());
    }

    #[test]
    fn test_set_rotation_sends_madctl_and_swaps_geometry() {
        let mut d = driver(PanelConfig::default().with_color_order(ColorOrder::Rgb));
        d.set_rotation(Rotation::Deg270).unwrap();
        assert_eq!((d.width(), d.height()), (160, 80));
        assert_eq!(d.transport().payloads(0x36), vec![vec![0xA0]]);

        d.set_rotation(Rotation::Deg180).unwrap();
        assert_eq!((d.width(), d.height()), (80, 160));
        assert_eq!(d.transport().payloads(0x36)[1], vec![0xC0]);
    }

    #[test]
    fn test_set_window_adds_offsets() {
        let mut d = driver(PanelConfig::default().with_rotation(Rotation::Deg90));
        d.set_window(2, 3, 10, 20).unwrap();
        let bus = d.transport();
        assert_eq!(bus.commands(), vec![0x2A, 0x2B, 0x2C]);
        // Odd rotation: x offset 1, y offset 26.
        assert_eq!(bus.payloads(0x2A), vec![vec![0, 3, 0, 11]]);
        assert_eq!(bus.payloads(0x2B), vec![vec![0, 29, 0, 46]]);
        assert_eq!(bus.frames(), 3);
    }
}
