//! Placeholder pin for optional control lines
//!
//! Chip-select and reset are optional on these panels. The driver stores them
//! as `Option<PIN>`; when a line is not wired, `NoPin` names the type and the
//! value is `None`:
//!
//! ```
//! use platform::NoPin;
//!
//! let reset: Option<NoPin> = None;
//! assert!(reset.is_none());
//! ```

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

/// An output pin that is not connected to anything.
///
/// Every operation succeeds and has no effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
