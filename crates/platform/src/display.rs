//! Display error type shared by the transport and the panel driver

/// Errors returned by panel operations.
///
/// Geometry problems (off-screen coordinates, empty extents, characters the
/// font does not cover) are never errors; they clip or do nothing. Only the
/// hardware can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// SPI bus write failed.
    Communication,
    /// A control line (DC, CS or RST) could not be driven.
    Gpio,
    /// A rotation selector outside `0..=3` was converted into a [`crate::Rotation`].
    InvalidRotation,
}

#[cfg(feature = "std")]
impl std::error::Error for DisplayError {}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Communication => write!(f, "SPI communication error"),
            Self::Gpio => write!(f, "GPIO error"),
            Self::InvalidRotation => write!(f, "Rotation must be 0, 1, 2 or 3"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error_format() {
        use std::string::ToString;
        assert_eq!(
            DisplayError::Communication.to_string(),
            "SPI communication error"
        );
        assert_eq!(DisplayError::Gpio.to_string(), "GPIO error");
        assert_eq!(
            DisplayError::InvalidRotation.to_string(),
            "Rotation must be 0, 1, 2 or 3"
        );
    }
}
