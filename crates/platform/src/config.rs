//! Panel construction parameters
//!
//! Everything the driver needs to know about a particular module is fixed at
//! construction: the physical panel size, where that panel sits inside the
//! controller's RAM, and the initial orientation/inversion/color order.

use crate::DisplayError;

/// Panel orientation, in 90° steps.
///
/// Even rotations keep the physical width/height; odd rotations swap them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Rotation {
    /// Selector 0 (tab on left).
    #[default]
    Deg0,
    /// Selector 1 (tab on bottom).
    Deg90,
    /// Selector 2 (tab on right).
    Deg180,
    /// Selector 3 (tab on top).
    Deg270,
}

impl Rotation {
    /// Numeric selector, `0..=3`.
    pub const fn index(self) -> u8 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    /// `true` for 90° and 270°, where logical width and height are swapped.
    pub const fn is_portrait_swap(self) -> bool {
        self.index() & 1 == 1
    }
}

impl TryFrom<u8> for Rotation {
    type Error = DisplayError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Deg0),
            1 => Ok(Self::Deg90),
            2 => Ok(Self::Deg180),
            3 => Ok(Self::Deg270),
            _ => Err(DisplayError::InvalidRotation),
        }
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> Self {
        rotation.index()
    }
}

/// Order of the color channels in the panel's sub-pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ColorOrder {
    /// Red-green-blue.
    #[default]
    Rgb,
    /// Blue-green-red; the driver sets the MADCTL BGR bit.
    Bgr,
}

/// Construction parameters for one physical panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PanelConfig {
    /// Physical width in pixels (unaffected by rotation).
    pub width: u16,

    /// Physical height in pixels (unaffected by rotation).
    pub height: u16,

    /// Column of the panel's first pixel in controller RAM.
    pub x_offset: u16,

    /// Row of the panel's first pixel in controller RAM.
    pub y_offset: u16,

    /// Orientation applied by `init`.
    pub rotation: Rotation,

    /// Display inversion applied by `init` (IPS panels usually need it on).
    pub invert: bool,

    /// Sub-pixel order.
    pub color_order: ColorOrder,
}

impl PanelConfig {
    /// A panel of the given physical size with no offset, no inversion, RGB order.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            x_offset: 0,
            y_offset: 0,
            rotation: Rotation::Deg0,
            invert: false,
            color_order: ColorOrder::Rgb,
        }
    }

    /// Set the RAM offset of the panel's top-left pixel.
    pub const fn with_offset(mut self, x_offset: u16, y_offset: u16) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    /// Set the initial rotation.
    pub const fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the initial inversion flag.
    pub const fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Set the sub-pixel order.
    pub const fn with_color_order(mut self, color_order: ColorOrder) -> Self {
        self.color_order = color_order;
        self
    }
}

impl Default for PanelConfig {
    /// The 0.96" 160×80 IPS module: an 80×160 panel at column 26, row 1 of
    /// a 132×162 controller, inverted, BGR.
    fn default() -> Self {
        Self::new(80, 160)
            .with_offset(26, 1)
            .with_invert(true)
            .with_color_order(ColorOrder::Bgr)
    }
}
