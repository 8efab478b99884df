//! RGB565 color values as the panel receives them
//!
//! `0b_RRRR_RGGG_GGGB_BBBB`, sent high byte first.

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::Rgb565;

/// Pack 8-bit channels into RGB565 by truncation (top 5/6/5 bits, no rounding).
pub const fn color565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// A packed 16-bit RGB565 color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(u16);

impl Color {
    /// 0x0000
    pub const BLACK: Self = Self(0x0000);
    /// 0x001F
    pub const BLUE: Self = Self(0x001F);
    /// 0xF800
    pub const RED: Self = Self(0xF800);
    /// 0x07E0
    pub const GREEN: Self = Self(0x07E0);
    /// 0x07FF
    pub const CYAN: Self = Self(0x07FF);
    /// 0xF81F
    pub const MAGENTA: Self = Self(0xF81F);
    /// 0xFFE0
    pub const YELLOW: Self = Self(0xFFE0);
    /// 0xFFFF
    pub const WHITE: Self = Self(0xFFFF);

    /// Wrap an already-packed RGB565 value.
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Truncate 8-bit channels to RGB565.
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Self(color565(r, g, b))
    }

    /// The packed value.
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Wire order: high byte (red + upper green) first.
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<u16> for Color {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl From<Rgb565> for Color {
    fn from(color: Rgb565) -> Self {
        Self(RawU16::from(color).into_inner())
    }
}

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        Rgb565::from(RawU16::new(color.0))
    }
}
