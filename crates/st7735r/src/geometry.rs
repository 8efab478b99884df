//! Orientation and addressing
//!
//! The panel is described by its physical size and the offset of its first
//! pixel inside controller RAM (the 80×160 glass sits in a 132×162 RAM).
//! Rotation decides which of those becomes the logical width and height; on
//! the odd rotations both the size and the offsets trade axes.

// Logical coordinates are signed and wide so callers can pass off-screen
// values; after clipping they are always inside the panel and fit in u16.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::arithmetic_side_effects
)]

use platform::{ColorOrder, PanelConfig, Rotation};

/// MADCTL RGB/BGR order bit.
const MADCTL_BGR: u8 = 0x08;

/// MADCTL parameter for `rotation`, with the BGR bit when `order` is BGR.
pub const fn madctl(rotation: Rotation, order: ColorOrder) -> u8 {
    let base = match rotation {
        Rotation::Deg0 => 0x00,
        // MV | MX
        Rotation::Deg90 => 0x60,
        // MY | MX
        Rotation::Deg180 => 0xC0,
        // MY | MV
        Rotation::Deg270 => 0xA0,
    };
    match order {
        ColorOrder::Rgb => base,
        ColorOrder::Bgr => base | MADCTL_BGR,
    }
}

/// CASET/RASET parameters: `start` then `end`, each big-endian.
pub const fn window_bytes(start: u16, end: u16) -> [u8; 4] {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.to_be_bytes();
    [s_hi, s_lo, e_hi, e_lo]
}

/// Intersect `[start, start + len)` with `[0, limit)`.
///
/// Returns the clipped start and length, or `None` when nothing is left.
pub fn clip_span(start: i64, len: i64, limit: u16) -> Option<(u16, u16)> {
    if len <= 0 {
        return None;
    }
    let end = start.saturating_add(len).min(i64::from(limit));
    let start = start.max(0);
    if end <= start {
        return None;
    }
    Some((start as u16, (end - start) as u16))
}

/// A rectangle already clipped to the logical screen. Never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClippedRect {
    /// Left column.
    pub x: u16,
    /// Top row.
    pub y: u16,
    /// Width, at least 1.
    pub width: u16,
    /// Height, at least 1.
    pub height: u16,
}

impl ClippedRect {
    /// Inclusive right column.
    pub const fn right(&self) -> u16 {
        self.x + self.width - 1
    }

    /// Inclusive bottom row.
    pub const fn bottom(&self) -> u16 {
        self.y + self.height - 1
    }

    /// Pixels covered.
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Physical panel description plus the logical view of the current rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    panel_width: u16,
    panel_height: u16,
    panel_x: u16,
    panel_y: u16,
    rotation: Rotation,
    width: u16,
    height: u16,
    x_offset: u16,
    y_offset: u16,
}

impl Geometry {
    /// Geometry of `config` at its initial rotation.
    pub fn new(config: &PanelConfig) -> Self {
        let mut geometry = Self {
            panel_width: config.width,
            panel_height: config.height,
            panel_x: config.x_offset,
            panel_y: config.y_offset,
            rotation: config.rotation,
            width: config.width,
            height: config.height,
            x_offset: config.x_offset,
            y_offset: config.y_offset,
        };
        geometry.rotate(config.rotation);
        geometry
    }

    /// Recompute the logical size and offsets for `rotation`.
    pub fn rotate(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        if rotation.is_portrait_swap() {
            self.width = self.panel_height;
            self.height = self.panel_width;
            self.x_offset = self.panel_y;
            self.y_offset = self.panel_x;
        } else {
            self.width = self.panel_width;
            self.height = self.panel_height;
            self.x_offset = self.panel_x;
            self.y_offset = self.panel_y;
        }
    }

    /// Current rotation.
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Logical width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Logical height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Column offset added to logical x.
    pub const fn x_offset(&self) -> u16 {
        self.x_offset
    }

    /// Row offset added to logical y.
    pub const fn y_offset(&self) -> u16 {
        self.y_offset
    }

    /// Intersect a logical rectangle with the screen.
    pub fn clip(&self, x: i64, y: i64, width: i64, height: i64) -> Option<ClippedRect> {
        let (x, width) = clip_span(x, width, self.width)?;
        let (y, height) = clip_span(y, height, self.height)?;
        Some(ClippedRect {
            x,
            y,
            width,
            height,
        })
    }

    /// `true` if the logical point is on screen.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        (0..i64::from(self.width)).contains(&x) && (0..i64::from(self.height)).contains(&y)
    }

    /// Physical column range for logical columns `x0..=x1`.
    pub const fn columns(&self, x0: u16, x1: u16) -> [u8; 4] {
        window_bytes(
            x0.saturating_add(self.x_offset),
            x1.saturating_add(self.x_offset),
        )
    }

    /// Physical row range for logical rows `y0..=y1`.
    pub const fn rows(&self, y0: u16, y1: u16) -> [u8; 4] {
        window_bytes(
            y0.saturating_add(self.y_offset),
            y1.saturating_add(self.y_offset),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn geometry(rotation: Rotation) -> Geometry {
        Geometry::new(&PanelConfig::default().with_rotation(rotation))
    }

    #[test]
    fn test_even_rotations_keep_panel_size() {
        for rotation in [Rotation::Deg0, Rotation::Deg180] {
            let g = geometry(rotation);
            assert_eq!((g.width(), g.height()), (80, 160));
            assert_eq!((g.x_offset(), g.y_offset()), (26, 1));
        }
    }

    #[test]
    fn test_odd_rotations_swap_size_and_offsets() {
        for rotation in [Rotation::Deg90, Rotation::Deg270] {
            let g = geometry(rotation);
            assert_eq!((g.width(), g.height()), (160, 80));
            assert_eq!((g.x_offset(), g.y_offset()), (1, 26));
        }
    }

    #[test]
    fn test_rotate_back_restores_geometry() {
        let mut g = geometry(Rotation::Deg0);
        let original = g;
        g.rotate(Rotation::Deg270);
        assert_ne!(g, original);
        g.rotate(Rotation::Deg0);
        assert_eq!(g, original);
    }

    #[test]
    fn test_madctl_values() {
        assert_eq!(madctl(Rotation::Deg0, ColorOrder::Rgb), 0x00);
        assert_eq!(madctl(Rotation::Deg90, ColorOrder::Rgb), 0x60);
        assert_eq!(madctl(Rotation::Deg180, ColorOrder::Rgb), 0xC0);
        assert_eq!(madctl(Rotation::Deg270, ColorOrder::Rgb), 0xA0);
        assert_eq!(madctl(Rotation::Deg0, ColorOrder::Bgr), 0x08);
        assert_eq!(madctl(Rotation::Deg90, ColorOrder::Bgr), 0x68);
        assert_eq!(madctl(Rotation::Deg180, ColorOrder::Bgr), 0xC8);
        assert_eq!(madctl(Rotation::Deg270, ColorOrder::Bgr), 0xA8);
    }

    #[test]
    fn test_window_bytes_big_endian() {
        assert_eq!(window_bytes(26, 105), [0x00, 26, 0x00, 105]);
        assert_eq!(window_bytes(0x0102, 0x0304), [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_columns_and_rows_add_offsets() {
        let g = geometry(Rotation::Deg0);
        assert_eq!(g.columns(0, 79), [0, 26, 0, 105]);
        assert_eq!(g.rows(0, 159), [0, 1, 0, 160]);
    }

    #[test]
    fn test_clip_span() {
        assert_eq!(clip_span(0, 10, 80), Some((0, 10)));
        assert_eq!(clip_span(75, 10, 80), Some((75, 5)));
        assert_eq!(clip_span(79, 10, 80), Some((79, 1)));
        assert_eq!(clip_span(-3, 10, 80), Some((0, 7)));
        assert_eq!(clip_span(80, 10, 80), None);
        assert_eq!(clip_span(-10, 10, 80), None);
        assert_eq!(clip_span(5, 0, 80), None);
        assert_eq!(clip_span(5, -4, 80), None);
        assert_eq!(clip_span(i64::MAX, i64::MAX, 80), None);
        assert_eq!(clip_span(i64::MIN, i64::MAX, 80), None);
    }

    #[test]
    fn test_clip_rect() {
        let g = geometry(Rotation::Deg90);
        let r = g.clip(159, 0, 10, 1).unwrap();
        assert_eq!(
            r,
            ClippedRect {
                x: 159,
                y: 0,
                width: 1,
                height: 1
            }
        );
        assert_eq!(r.right(), 159);
        assert_eq!(r.bottom(), 0);
        assert_eq!(r.area(), 1);
        assert!(g.clip(0, 80, 10, 10).is_none());
        assert!(g.clip(0, 0, 10, 0).is_none());
    }

    #[test]
    fn test_contains() {
        let g = geometry(Rotation::Deg0);
        assert!(g.contains(0, 0));
        assert!(g.contains(79, 159));
        assert!(!g.contains(80, 0));
        assert!(!g.contains(0, 160));
        assert!(!g.contains(-1, 5));
    }
}
