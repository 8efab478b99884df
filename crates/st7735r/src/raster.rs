//! 2D primitives
//!
//! Everything is built from one operation: clip a rectangle to the logical
//! screen, address it with [`St7735r::set_window`], then stream one color
//! into it. Coordinates are logical (origin top-left, x right, y down) and
//! may be off screen; whatever falls outside is dropped, and a primitive
//! with nothing left on screen sends nothing.
//!
//! Arithmetic is done in `i64` so no combination of `i32` inputs overflows.

#![allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use platform::{DisplayError, Transport};

use crate::batch::stream_color;
use crate::color::Color;
use crate::driver::St7735r;

/// `floor(sqrt(r² - i²))`: half the width of a circle of radius `r` at row
/// offset `i`. Returns 0 when `|i| >= r`.
pub fn half_chord(r: i64, i: i64) -> i64 {
    let n = r * r - i * i;
    if n <= 0 {
        return 0;
    }
    let mut a = libm::sqrt(n as f64) as i64;
    // f64 rounding near perfect squares
    while a * a > n {
        a -= 1;
    }
    while (a + 1) * (a + 1) <= n {
        a += 1;
    }
    a
}

impl<T, RST, DELAY> St7735r<T, RST, DELAY>
where
    T: Transport,
{
    // -----------------------------------------------------------------------
    // Window + burst
    // -----------------------------------------------------------------------

    pub(crate) fn plot(&mut self, x: i64, y: i64, color: Color) -> Result<(), DisplayError> {
        if !self.geometry.contains(x, y) {
            return Ok(());
        }
        let (x, y) = (x as u16, y as u16);
        self.set_window(x, y, x, y)?;
        stream_color(&mut self.bus, color, 1)
    }

    pub(crate) fn span(&mut self, x: i64, y: i64, w: i64, h: i64, color: Color) -> Result<(), DisplayError> {
        let Some(rect) = self.geometry.clip(x, y, w, h) else {
            return Ok(());
        };
        self.set_window(rect.x, rect.y, rect.right(), rect.bottom())?;
        stream_color(&mut self.bus, color, rect.area())
    }

    // -----------------------------------------------------------------------
    // Points, spans, rectangles
    // -----------------------------------------------------------------------

    /// One pixel.
    pub fn pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), DisplayError> {
        self.plot(i64::from(x), i64::from(y), color)
    }

    /// Filled `w × h` rectangle with its top-left corner at `(x, y)`.
    pub fn rect_filled(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.span(
            i64::from(x),
            i64::from(y),
            i64::from(w),
            i64::from(h),
            color,
        )
    }

    /// Fill the whole logical screen.
    pub fn fill(&mut self, color: Color) -> Result<(), DisplayError> {
        let (w, h) = (self.geometry.width(), self.geometry.height());
        self.span(0, 0, i64::from(w), i64::from(h), color)
    }

    /// Horizontal run of `len` pixels starting at `(x, y)`.
    pub fn hline(&mut self, x: i32, y: i32, len: i32, color: Color) -> Result<(), DisplayError> {
        self.span(i64::from(x), i64::from(y), i64::from(len), 1, color)
    }

    /// Vertical run of `len` pixels starting at `(x, y)`.
    pub fn vline(&mut self, x: i32, y: i32, len: i32, color: Color) -> Result<(), DisplayError> {
        self.span(i64::from(x), i64::from(y), 1, i64::from(len), color)
    }

    /// One-pixel border of the `w × h` rectangle at `(x, y)`.
    ///
    /// Drawn as top, right, bottom, left; corners are written twice.
    pub fn rect_outline(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Color,
    ) -> Result<(), DisplayError> {
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        let (x, y, w, h) = (i64::from(x), i64::from(y), i64::from(w), i64::from(h));
        self.span(x, y, w, 1, color)?;
        self.span(x + w - 1, y, 1, h, color)?;
        self.span(x, y + h - 1, w, 1, color)?;
        self.span(x, y, 1, h, color)
    }

    // -----------------------------------------------------------------------
    // Lines
    // -----------------------------------------------------------------------

    /// Line from `(x0, y0)` to `(x1, y1)`, both ends included.
    ///
    /// Axis-aligned lines become a single span. Anything else is walked with
    /// Bresenham's algorithm along the longer axis and sent pixel by pixel.
    pub fn line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Color,
    ) -> Result<(), DisplayError> {
        let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        if dx == 0 {
            return self.span(x0, y0.min(y1), 1, dy + 1, color);
        }
        if dy == 0 {
            return self.span(x0.min(x1), y0, dx + 1, 1, color);
        }

        let step_x = (x1 - x0).signum();
        let step_y = (y1 - y0).signum();
        let (mut x, mut y) = (x0, y0);

        if dx >= dy {
            let mut err = 2 * dy - dx;
            for _ in 0..=dx {
                self.plot(x, y, color)?;
                if err >= 0 {
                    y += step_y;
                    err -= 2 * dx;
                }
                err += 2 * dy;
                x += step_x;
            }
        } else {
            let mut err = 2 * dx - dy;
            for _ in 0..=dy {
                self.plot(x, y, color)?;
                if err >= 0 {
                    x += step_x;
                    err -= 2 * dy;
                }
                err += 2 * dx;
                y += step_y;
            }
        }
        Ok(())
    }

    /// Outline of the triangle `a`, `b`, `c` as three lines.
    pub fn triangle_outline(
        &mut self,
        a: (i32, i32),
        b: (i32, i32),
        c: (i32, i32),
        color: Color,
    ) -> Result<(), DisplayError> {
        self.line(a.0, a.1, b.0, b.1, color)?;
        self.line(b.0, b.1, c.0, c.1, color)?;
        self.line(c.0, c.1, a.0, a.1, color)
    }

    // -----------------------------------------------------------------------
    // Circles
    // -----------------------------------------------------------------------

    /// Filled circle centred on `(cx, cy)`, one span per row.
    ///
    /// The diameter row covers `cx - r .. cx + r`; row `cy ± i` covers
    /// `cx - a .. cx + a` with `a = half_chord(r, i)`.
    pub fn circle_filled(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        color: Color,
    ) -> Result<(), DisplayError> {
        let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(r));
        self.span(cx - r, cy, 2 * r, 1, color)?;
        for i in 1..r {
            let a = half_chord(r, i);
            self.span(cx - a, cy + i, 2 * a, 1, color)?;
            self.span(cx - a, cy - i, 2 * a, 1, color)?;
        }
        Ok(())
    }

    /// Circle outline centred on `(cx, cy)`.
    ///
    /// Plots the four axis points, then eight mirrored points per row
    /// offset. Points are not joined, so small circles can show gaps where
    /// the octants meet.
    ///
    /// A zero or negative radius draws nothing. Without the early return
    /// the four axis points would still be plotted at the centre.
    pub fn circle_outline(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        color: Color,
    ) -> Result<(), DisplayError> {
        if r <= 0 {
            return Ok(());
        }
        let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(r));
        self.plot(cx - r, cy, color)?;
        self.plot(cx + r, cy, color)?;
        self.plot(cx, cy - r, color)?;
        self.plot(cx, cy + r, color)?;
        for i in 1..r {
            let a = half_chord(r, i);
            self.plot(cx - a, cy - i, color)?;
            self.plot(cx - i, cy - a, color)?;
            self.plot(cx + a, cy - i, color)?;
            self.plot(cx + i, cy - a, color)?;
            self.plot(cx - a, cy + i, color)?;
            self.plot(cx - i, cy + a, color)?;
            self.plot(cx + a, cy + i, color)?;
            self.plot(cx + i, cy + a, color)?;
        }
        Ok(())
    }
}
