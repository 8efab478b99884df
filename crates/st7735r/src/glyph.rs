//! Bitmap text
//!
//! Glyphs come from any [`Font`]: one byte per column, bit 0 at the top.
//! Each set bit becomes a pixel, or a `scale_x × scale_y` block when either
//! scale is above 1. Codes the font does not cover draw nothing.

#![allow(clippy::arithmetic_side_effects)]

use platform::{DisplayError, Font, Transport};

use crate::color::Color;
use crate::driver::St7735r;

/// Rows a column byte can describe.
const MAX_GLYPH_ROWS: u8 = 8;

impl<T, RST, DELAY> St7735r<T, RST, DELAY>
where
    T: Transport,
{
    /// Draw `ch` with its top-left corner at `(x, y)`.
    ///
    /// `None` for `font`, or a character outside the font, sends nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_char<F>(
        &mut self,
        x: i32,
        y: i32,
        ch: char,
        font: Option<&F>,
        color: Color,
        scale_x: u8,
        scale_y: u8,
    ) -> Result<(), DisplayError>
    where
        F: Font + ?Sized,
    {
        let Some(font) = font else {
            return Ok(());
        };
        self.render_glyph(i64::from(x), i64::from(y), ch, font, color, scale_x, scale_y)
    }

    /// Draw `text` left to right starting at `(x, y)`.
    ///
    /// The pen advances `scale * glyph_width + 1` per character. Once the
    /// next character would cross the right edge the pen moves down
    /// `scale * glyph_height + 1` rows and back to `x_wrap`, or to `x` when
    /// `x_wrap` is `None`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text<F>(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        font: Option<&F>,
        color: Color,
        scale: u8,
        x_wrap: Option<i32>,
    ) -> Result<(), DisplayError>
    where
        F: Font + ?Sized,
    {
        let Some(font) = font else {
            return Ok(());
        };

        let scale_wide = i64::from(scale);
        let advance = scale_wide * i64::from(font.glyph_width()) + 1;
        let line_height = scale_wide * i64::from(font.glyph_height()) + 1;
        let right = i64::from(self.geometry.width());
        let line_start = i64::from(x_wrap.unwrap_or(x));

        let mut pen_x = i64::from(x);
        let mut pen_y = i64::from(y);
        for ch in text.chars() {
            self.render_glyph(pen_x, pen_y, ch, font, color, scale, scale)?;
            pen_x += advance;
            if pen_x + advance > right {
                pen_y += line_height;
                pen_x = line_start;
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn render_glyph<F>(
        &mut self,
        x: i64,
        y: i64,
        ch: char,
        font: &F,
        color: Color,
        scale_x: u8,
        scale_y: u8,
    ) -> Result<(), DisplayError>
    where
        F: Font + ?Sized,
    {
        let Some(columns) = font.glyph(u32::from(ch)) else {
            return Ok(());
        };
        let rows = font.glyph_height().min(MAX_GLYPH_ROWS);
        let unscaled = scale_x <= 1 && scale_y <= 1;
        let (step_x, step_y) = if unscaled {
            (1, 1)
        } else {
            (i64::from(scale_x), i64::from(scale_y))
        };

        let mut px = x;
        for &column in columns {
            let mut bits = column;
            let mut py = y;
            for _ in 0..rows {
                if bits & 0x01 != 0 {
                    if unscaled {
                        self.plot(px, py, color)?;
                    } else {
                        self.span(px, py, step_x, step_y, color)?;
                    }
                }
                py += step_y;
                bits >>= 1;
            }
            px += step_x;
        }
        Ok(())
    }
}
