//! `embedded-graphics` integration
//!
//! Single pixels go through [`St7735r::pixel`]; solid rectangles and clears
//! take the same window + burst path as [`St7735r::rect_filled`], so filled
//! shapes from `embedded-graphics` cost one window per rectangle.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use platform::{DisplayError, Transport};

use crate::color::Color;
use crate::driver::St7735r;

impl<T, RST, DELAY> DrawTarget for St7735r<T, RST, DELAY>
where
    T: Transport,
{
    type Color = Rgb565;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.pixel(point.x, point.y, Color::from(color))?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let width = i32::try_from(area.size.width).unwrap_or(i32::MAX);
        let height = i32::try_from(area.size.height).unwrap_or(i32::MAX);
        self.rect_filled(
            area.top_left.x,
            area.top_left.y,
            width,
            height,
            Color::from(color),
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(Color::from(color))
    }
}

impl<T, RST, DELAY> OriginDimensions for St7735r<T, RST, DELAY> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}
