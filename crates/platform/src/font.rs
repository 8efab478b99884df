//! Bitmap font capability
//!
//! Glyphs are stored column-major: each glyph is `glyph_width` bytes, one per
//! column, and bit 0 of a column byte is the glyph's top row. Glyphs are at
//! most 8 rows tall.
//!
//! The renderer only reads through [`Font`], so any backing store (a `static`
//! table in flash, an external SPI flash, a generated array) can be used.

use core::ops::Range;

/// Read-only access to a column-major bitmap font.
pub trait Font {
    /// Glyph width in columns (bytes per glyph).
    fn glyph_width(&self) -> u8;

    /// Glyph height in rows (bits used per column byte, at most 8).
    fn glyph_height(&self) -> u8;

    /// First character code the font covers.
    fn first_char(&self) -> u32;

    /// Last character code the font covers (inclusive).
    fn last_char(&self) -> u32;

    /// Column bytes in `range`, or `None` if the range is outside the table.
    fn glyph_bytes(&self, range: Range<usize>) -> Option<&[u8]>;

    /// Column bytes of `code`, or `None` if the font does not cover it.
    fn glyph(&self, code: u32) -> Option<&[u8]> {
        if code < self.first_char() || code > self.last_char() {
            return None;
        }
        let width = usize::from(self.glyph_width());
        let index = usize::try_from(code.checked_sub(self.first_char())?).ok()?;
        let start = index.checked_mul(width)?;
        let end = start.checked_add(width)?;
        self.glyph_bytes(start..end)
    }
}

impl<F: Font + ?Sized> Font for &F {
    fn glyph_width(&self) -> u8 {
        F::glyph_width(self)
    }

    fn glyph_height(&self) -> u8 {
        F::glyph_height(self)
    }

    fn first_char(&self) -> u32 {
        F::first_char(self)
    }

    fn last_char(&self) -> u32 {
        F::last_char(self)
    }

    fn glyph_bytes(&self, range: Range<usize>) -> Option<&[u8]> {
        F::glyph_bytes(self, range)
    }
}

/// A font backed by a borrowed byte table.
///
/// ```
/// use platform::{Font, RawFont};
///
/// // Two 3-column glyphs: '0' and '1'.
/// static DIGITS: [u8; 6] = [0x1F, 0x11, 0x1F, 0x00, 0x1F, 0x00];
/// let font = RawFont::new(&DIGITS, 3, 5, u32::from('0'), u32::from('1'));
/// assert_eq!(font.glyph(u32::from('1')), Some(&[0x00, 0x1F, 0x00][..]));
/// assert_eq!(font.glyph(u32::from('2')), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RawFont<'a> {
    data: &'a [u8],
    width: u8,
    height: u8,
    first: u32,
    last: u32,
}

impl<'a> RawFont<'a> {
    /// Wrap a table of `(last - first + 1) * width` column bytes.
    pub const fn new(data: &'a [u8], width: u8, height: u8, first: u32, last: u32) -> Self {
        Self {
            data,
            width,
            height,
            first,
            last,
        }
    }
}

impl Font for RawFont<'_> {
    fn glyph_width(&self) -> u8 {
        self.width
    }

    fn glyph_height(&self) -> u8 {
        self.height
    }

    fn first_char(&self) -> u32 {
        self.first
    }

    fn last_char(&self) -> u32 {
        self.last
    }

    fn glyph_bytes(&self, range: Range<usize>) -> Option<&[u8]> {
        self.data.get(range)
    }
}
