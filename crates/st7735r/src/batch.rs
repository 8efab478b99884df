//! Solid-color bursts
//!
//! A run of `count` identical pixels is sent from one stack buffer of
//! [`BURST_PIXELS`] samples: `count / BURST_PIXELS` full writes, then one
//! write for the remainder. All writes share a single chip-select frame.

#![allow(clippy::arithmetic_side_effects)]

use platform::{DisplayError, Transport};

use crate::color::Color;
use crate::command::data_frame;

/// Pixels per bus write. Larger values mean fewer transport calls and a
/// bigger stack buffer (two bytes per pixel).
pub const BURST_PIXELS: usize = 50;

const BURST_BYTES: usize = BURST_PIXELS * 2;

/// Stream `count` copies of `color` into the current RAM window.
///
/// `count == 0` touches nothing on the bus.
pub fn stream_color<T>(bus: &mut T, color: Color, count: usize) -> Result<(), DisplayError>
where
    T: Transport + ?Sized,
{
    if count == 0 {
        return Ok(());
    }

    let writes = burst_count(count);
    let rest = count % BURST_PIXELS;
    let full = if rest == 0 { writes } else { writes - 1 };

    let sample = color.to_be_bytes();
    let mut burst = [0u8; BURST_BYTES];
    for chunk in burst.chunks_exact_mut(2) {
        chunk.copy_from_slice(&sample);
    }

    data_frame(bus, |bus| {
        for _ in 0..full {
            bus.write_bytes(&burst)?;
        }
        if let Some(tail) = burst.get(..rest * 2).filter(|tail| !tail.is_empty()) {
            bus.write_bytes(tail)?;
        }
        Ok(())
    })
}

/// Number of transport writes `stream_color` makes for `count` pixels.
pub const fn burst_count(count: usize) -> usize {
    count.div_ceil(BURST_PIXELS)
}
