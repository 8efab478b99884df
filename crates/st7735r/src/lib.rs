//! Blocking driver for ST7735R SPI color TFT panels
//!
//! Every drawing call is reduced to the one write the controller offers:
//! address a rectangular RAM window (CASET/RASET/RAMWR), then stream RGB565
//! samples into it. Solid runs are sent in fixed-size bursts from a small
//! stack buffer, so no framebuffer is needed.
//!
//! # Layers
//!
//! ```text
//! glyph      draw_char, draw_text
//! raster     pixel, hline, vline, rect, line, circle, triangle
//! batch      stream_color: N samples in BURST_PIXELS chunks
//! driver     set_window, rotation, lifecycle (reset, init, sleep, power)
//! command    opcode + parameter framing over DC / CS
//!         ↓
//! platform::Transport (SPI bus + DC + optional CS)
//! ```
//!
//! # Features
//!
//! - `defmt`: log through `defmt` and derive `defmt::Format`
//! - `tracing`: log through `tracing` (host builds)
//! - `std`: enable `std` in `platform` (and its test mocks)
//!
//! # Example
//!
//! ```
//! use platform::mocks::{MockDelay, MockTransport};
//! use platform::{NoPin, PanelConfig, Rotation};
//! use st7735r::{Color, St7735r};
//!
//! let config = PanelConfig::default().with_rotation(Rotation::Deg90);
//! let mut display = St7735r::new(MockTransport::new(), None::<NoPin>, MockDelay::new(), config);
//!
//! display.init()?;
//! display.fill(Color::BLACK)?;
//! display.line(0, 0, 159, 79, Color::YELLOW)?;
//! display.circle_filled(80, 40, 20, Color::BLUE)?;
//! assert_eq!((display.width(), display.height()), (160, 80));
//! # Ok::<(), platform::DisplayError>(())
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod fmt;

pub mod batch;
pub mod color;
pub mod command;
pub mod draw_target;
pub mod driver;
pub mod geometry;
pub mod glyph;
pub mod raster;

pub use batch::{stream_color, BURST_PIXELS};
pub use color::{color565, Color};
pub use command::Command;
pub use driver::{DeviceState, Lifecycle, St7735r};
pub use geometry::Geometry;

pub use platform::{ColorOrder, DisplayError, Font, PanelConfig, RawFont, Rotation};
