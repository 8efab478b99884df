//! Hardware Abstraction Layer (HAL) for small SPI color TFT panels
//!
//! This crate holds the interfaces the panel driver consumes but does not
//! implement itself, so the driver can be exercised without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application (drawing calls)
//!         ↓
//! Panel driver (st7735r crate: protocol, addressing, batching, raster, glyphs)
//!         ↓
//! Platform HAL (this crate - Transport, Font, PanelConfig)
//!         ↓
//! embedded-hal SpiBus + OutputPin
//! ```
//!
//! # Abstractions
//!
//! - [`Transport`] - raw byte writes plus the data/command and chip-select lines
//! - [`SpiTransport`] - [`Transport`] over an `embedded-hal` SPI bus
//! - [`Font`] - column-major bitmap font lookup
//! - [`PanelConfig`] - construction parameters (size, offsets, orientation)
//! - [`DisplayError`] - the error every bus-touching operation returns
//!
//! # Features
//!
//! - `std`: Enable standard library support and the [`mocks`] module
//! - `defmt`: Derive `defmt::Format` on public types
//! - `serde`: Derive `Serialize`/`Deserialize` on [`PanelConfig`]
//!
//! # Example
//!
//! ```
//! use platform::{PanelConfig, Rotation};
//!
//! let config = PanelConfig::default().with_rotation(Rotation::Deg90);
//! assert_eq!(config.width, 80);
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
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod display;
pub mod font;
pub mod gpio;
pub mod transport;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

pub use config::{ColorOrder, PanelConfig, Rotation};
pub use display::DisplayError;
pub use font::{Font, RawFont};
pub use gpio::NoPin;
pub use transport::{SpiTransport, Transport};
