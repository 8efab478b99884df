//! Host-side demo: bring up a panel on the recording transport, draw a
//! small clock face and print the emulated panel RAM as ASCII.
//!
//! Run with: cargo run -p st7735r --example text_demo --features tracing
//! (set `RUST_LOG=trace` to see every window).

#![allow(clippy::print_stdout)]

use platform::mocks::{MockDelay, MockTransport};
use platform::{DisplayError, NoPin, PanelConfig, RawFont, Rotation};
use st7735r::{Color, St7735r};
use tracing_subscriber::EnvFilter;

/// 5×7 digits, column-major, bit 0 at the top.
static DIGITS: [u8; 55] = [
    0x3E, 0x51, 0x49, 0x45, 0x3E, // 0
    0x00, 0x42, 0x7F, 0x40, 0x00, // 1
    0x42, 0x61, 0x51, 0x49, 0x46, // 2
    0x21, 0x41, 0x45, 0x4B, 0x31, // 3
    0x18, 0x14, 0x12, 0x7F, 0x10, // 4
    0x27, 0x45, 0x45, 0x45, 0x39, // 5
    0x3C, 0x4A, 0x49, 0x49, 0x30, // 6
    0x01, 0x71, 0x09, 0x05, 0x03, // 7
    0x36, 0x49, 0x49, 0x49, 0x36, // 8
    0x06, 0x49, 0x49, 0x29, 0x1E, // 9
    0x00, 0x36, 0x36, 0x00, 0x00, // :
];

fn main() -> Result<(), DisplayError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let font = RawFont::new(&DIGITS, 5, 7, u32::from('0'), u32::from(':'));
    let config = PanelConfig::default().with_rotation(Rotation::Deg90);
    let mut display = St7735r::new(MockTransport::new(), None::<NoPin>, MockDelay::new(), config);

    display.init()?;
    display.fill(Color::BLACK)?;
    display.rect_outline(0, 0, 160, 80, Color::WHITE)?;
    display.circle_outline(24, 40, 18, Color::CYAN)?;
    display.line(24, 40, 24, 26, Color::RED)?;
    display.line(24, 40, 34, 44, Color::RED)?;
    display.draw_text(52, 28, "12:45", Some(&font), Color::YELLOW, 2, None)?;
    display.triangle_outline((140, 10), (152, 30), (128, 30), Color::GREEN)?;

    let (bus, _, delay) = display.release();
    tracing::info!(
        writes = bus.write_count(),
        bytes = bus.bytes_written(),
        frames = bus.frames(),
        settle_ms = delay.total_ms(),
        "demo finished"
    );

    // Physical RAM: odd rotation puts the 160 logical columns at 1..=160
    // and the 80 logical rows at 26..=105.
    let painted = bus.painted();
    for row in (26..106).step_by(2) {
        let line: String = (1..161)
            .map(|col| match painted.get(&(col, row)) {
                Some(&color) if color != Color::BLACK.raw() => '#',
                _ => ' ',
            })
            .collect();
        println!("{line}");
    }
    Ok(())
}
