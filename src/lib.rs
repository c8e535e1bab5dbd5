//! An animated odometer-style value display for `embedded-graphics`.
//!
//! The widget renders a string as a row of nodes: every decimal digit
//! becomes a rolling digit cell (a vertically scrolling strip of glyphs),
//! every other run of characters a literal text node. Value changes roll
//! each digit along the shortest circular path, so `199` -> `200` spins
//! three digits one step instead of unwinding the hundreds place.
//!
//! - [`segment`]: value decoding into digit cells and text runs
//! - [`measure`]: glyph metrics and the canonical digit cell size
//! - [`layout`]: right-anchored, append-stable row placement
//! - [`scroll`]: shortest-path strip offsets for digit transitions
//! - [`pool`]: reusable node arena (grow eagerly, recycle lazily)
//! - [`animation`]: two-phase transition state, easing, fades
//! - [`widget`]: the [`OdometerDisplay`] itself
//! - [`render`]: drawing onto any `Rgb565` [`DrawTarget`]
//!
//! The core is allocation-free (`heapless` collections throughout); only
//! wall-clock timing comes from `std`.
//!
//! # Example
//!
//! ```no_run
//! use embedded_graphics::{prelude::*, primitives::Rectangle};
//! use odometer_display::{OdometerDisplay, OdometerStyle};
//! # let mut display = embedded_graphics::mock_display::MockDisplay::<embedded_graphics::pixelcolor::Rgb565>::new();
//!
//! let mut odometer = OdometerDisplay::new(OdometerStyle::default());
//! odometer.set_bounds(Rectangle::new(Point::new(10, 10), Size::new(200, 40)));
//! odometer.set_value("1,234 km", true);
//!
//! // Per frame:
//! odometer.tick();
//! odometer.draw(&mut display)?;
//! # Ok::<(), core::convert::Infallible>(())
//! ```
//!
//! [`DrawTarget`]: embedded_graphics::draw_target::DrawTarget

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod animation;
pub mod colors;
pub mod config;
pub mod layout;
pub mod measure;
pub mod pool;
pub mod render;
pub mod scroll;
pub mod segment;
pub mod styles;
pub mod widget;

// Re-export the public surface
pub use layout::HorizontalAlign;
pub use segment::{DecodedValue, Segment, decimal_digit_value, decode};
pub use widget::{OdometerDisplay, OdometerStyle};
