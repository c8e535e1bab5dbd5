//! Color constants for the odometer widget and demo.
//!
//! # Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! This format is native to many embedded displays and requires no
//! conversion when writing to the display buffer. Standard colors come from
//! the `RgbColor` trait constants; custom colors are constructed directly.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black (0, 0, 0). Default widget background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Default digit/text color.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0).
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0).
pub const GREEN: Rgb565 = Rgb565::GREEN;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Amber, the classic odometer glow. RGB565: (31, 40, 0).
pub const AMBER: Rgb565 = Rgb565::new(31, 40, 0);

/// Dark gray for the demo status line. RGB565: (8, 16, 8).
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);
