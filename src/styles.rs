//! Pre-computed static text styles to avoid per-frame object construction.
//!
//! # Optimization: Static Style Constants
//!
//! `TextStyle` objects are `const`, computed at compile time and stored in
//! the binary's read-only data section. Character styles (`MonoTextStyle`)
//! carry a dynamic color (the widget's text color, possibly faded toward the
//! background), so those are built per frame from the widget's font
//! reference; only the color varies, the font reference is shared.

use embedded_graphics::{
    mono_font::{MonoFont, ascii::FONT_6X10},
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};

// =============================================================================
// Text Alignment Styles (const - zero runtime cost)
// =============================================================================

/// Top-left anchored text. All widget nodes are positioned by their
/// top-left corner, so glyph rows and text runs draw with this style.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Centered, top-anchored text. Used by the demo status line.
pub const TOP_CENTER: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Top)
    .build();

// =============================================================================
// Font References
// =============================================================================

/// Small font for the demo status line.
pub const STATUS_FONT: &MonoFont = &FONT_6X10;
