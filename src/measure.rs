//! Glyph measurement backed by `MonoFont` metrics.
//!
//! The widget never hardcodes pixel sizes: the canonical single-digit cell
//! size is derived from the rendered box of the full glyph strip (the ten
//! digits repeated [`GLYPH_REPEAT`](crate::config::GLYPH_REPEAT) times)
//! divided back by the glyph count. With a monospaced font this reduces to
//! the per-character advance, but going through the strip keeps the cell
//! height consistent with what the strip actually occupies on screen.
//!
//! Degenerate fonts (zero-sized glyph box) yield a zero cell size; layout
//! and sizing treat that as "not yet measurable" and produce all-zero
//! geometry instead of dividing by zero.

use embedded_graphics::mono_font::MonoFont;

use crate::config::STRIP_GLYPH_COUNT;
use crate::layout::SizeF;

/// Horizontal advance of one glyph, including inter-character spacing.
#[inline]
fn glyph_advance(font: &MonoFont) -> u32 {
    font.character_size.width + font.character_spacing
}

/// Measure the canonical single-digit cell size for a font.
///
/// Returns a zero size when the font reports a degenerate glyph box.
pub fn single_digit_size(font: &MonoFont) -> SizeF {
    let advance = glyph_advance(font);
    let strip_height = font.character_size.height * STRIP_GLYPH_COUNT as u32;
    if advance == 0 || strip_height == 0 {
        return SizeF::default();
    }
    SizeF::new(
        advance as f32,
        strip_height as f32 / STRIP_GLYPH_COUNT as f32,
    )
}

/// Rendered width of a literal text run under the given font.
///
/// Counts Unicode scalars; a mono font renders every glyph (known or
/// fallback) at the same advance.
pub fn text_run_width(font: &MonoFont, text: &str) -> f32 {
    (text.chars().count() as u32 * glyph_advance(font)) as f32
}

// =============================================================================
// Unit Tests
// =============================================================================
