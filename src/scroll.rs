//! Shortest-path scroll offsets for rolling digit cells.
//!
//! Each digit cell scrolls a strip of the ten digits repeated three times.
//! A digit is therefore visible at three vertically-equivalent offsets - in
//! the top, middle and bottom copy of the strip. The animated calculation
//! picks whichever copy is closest to the current offset, so a 9 -> 0
//! transition rolls forward one step into the next copy instead of
//! unwinding backward through nine positions.
//!
//! At rest the offset always addresses the middle copy, guaranteeing a full
//! ten-digit range of headroom in both directions for the next transition.

use crate::config::{REST_COPY_INDEX, STRIP_GLYPH_COUNT};

/// Offset addressing `digit` in the middle copy of the strip (rest position).
#[inline]
pub fn rest_offset(cell_height: f32, digit: u8) -> f32 {
    (digit as usize + REST_COPY_INDEX) as f32 * cell_height
}

/// Offset that scrolls the whole strip out of the cell viewport.
///
/// Used for pooled cells beyond the digit count of the current value: they
/// vanish visually without leaving the pool.
#[inline]
pub fn off_surface_offset(cell_height: f32) -> f32 {
    -(STRIP_GLYPH_COUNT as f32) * cell_height
}

/// Choose the target offset for a digit transition.
///
/// Unanimated: always the middle-copy rest offset. Animated: the candidate
/// among the three strip copies with the smallest distance from
/// `current_offset`; ties fall through the top and bottom comparisons to
/// the center candidate.
pub fn target_offset(cell_height: f32, digit: u8, current_offset: f32, animated: bool) -> f32 {
    let top = f32::from(digit) * cell_height;
    if !animated {
        return top + REST_COPY_INDEX as f32 * cell_height;
    }

    let center = top + REST_COPY_INDEX as f32 * cell_height;
    let bottom = top + (2 * REST_COPY_INDEX) as f32 * cell_height;

    let d_top = (top - current_offset).abs();
    let d_center = (center - current_offset).abs();
    let d_bottom = (bottom - current_offset).abs();

    if d_top < d_bottom && d_top < d_center {
        top
    } else if d_bottom < d_top && d_bottom < d_center {
        bottom
    } else {
        center
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
