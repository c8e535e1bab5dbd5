//! Horizontal row layout for the odometer's live nodes.
//!
//! Nodes are placed in **reverse decode order** (rightmost segment first):
//! each node's right edge lands on a cursor that starts at the anchor width
//! and walks left by the node width plus spacing. Anchoring placement to the
//! right edge makes the layout append-stable - when a value grows a digit,
//! the new cell is prepended at the most-significant (left) end and every
//! already-placed lower-order digit keeps its position.
//!
//! The leftmost x reached while placing the first `measure_limit` nodes
//! determines the content width used for alignment. During an animated
//! transition the limit is the *old* value's node count, so the departure
//! frame's alignment is not polluted by freshly appended, still-invisible
//! cells.

use crate::config::MAX_NODES;
use heapless::Vec;

// =============================================================================
// Geometry Types
// =============================================================================

/// A width/height pair in fractional pixels.
///
/// Layout runs in `f32` so animated interpolation between geometries is
/// smooth; coordinates are rounded to device pixels only at draw time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SizeF {
    pub w: f32,
    pub h: f32,
}

impl SizeF {
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// True when either dimension is not positive (pre-measurement state).
    pub fn is_degenerate(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}

/// A node rectangle in fractional pixels, relative to the content row.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeFrame {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl NodeFrame {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Horizontal alignment of the content row inside the widget bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlign {
    /// Content flush to the left edge.
    Leading,
    /// Remaining slack split evenly on both sides.
    #[default]
    Center,
    /// Content flush to the right edge.
    Trailing,
}

// =============================================================================
// Row Layout
// =============================================================================

/// Result of one layout pass.
pub struct RowLayout {
    /// One frame per input node, same order as the input sizes.
    pub frames: Vec<NodeFrame, MAX_NODES>,
    /// Left edge of the leftmost node within the measure limit.
    /// Equals `anchor_width` when no node was measured (empty content).
    pub x_min: f32,
}

impl RowLayout {
    /// Effective content width under the measure limit.
    pub fn content_width(&self, anchor_width: f32) -> f32 {
        (anchor_width - self.x_min).max(0.0)
    }
}

/// Place nodes right-to-left along the content row.
///
/// `sizes` lists node sizes in display order (reverse decode order).
/// `digit_height` is the single-digit cell height; every node is vertically
/// centered within it. `measure_limit` caps how many nodes contribute to
/// `x_min` (pass `sizes.len()` to measure everything).
pub fn layout_row(
    sizes: &[SizeF],
    anchor_width: f32,
    digit_height: f32,
    spacing: f32,
    measure_limit: usize,
) -> RowLayout {
    let mut frames: Vec<NodeFrame, MAX_NODES> = Vec::new();
    let mut x_cursor = anchor_width;
    let mut x_min = anchor_width;

    for (index, size) in sizes.iter().enumerate() {
        let frame = NodeFrame::new(
            x_cursor - size.w,
            (digit_height - size.h) / 2.0,
            size.w,
            size.h,
        );
        if frames.push(frame).is_err() {
            break;
        }
        if index < measure_limit {
            x_min = x_cursor - size.w;
        }
        x_cursor -= size.w + spacing;
    }

    RowLayout { frames, x_min }
}

/// Horizontal content offset for a laid-out row under the given alignment.
///
/// The offset shifts every node frame when drawing: trailing content needs
/// none (placement is already right-anchored), leading content shifts so
/// `x_min` lands on the left edge, centered content splits the slack.
pub fn content_offset(alignment: HorizontalAlign, x_min: f32) -> f32 {
    match alignment {
        HorizontalAlign::Trailing => 0.0,
        HorizontalAlign::Leading => -x_min,
        HorizontalAlign::Center => -x_min / 2.0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
