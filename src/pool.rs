//! Reusable rendering-node pools for digit cells and text runs.
//!
//! Digit cells are expensive relative to reuse (each one owns animated
//! frame and scroll state and, on screen, a full glyph strip), so the pool
//! grows eagerly and shrinks lazily: `ensure` only ever grows, and
//! `recycle_excess` runs after an animation settles, parking trailing nodes
//! on idle lists that future growth reclaims. Nothing is destroyed while
//! the widget lives; the arena's backing capacity is compile-time fixed.
//!
//! Pool index order is right-to-left: digit cell 0 is the rightmost
//! (least-significant) digit of the displayed value. Growth therefore
//! appends cells at the most-significant end, which combined with the
//! right-anchored layout keeps existing digits (and their scroll state)
//! stable as a value gains digits.

use heapless::{String, Vec};

use crate::animation::Animated;
use crate::config::{MAX_DIGIT_CELLS, MAX_TEXT_RUNS, TEXT_RUN_CAP};
use crate::layout::NodeFrame;
use crate::segment::Segment;

// =============================================================================
// Nodes
// =============================================================================

/// A pooled rolling-digit node: animated frame plus vertical scroll offset
/// into its glyph strip.
#[derive(Clone, Copy, Debug)]
pub struct DigitCell {
    pub frame: Animated<NodeFrame>,
    pub offset: Animated<f32>,
}

impl DigitCell {
    fn new() -> Self {
        Self {
            frame: Animated::new(NodeFrame::default()),
            offset: Animated::new(0.0),
        }
    }
}

/// A pooled literal-text node.
#[derive(Clone, Debug)]
pub struct TextRun {
    pub content: String<TEXT_RUN_CAP>,
    pub frame: Animated<NodeFrame>,
}

impl TextRun {
    fn new() -> Self {
        Self {
            content: String::new(),
            frame: Animated::new(NodeFrame::default()),
        }
    }
}

/// Reference to a live node, indexing into the pool's active lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRef {
    Digit(usize),
    Text(usize),
}

// =============================================================================
// Pool
// =============================================================================

/// Arena of active and idle rendering nodes.
pub struct CellPool {
    pub digits: Vec<DigitCell, MAX_DIGIT_CELLS>,
    pub texts: Vec<TextRun, MAX_TEXT_RUNS>,
    idle_digits: Vec<DigitCell, MAX_DIGIT_CELLS>,
    idle_texts: Vec<TextRun, MAX_TEXT_RUNS>,
}

impl CellPool {
    pub const fn new() -> Self {
        Self {
            digits: Vec::new(),
            texts: Vec::new(),
            idle_digits: Vec::new(),
            idle_texts: Vec::new(),
        }
    }

    /// Grow the active pools to at least the requested counts.
    ///
    /// Idle nodes are reclaimed before new ones are constructed. Never
    /// shrinks; requests beyond the compile-time capacity are satisfied up
    /// to the cap.
    pub fn ensure(&mut self, digit_count: usize, text_count: usize) {
        while self.digits.len() < digit_count {
            let cell = self.idle_digits.pop().unwrap_or_else(DigitCell::new);
            if self.digits.push(cell).is_err() {
                break;
            }
        }
        while self.texts.len() < text_count {
            let run = self.idle_texts.pop().unwrap_or_else(TextRun::new);
            if self.texts.push(run).is_err() {
                break;
            }
        }
    }

    /// Rebind literal content onto the text-run nodes.
    ///
    /// Text segments map onto runs in right-to-left traversal order (run 0
    /// is the rightmost literal). Digit cells need no rebinding - their
    /// glyph strip is fixed; only their scroll target changes. Runs beyond
    /// the segment's text count are blanked; they stay pooled until the
    /// next recycle pass.
    pub fn reassign(&mut self, segments: &[Segment]) {
        let mut text_index = 0;
        for segment in segments.iter().rev() {
            if segment.is_digit_cell {
                continue;
            }
            if let Some(run) = self.texts.get_mut(text_index) {
                run.content.clear();
                let _ = run.content.push_str(&segment.content);
            }
            text_index += 1;
        }
        for run in self.texts.iter_mut().skip(text_index) {
            run.content.clear();
        }
    }

    /// Park trailing nodes beyond the needed counts on the idle lists.
    ///
    /// Invoked only after an animation settles (or synchronously for an
    /// unanimated update), never mid-animation - a node being recycled
    /// while still rolling would vanish abruptly.
    pub fn recycle_excess(&mut self, digit_count: usize, text_count: usize) {
        while self.digits.len() > digit_count {
            if let Some(cell) = self.digits.pop() {
                let _ = self.idle_digits.push(cell);
            }
        }
        while self.texts.len() > text_count {
            if let Some(mut run) = self.texts.pop() {
                run.content.clear();
                let _ = self.idle_texts.push(run);
            }
        }
    }

    /// Active digit-cell count.
    #[inline]
    pub fn digit_count(&self) -> usize {
        self.digits.len()
    }

    /// Active text-run count.
    #[inline]
    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    /// Parked digit cells awaiting reuse.
    #[inline]
    pub fn idle_digit_count(&self) -> usize {
        self.idle_digits.len()
    }

    /// Parked text runs awaiting reuse.
    #[inline]
    pub fn idle_text_count(&self) -> usize {
        self.idle_texts.len()
    }
}

impl Default for CellPool {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
