//! The odometer display widget: public surface and update orchestration.
//!
//! # Architecture
//!
//! ```text
//! set_value("1,234", animated)
//!   │ decode ──> segments (digit cells / text runs)
//!   │ pool.ensure ──> grow node pools (never shrink here)
//!   │ pool.reassign ──> rebind literal text, right-to-left
//!   │ rebuild order ──> live nodes in reverse decode order
//!   │
//!   ├─ animated: departure pass (old geometry, instant) ─ commit value
//!   │            └─> next tick: roll pass (new geometry, interpolated)
//!   │                 └─> settle: recycle excess, snap offsets to rest
//!   └─ unanimated: new geometry instant, recycle now, fade content in
//! ```
//!
//! All state lives in this struct; one widget instance is the single
//! logical owner of its pools and committed value. Hosts drive it from one
//! thread: `set_value` on changes, `tick` once per frame, `draw` after.
//!
//! # In-flight updates
//!
//! A `set_value` arriving while a previous update is still rolling
//! overwrites the in-flight state: the departure pass re-applies the
//! previous *target* value's rest geometry instantly and the new roll
//! proceeds from there. Updates are not queued.

use std::time::{Duration, Instant};

use embedded_graphics::{
    mono_font::MonoFont,
    pixelcolor::Rgb565,
    prelude::{Point, Size},
    primitives::Rectangle,
};
use heapless::{String, Vec};
use profont::PROFONT_24_POINT;

use crate::animation::{Animated, FadeIn, Phase, ease_in_out, progress};
use crate::colors::{BLACK, WHITE};
use crate::config::{DEFAULT_ANIMATION_DURATION, MAX_NODES, MAX_SEGMENTS, VALUE_CAP};
use crate::layout::{HorizontalAlign, SizeF, content_offset, layout_row};
use crate::measure;
use crate::pool::{CellPool, NodeRef};
use crate::scroll;
use crate::segment::{DecodedValue, decimal_digit_value, decode};

// =============================================================================
// Style
// =============================================================================

/// Visual configuration of an odometer display.
#[derive(Clone, Copy, Debug)]
pub struct OdometerStyle {
    /// Mono font used for digit strips and text runs.
    pub font: &'static MonoFont<'static>,
    pub text_color: Rgb565,
    pub background: Rgb565,
    /// Horizontal gap between adjacent nodes, in pixels.
    pub spacing: f32,
    pub alignment: HorizontalAlign,
    /// Duration of the animated roll between values.
    pub animation_duration: Duration,
}

impl Default for OdometerStyle {
    fn default() -> Self {
        Self {
            font: &PROFONT_24_POINT,
            text_color: WHITE,
            background: BLACK,
            spacing: 0.0,
            alignment: HorizontalAlign::Center,
            animation_duration: DEFAULT_ANIMATION_DURATION,
        }
    }
}

// =============================================================================
// Widget
// =============================================================================

/// A rolling odometer-style value display.
pub struct OdometerDisplay {
    pub(crate) bounds: Rectangle,
    pub(crate) style: OdometerStyle,
    /// Committed value; flips to the new target before the roll starts.
    value: String<VALUE_CAP>,
    pub(crate) pool: CellPool,
    /// Live nodes in display order (reverse decode order, rightmost first),
    /// followed by leftover digit cells still scrolling off.
    pub(crate) order: Vec<NodeRef, MAX_NODES>,
    /// Canonical single-digit cell size; zero until measurable.
    pub(crate) single_digit: SizeF,
    /// Horizontal shift of the content row (alignment), animated.
    pub(crate) content_x: Animated<f32>,
    /// Vertical centering of the content row, unanimated.
    pub(crate) content_y: f32,
    phase: Phase,
    fade: FadeIn,
    /// Opacity sampled on the last tick, applied at draw time.
    pub(crate) fade_alpha: f32,
}

impl OdometerDisplay {
    /// Create a widget showing `"0"` with zero bounds.
    ///
    /// Call [`set_bounds`](Self::set_bounds) (or [`size_to_fit`](Self::size_to_fit))
    /// before drawing.
    pub fn new(style: OdometerStyle) -> Self {
        let mut widget = Self {
            bounds: Rectangle::new(Point::zero(), Size::zero()),
            style,
            value: String::new(),
            pool: CellPool::new(),
            order: Vec::new(),
            single_digit: measure::single_digit_size(style.font),
            content_x: Animated::new(0.0),
            content_y: 0.0,
            phase: Phase::Idle,
            fade: FadeIn::default(),
            fade_alpha: 1.0,
        };
        widget.set_value("0", false);
        widget
    }

    // -------------------------------------------------------------------------
    // Public Surface
    // -------------------------------------------------------------------------

    /// The committed value. During a transition this is already the target,
    /// even while the roll is still visually in flight.
    pub fn current_value(&self) -> &str {
        &self.value
    }

    /// True while a transition is scheduled or rolling. Hosts should keep
    /// ticking and redrawing while this holds.
    pub fn is_animating(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Update the displayed value.
    pub fn set_value(&mut self, value: &str, animated: bool) {
        self.set_value_at(value, animated, Instant::now());
    }

    /// Update the displayed value with an explicit clock, for deterministic
    /// hosts and tests.
    pub fn set_value_at(&mut self, value: &str, animated: bool, now: Instant) {
        let decoded = decode(value);
        self.pool.ensure(decoded.digit_count, decoded.text_count);
        self.pool.reassign(&decoded.segments);
        self.rebuild_order(&decoded);

        if animated {
            // Departure pass: the old value's geometry, applied instantly,
            // gives the roll a correct frame to start from. New cells are
            // positioned but scrolled off-surface (invisible).
            let old_digits = digit_run(&self.value);
            let old_node_count = decode(&self.value).segments.len();
            self.layout_pass(old_node_count, false);
            self.scroll_pass(&old_digits, false);

            self.commit(value);
            self.phase = Phase::Scheduled;
        } else {
            self.commit(value);
            self.layout_pass(decoded.segments.len(), false);
            let digits = digit_run(&self.value);
            self.scroll_pass(&digits, false);
            self.pool
                .recycle_excess(decoded.digit_count, decoded.text_count);
            self.rebuild_order(&decoded);
            self.fade.trigger(now);
            self.fade_alpha = 0.0;
            self.phase = Phase::Idle;
        }
    }

    /// Advance animations by one frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advance animations with an explicit clock.
    pub fn tick_at(&mut self, now: Instant) {
        self.fade_alpha = self.fade.sample(now);

        match self.phase {
            Phase::Idle => {}
            Phase::Scheduled => {
                // The departure frame has been observable for one tick;
                // start the roll toward the committed value.
                let decoded = decode(&self.value);
                self.layout_pass(decoded.segments.len(), true);
                let digits = digit_run(&self.value);
                self.scroll_pass(&digits, true);
                self.phase = Phase::Rolling { started: now };
            }
            Phase::Rolling { started } => {
                let p = progress(
                    now.saturating_duration_since(started),
                    self.style.animation_duration,
                );
                self.step_all(ease_in_out(p));
                if p >= 1.0 {
                    self.settle();
                }
            }
        }
    }

    /// Minimum size needed to display the current value without clipping,
    /// clamped to the offered maximum. All-zero before measurement.
    pub fn size_that_fits(&self, max: Size) -> Size {
        if self.single_digit.is_degenerate() {
            return Size::zero();
        }
        let mut wanted = 0.0f32;
        for node in &self.order {
            wanted += self.node_size(*node).w;
        }
        if !self.order.is_empty() {
            wanted += self.style.spacing * (self.order.len() - 1) as f32;
        }
        let wanted = wanted.max(0.0).ceil() as u32;
        let height = self.single_digit.h.ceil() as u32;
        Size::new(wanted.min(max.width), height.min(max.height))
    }

    /// Shrink the widget bounds to exactly fit the current value.
    pub fn size_to_fit(&mut self) {
        let size = self.size_that_fits(Size::new(u32::MAX, u32::MAX));
        self.bounds.size = size;
        self.refresh();
    }

    /// Widget rectangle on the target canvas.
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rectangle) {
        self.bounds = bounds;
        self.refresh();
    }

    // -------------------------------------------------------------------------
    // Style Setters (each applies with an immediate unanimated re-layout)
    // -------------------------------------------------------------------------

    pub fn style(&self) -> &OdometerStyle {
        &self.style
    }

    pub fn set_font(&mut self, font: &'static MonoFont<'static>) {
        self.style.font = font;
        self.single_digit = measure::single_digit_size(font);
        self.refresh();
    }

    pub fn set_text_color(&mut self, color: Rgb565) {
        self.style.text_color = color;
        self.refresh();
    }

    pub fn set_background(&mut self, color: Rgb565) {
        self.style.background = color;
        self.refresh();
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.style.spacing = spacing;
        self.refresh();
    }

    pub fn set_alignment(&mut self, alignment: HorizontalAlign) {
        self.style.alignment = alignment;
        self.refresh();
    }

    /// Store a new roll duration. Takes effect from the next update; does
    /// not retime a roll already in flight.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.style.animation_duration = duration;
    }

    /// Active digit cells (pooled, possibly more than the value needs
    /// mid-transition).
    pub fn digit_cell_count(&self) -> usize {
        self.pool.digit_count()
    }

    /// Active text runs.
    pub fn text_run_count(&self) -> usize {
        self.pool.text_count()
    }

    // -------------------------------------------------------------------------
    // Internal Passes
    // -------------------------------------------------------------------------

    fn commit(&mut self, value: &str) {
        self.value.clear();
        for c in value.chars() {
            if self.value.push(c).is_err() {
                break;
            }
        }
    }

    /// Re-apply the current value unanimated (style/bounds changed).
    fn refresh(&mut self) {
        let value = self.value.clone();
        self.set_value_at(&value, false, Instant::now());
    }

    /// Rebuild the live-node order from decoded segments, reversed, with
    /// leftover digit cells appended so they can scroll off visibly.
    fn rebuild_order(&mut self, decoded: &DecodedValue) {
        self.order.clear();
        let mut digit_i = 0;
        let mut text_i = 0;
        for segment in decoded.segments.iter().rev() {
            let node = if segment.is_digit_cell {
                if digit_i >= self.pool.digit_count() {
                    continue;
                }
                digit_i += 1;
                NodeRef::Digit(digit_i - 1)
            } else {
                if text_i >= self.pool.text_count() {
                    continue;
                }
                text_i += 1;
                NodeRef::Text(text_i - 1)
            };
            if self.order.push(node).is_err() {
                break;
            }
        }
        while digit_i < self.pool.digit_count() {
            if self.order.push(NodeRef::Digit(digit_i)).is_err() {
                break;
            }
            digit_i += 1;
        }
    }

    fn node_size(&self, node: NodeRef) -> SizeF {
        match node {
            NodeRef::Digit(_) => self.single_digit,
            NodeRef::Text(i) => SizeF::new(
                measure::text_run_width(self.style.font, &self.pool.texts[i].content),
                self.single_digit.h,
            ),
        }
    }

    /// Place every live node along the content row.
    ///
    /// `measure_limit` caps how many nodes define the content width (the
    /// old value's node count during a departure pass). `animated` selects
    /// between retargeting and instant application.
    fn layout_pass(&mut self, measure_limit: usize, animated: bool) {
        let mut sizes: Vec<SizeF, MAX_NODES> = Vec::new();
        for node in &self.order {
            let _ = sizes.push(self.node_size(*node));
        }

        let anchor_width = self.bounds.size.width as f32;
        let row = layout_row(
            &sizes,
            anchor_width,
            self.single_digit.h,
            self.style.spacing,
            measure_limit,
        );
        let offset = content_offset(self.style.alignment, row.x_min);
        self.content_y = (self.bounds.size.height as f32 - self.single_digit.h) / 2.0;

        for (index, node) in self.order.iter().enumerate() {
            let Some(frame) = row.frames.get(index).copied() else {
                break;
            };
            match *node {
                NodeRef::Digit(i) => {
                    let anim = &mut self.pool.digits[i].frame;
                    if animated {
                        anim.retarget(frame);
                    } else {
                        anim.set(frame);
                    }
                }
                NodeRef::Text(i) => {
                    let anim = &mut self.pool.texts[i].frame;
                    if animated {
                        anim.retarget(frame);
                    } else {
                        anim.set(frame);
                    }
                }
            }
        }

        if animated {
            self.content_x.retarget(offset);
        } else {
            self.content_x.set(offset);
        }
    }

    /// Aim every digit cell's scroll offset.
    ///
    /// `digits` lists the value's digit values in decode order; cell 0 is
    /// the rightmost digit. Cells beyond the digit count scroll fully
    /// off-surface, vanishing without leaving the pool.
    fn scroll_pass(&mut self, digits: &[u8], animated: bool) {
        let h = self.single_digit.h;
        for (cell_index, cell) in self.pool.digits.iter_mut().enumerate() {
            let target = if cell_index < digits.len() {
                let digit = digits[digits.len() - 1 - cell_index];
                scroll::target_offset(h, digit, cell.offset.current(), animated)
            } else {
                scroll::off_surface_offset(h)
            };
            if animated {
                cell.offset.retarget(target);
            } else {
                cell.offset.set(target);
            }
        }
    }

    fn step_all(&mut self, t: f32) {
        for cell in self.pool.digits.iter_mut() {
            cell.frame.step(t);
            cell.offset.step(t);
        }
        for run in self.pool.texts.iter_mut() {
            run.frame.step(t);
        }
        self.content_x.step(t);
    }

    /// Animation completed: land on targets, recycle excess nodes and snap
    /// surviving cells back to their middle-copy rest offsets.
    fn settle(&mut self) {
        for cell in self.pool.digits.iter_mut() {
            cell.frame.finish();
            cell.offset.finish();
        }
        for run in self.pool.texts.iter_mut() {
            run.frame.finish();
        }
        self.content_x.finish();

        let decoded = decode(&self.value);
        self.pool
            .recycle_excess(decoded.digit_count, decoded.text_count);
        self.rebuild_order(&decoded);
        let digits = digit_run(&self.value);
        self.scroll_pass(&digits, false);
        self.phase = Phase::Idle;
    }
}

impl Default for OdometerDisplay {
    fn default() -> Self {
        Self::new(OdometerStyle::default())
    }
}

/// Digit values of a string in decode (left-to-right) order.
fn digit_run(value: &str) -> Vec<u8, MAX_SEGMENTS> {
    let mut digits = Vec::new();
    for d in value.chars().filter_map(decimal_digit_value) {
        if digits.push(d).is_err() {
            break;
        }
    }
    digits
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::STRIP_GLYPH_COUNT;
    use embedded_graphics::mono_font::ascii::FONT_10X20;

    const H: f32 = 20.0; // FONT_10X20 glyph height
    const W: f32 = 10.0;

    fn test_widget(alignment: HorizontalAlign) -> OdometerDisplay {
        let style = OdometerStyle {
            font: &FONT_10X20,
            spacing: 0.0,
            alignment,
            animation_duration: Duration::from_millis(500),
            ..OdometerStyle::default()
        };
        let mut widget = OdometerDisplay::new(style);
        widget.set_bounds(Rectangle::new(Point::zero(), Size::new(200, 40)));
        widget
    }

    fn rest(digit: u8) -> f32 {
        (f32::from(digit) + 10.0) * H
    }

    fn settle_through(widget: &mut OdometerDisplay, t0: Instant) {
        widget.tick_at(t0); // Scheduled -> Rolling
        widget.tick_at(t0 + widget.style.animation_duration);
        assert!(!widget.is_animating());
    }

    // -------------------------------------------------------------------------
    // Unanimated Updates
    // -------------------------------------------------------------------------

    #[test]
    fn unanimated_update_is_idempotent() {
        let t0 = Instant::now();
        let mut widget = test_widget(HorizontalAlign::Trailing);

        widget.set_value_at("1,234", false, t0);
        let frames_once: std::vec::Vec<_> = widget
            .pool
            .digits
            .iter()
            .map(|c| c.frame.current())
            .collect();
        let (d1, t1) = (widget.digit_cell_count(), widget.text_run_count());

        widget.set_value_at("1,234", false, t0);
        let frames_twice: std::vec::Vec<_> = widget
            .pool
            .digits
            .iter()
            .map(|c| c.frame.current())
            .collect();

        assert_eq!((d1, t1), (widget.digit_cell_count(), widget.text_run_count()));
        assert_eq!(frames_once, frames_twice);
        assert!(!widget.is_animating());
    }

    #[test]
    fn unanimated_update_rests_on_middle_copy() {
        let t0 = Instant::now();
        let mut widget = test_widget(HorizontalAlign::Trailing);
        widget.set_value_at("905", false, t0);

        // Cell 0 is the rightmost digit
        assert_eq!(widget.pool.digits[0].offset.current(), rest(5));
        assert_eq!(widget.pool.digits[1].offset.current(), rest(0));
        assert_eq!(widget.pool.digits[2].offset.current(), rest(9));
    }

    #[test]
    fn unanimated_update_triggers_fade() {
        let t0 = Instant::now();
        let mut widget = test_widget(HorizontalAlign::Trailing);
        widget.set_value_at("7", false, t0);
        assert_eq!(widget.fade_alpha, 0.0);

        widget.tick_at(t0 + crate::config::FADE_DURATION);
        assert_eq!(widget.fade_alpha, 1.0);
    }

    // -------------------------------------------------------------------------
    // Animated Updates
    // -------------------------------------------------------------------------

    #[test]
    fn grow_scenario_five_to_grouped_thousands() {
        let t0 = Instant::now();
        let mut widget = test_widget(HorizontalAlign::Trailing);
        widget.set_value_at("5", false, t0);
        assert_eq!(widget.digit_cell_count(), 1);
        assert_eq!(widget.text_run_count(), 0);

        widget.set_value_at("1,234", true, t0);

        // Pool grown for the new value, committed value already flipped
        assert_eq!(widget.digit_cell_count(), 4);
        assert_eq!(widget.text_run_count(), 1);
        assert_eq!(widget.current_value(), "1,234");
        assert!(widget.is_animating());

        // Departure frame: old digit at rest on '5', new cells off-surface
        assert_eq!(widget.pool.digits[0].offset.current(), rest(5));
        let off = -(STRIP_GLYPH_COUNT as f32) * H;
        assert_eq!(widget.pool.digits[1].offset.current(), off);
        assert_eq!(widget.pool.digits[3].offset.current(), off);

        settle_through(&mut widget, t0 + Duration::from_millis(20));

        // No extra nodes beyond 4 digit cells + 1 text run, all at rest
        assert_eq!(widget.digit_cell_count(), 4);
        assert_eq!(widget.text_run_count(), 1);
        assert_eq!(widget.pool.digits[0].offset.current(), rest(4));
        assert_eq!(widget.pool.digits[1].offset.current(), rest(3));
        assert_eq!(widget.pool.digits[2].offset.current(), rest(2));
        assert_eq!(widget.pool.digits[3].offset.current(), rest(1));
    }

    #[test]
    fn nine_to_zero_rolls_one_step_forward() {
        let t0 = Instant::now();
        let mut widget = test_widget(HorizontalAlign::Trailing);
        widget.set_value_at("9", false, t0);
        assert_eq!(widget.pool.digits[0].offset.current(), rest(9));

        widget.set_value_at("0", true, t0);
        widget.tick_at(t0 + Duration::from_millis(20)); // roll targets applied

        // One strip-copy forward (20h), not nine positions backward (10h)
        assert_eq!(widget.pool.digits[0].offset.target(), 20.0 * H);
    }

    #[test]
    fn empty_value_scrolls_cells_off_surface() {
        let t0 = Instant::now();
        let mut widget = test_widget(HorizontalAlign::Trailing);
        widget.set_value_at("42", false, t0);
        assert_eq!(widget.digit_cell_count(), 2);

        widget.set_value_at("", true, t0);
        widget.tick_at(t0 + Duration::from_millis(20));

        let off = -(STRIP_GLYPH_COUNT as f32) * H;
        assert_eq!(widget.pool.digits[0].offset.target(), off);
        assert_eq!(widget.pool.digits[1].offset.target(), off);
        assert_eq!(widget.text_run_count(), 0);

        widget.tick_at(t0 + Duration::from_millis(20) + widget.style.animation_duration);
        assert!(!widget.is_animating());
        assert_eq!(widget.digit_cell_count(), 0);
        assert_eq!(widget.current_value(), "");
    }

    #[test]
    fn midroll_offsets_interpolate() {
        let t0 = Instant::now();
        let mut widget = test_widget(HorizontalAlign::Trailing);
        widget.set_value_at("0", false, t0);

        widget.set_value_at("1", true, t0);
        widget.tick_at(t0);
        let halfway = t0 + widget.style.animation_duration / 2;
        widget.tick_at(halfway);

        let current = widget.pool.digits[0].offset.current();
        assert!(current > rest(0) && current < rest(1));
        assert!(widget.is_animating());
    }

    #[test]
    fn override_mid_roll_retargets() {
        let t0 = Instant::now();
        let mut widget = test_widget(HorizontalAlign::Trailing);
        widget.set_value_at("1", false, t0);
        widget.set_value_at("2", true, t0);
        widget.tick_at(t0);

        // Second update lands before the first settles: overwrite in place
        widget.set_value_at("3", true, t0 + Duration::from_millis(100));
        assert_eq!(widget.current_value(), "3");

        settle_through(&mut widget, t0 + Duration::from_millis(120));
        assert_eq!(widget.pool.digits[0].offset.current(), rest(3));
    }

    // -------------------------------------------------------------------------
    // Pool Invariants
    // -------------------------------------------------------------------------

    #[test]
    fn pool_is_monotone_until_settle() {
        let t0 = Instant::now();
        let mut widget = test_widget(HorizontalAlign::Trailing);
        widget.set_value_at("12345", false, t0);
        assert_eq!(widget.digit_cell_count(), 5);

        // Shrinking animated: pool keeps its size until the settle pass
        widget.set_value_at("7", true, t0);
        assert_eq!(widget.digit_cell_count(), 5);

        settle_through(&mut widget, t0 + Duration::from_millis(20));
        assert_eq!(widget.digit_cell_count(), 1);
    }

    // -------------------------------------------------------------------------
    // Layout & Sizing
    // -------------------------------------------------------------------------

    #[test]
    fn alignment_places_content_in_wide_widget() {
        let t0 = Instant::now();
        for (alignment, expected_left) in [
            (HorizontalAlign::Trailing, 200.0 - 2.0 * W),
            (HorizontalAlign::Leading, 0.0),
            (HorizontalAlign::Center, (200.0 - 2.0 * W) / 2.0),
        ] {
            let mut widget = test_widget(alignment);
            widget.set_value_at("99", false, t0);

            let leftmost = widget
                .pool
                .digits
                .iter()
                .map(|c| c.frame.current().x)
                .fold(f32::INFINITY, f32::min);
            assert_eq!(
                leftmost + widget.content_x.current(),
                expected_left,
                "{alignment:?}"
            );
        }
    }

    #[test]
    fn size_that_fits_counts_nodes_and_spacing() {
        let t0 = Instant::now();
        let mut widget = test_widget(HorizontalAlign::Trailing);
        widget.set_value_at("1,234", false, t0);

        // 5 nodes x 10px, no spacing
        assert_eq!(
            widget.size_that_fits(Size::new(500, 500)),
            Size::new(50, 20)
        );

        widget.set_spacing(2.0);
        assert_eq!(
            widget.size_that_fits(Size::new(500, 500)),
            Size::new(58, 20)
        );

        // Clamped to the offered maximum
        assert_eq!(widget.size_that_fits(Size::new(30, 10)), Size::new(30, 10));
    }

    #[test]
    fn degenerate_measurement_yields_zero_size() {
        let style = OdometerStyle {
            font: &FONT_10X20,
            ..OdometerStyle::default()
        };
        let mut widget = OdometerDisplay::new(style);
        widget.single_digit = SizeF::default();
        assert_eq!(
            widget.size_that_fits(Size::new(100, 100)),
            Size::zero()
        );
    }
}
