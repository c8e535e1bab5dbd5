//! Animation state for the odometer's two-phase update.
//!
//! An animated value change runs as a two-phase commit:
//!
//! 1. **Departure** (synchronous, inside `set_value`): the *old* value's
//!    geometry and rest offsets are applied instantly, so the animation has
//!    a correct frame to roll from. The committed value flips to the new
//!    string at this point - a `current_value` query mid-transition already
//!    reports the target.
//! 2. **Roll** (starts on the next `tick`): node frames, scroll offsets and
//!    the content offset retarget to the new value's geometry and
//!    interpolate over the animation duration. The one-tick gap guarantees
//!    the departure frame is observable before the roll begins.
//!
//! On completion the widget recycles excess pool nodes and snaps every
//! surviving digit cell back to its middle-copy rest offset, restoring
//! shortest-path headroom for the next transition.
//!
//! Unanimated updates skip the phases entirely; a short opacity fade masks
//! the geometry reflow. Opacity is realized as a fixed-point color
//! interpolation from the background toward the text color.

use std::time::{Duration, Instant};

use embedded_graphics::{pixelcolor::Rgb565, prelude::IntoStorage};

use crate::config::FADE_DURATION;
use crate::layout::NodeFrame;

// =============================================================================
// Phase Machine
// =============================================================================

/// Update phase of the widget.
///
/// The departure layout and the settle pass run synchronously inside
/// `set_value` and the completing `tick` respectively, so only the states
/// that persist across ticks are represented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No transition in flight.
    Idle,
    /// Departure frame applied; the roll starts on the next tick.
    Scheduled,
    /// Interpolating toward the new value since `started`.
    Rolling { started: Instant },
}

// =============================================================================
// Interpolated Values
// =============================================================================

/// Linear interpolation between two values of the same type.
pub trait Lerp: Copy {
    fn lerp(from: Self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Lerp for NodeFrame {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        Self {
            x: f32::lerp(from.x, to.x, t),
            y: f32::lerp(from.y, to.y, t),
            w: f32::lerp(from.w, to.w, t),
            h: f32::lerp(from.h, to.h, t),
        }
    }
}

/// A value with an animation baseline and target.
///
/// `set` applies instantly (baseline, target and current collapse to one
/// value, killing any in-flight motion - the override policy for updates
/// arriving mid-roll). `retarget` starts a new motion from the current
/// interpolated value. `step` moves `current` along the eased progress.
#[derive(Clone, Copy, Debug)]
pub struct Animated<T: Lerp> {
    current: T,
    from: T,
    to: T,
}

impl<T: Lerp> Animated<T> {
    pub const fn new(value: T) -> Self {
        Self {
            current: value,
            from: value,
            to: value,
        }
    }

    /// Apply a value instantly, cancelling any in-flight motion.
    pub fn set(&mut self, value: T) {
        self.current = value;
        self.from = value;
        self.to = value;
    }

    /// Begin a motion from the current value toward `value`.
    pub fn retarget(&mut self, value: T) {
        self.from = self.current;
        self.to = value;
    }

    /// Advance to eased progress `t` in `[0, 1]`.
    pub fn step(&mut self, t: f32) {
        self.current = T::lerp(self.from, self.to, t);
    }

    /// Jump to the target and collapse the baseline.
    pub fn finish(&mut self) {
        self.current = self.to;
        self.from = self.to;
    }

    #[inline]
    pub const fn current(&self) -> T {
        self.current
    }

    #[inline]
    pub const fn target(&self) -> T {
        self.to
    }
}

/// Smooth ease-in-out curve over linear progress.
#[inline]
pub fn ease_in_out(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    p * p * (3.0 - 2.0 * p)
}

// =============================================================================
// Opacity Fade
// =============================================================================

/// Wall-clock fade-in that masks the reflow of an unanimated update.
#[derive(Clone, Copy, Debug, Default)]
pub struct FadeIn {
    started: Option<Instant>,
}

impl FadeIn {
    /// Restart the fade from fully transparent.
    pub fn trigger(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Current opacity in `[0, 1]`; clears itself once fully opaque.
    pub fn sample(&mut self, now: Instant) -> f32 {
        let Some(started) = self.started else {
            return 1.0;
        };
        let elapsed = now.saturating_duration_since(started);
        if elapsed >= FADE_DURATION {
            self.started = None;
            return 1.0;
        }
        elapsed.as_secs_f32() / FADE_DURATION.as_secs_f32()
    }
}

/// Linear progress of `elapsed` through `duration`, clamped to `[0, 1]`.
///
/// A zero duration completes immediately (negative durations cannot be
/// expressed, `Duration` is unsigned by construction).
pub fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

// =============================================================================
// Color Interpolation
// =============================================================================

/// Linear interpolation between two Rgb565 colors.
///
/// Operates on the raw 5-6-5 components with 8-bit fixed-point math.
/// Used to fade text toward the background color (opacity emulation on
/// displays without an alpha channel).
pub fn lerp_rgb565(from: Rgb565, to: Rgb565, t: f32) -> Rgb565 {
    let t_fixed = (t.clamp(0.0, 1.0) * 256.0) as i32;

    let from_raw = from.into_storage();
    let to_raw = to.into_storage();

    let from_r = i32::from((from_raw >> 11) & 0x1F);
    let from_g = i32::from((from_raw >> 5) & 0x3F);
    let from_b = i32::from(from_raw & 0x1F);

    let to_r = i32::from((to_raw >> 11) & 0x1F);
    let to_g = i32::from((to_raw >> 5) & 0x3F);
    let to_b = i32::from(to_raw & 0x1F);

    let r = (from_r + (((to_r - from_r) * t_fixed) >> 8)).clamp(0, 31);
    let g = (from_g + (((to_g - from_g) * t_fixed) >> 8)).clamp(0, 63);
    let b = (from_b + (((to_b - from_b) * t_fixed) >> 8)).clamp(0, 31);

    Rgb565::new(r as u8, g as u8, b as u8)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, WHITE};

    // -------------------------------------------------------------------------
    // Animated Value Tests
    // -------------------------------------------------------------------------

    #[test]
    fn set_collapses_motion() {
        let mut a = Animated::new(0.0f32);
        a.retarget(10.0);
        a.step(0.5);
        a.set(3.0);
        assert_eq!(a.current(), 3.0);
        assert_eq!(a.target(), 3.0);
        a.step(1.0);
        assert_eq!(a.current(), 3.0);
    }

    #[test]
    fn retarget_starts_from_current() {
        let mut a = Animated::new(0.0f32);
        a.retarget(10.0);
        a.step(0.5);
        assert_eq!(a.current(), 5.0);

        // Override mid-flight: new motion baselines at 5.0
        a.retarget(0.0);
        a.step(0.5);
        assert_eq!(a.current(), 2.5);
    }

    #[test]
    fn finish_lands_on_target() {
        let mut a = Animated::new(NodeFrame::new(0.0, 0.0, 10.0, 10.0));
        a.retarget(NodeFrame::new(20.0, 0.0, 10.0, 10.0));
        a.step(0.25);
        a.finish();
        assert_eq!(a.current(), NodeFrame::new(20.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn easing_is_clamped_and_monotone() {
        assert_eq!(ease_in_out(-1.0), 0.0);
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(2.0), 1.0);
        let mut prev = 0.0;
        for i in 0..=20 {
            let v = ease_in_out(i as f32 / 20.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn progress_handles_zero_duration() {
        assert_eq!(progress(Duration::ZERO, Duration::ZERO), 1.0);
        assert_eq!(
            progress(Duration::from_millis(250), Duration::from_millis(500)),
            0.5
        );
        assert_eq!(
            progress(Duration::from_secs(9), Duration::from_millis(500)),
            1.0
        );
    }

    // -------------------------------------------------------------------------
    // Fade Tests
    // -------------------------------------------------------------------------

    #[test]
    fn fade_goes_transparent_then_opaque() {
        let t0 = Instant::now();
        let mut fade = FadeIn::default();
        assert_eq!(fade.sample(t0), 1.0);

        fade.trigger(t0);
        assert_eq!(fade.sample(t0), 0.0);
        let mid = fade.sample(t0 + FADE_DURATION / 2);
        assert!(mid > 0.0 && mid < 1.0);
        assert_eq!(fade.sample(t0 + FADE_DURATION), 1.0);
        // Cleared: stays opaque afterwards
        assert_eq!(fade.sample(t0), 1.0);
    }

    // -------------------------------------------------------------------------
    // Color Lerp Tests
    // -------------------------------------------------------------------------

    #[test]
    fn color_lerp_endpoints() {
        assert_eq!(lerp_rgb565(BLACK, WHITE, 0.0), BLACK);
        assert_eq!(lerp_rgb565(BLACK, WHITE, 1.0), WHITE);
        assert_eq!(lerp_rgb565(WHITE, WHITE, 0.5), WHITE);
    }

    #[test]
    fn color_lerp_midpoint_is_between() {
        let mid = lerp_rgb565(BLACK, WHITE, 0.5);
        let raw = mid.into_storage();
        let r = (raw >> 11) & 0x1F;
        let g = (raw >> 5) & 0x3F;
        assert!(r > 10 && r < 20);
        assert!(g > 25 && g < 40);
    }
}
