//! Widget configuration constants.
//!
//! # Optimization: Pre-computed Geometry Constants
//!
//! Glyph strip geometry (`STRIP_GLYPH_COUNT`, `REST_COPY_INDEX`) is fixed by
//! the rolling-digit design and computed at compile time. Pool and string
//! capacities are `const` so all collections are stack-allocated
//! `heapless` types with no heap usage in the widget core.

use std::time::Duration;

// =============================================================================
// Glyph Strip Geometry
// =============================================================================

/// The ten decimal digit glyphs, in strip order.
pub const DIGIT_GLYPHS: &str = "0123456789";

/// How many times the ten digits repeat inside one scroll strip.
///
/// Three copies give every digit a neighbor copy one step above and one step
/// below, so a transition like 9 -> 0 can roll forward into the next copy
/// instead of unwinding through nine positions.
pub const GLYPH_REPEAT: usize = 3;

/// Total glyph rows in one scroll strip (10 digits x 3 copies).
pub const STRIP_GLYPH_COUNT: usize = 10 * GLYPH_REPEAT;

/// Row index where the middle copy of the strip begins.
///
/// At rest every digit cell addresses the middle copy, leaving a full
/// ten-digit range of scroll headroom in both directions.
pub const REST_COPY_INDEX: usize = 10;

// =============================================================================
// Capacities (heapless collections)
// =============================================================================

/// Maximum length of a displayed value string, in bytes.
pub const VALUE_CAP: usize = 64;

/// Maximum byte length of a single literal text run.
pub const TEXT_RUN_CAP: usize = 32;

/// Maximum decoded segments per value.
pub const MAX_SEGMENTS: usize = 64;

/// Maximum pooled digit cells.
pub const MAX_DIGIT_CELLS: usize = 32;

/// Maximum pooled text runs.
pub const MAX_TEXT_RUNS: usize = 32;

/// Maximum live nodes in display order (digit cells + text runs).
pub const MAX_NODES: usize = MAX_DIGIT_CELLS + MAX_TEXT_RUNS;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Default duration of the animated roll between two values.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(500);

/// Duration of the opacity fade that masks an unanimated reflow.
pub const FADE_DURATION: Duration = Duration::from_millis(120);

/// Target frame time for the simulator demo (~50 FPS).
pub const FRAME_TIME: Duration = Duration::from_millis(20);
