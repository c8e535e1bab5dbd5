//! Value decoding: splitting a string into digit cells and text runs.
//!
//! Every decimal digit becomes its own one-character digit-cell segment;
//! maximal runs of non-digit characters become literal text-run segments.
//! Scanning walks Unicode scalars (`str::chars`), never raw bytes, so
//! multi-byte literals like currency signs are never split mid-character.
//!
//! Digit classification covers the common Unicode decimal-digit (Nd) blocks
//! rather than only ASCII; each block is a contiguous 0-9 run, so the digit
//! value is the scalar's distance from the block start.

use heapless::{String, Vec};

use crate::config::{MAX_SEGMENTS, TEXT_RUN_CAP};

// =============================================================================
// Digit Classification
// =============================================================================

/// First scalar of each supported Unicode decimal-digit block.
///
/// Unicode guarantees Nd blocks are contiguous runs of the digits 0-9.
const ND_BLOCK_STARTS: &[u32] = &[
    0x0030, // ASCII
    0x0660, // Arabic-Indic
    0x06F0, // Extended Arabic-Indic
    0x0966, // Devanagari
    0x09E6, // Bengali
    0x0A66, // Gurmukhi
    0x0AE6, // Gujarati
    0x0B66, // Oriya
    0x0BE6, // Tamil
    0x0C66, // Telugu
    0x0CE6, // Kannada
    0x0D66, // Malayalam
    0x0E50, // Thai
    0x0ED0, // Lao
    0x0F20, // Tibetan
    0x1040, // Myanmar
    0x17E0, // Khmer
    0xFF10, // Fullwidth
];

/// Numeric value of a decimal-digit scalar, or `None` for non-digits.
pub fn decimal_digit_value(c: char) -> Option<u8> {
    let code = c as u32;
    ND_BLOCK_STARTS
        .iter()
        .find_map(|&start| match code.wrapping_sub(start) {
            v @ 0..=9 => Some(v as u8),
            _ => None,
        })
}

// =============================================================================
// Segments
// =============================================================================

/// One decoded piece of a value: a single digit or a literal run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Exactly one decimal character for digit cells, any literal
    /// substring for text runs.
    pub content: String<TEXT_RUN_CAP>,
    pub is_digit_cell: bool,
}

impl Segment {
    /// Digit value of a digit-cell segment, `None` for text runs.
    pub fn digit_value(&self) -> Option<u8> {
        if self.is_digit_cell {
            self.content.chars().next().and_then(decimal_digit_value)
        } else {
            None
        }
    }
}

/// Decode result: ordered segments plus per-kind counts.
#[derive(Debug, Default)]
pub struct DecodedValue {
    pub segments: Vec<Segment, MAX_SEGMENTS>,
    pub digit_count: usize,
    pub text_count: usize,
}

/// Split `input` into digit-cell and text-run segments.
///
/// Pure and deterministic. `digit_count + text_count == segments.len()`,
/// and concatenating segment contents in order reproduces the input (up to
/// the compile-time segment/run capacities, beyond which the tail is
/// dropped rather than panicking).
pub fn decode(input: &str) -> DecodedValue {
    let mut out = DecodedValue::default();
    let mut pending: String<TEXT_RUN_CAP> = String::new();

    for c in input.chars() {
        if decimal_digit_value(c).is_some() {
            flush_text(&mut out, &mut pending);
            let mut content: String<TEXT_RUN_CAP> = String::new();
            let _ = content.push(c);
            if out
                .segments
                .push(Segment {
                    content,
                    is_digit_cell: true,
                })
                .is_err()
            {
                return out;
            }
            out.digit_count += 1;
        } else if pending.push(c).is_err() {
            // Run capacity reached: emit what we have and start a new run.
            flush_text(&mut out, &mut pending);
            let _ = pending.push(c);
        }
    }
    flush_text(&mut out, &mut pending);
    out
}

fn flush_text(out: &mut DecodedValue, pending: &mut String<TEXT_RUN_CAP>) {
    if pending.is_empty() {
        return;
    }
    if out
        .segments
        .push(Segment {
            content: pending.clone(),
            is_digit_cell: false,
        })
        .is_ok()
    {
        out.text_count += 1;
    }
    pending.clear();
}

// =============================================================================
// Unit Tests
// =============================================================================
