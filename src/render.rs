//! Drawing the odometer onto any `Rgb565` draw target.
//!
//! # Rendering Pipeline
//!
//! ```text
//! fill background -> clip to widget bounds -> per live node:
//!   text run:   one Text draw at its (rounded) frame origin
//!   digit cell: clip to the cell frame, then draw the visible rows of
//!               the 30-glyph strip shifted by the cell's scroll offset
//! ```
//!
//! Geometry is kept in `f32` throughout layout and animation; rounding to
//! device pixels happens only here. Opacity is emulated by interpolating
//! the text color toward the background, which on an opaque `Rgb565`
//! surface is indistinguishable from true alpha.

use embedded_graphics::{
    draw_target::DrawTarget,
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
    text::Text,
};

use crate::animation::lerp_rgb565;
use crate::config::{DIGIT_GLYPHS, STRIP_GLYPH_COUNT};
use crate::pool::NodeRef;
use crate::styles::TOP_LEFT;
use crate::widget::OdometerDisplay;

#[inline]
fn device_point(x: f32, y: f32) -> Point {
    Point::new(x.round() as i32, y.round() as i32)
}

impl OdometerDisplay {
    /// Draw the widget at its bounds. Pure with respect to widget state;
    /// call [`tick`](Self::tick) first to advance animations.
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        target.fill_solid(&self.bounds, self.style.background)?;
        if self.fade_alpha <= 0.0 {
            return Ok(());
        }

        let color = lerp_rgb565(self.style.background, self.style.text_color, self.fade_alpha);
        let char_style = MonoTextStyle::new(self.style.font, color);

        let mut canvas = target.clipped(&self.bounds);
        let origin_x = self.bounds.top_left.x as f32 + self.content_x.current();
        let origin_y = self.bounds.top_left.y as f32 + self.content_y;

        for node in &self.order {
            match *node {
                NodeRef::Text(i) => {
                    let run = &self.pool.texts[i];
                    if run.content.is_empty() {
                        continue;
                    }
                    let frame = run.frame.current();
                    Text::with_text_style(
                        &run.content,
                        device_point(origin_x + frame.x, origin_y + frame.y),
                        char_style,
                        TOP_LEFT,
                    )
                    .draw(&mut canvas)?;
                }
                NodeRef::Digit(i) => {
                    let cell = &self.pool.digits[i];
                    let frame = cell.frame.current();
                    let cell_top_left = device_point(origin_x + frame.x, origin_y + frame.y);
                    let cell_rect = Rectangle::new(
                        cell_top_left,
                        Size::new(
                            frame.w.round().max(0.0) as u32,
                            frame.h.round().max(0.0) as u32,
                        ),
                    );
                    let mut cell_canvas = canvas.clipped(&cell_rect);

                    // The strip is 30 glyph rows; only rows overlapping the
                    // one-glyph viewport are submitted.
                    let offset = cell.offset.current();
                    let cell_y = origin_y + frame.y;
                    for row in 0..STRIP_GLYPH_COUNT {
                        let glyph_y = cell_y + row as f32 * frame.h - offset;
                        if glyph_y + frame.h <= cell_y || glyph_y >= cell_y + frame.h {
                            continue;
                        }
                        let digit = row % 10;
                        Text::with_text_style(
                            &DIGIT_GLYPHS[digit..digit + 1],
                            device_point(origin_x + frame.x, glyph_y),
                            char_style,
                            TOP_LEFT,
                        )
                        .draw(&mut cell_canvas)?;
                    }
                }
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::mono_font::ascii::FONT_6X10;

    use super::*;
    use crate::colors::{BLACK, WHITE};
    use crate::config::FADE_DURATION;
    use crate::layout::HorizontalAlign;
    use crate::widget::{OdometerDisplay, OdometerStyle};

    fn small_widget() -> OdometerDisplay {
        let style = OdometerStyle {
            font: &FONT_6X10,
            alignment: HorizontalAlign::Trailing,
            ..OdometerStyle::default()
        };
        let mut widget = OdometerDisplay::new(style);
        widget.set_bounds(Rectangle::new(Point::zero(), Size::new(40, 16)));
        widget
    }

    fn pixels_of(display: &MockDisplay<Rgb565>, color: Rgb565) -> usize {
        let mut count = 0;
        for y in 0..64 {
            for x in 0..64 {
                if display.get_pixel(Point::new(x, y)) == Some(color) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn draw_fills_background_and_renders_glyphs() {
        let t0 = Instant::now();
        let mut widget = small_widget();
        widget.set_value_at("7", false, t0);
        widget.tick_at(t0 + FADE_DURATION); // fade complete

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        widget.draw(&mut display).unwrap();

        // Background corner, plus some fully opaque glyph coverage
        assert_eq!(display.get_pixel(Point::zero()), Some(BLACK));
        assert!(pixels_of(&display, WHITE) > 0);
    }

    #[test]
    fn fully_transparent_content_draws_background_only() {
        let t0 = Instant::now();
        let mut widget = small_widget();
        // Unanimated update leaves the fade at zero until the next tick
        widget.set_value_at("8", false, t0);

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        widget.draw(&mut display).unwrap();

        assert_eq!(pixels_of(&display, WHITE), 0);
        assert!(pixels_of(&display, BLACK) > 0);
    }

    #[test]
    fn nothing_escapes_the_widget_bounds() {
        let t0 = Instant::now();
        let mut widget = small_widget();
        widget.set_value_at("1,234,567", false, t0); // wider than 40px
        widget.tick_at(t0 + FADE_DURATION);

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        widget.draw(&mut display).unwrap();

        let bounds = widget.bounds();
        for y in 0..64i32 {
            for x in 0..64i32 {
                let p = Point::new(x, y);
                if !bounds.contains(p) {
                    assert_eq!(display.get_pixel(p), None, "painted outside at {p:?}");
                }
            }
        }
    }

    #[test]
    fn empty_value_draws_background_only() {
        let t0 = Instant::now();
        let mut widget = small_widget();
        widget.set_value_at("", false, t0);
        widget.tick_at(t0 + FADE_DURATION);

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        widget.draw(&mut display).unwrap();

        assert_eq!(pixels_of(&display, WHITE), 0);
    }
}
