//! Odometer widget demo for desktop.
//!
//! Runs the rolling-digit display in a simulator window with an
//! auto-incrementing counter and keyboard controls:
//!
//! - `Space` pause/resume the counter
//! - `A` cycle horizontal alignment
//! - `S` cycle digit spacing
//! - `D` jump by a random-ish large delta
//! - `R` reset to zero
//! - `U` toggle a unit suffix on the value

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use heapless::String;

use odometer_display::colors::{AMBER, BLACK, GRAY};
use odometer_display::config::{FRAME_TIME, VALUE_CAP};
use odometer_display::styles::{STATUS_FONT, TOP_CENTER};
use odometer_display::{HorizontalAlign, OdometerDisplay, OdometerStyle};

const SCREEN_WIDTH: u32 = 320;
const SCREEN_HEIGHT: u32 = 120;

/// How often the demo counter increments.
const COUNT_INTERVAL: Duration = Duration::from_millis(900);

const SPACING_STEPS: [f32; 4] = [0.0, 2.0, 4.0, 8.0];

fn main() {
    let mut display: SimulatorDisplay<Rgb565> =
        SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Odometer Demo", &output_settings);

    let style = OdometerStyle {
        text_color: AMBER,
        background: BLACK,
        alignment: HorizontalAlign::Trailing,
        ..OdometerStyle::default()
    };
    let mut odometer = OdometerDisplay::new(style);
    odometer.set_bounds(Rectangle::new(
        Point::new(10, 30),
        Size::new(SCREEN_WIDTH - 20, 48),
    ));

    // Demo state
    let mut counter: u64 = 0;
    let mut paused = false;
    let mut show_unit = false;
    let mut spacing_step = 0usize;
    let mut last_increment = Instant::now();

    odometer.set_value(&format_value(counter, show_unit), false);

    loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::Space => paused = !paused,
                        Keycode::A => {
                            let next = match odometer.style().alignment {
                                HorizontalAlign::Leading => HorizontalAlign::Center,
                                HorizontalAlign::Center => HorizontalAlign::Trailing,
                                HorizontalAlign::Trailing => HorizontalAlign::Leading,
                            };
                            odometer.set_alignment(next);
                        }
                        Keycode::S => {
                            spacing_step = (spacing_step + 1) % SPACING_STEPS.len();
                            odometer.set_spacing(SPACING_STEPS[spacing_step]);
                        }
                        Keycode::D => {
                            counter += 1111;
                            odometer.set_value(&format_value(counter, show_unit), true);
                        }
                        Keycode::R => {
                            counter = 0;
                            odometer.set_value(&format_value(counter, show_unit), true);
                        }
                        Keycode::U => {
                            show_unit = !show_unit;
                            odometer.set_value(&format_value(counter, show_unit), true);
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if !paused && last_increment.elapsed() >= COUNT_INTERVAL {
            counter += 1;
            odometer.set_value(&format_value(counter, show_unit), true);
            last_increment = Instant::now();
        }

        odometer.tick();

        display.clear(BLACK).ok();
        odometer.draw(&mut display).ok();
        draw_status(&mut display, paused, &odometer);
        window.update(&display);

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}

fn draw_status(display: &mut SimulatorDisplay<Rgb565>, paused: bool, odometer: &OdometerDisplay) {
    let status = if paused {
        "PAUSED  [Space] run  [A]lign  [S]pacing  [D]elta  [R]eset  [U]nit"
    } else if odometer.is_animating() {
        "ROLLING [Space] pause [A]lign  [S]pacing  [D]elta  [R]eset  [U]nit"
    } else {
        "IDLE    [Space] pause [A]lign  [S]pacing  [D]elta  [R]eset  [U]nit"
    };
    let style = MonoTextStyle::new(STATUS_FONT, GRAY);
    Text::with_text_style(
        status,
        Point::new(SCREEN_WIDTH as i32 / 2, SCREEN_HEIGHT as i32 - 16),
        style,
        TOP_CENTER,
    )
    .draw(display)
    .ok();
}

/// Format the counter with thousands separators, optionally suffixed.
fn format_value(counter: u64, show_unit: bool) -> String<VALUE_CAP> {
    let mut out: String<VALUE_CAP> = String::new();
    let digits = counter.to_string();
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i).is_multiple_of(3) {
            let _ = out.push(',');
        }
        let _ = out.push(c);
    }
    if show_unit {
        let _ = out.push_str(" km");
    }
    out
}
