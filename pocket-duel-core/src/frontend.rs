//! Adapter traits for the device surface: drawing, touch input and timing.

use crate::layout::{Rect, DEBOUNCE_MS};
use anyhow::Result;

/// The device palette. Frontends map these however they can.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Black,
    White,
    Blue,
    Green,
    Red,
    Yellow,
    Brown,
    Gray,
    Magenta,
}

/// Capability set consumed by the engine and the menu loop.
///
/// `wait_for_press` is the single blocking suspension point; it waits
/// unbounded until a touch arrives. The default implementation debounces a
/// full press-and-release cycle on top of `poll_touch`, and adapters that
/// are not sample-driven (a terminal, a test script) override it directly.
pub trait Frontend {
    fn clear_screen(&mut self, color: Color);
    fn draw_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn write_text_at(&mut self, text: &str, x: i32, y: i32);
    fn write_line(&mut self, text: &str);
    fn present_frame(&mut self);

    /// Current touch position, if the screen is being touched right now.
    fn poll_touch(&mut self) -> Option<(i32, i32)>;

    fn sleep_ms(&mut self, ms: u64);

    /// Block until a debounced press lands and report where.
    fn wait_for_press(&mut self) -> Result<(i32, i32)> {
        while self.poll_touch().is_some() {}
        self.sleep_ms(DEBOUNCE_MS);
        let pos = loop {
            if let Some(p) = self.poll_touch() {
                break p;
            }
            self.sleep_ms(5);
        };
        while self.poll_touch().is_some() {}
        self.sleep_ms(DEBOUNCE_MS);
        Ok(pos)
    }
}

/// Frontend that draws nothing and never sleeps. Backs headless
/// CPU-vs-CPU simulation and the test suites.
pub struct NullFrontend;

impl Frontend for NullFrontend {
    fn clear_screen(&mut self, _color: Color) {}
    fn draw_rect(&mut self, _rect: Rect) {}
    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
    fn write_text_at(&mut self, _text: &str, _x: i32, _y: i32) {}
    fn write_line(&mut self, _text: &str) {}
    fn present_frame(&mut self) {}

    fn poll_touch(&mut self) -> Option<(i32, i32)> {
        None
    }

    fn sleep_ms(&mut self, _ms: u64) {}

    fn wait_for_press(&mut self) -> Result<(i32, i32)> {
        Ok((0, 0))
    }
}
