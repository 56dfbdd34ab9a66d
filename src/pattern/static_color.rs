//! Solid color fill

use embassy_time::Instant;

use super::Pattern;
use crate::color::Rgb;

/// Fills every pixel with one color
///
/// Encoded as the `#rrggbb` shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticColor {
    pub color: Rgb,
}

impl StaticColor {
    pub const fn new(color: Rgb) -> Self {
        Self { color }
    }
}

impl Pattern for StaticColor {
    fn render(&mut self, _now: Instant, leds: &mut [Rgb]) {
        leds.fill(self.color);
    }
}
