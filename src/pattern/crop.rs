//! Pattern drawn on a sub-range of the strip

use embassy_time::Instant;
use serde::Serialize;

use super::{Child, Pattern, render_child};
use crate::{
    bounds::{RenderingBounds, bounded},
    color::Rgb,
};

/// Renders `child` into `leds[start..length]`, leaving the rest alone
///
/// `length` is the end index of the range. A range that is inverted or does
/// not fit the strip renders nothing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Crop {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child: Child,
    #[serde(flatten)]
    pub bounds: RenderingBounds,
}

impl Crop {
    pub fn new(child: Child, start: usize, end: usize) -> Self {
        Self {
            child,
            bounds: RenderingBounds::new(start, end),
        }
    }
}

impl Pattern for Crop {
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        let len = leds.len();
        let Some(leds) = bounded(leds, self.bounds) else {
            tracing::trace!(
                start = self.bounds.start,
                end = self.bounds.end,
                len,
                "Crop range does not fit the strip"
            );
            return;
        };
        render_child(&mut self.child, now, leds);
    }
}
