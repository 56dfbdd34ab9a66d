//! Literal pixel list

use embassy_time::Instant;

use super::Pattern;
use crate::{
    color::{BLACK, Rgb},
    frame::Frame,
};

/// Draws a fixed list of pixels from the start of the strip
///
/// Pixels beyond the end of the list are black, pixels beyond the end of the
/// strip are dropped. Encoded as the `L` + hex shorthand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FramePattern {
    pub frame: Frame,
}

impl FramePattern {
    pub fn new(frame: impl Into<Frame>) -> Self {
        Self {
            frame: frame.into(),
        }
    }
}

impl Pattern for FramePattern {
    fn render(&mut self, _now: Instant, leds: &mut [Rgb]) {
        let count = leds.len().min(self.frame.len());
        leds[..count].copy_from_slice(&self.frame[..count]);
        leds[count..].fill(BLACK);
    }
}
