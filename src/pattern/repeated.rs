//! Tiled base frame

use embassy_time::Instant;
use serde::Serialize;

use super::Pattern;
use crate::{color::Rgb, frame::Frame};

/// Repeats `base` along the strip: pixel `i` is `base[i % base.len()]`
///
/// An empty base renders nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Repeated {
    pub base: Frame,
}

impl Repeated {
    pub fn new(base: impl Into<Frame>) -> Self {
        Self { base: base.into() }
    }
}

impl Pattern for Repeated {
    fn render(&mut self, _now: Instant, leds: &mut [Rgb]) {
        if self.base.is_empty() {
            tracing::trace!("Repeated has an empty base");
            return;
        }
        for (led, color) in leds.iter_mut().zip(self.base.iter().cycle()) {
            *led = *color;
        }
    }
}
