//! Repeating cross-fades between patterns

use embassy_time::{Duration, Instant};
use serde::Serialize;

use super::{Pattern, PatternSlot};
use crate::{
    color::{Rgb, mix_into},
    curve::Curve,
    frame::Frame,
    math8::progress16,
};

/// Shows each pattern for `show_ms`, then fades into the next one over
/// `transition_ms`, wrapping around after the last pattern
///
/// Both patterns of a fade receive the time of the loop itself.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Loop {
    pub patterns: Vec<PatternSlot>,
    pub show_ms: u64,
    pub transition_ms: u64,
    pub curve: Curve,
    #[serde(skip)]
    buf: Frame,
}

impl Loop {
    pub fn new(patterns: Vec<PatternSlot>, show_ms: u64, transition_ms: u64) -> Self {
        Self {
            patterns,
            show_ms,
            transition_ms,
            curve: Curve::default(),
            buf: Frame::default(),
        }
    }

    #[must_use]
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }
}

impl Pattern for Loop {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        let count = self.patterns.len();
        if count == 0 {
            return;
        }
        let cycle = self.show_ms.saturating_add(self.transition_ms);
        if cycle == 0 {
            self.patterns[0].render(now, leds);
            return;
        }

        let ms = now.as_millis();
        let step = ms / cycle;
        let offset = ms % cycle;
        let current = (step % count as u64) as usize;
        self.patterns[current].render(now, leds);
        if offset < self.show_ms {
            return;
        }

        let next = (current + 1) % count;
        self.buf.reset(leds.len());
        self.patterns[next].render(now, &mut self.buf);
        let progress = progress16(
            Duration::from_millis(offset - self.show_ms),
            Duration::from_millis(self.transition_ms),
        );
        mix_into(leds, &self.buf, self.curve.scale8(progress));
    }
}
