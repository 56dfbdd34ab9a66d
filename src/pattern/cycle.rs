//! Hard cuts between patterns

use embassy_time::Instant;
use serde::Serialize;

use super::{Pattern, PatternSlot};
use crate::color::Rgb;

/// Shows each frame for `frame_duration_ms`, then cuts to the next one
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cycle {
    pub frames: Vec<PatternSlot>,
    pub frame_duration_ms: u64,
}

impl Cycle {
    pub fn new(frames: Vec<PatternSlot>, frame_duration_ms: u64) -> Self {
        Self {
            frames,
            frame_duration_ms,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn current_index(&self, now: Instant) -> usize {
        if self.frame_duration_ms == 0 {
            return 0;
        }
        ((now.as_millis() / self.frame_duration_ms) % self.frames.len() as u64) as usize
    }
}

impl Pattern for Cycle {
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        if self.frames.is_empty() {
            return;
        }
        let index = self.current_index(now);
        self.frames[index].render(now, leds);
    }
}
