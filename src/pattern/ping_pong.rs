//! Bouncing trail
//!
//! The child draws a trail of `2 * len - 1` pixels whose first pixel is the
//! head. The head travels to the far end of the strip and back, with the
//! trail folding over itself at each end.

use embassy_time::Instant;
use serde::Serialize;

use super::{Child, Pattern, render_child, rotate::move_offset};
use crate::{color::Rgb, frame::Frame};

/// Bounces the trail drawn by `child` between both ends of the strip
#[derive(Debug, Clone, Default, Serialize)]
pub struct PingPong {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child: Child,
    pub moves_per_sec: f32,
    #[serde(skip)]
    buf: Frame,
}

impl PingPong {
    pub fn new(child: Child, moves_per_sec: f32) -> Self {
        Self {
            child,
            moves_per_sec,
            buf: Frame::default(),
        }
    }
}

impl Pattern for PingPong {
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        let len = leds.len();
        if len == 0 {
            return;
        }
        self.buf.reset(len * 2 - 1);
        if !render_child(&mut self.child, now, &mut self.buf) {
            return;
        }
        if len == 1 {
            leds[0] = self.buf[0];
            return;
        }

        let pos = move_offset(now, self.moves_per_sec, 2 * (len - 1));
        if pos >= len - 1 {
            // Running back towards the start
            let back = pos + 1 - len;
            let limit = len - back - 1;
            for (i, led) in leds.iter_mut().enumerate() {
                *led = if i < limit {
                    self.buf[len - i + back - 1]
                } else {
                    self.buf[i - limit]
                };
            }
        } else {
            for (i, led) in leds.iter_mut().enumerate() {
                *led = if i <= pos {
                    self.buf[pos - i]
                } else {
                    self.buf[pos + i]
                };
            }
        }
    }
}
