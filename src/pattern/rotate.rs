//! Circular shift of a pattern

use embassy_time::Instant;
use serde::Serialize;

use super::{Child, Pattern, render_child};
use crate::{color::Rgb, frame::Frame};

/// Number of whole moves made after `now` at `moves_per_sec`, wrapped to `len`
///
/// Negative rates move the opposite direction.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn move_offset(now: Instant, moves_per_sec: f32, len: usize) -> usize {
    let moves = libm::floorf(now.as_millis() as f32 * moves_per_sec / 1000.0) as i64;
    moves.rem_euclid(len as i64) as usize
}

/// Shifts the pixels of `child` by one position per move, wrapping around
#[derive(Debug, Clone, Default, Serialize)]
pub struct Rotate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child: Child,
    pub moves_per_sec: f32,
    #[serde(skip)]
    buf: Frame,
}

impl Rotate {
    pub fn new(child: Child, moves_per_sec: f32) -> Self {
        Self {
            child,
            moves_per_sec,
            buf: Frame::default(),
        }
    }
}

impl Pattern for Rotate {
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        let len = leds.len();
        if len == 0 {
            return;
        }
        self.buf.reset(len);
        if !render_child(&mut self.child, now, &mut self.buf) {
            return;
        }
        let offset = move_offset(now, self.moves_per_sec, len);
        leds[offset..].copy_from_slice(&self.buf[..len - offset]);
        leds[..offset].copy_from_slice(&self.buf[len - offset..]);
    }
}
