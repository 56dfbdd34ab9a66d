//! Spatial blend between two patterns

use embassy_time::Instant;
use serde::Serialize;

use super::{Child, Pattern, render_child};
use crate::{
    color::{Rgb, blend_colors},
    curve::Curve,
    frame::Frame,
};

/// Blends from `left` at the first pixel to `right` at the last one
///
/// The weight of `right` at pixel `i` is `curve(i / (len - 1))`. Missing
/// children render nothing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Gradient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Child,
    pub curve: Curve,
    #[serde(skip)]
    buf: Frame,
}

impl Gradient {
    pub fn new(left: Child, right: Child, curve: Curve) -> Self {
        Self {
            left,
            right,
            curve,
            buf: Frame::default(),
        }
    }
}

impl Pattern for Gradient {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        if self.left.is_none() || self.right.is_none() {
            tracing::trace!("Gradient is missing a side");
            return;
        }
        let len = leds.len();
        if len == 0 {
            return;
        }

        render_child(&mut self.left, now, leds);
        self.buf.reset(len);
        render_child(&mut self.right, now, &mut self.buf);

        if len == 1 {
            leds[0] = blend_colors(leds[0], self.buf[0], self.curve.scale8(u16::MAX / 2));
            return;
        }
        let last = (len - 1) as u64;
        for (i, (led, right)) in leds.iter_mut().zip(self.buf.iter()).enumerate() {
            let progress = (i as u64 * u64::from(u16::MAX) / last) as u16;
            *led = blend_colors(*led, *right, self.curve.scale8(progress));
        }
    }
}
