//! Weighted sum of patterns

use embassy_time::Instant;
use serde::Serialize;

use super::{Pattern, PatternSlot};
use crate::{color::Rgb, frame::Frame, math8::saturate8};

/// Adds up its patterns pixel by pixel, each scaled by its weight
///
/// Weights need not sum to one; every channel saturates at 255. A pattern
/// count that does not match the weight count renders nothing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Mixer {
    pub patterns: Vec<PatternSlot>,
    pub weights: Vec<f32>,
    #[serde(skip)]
    bufs: Vec<Frame>,
}

impl Mixer {
    pub fn new(patterns: Vec<PatternSlot>, weights: Vec<f32>) -> Self {
        Self {
            patterns,
            weights,
            bufs: Vec::new(),
        }
    }
}

impl Pattern for Mixer {
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        if self.patterns.len() != self.weights.len() {
            tracing::trace!(
                patterns = self.patterns.len(),
                weights = self.weights.len(),
                "Mixer length mismatch"
            );
            return;
        }
        if self.bufs.len() != self.patterns.len() {
            self.bufs = vec![Frame::default(); self.patterns.len()];
        }
        for (pattern, buf) in self.patterns.iter_mut().zip(&mut self.bufs) {
            buf.reset(leds.len());
            pattern.render(now, buf);
        }

        for (i, led) in leds.iter_mut().enumerate() {
            let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);
            for (buf, weight) in self.bufs.iter().zip(&self.weights) {
                let pixel = buf[i];
                r += f32::from(pixel.r) * weight;
                g += f32::from(pixel.g) * weight;
                b += f32::from(pixel.b) * weight;
            }
            *led = Rgb {
                r: saturate8(r),
                g: saturate8(g),
                b: saturate8(b),
            };
        }
    }
}
