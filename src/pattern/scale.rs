//! Pattern rendered at another length and resampled

use embassy_time::Instant;
use serde::Serialize;

use super::{Child, Pattern, render_child};
use crate::{color::Rgb, frame::Frame, interpolation::Interpolation};

/// Renders `child` on `length` pixels (or `ratio` times the strip when
/// `length` is zero), then resamples the result onto the strip
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child: Child,
    pub interpolation: Interpolation,
    pub length: usize,
    pub ratio: f32,
    #[serde(skip)]
    buf: Frame,
}

impl Scale {
    /// Scale to a fixed number of pixels
    pub fn to_length(child: Child, interpolation: Interpolation, length: usize) -> Self {
        Self {
            child,
            interpolation,
            length,
            ratio: 0.0,
            buf: Frame::default(),
        }
    }

    /// Scale by a factor of the strip length
    pub fn by_ratio(child: Child, interpolation: Interpolation, ratio: f32) -> Self {
        Self {
            child,
            interpolation,
            length: 0,
            ratio,
            buf: Frame::default(),
        }
    }

    /// Length the child is rendered on for a strip of `len` pixels
    ///
    /// `None` when neither a length nor a positive ratio is set.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn buffer_len(&self, len: usize) -> Option<usize> {
        if self.length != 0 {
            return Some(self.length);
        }
        if self.ratio > 0.0 && self.ratio.is_finite() {
            return Some(libm::ceilf(self.ratio * len as f32) as usize);
        }
        None
    }
}

impl Pattern for Scale {
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        let Some(len) = self.buffer_len(leds.len()) else {
            tracing::trace!(ratio = self.ratio, "Scale has no usable length");
            return;
        };
        self.buf.reset(len);
        if !render_child(&mut self.child, now, &mut self.buf) {
            return;
        }
        self.interpolation.scale(&self.buf, leds);
    }
}
