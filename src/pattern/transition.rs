//! One-shot cross-fade between two patterns

use embassy_time::{Duration, Instant};
use serde::Serialize;

use super::{Child, Pattern, rebase, render_child};
use crate::{
    color::{Rgb, mix_into},
    curve::Curve,
    frame::Frame,
    math8::progress16,
};

/// Shows `before` until `offset_ms`, then fades to `after` over `duration_ms`
///
/// `after` sees time relative to the start of the fade, `before` keeps the
/// time of the transition itself. Once the fade is over only `after` renders
/// and the scratch frame is released. Without `after` nothing is drawn after
/// `offset_ms`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Child,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Child,
    pub offset_ms: u64,
    pub duration_ms: u64,
    pub curve: Curve,
    #[serde(skip)]
    buf: Frame,
}

impl Transition {
    pub fn new(before: Child, after: Child, offset_ms: u64, duration_ms: u64) -> Self {
        Self {
            before,
            after,
            offset_ms,
            duration_ms,
            curve: Curve::default(),
            buf: Frame::default(),
        }
    }

    #[must_use]
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Check whether the fade is over at `now`
    pub fn is_complete(&self, now: Instant) -> bool {
        now.as_millis() >= self.offset_ms.saturating_add(self.duration_ms)
    }

    /// Take the target pattern out of the transition
    pub fn into_after(self) -> Child {
        self.after
    }
}

impl Pattern for Transition {
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        let ms = now.as_millis();
        if ms <= self.offset_ms {
            render_child(&mut self.before, now, leds);
            return;
        }

        if !render_child(&mut self.after, rebase(now, self.offset_ms), leds) {
            return;
        }
        if self.is_complete(now) {
            self.buf.release();
            return;
        }

        self.buf.reset(leds.len());
        if !render_child(&mut self.before, now, &mut self.buf) {
            return;
        }
        let progress = progress16(
            Duration::from_millis(ms - self.offset_ms),
            Duration::from_millis(self.duration_ms),
        );
        mix_into(leds, &self.buf, u8::MAX - self.curve.scale8(progress));
    }
}
