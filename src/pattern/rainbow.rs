//! Visible spectrum gradient
//!
//! Pixels are spaced logarithmically along the spectrum.

use embassy_time::Instant;

use super::Pattern;
use crate::color::{Rgb, VISIBLE_END_NM, VISIBLE_START_NM, wavelength_to_rgb};

/// Static rainbow from violet on the first pixel to red fading out on the last
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rainbow;

impl Rainbow {
    pub const fn new() -> Self {
        Self
    }
}

impl Pattern for Rainbow {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn render(&mut self, _now: Instant, leds: &mut [Rgb]) {
        let len = leds.len();
        if len == 0 {
            return;
        }
        let step = 1.0f32 / len as f32;
        let scale = core::f32::consts::LN_2;
        let span = (VISIBLE_END_NM - VISIBLE_START_NM) as f32;
        for (i, led) in leds.iter_mut().enumerate() {
            let position = libm::log1pf((len - i - 1) as f32 * step) / scale;
            let nm = VISIBLE_START_NM as f32 + span * (1.0 - position);
            *led = wavelength_to_rgb(nm as i32);
        }
    }
}
