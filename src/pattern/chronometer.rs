//! Clock face markers

use embassy_time::Instant;
use serde::Serialize;

use super::{Child, Pattern, render_child};
use crate::{color::Rgb, frame::Frame};

/// Number of palette entries the child draws: background, seconds, minutes
/// and hours markers
pub(crate) const PALETTE_LEN: usize = 4;

const MS_PER_SECOND: u64 = 1000;
const UNITS_PER_HAND: u64 = 60;

/// Paints seconds, minutes and hours markers over a background
///
/// The child renders the four palette colors. Seconds and minutes hands move
/// around the strip once per minute and per hour, the hours marker moves one
/// pixel per hour. On collision seconds win over minutes, minutes over hours.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Chronometer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child: Child,
    #[serde(skip)]
    palette: Frame,
}

impl Chronometer {
    pub fn new(child: Child) -> Self {
        Self {
            child,
            palette: Frame::default(),
        }
    }
}

/// Strip position of a hand showing `value` out of `modulus`
#[allow(clippy::cast_possible_truncation)]
fn hand_position(len: u64, value: u64, modulus: u64) -> usize {
    ((len * (value % modulus) + modulus / 2) / modulus) as usize
}

impl Pattern for Chronometer {
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        let len = leds.len();
        if len == 0 {
            return;
        }
        self.palette.reset(PALETTE_LEN);
        if !render_child(&mut self.child, now, &mut self.palette) {
            return;
        }

        let seconds = now.as_millis() / MS_PER_SECOND;
        let minutes = seconds / UNITS_PER_HAND;
        let hours = minutes / UNITS_PER_HAND;
        let strip = len as u64;

        leds.fill(self.palette[0]);
        let hands = [
            (hand_position(strip, hours, strip), self.palette[3]),
            (hand_position(strip, minutes, UNITS_PER_HAND), self.palette[2]),
            (hand_position(strip, seconds, UNITS_PER_HAND), self.palette[1]),
        ];
        for (position, color) in hands {
            // Rounding can push a hand one past the end
            if let Some(led) = leds.get_mut(position) {
                *led = color;
            }
        }
    }
}
