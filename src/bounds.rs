use serde::{Deserialize, Serialize};

use crate::Rgb;

/// Sub-range of a strip, as `start` and exclusive `end` index
///
/// The end index travels as `length` on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderingBounds {
    pub start: usize,
    #[serde(rename = "length")]
    pub end: usize,
}

impl RenderingBounds {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of pixels covered, zero for an inverted range
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Check whether the range is ordered and fits a strip of `len` pixels
    pub const fn fits(self, len: usize) -> bool {
        self.start <= self.end && self.end <= len
    }
}

/// Get a slice of the LEDs within the bounds, if they fit
pub(crate) fn bounded(leds: &mut [Rgb], bounds: RenderingBounds) -> Option<&mut [Rgb]> {
    leds.get_mut(bounds.start..bounds.end)
}
