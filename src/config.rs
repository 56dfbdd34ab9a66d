//! Host-facing settings
//!
//! Durations are written as whole milliseconds on the wire.

use embassy_time::Duration;
use serde::{Deserialize, Serialize};

use crate::curve::Curve;

const DEFAULT_NUM_LEDS: usize = 100;
const DEFAULT_THUMBNAIL_HZ: u32 = 10;
const DEFAULT_THUMBNAIL_DURATION: Duration = Duration::from_secs(10);
const DEFAULT_TRANSITION: Duration = Duration::from_millis(500);

/// Parameters of rendered thumbnails, shared by every request to a cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Simulated strip length, which is also the image width
    pub num_leds: usize,
    /// Frames per second
    pub hz: u32,
    /// Length of the animation
    #[serde(rename = "duration_ms", with = "duration_ms")]
    pub duration: Duration,
}

impl ThumbnailConfig {
    /// Number of frames in one thumbnail
    pub fn frame_count(&self) -> u64 {
        self.duration.as_millis() * u64::from(self.hz) / 1000
    }

    /// Time between two frames
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.hz.max(1)))
    }
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            num_leds: DEFAULT_NUM_LEDS,
            hz: DEFAULT_THUMBNAIL_HZ,
            duration: DEFAULT_THUMBNAIL_DURATION,
        }
    }
}

/// Settings of the live show player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainterConfig {
    pub num_leds: usize,
    /// Cross-fade length when the pattern changes
    #[serde(rename = "transition_ms", with = "duration_ms")]
    pub transition: Duration,
    /// Cross-fade easing
    pub curve: Curve,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            num_leds: DEFAULT_NUM_LEDS,
            transition: DEFAULT_TRANSITION,
            curve: Curve::EaseOut,
        }
    }
}

mod duration_ms {
    use embassy_time::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
