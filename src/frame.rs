//! Resizable pixel buffer
//!
//! A [`Frame`] is one snapshot of a strip (or of a combinator's scratch
//! buffer). It carries no timing information.

use core::ops::{Deref, DerefMut};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::color::{BLACK, Rgb, format_hex, parse_hex};

/// Prefix of the wire form of a frame: `L` followed by `rrggbb` per pixel
pub const FRAME_PREFIX: char = 'L';

/// Ordered, resizable sequence of pixels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame(Vec<Rgb>);

impl Frame {
    /// Create a black frame of `len` pixels
    pub fn new(len: usize) -> Self {
        Self(vec![BLACK; len])
    }

    /// Make the frame `len` pixels long
    ///
    /// No-op when the length already matches, otherwise the frame is resized
    /// and every pixel is cleared to black.
    pub fn reset(&mut self, len: usize) {
        if self.0.len() == len {
            return;
        }
        self.0.clear();
        self.0.resize(len, BLACK);
    }

    /// Drop the pixel storage
    pub fn release(&mut self) {
        self.0 = Vec::new();
    }

    /// Encode as the wire form (`L` + lowercase hex)
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(1 + self.0.len() * 6);
        out.push(FRAME_PREFIX);
        for pixel in &self.0 {
            out.push_str(&format_hex(*pixel));
        }
        out
    }

    /// Decode the wire form produced by [`Frame::to_hex`]
    pub fn parse_hex(value: &str) -> Option<Self> {
        let digits = value.strip_prefix(FRAME_PREFIX)?;
        if digits.len() % 6 != 0 || !digits.is_ascii() {
            return None;
        }
        let pixels = (0..digits.len())
            .step_by(6)
            .map(|at| parse_hex(&digits[at..at + 6]))
            .collect::<Option<Vec<_>>>()?;
        Some(Self(pixels))
    }
}

impl From<Vec<Rgb>> for Frame {
    fn from(pixels: Vec<Rgb>) -> Self {
        Self(pixels)
    }
}

impl From<&[Rgb]> for Frame {
    fn from(pixels: &[Rgb]) -> Self {
        Self(pixels.to_vec())
    }
}

impl Deref for Frame {
    type Target = [Rgb];

    fn deref(&self) -> &[Rgb] {
        &self.0
    }
}

impl DerefMut for Frame {
    fn deref_mut(&mut self) -> &mut [Rgb] {
        &mut self.0
    }
}

impl Serialize for Frame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Frame {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_hex(&raw).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Str(&raw), &"L followed by rrggbb pixels")
        })
    }
}
