//! Frame resampling
//!
//! Destination pixel `i` of an `M` pixel frame samples source position
//! `i * (N - 1) / (M - 1)` of an `N` pixel frame, so the first and last pixels
//! of both frames line up whatever the ratio.

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, blend_colors};

/// Resampling method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interpolation {
    /// Closest source pixel
    Nearest,
    /// Blend of the two neighbouring source pixels
    #[default]
    Linear,
}

impl Interpolation {
    /// Resample `src` into `dst`
    ///
    /// An empty source or destination leaves `dst` untouched. A single source
    /// pixel is replicated, a single destination pixel samples source
    /// position 0.
    #[allow(clippy::cast_possible_truncation)]
    pub fn scale(self, src: &[Rgb], dst: &mut [Rgb]) {
        let Some(&first) = src.first() else {
            return;
        };
        if dst.is_empty() {
            return;
        }
        if src.len() == dst.len() {
            dst.copy_from_slice(src);
            return;
        }
        if src.len() == 1 || dst.len() == 1 {
            dst.fill(first);
            return;
        }

        let span = (src.len() - 1) as u64;
        let steps = (dst.len() - 1) as u64;
        for (i, pixel) in dst.iter_mut().enumerate() {
            // 24.8 fixed-point source position
            let pos = (i as u64 * span * 256) / steps;
            let index = (pos >> 8) as usize;
            let frac = (pos & 0xFF) as u8;
            *pixel = match self {
                Self::Nearest => {
                    if frac >= 0x80 {
                        src[index + 1]
                    } else {
                        src[index]
                    }
                }
                Self::Linear => match src.get(index + 1) {
                    Some(&next) if frac != 0 => blend_colors(src[index], next, frac),
                    _ => src[index],
                },
            };
        }
    }
}
