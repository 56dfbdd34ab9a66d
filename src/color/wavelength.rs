//! Visible spectrum to RGB conversion
//!
//! Integer piecewise-linear approximation of the visible spectrum. The output
//! of this table is used as golden data by the rainbow pattern, so every
//! segment uses truncating integer division.

use crate::color::{BLACK, Rgb};

/// First wavelength (in nm) that produces light
pub const VISIBLE_START_NM: i32 = 380;

/// First wavelength (in nm) past the visible range
pub const VISIBLE_END_NM: i32 = 781;

/// Convert a wavelength in nanometers to a color
///
/// Wavelengths outside `380..781` are black. Both ends of the range taper
/// towards black instead of ending on a saturated color.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn wavelength_to_rgb(nm: i32) -> Rgb {
    let (r, g, b) = match nm {
        ..380 => return BLACK,
        380..420 => (
            196 - (170 * (440 - nm)) / (440 - 380),
            0,
            26 + (229 * (nm - 380)) / (420 - 380),
        ),
        420..440 => ((0x89 * (440 - nm)) / (440 - 420), 0, 255),
        440..490 => (0, (255 * (nm - 440)) / (490 - 440), 255),
        490..510 => (0, 255, (255 * (510 - nm)) / (510 - 490)),
        510..580 => ((255 * (nm - 510)) / (580 - 510), 255, 0),
        580..645 => (255, (255 * (645 - nm)) / (645 - 580), 0),
        645..700 => (255, 0, 0),
        700..781 => (26 + (229 * (780 - nm)) / (780 - 700), 0, 0),
        _ => return BLACK,
    };
    Rgb {
        r: r as u8,
        g: g as u8,
        b: b as u8,
    }
}
