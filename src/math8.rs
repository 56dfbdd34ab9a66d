//! 8- and 16-bit fixed-point helpers shared by colors, curves and combinators

use embassy_time::Duration;

/// Blend two 8-bit values
///
/// Computes `(a * (255 - amount_of_b) + b * amount_of_b) / 255` with
/// truncating division, so `blend8(255, 0, 128) == 127` while
/// `blend8(0, 255, 128) == 128`.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let keep = 255 - amount_of_b as u16;
    ((a as u16 * keep + b as u16 * amount_of_b as u16) / 255) as u8
}

/// Calculate progress (0-65535) of `elapsed` through `duration`
///
/// Returns 0 for an empty duration and saturates at 65535.
#[allow(clippy::cast_possible_truncation)]
#[inline]
pub const fn progress16(elapsed: Duration, duration: Duration) -> u16 {
    if duration.as_millis() == 0 {
        return 0;
    }
    if elapsed.as_millis() >= duration.as_millis() {
        return u16::MAX;
    }

    ((elapsed.as_millis() * 65535) / duration.as_millis()) as u16
}

/// Reduce a 16-bit fraction to its high byte
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn high_byte(value: u16) -> u8 {
    (value >> 8) as u8
}

/// Convert an accumulated channel value to 8 bits, rounding half up and
/// saturating at both ends
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn saturate8(value: f32) -> u8 {
    if value >= 255.0 {
        return 255;
    }
    if value <= 0.0 {
        return 0;
    }
    libm::floorf(value + 0.5) as u8
}
