use core::fmt::Write;

use heapless::String;

use crate::{color::Rgb, math8::blend8};

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Blend every pixel of `leds` towards the matching pixel of `other`
///
/// Only the overlapping prefix of both slices is touched.
pub fn mix_into(leds: &mut [Rgb], other: &[Rgb], amount_of_other: u8) {
    for (led, src) in leds.iter_mut().zip(other) {
        *led = blend_colors(*led, *src, amount_of_other);
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Format a color as six lowercase hex digits (`rrggbb`)
pub fn format_hex(color: Rgb) -> String<6> {
    let mut out = String::new();
    // Six hex digits always fit.
    let _ = write!(out, "{:02x}{:02x}{:02x}", color.r, color.g, color.b);
    out
}

/// Parse six hex digits (`rrggbb`, either case) into a color
pub fn parse_hex(digits: &str) -> Option<Rgb> {
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
    Some(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}
