mod utils;
mod wavelength;

use smart_leds::RGB8;
pub use utils::{blend_colors, format_hex, mix_into, parse_hex, rgb_from_u32};
pub use wavelength::{VISIBLE_END_NM, VISIBLE_START_NM, wavelength_to_rgb};

pub type Rgb = RGB8;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
