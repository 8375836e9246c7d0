mod utils;

use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{add_colors, highlight, hsv2rgb, hue_color, or_colors, wheel_color, white};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
