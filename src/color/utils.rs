pub use smart_leds::hsv::hsv2rgb;

use crate::{
    color::{Hsv, Rgb},
    math8::{dim8, qadd8},
};

/// Amount of white mixed into a highlighted pixel
const HIGHLIGHT_WHITE: u8 = 96;

/// Bitwise OR of two colors, used by overlapping particles
#[inline]
pub fn or_colors(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: a.r | b.r,
        g: a.g | b.g,
        b: a.b | b.b,
    }
}

/// Saturating per-channel sum of two colors
#[inline]
pub fn add_colors(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: qadd8(a.r, b.r),
        g: qadd8(a.g, b.g),
        b: qadd8(a.b, b.b),
    }
}

/// Gray level with all channels at `intensity`
#[inline]
pub const fn white(intensity: u8) -> Rgb {
    Rgb {
        r: intensity,
        g: intensity,
        b: intensity,
    }
}

/// Fully saturated color of `hue` at brightness `intensity`
#[inline]
pub fn hue_color(hue: u8, intensity: u8) -> Rgb {
    hsv2rgb(Hsv {
        hue,
        sat: 255,
        val: intensity,
    })
}

/// Mix some white into `color` so it stands out from its neighbours
#[inline]
pub fn highlight(color: Rgb, intensity: u8) -> Rgb {
    let w = dim8(u32::from(HIGHLIGHT_WHITE), intensity);
    add_colors(color, white(w))
}

/// Color wheel with a red - blue - green - red transition.
///
/// Only the low 8 bits of `position` are used.
#[allow(clippy::cast_possible_truncation)]
pub const fn wheel_color(position: u32, intensity: u8) -> Rgb {
    if intensity == 0 {
        return Rgb { r: 0, g: 0, b: 0 };
    }
    let i = position & 0xFF;
    if i < 85 {
        return Rgb {
            r: dim8(255 - i * 3, intensity),
            g: 0,
            b: dim8(i * 3, intensity),
        };
    }
    if i < 170 {
        let i = i - 85;
        return Rgb {
            r: 0,
            g: dim8(i * 3, intensity),
            b: dim8(255 - i * 3, intensity),
        };
    }
    let i = i - 170;
    Rgb {
        r: dim8(i * 3, intensity),
        g: dim8(255 - i * 3, intensity),
        b: 0,
    }
}
