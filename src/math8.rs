/// Saturating 8-bit add
#[inline]
pub const fn qadd8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Scale a channel that was computed at full brightness down to `intensity`.
///
/// 255 maps to exactly `intensity`; inputs above full scale saturate.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn dim8(value: u32, intensity: u8) -> u8 {
    let scaled = value * intensity as u32 / 255;
    if scaled > 255 { 255 } else { scaled as u8 }
}
