/// Number of fractional bits in the 16.16 fixed-point values used by scaling and gradients.
pub(crate) const FIX_SHIFT: u32 = 16;

/// `x * y / 255` rounded to nearest, exact for every `x, y` in `0..=255`.
pub(crate) fn mul_div255(x: u32, y: u32) -> u32 {
    let t = x * y + 0x80;
    ((t >> 8) + t) >> 8
}

pub(crate) fn mul_div255_u8(x: u8, y: u8) -> u8 {
    mul_div255(u32::from(x), u32::from(y)) as u8
}

/// Legacy blend: `(dst * (255 - a) + src * a) / 256`.
pub(crate) fn blend_div256(dst: u8, src: u8, a: u8) -> u8 {
    let a = u32::from(a);
    ((u32::from(dst) * (255 - a) + u32::from(src) * a) >> 8) as u8
}

/// Round a filter accumulation to the nearest channel value in `0..=255`.
pub(crate) fn clamp_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Inclusive 16.16 step from `from` to `to` over `len` samples.
pub(crate) fn fixed_step(from: u8, to: u8, len: u32) -> i64 {
    if len <= 1 {
        return 0;
    }
    ((i64::from(to) - i64::from(from)) << FIX_SHIFT) / i64::from(len - 1)
}

/// Round a 16.16 accumulator back to a channel value.
pub(crate) fn fixed_to_u8(v: i64) -> u8 {
    ((v + (1 << (FIX_SHIFT - 1))) >> FIX_SHIFT).clamp(0, 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
