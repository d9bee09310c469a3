use crate::foundation::math::blend_div256;
use crate::raster::color::Color;

/// Per-channel rule combining a color with an existing pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Zero every channel, alpha included.
    Clear,
    /// Overwrite every channel, alpha included.
    Copy,
    /// Alpha-blend the color over the pixel.
    #[default]
    Normal,
    /// Saturating add; alpha becomes `min(dst_a, src_a)`.
    Add,
    /// Saturating subtract; alpha becomes `min(dst_a, src_a)`.
    Subtract,
}

/// Apply `op` with `color` to one pixel (3 or 4 bytes).
pub(crate) fn apply(px: &mut [u8], op: Operation, color: Color) {
    let has_alpha = px.len() == 4;
    let src = [color.red, color.green, color.blue];
    match op {
        Operation::Clear => px.fill(0),
        Operation::Copy => {
            px[..3].copy_from_slice(&src);
            if has_alpha {
                px[3] = color.alpha;
            }
        }
        Operation::Normal => blend_normal(px, color),
        Operation::Add | Operation::Subtract => {
            for (d, s) in px[..3].iter_mut().zip(src) {
                *d = if op == Operation::Add {
                    d.saturating_add(s)
                } else {
                    d.saturating_sub(s)
                };
            }
            if has_alpha {
                px[3] = px[3].min(color.alpha);
            }
        }
    }
}

/// `put_pixel` blending: opaque colors overwrite, others mix with a `/256` weight.
pub(crate) fn blend_normal(px: &mut [u8], color: Color) {
    let a = color.alpha;
    if a == 255 {
        px[..3].copy_from_slice(&[color.red, color.green, color.blue]);
        if px.len() == 4 {
            px[3] = 255;
        }
        return;
    }
    px[0] = blend_div256(px[0], color.red, a);
    px[1] = blend_div256(px[1], color.green, a);
    px[2] = blend_div256(px[2], color.blue, a);
    if px.len() == 4 {
        px[3] = a + ((u32::from(px[3]) * u32::from(255 - a)) >> 8) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/ops.rs"]
mod tests;
