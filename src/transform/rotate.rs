use crate::foundation::error::{RasterError, RasterResult};
use crate::foundation::math::FIX_SHIFT;
use crate::raster::image::{PixelFormat, RImage, alloc_zeroed, buffer_len};

/// Angles closer than this to a multiple of 90 degrees use the exact paths.
pub const MIN_USABLE_ANGLE: f64 = 0.00699;

fn near(angle: f64, target: f64) -> bool {
    (angle - target).abs() < MIN_USABLE_ANGLE
}

/// Rotate by `degrees`; positive angles turn clockwise on screen.
///
/// Multiples of 90 degrees are exact transpositions keeping the pixel format. Any other angle
/// produces an RGBA image sized to the rotated bounding box, with transparent corners.
pub fn rotate(img: &RImage, degrees: f64) -> RasterResult<RImage> {
    if !degrees.is_finite() {
        return Err(RasterError::validation(format!(
            "rotation angle must be finite, got {degrees}"
        )));
    }
    let angle = degrees.rem_euclid(360.0);

    if near(angle, 0.0) || near(angle, 360.0) {
        Ok(img.clone())
    } else if near(angle, 90.0) {
        transpose(img, Quarter::Clockwise)
    } else if near(angle, 180.0) {
        rotate_180(img)
    } else if near(angle, 270.0) {
        transpose(img, Quarter::CounterClockwise)
    } else {
        rotate_any(img, angle)
    }
}

#[derive(Clone, Copy)]
enum Quarter {
    Clockwise,
    CounterClockwise,
}

fn transpose(img: &RImage, dir: Quarter) -> RasterResult<RImage> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let ch = img.channels();
    let src = img.data();
    // Target is h wide and w tall.
    let mut out = alloc_zeroed(buffer_len(img.height(), img.width(), img.format())?)?;
    for r in 0..h {
        for c in 0..w {
            let (tx, ty) = match dir {
                Quarter::Clockwise => (h - 1 - r, c),
                Quarter::CounterClockwise => (r, w - 1 - c),
            };
            let s = (r * w + c) * ch;
            let d = (ty * h + tx) * ch;
            out[d..d + ch].copy_from_slice(&src[s..s + ch]);
        }
    }
    let mut rotated = RImage::from_raw(img.height(), img.width(), img.format(), out)?;
    rotated.background = img.background;
    Ok(rotated)
}

pub(crate) fn rotate_180(img: &RImage) -> RasterResult<RImage> {
    let ch = img.channels();
    let mut out = alloc_zeroed(img.data().len())?;
    for (dst, src) in out
        .chunks_exact_mut(ch)
        .zip(img.data().chunks_exact(ch).rev())
    {
        dst.copy_from_slice(src);
    }
    let mut rotated = RImage::from_raw(img.width(), img.height(), img.format(), out)?;
    rotated.background = img.background;
    Ok(rotated)
}

/// Inverse-mapped nearest-neighbour rotation, walking each target scanline in 16.16 steps.
fn rotate_any(img: &RImage, angle: f64) -> RasterResult<RImage> {
    let (sin, cos) = angle.to_radians().sin_cos();
    let (w, h) = (f64::from(img.width()), f64::from(img.height()));
    let new_w = (w * cos.abs() + h * sin.abs()).ceil().max(1.0) as u32;
    let new_h = (w * sin.abs() + h * cos.abs()).ceil().max(1.0) as u32;

    let one = f64::from(1u32 << FIX_SHIFT);
    let to_fixed = |v: f64| (v * one).round() as i64;
    // Source step for one target pixel to the right.
    let step_x = to_fixed(cos);
    let step_y = to_fixed(-sin);

    let (src_w, src_h) = (i64::from(img.width()), i64::from(img.height()));
    let ch = img.channels();
    let src = img.data();
    let mut out = alloc_zeroed(buffer_len(new_w, new_h, PixelFormat::Rgba)?)?;

    for (j, row) in out.chunks_exact_mut(new_w as usize * 4).enumerate() {
        // Target pixel centers relative to the target center.
        let u = 0.5 - f64::from(new_w) / 2.0;
        let v = j as f64 + 0.5 - f64::from(new_h) / 2.0;
        let mut sx = to_fixed(u * cos + v * sin + w / 2.0);
        let mut sy = to_fixed(-u * sin + v * cos + h / 2.0);

        for px in row.chunks_exact_mut(4) {
            let (x, y) = (sx >> FIX_SHIFT, sy >> FIX_SHIFT);
            if (0..src_w).contains(&x) && (0..src_h).contains(&y) {
                let s = (y * src_w + x) as usize * ch;
                px[..3].copy_from_slice(&src[s..s + 3]);
                px[3] = if ch == 4 { src[s + 3] } else { 255 };
            }
            sx += step_x;
            sy += step_y;
        }
    }

    let mut rotated = RImage::from_raw(new_w, new_h, PixelFormat::Rgba, out)?;
    rotated.background = img.background;
    Ok(rotated)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/rotate.rs"]
mod tests;
