use crate::foundation::error::{RasterError, RasterResult};
use crate::foundation::math::{FIX_SHIFT, fixed_to_u8};
use crate::gradient::linear::{
    GradientStyle, Rgb, check_size, diagonal, fill_row, horizontal, image_from_rows, ramp,
    render_gradient, rgb,
};
use crate::raster::color::Color;
use crate::raster::image::RImage;

/// `len` samples over `colors`: `count - 1` segments of `len / (count - 1)` samples each,
/// where `count` is capped at `len`. Samples past the last full segment take the last stop.
fn multi_line(colors: &[Color], len: u32) -> Vec<Rgb> {
    let count = colors.len().min(len as usize);
    let Some(&last) = colors[..count].last() else {
        return Vec::new();
    };
    if count < 2 {
        return vec![rgb(last); len as usize];
    }
    let seg = i64::from(len) / (count as i64 - 1);

    let mut out = Vec::with_capacity(len as usize);
    for pair in colors[..count].windows(2) {
        let (from, to) = (rgb(pair[0]), rgb(pair[1]));
        let steps: [i64; 3] =
            std::array::from_fn(|c| ((i64::from(to[c]) - i64::from(from[c])) << FIX_SHIFT) / seg);
        out.extend((0..seg).map(|j| -> Rgb {
            std::array::from_fn(|c| fixed_to_u8((i64::from(from[c]) << FIX_SHIFT) + j * steps[c]))
        }));
    }
    out.resize(len as usize, rgb(last));
    out
}

/// Gradient through every color in `colors`, rendered as an RGB image.
///
/// One color renders a flat image and two colors a plain [`render_gradient`].
pub fn render_multi_gradient(
    width: u32,
    height: u32,
    colors: &[Color],
    style: GradientStyle,
) -> RasterResult<RImage> {
    check_size(width, height)?;
    match colors {
        [] => Err(RasterError::validation("gradient needs at least one color")),
        [c] => render_gradient(width, height, *c, *c, style),
        [from, to] => render_gradient(width, height, *from, *to, style),
        _ => match style {
            GradientStyle::Horizontal => horizontal(width, height, &multi_line(colors, width)),
            GradientStyle::Vertical => vertical_multi(width, height, colors),
            GradientStyle::Diagonal if width == 1 => vertical_multi(width, height, colors),
            GradientStyle::Diagonal if height == 1 => {
                horizontal(width, height, &multi_line(colors, width))
            }
            GradientStyle::Diagonal => {
                let strip_len = width.checked_mul(2).ok_or_else(|| {
                    RasterError::out_of_memory(format!("diagonal gradient {width} wide"))
                })? - 1;
                let count = colors.len().min(width as usize).min(height as usize);
                let strip = if count > 2 {
                    multi_line(&colors[..count], strip_len)
                } else {
                    ramp(colors[0], colors[1], strip_len)
                };
                diagonal(width, height, &strip)
            }
        },
    }
}

fn vertical_multi(width: u32, height: u32, colors: &[Color]) -> RasterResult<RImage> {
    let rows = multi_line(colors, height);
    image_from_rows(width, height, |y, line| fill_row(line, rows[y]))
}

/// Alternating horizontal bands of two vertical gradients.
///
/// Rows start in the first gradient for `thickness1` rows, switch to the second for
/// `thickness2` rows, and so on. Both gradients span the full height.
pub fn render_interwoven_gradient(
    width: u32,
    height: u32,
    colors1: [Color; 2],
    thickness1: u32,
    colors2: [Color; 2],
    thickness2: u32,
) -> RasterResult<RImage> {
    check_size(width, height)?;
    if thickness1 == 0 || thickness2 == 0 {
        return Err(RasterError::validation(
            "interwoven gradient band thickness must be non-zero",
        ));
    }
    let first = ramp(colors1[0], colors1[1], height);
    let second = ramp(colors2[0], colors2[1], height);
    let period = u64::from(thickness1) + u64::from(thickness2);
    image_from_rows(width, height, |y, line| {
        let band = if (y as u64 % period) < u64::from(thickness1) {
            &first
        } else {
            &second
        };
        fill_row(line, band[y]);
    })
}

#[cfg(test)]
#[path = "../../tests/unit/gradient/multi.rs"]
mod tests;
