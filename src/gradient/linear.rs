use std::str::FromStr;

use crate::foundation::error::{RasterError, RasterResult};
use crate::foundation::math::{FIX_SHIFT, fixed_step, fixed_to_u8};
use crate::raster::color::Color;
use crate::raster::image::{PixelFormat, RImage, alloc_zeroed, buffer_len};

/// Direction of a linear gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GradientStyle {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Top-left to bottom-right; the slope follows the aspect ratio.
    Diagonal,
}

impl FromStr for GradientStyle {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Self::Horizontal),
            "vertical" | "v" => Ok(Self::Vertical),
            "diagonal" | "d" => Ok(Self::Diagonal),
            other => Err(RasterError::validation(format!(
                "unknown gradient style \"{other}\""
            ))),
        }
    }
}

pub(crate) type Rgb = [u8; 3];

pub(crate) fn rgb(c: Color) -> Rgb {
    [c.red, c.green, c.blue]
}

/// `len` samples from `from` to `to`, both end points included, in 16.16 fixed point.
pub(crate) fn ramp(from: Color, to: Color, len: u32) -> Vec<Rgb> {
    let (from, to) = (rgb(from), rgb(to));
    let steps: [i64; 3] = std::array::from_fn(|c| fixed_step(from[c], to[c], len));
    (0..i64::from(len))
        .map(|i| {
            std::array::from_fn(|c| fixed_to_u8((i64::from(from[c]) << FIX_SHIFT) + i * steps[c]))
        })
        .collect()
}

pub(crate) fn check_size(width: u32, height: u32) -> RasterResult<()> {
    if width == 0 || height == 0 {
        return Err(RasterError::validation(format!(
            "gradient size must be non-zero, got {width}x{height}"
        )));
    }
    Ok(())
}

/// RGB image whose row `y` is written by `row(y, line)`.
pub(crate) fn image_from_rows(
    width: u32,
    height: u32,
    mut row: impl FnMut(usize, &mut [u8]),
) -> RasterResult<RImage> {
    check_size(width, height)?;
    let mut out = alloc_zeroed(buffer_len(width, height, PixelFormat::Rgb)?)?;
    for (y, line) in out.chunks_exact_mut(width as usize * 3).enumerate() {
        row(y, line);
    }
    RImage::from_raw(width, height, PixelFormat::Rgb, out)
}

pub(crate) fn fill_row(line: &mut [u8], color: Rgb) {
    for px in line.chunks_exact_mut(3) {
        px.copy_from_slice(&color);
    }
}

pub(crate) fn copy_samples(line: &mut [u8], samples: &[Rgb]) {
    for (px, s) in line.chunks_exact_mut(3).zip(samples) {
        px.copy_from_slice(s);
    }
}

pub(crate) fn horizontal(width: u32, height: u32, samples: &[Rgb]) -> RasterResult<RImage> {
    image_from_rows(width, height, |_, line| copy_samples(line, samples))
}

pub(crate) fn vertical(width: u32, height: u32, samples: &[Rgb]) -> RasterResult<RImage> {
    image_from_rows(width, height, |y, line| fill_row(line, samples[y]))
}

/// Row `j` copies `width` samples of `strip` starting at `j * (width - 1) / (height - 1)`.
pub(crate) fn diagonal(width: u32, height: u32, strip: &[Rgb]) -> RasterResult<RImage> {
    let (w, h) = (u64::from(width), u64::from(height));
    image_from_rows(width, height, |y, line| {
        let offset = (y as u64 * (w - 1) / (h - 1).max(1)) as usize;
        copy_samples(line, &strip[offset..offset + width as usize]);
    })
}

/// Two-color gradient rendered as an RGB image.
pub fn render_gradient(
    width: u32,
    height: u32,
    from: Color,
    to: Color,
    style: GradientStyle,
) -> RasterResult<RImage> {
    check_size(width, height)?;
    match style {
        GradientStyle::Horizontal => horizontal(width, height, &ramp(from, to, width)),
        GradientStyle::Vertical => vertical(width, height, &ramp(from, to, height)),
        GradientStyle::Diagonal if width == 1 => {
            render_gradient(width, height, from, to, GradientStyle::Vertical)
        }
        GradientStyle::Diagonal if height == 1 => {
            render_gradient(width, height, from, to, GradientStyle::Horizontal)
        }
        GradientStyle::Diagonal => {
            let strip_len = width.checked_mul(2).ok_or_else(|| {
                RasterError::out_of_memory(format!("diagonal gradient {width} wide"))
            })? - 1;
            diagonal(width, height, &ramp(from, to, strip_len))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gradient/linear.rs"]
mod tests;
