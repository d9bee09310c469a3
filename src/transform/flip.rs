use std::str::FromStr;

use crate::foundation::error::{RasterError, RasterResult};
use crate::raster::image::{RImage, alloc_zeroed};
use crate::transform::rotate::rotate_180;

/// Mirror axis for [`flip`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlipMode {
    /// No change.
    #[default]
    None,
    /// Mirror left to right.
    Horizontal,
    /// Mirror top to bottom.
    Vertical,
    /// Both axes, same as a 180 degree rotation.
    Both,
}

impl FromStr for FlipMode {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "horizontal" | "h" => Ok(Self::Horizontal),
            "vertical" | "v" => Ok(Self::Vertical),
            "both" | "hv" => Ok(Self::Both),
            other => Err(RasterError::validation(format!(
                "unknown flip mode \"{other}\""
            ))),
        }
    }
}

/// Mirror `img`. [`FlipMode::None`] returns another handle on the same buffer.
pub fn flip(img: &RImage, mode: FlipMode) -> RasterResult<RImage> {
    let ch = img.channels();
    let stride = img.width() as usize * ch;
    let src = img.data();
    let out = match mode {
        FlipMode::None => return Ok(img.retain()),
        FlipMode::Both => return rotate_180(img),
        FlipMode::Horizontal => {
            let mut out = alloc_zeroed(src.len())?;
            for (dst_row, src_row) in out.chunks_exact_mut(stride).zip(src.chunks_exact(stride)) {
                for (d, s) in dst_row
                    .chunks_exact_mut(ch)
                    .zip(src_row.chunks_exact(ch).rev())
                {
                    d.copy_from_slice(s);
                }
            }
            out
        }
        FlipMode::Vertical => {
            let mut out = alloc_zeroed(src.len())?;
            for (dst_row, src_row) in out
                .chunks_exact_mut(stride)
                .zip(src.chunks_exact(stride).rev())
            {
                dst_row.copy_from_slice(src_row);
            }
            out
        }
    };
    let mut flipped = RImage::from_raw(img.width(), img.height(), img.format(), out)?;
    flipped.background = img.background;
    Ok(flipped)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/flip.rs"]
mod tests;
