use crate::foundation::error::{RasterError, RasterResult};
use crate::foundation::math::FIX_SHIFT;
use crate::raster::image::{RImage, alloc_zeroed, buffer_len};

pub(crate) fn check_target(width: u32, height: u32) -> RasterResult<()> {
    if width == 0 || height == 0 {
        return Err(RasterError::validation(format!(
            "scale target must be non-zero, got {width}x{height}"
        )));
    }
    Ok(())
}

/// Nearest-neighbour resize using 16.16 fixed-point steps.
///
/// Scaling to the current size returns a clone.
pub fn scale(img: &RImage, width: u32, height: u32) -> RasterResult<RImage> {
    check_target(width, height)?;
    if width == img.width() && height == img.height() {
        return Ok(img.clone());
    }

    let step_x = (u64::from(img.width()) << FIX_SHIFT) / u64::from(width);
    let step_y = (u64::from(img.height()) << FIX_SHIFT) / u64::from(height);
    let ch = img.channels();
    let src_w = img.width() as usize;
    let src = img.data();

    let mut out = alloc_zeroed(buffer_len(width, height, img.format())?)?;
    let columns: Vec<usize> = (0..u64::from(width))
        .map(|x| ((x * step_x) >> FIX_SHIFT) as usize * ch)
        .collect();
    for (y, row) in out.chunks_exact_mut(width as usize * ch).enumerate() {
        let sy = ((y as u64 * step_y) >> FIX_SHIFT) as usize;
        let src_row = &src[sy * src_w * ch..(sy + 1) * src_w * ch];
        for (dst, &sx) in row.chunks_exact_mut(ch).zip(&columns) {
            dst.copy_from_slice(&src_row[sx..sx + ch]);
        }
    }

    let mut scaled = RImage::from_raw(width, height, img.format(), out)?;
    scaled.background = img.background;
    Ok(scaled)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/scale.rs"]
mod tests;
