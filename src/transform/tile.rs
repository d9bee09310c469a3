use crate::effects::composite::combine_area;
use crate::effects::paint::clear_image;
use crate::foundation::error::RasterResult;
use crate::raster::color::Color;
use crate::raster::image::{RImage, alloc_zeroed, buffer_len};
use crate::transform::scale::check_target;

/// Repeat `tile` to cover a `width x height` image of the same format.
pub fn make_tiled(tile: &RImage, width: u32, height: u32) -> RasterResult<RImage> {
    check_target(width, height)?;
    let ch = tile.channels();
    let (tw, th) = (tile.width() as usize, tile.height() as usize);
    let src = tile.data();

    let mut out = alloc_zeroed(buffer_len(width, height, tile.format())?)?;
    for (y, row) in out.chunks_exact_mut(width as usize * ch).enumerate() {
        let src_row = &src[(y % th) * tw * ch..(y % th + 1) * tw * ch];
        for (x, px) in row.chunks_exact_mut(ch).enumerate() {
            let s = (x % tw) * ch;
            px.copy_from_slice(&src_row[s..s + ch]);
        }
    }
    let mut tiled = RImage::from_raw(width, height, tile.format(), out)?;
    tiled.background = tile.background;
    Ok(tiled)
}

/// Composite `img` centered on an opaque `width x height` RGB canvas filled with `color`.
///
/// Images larger than the canvas are cropped around their center.
pub fn make_centered(img: &RImage, width: u32, height: u32, color: Color) -> RasterResult<RImage> {
    check_target(width, height)?;
    let mut canvas = RImage::new(width, height, false)?;
    clear_image(&mut canvas, Color { alpha: 255, ..color });

    let offset = |outer: u32, inner: u32| ((i64::from(outer) - i64::from(inner)) / 2) as i32;
    combine_area(
        &mut canvas,
        img,
        0,
        0,
        img.width(),
        img.height(),
        offset(width, img.width()),
        offset(height, img.height()),
    );
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/tile.rs"]
mod tests;
