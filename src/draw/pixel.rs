use crate::draw::line::{CoordinateMode, Point};
use crate::draw::ops::{self, Operation};
use crate::foundation::error::{RasterError, RasterResult};
use crate::raster::color::Color;
use crate::raster::image::RImage;

/// Read pixel `(x, y)`. RGB images report alpha 255.
pub fn get_pixel(img: &RImage, x: i32, y: i32) -> RasterResult<Color> {
    let ofs = img
        .pixel_offset(x, y)
        .ok_or(RasterError::OutOfBounds { x, y })?;
    Ok(img.color_at(ofs))
}

/// Blend `color` into pixel `(x, y)`; no-op outside the image.
pub fn put_pixel(img: &mut RImage, x: i32, y: i32, color: Color) {
    operate_pixel(img, Operation::Normal, x, y, color);
}

/// Apply `op` to pixel `(x, y)`; no-op outside the image.
pub fn operate_pixel(img: &mut RImage, op: Operation, x: i32, y: i32, color: Color) {
    let Some(ofs) = img.pixel_offset(x, y) else {
        return;
    };
    let ch = img.channels();
    ops::apply(&mut img.data_mut()[ofs..ofs + ch], op, color);
}

/// [`put_pixel`] for every point.
pub fn put_pixels(img: &mut RImage, points: &[Point], mode: CoordinateMode, color: Color) {
    operate_pixels(img, Operation::Normal, points, mode, color);
}

/// [`operate_pixel`] for every point. Relative points are offsets from the previous one.
pub fn operate_pixels(
    img: &mut RImage,
    op: Operation,
    points: &[Point],
    mode: CoordinateMode,
    color: Color,
) {
    for p in mode.resolve(points) {
        operate_pixel(img, op, p.x, p.y, color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/pixel.rs"]
mod tests;
