use crate::foundation::error::{RasterError, RasterResult};
use crate::foundation::math::mul_div255;
use crate::raster::color::Color;
use crate::raster::image::RImage;

/// Merge one source pixel into one destination pixel.
///
/// `dst` and `src` are 3 or 4 bytes; a 3-byte pixel is treated as opaque.
pub(crate) fn merge_pixel(dst: &mut [u8], src: &[u8], opacity: u8) {
    let src_a = src.get(3).copied().unwrap_or(255);
    let sa = mul_div255(u32::from(src_a), u32::from(opacity));
    if sa == 0 {
        return;
    }
    let dst_a = dst.get(3).copied().map_or(255, u32::from);
    let a = sa + mul_div255(dst_a, 255 - sa);

    if sa == a {
        dst[..3].copy_from_slice(&src[..3]);
    } else {
        for (d, &s) in dst[..3].iter_mut().zip(&src[..3]) {
            let v = u32::from(*d) * (a - sa) + u32::from(s) * sa;
            *d = ((v + a / 2) / a) as u8;
        }
    }
    if let Some(da) = dst.get_mut(3) {
        *da = a as u8;
    }
}

/// Porter-Duff style merge of `src` into `dst` with an extra `opacity` (`0..=255`).
///
/// Both buffers must describe the same number of pixels. RGB destinations are treated as
/// opaque; RGB sources (`src_has_alpha == false`) as fully opaque.
pub fn combine_alpha(
    dst: &mut [u8],
    dst_has_alpha: bool,
    src: &[u8],
    src_has_alpha: bool,
    opacity: u8,
) -> RasterResult<()> {
    let dst_ch = if dst_has_alpha { 4 } else { 3 };
    let src_ch = if src_has_alpha { 4 } else { 3 };
    if !dst.len().is_multiple_of(dst_ch)
        || !src.len().is_multiple_of(src_ch)
        || dst.len() / dst_ch != src.len() / src_ch
    {
        return Err(RasterError::validation(
            "combine_alpha expects buffers with the same pixel count",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(dst_ch).zip(src.chunks_exact(src_ch)) {
        merge_pixel(d, s, opacity);
    }
    Ok(())
}

/// Composite `src` over `dst`; both images must have the same size.
pub fn combine_images(dst: &mut RImage, src: &RImage) -> RasterResult<()> {
    combine_with_opaqueness(dst, src, 255)
}

/// Composite `src` over `dst` scaled by `opacity`; both images must have the same size.
pub fn combine_with_opaqueness(dst: &mut RImage, src: &RImage, opacity: u8) -> RasterResult<()> {
    if dst.width() != src.width() || dst.height() != src.height() {
        return Err(RasterError::invalid_region(format!(
            "cannot combine {}x{} onto {}x{}",
            src.width(),
            src.height(),
            dst.width(),
            dst.height()
        )));
    }
    let has_alpha = dst.has_alpha();
    combine_alpha(
        dst.data_mut(),
        has_alpha,
        src.data(),
        src.has_alpha(),
        opacity,
    )
}

/// Source/destination rectangle after clipping to both images.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Area {
    pub(crate) sx: usize,
    pub(crate) sy: usize,
    pub(crate) dx: usize,
    pub(crate) dy: usize,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn clip_area(
    dst: &RImage,
    src: &RImage,
    sx: i32,
    sy: i32,
    width: u32,
    height: u32,
    dx: i32,
    dy: i32,
) -> Option<Area> {
    let (mut sx, mut sy) = (i64::from(sx), i64::from(sy));
    let (mut dx, mut dy) = (i64::from(dx), i64::from(dy));
    let (mut w, mut h) = (i64::from(width), i64::from(height));

    for (s, d, len) in [(&mut sx, &mut dx, &mut w), (&mut sy, &mut dy, &mut h)] {
        if *s < 0 {
            *len += *s;
            *d -= *s;
            *s = 0;
        }
        if *d < 0 {
            *len += *d;
            *s -= *d;
            *d = 0;
        }
    }
    w = w
        .min(i64::from(src.width()) - sx)
        .min(i64::from(dst.width()) - dx);
    h = h
        .min(i64::from(src.height()) - sy)
        .min(i64::from(dst.height()) - dy);
    if w <= 0 || h <= 0 {
        return None;
    }
    Some(Area {
        sx: sx as usize,
        sy: sy as usize,
        dx: dx as usize,
        dy: dy as usize,
        width: w as usize,
        height: h as usize,
    })
}

fn for_each_area_row(
    dst: &mut RImage,
    src: &RImage,
    area: Area,
    mut f: impl FnMut(&mut [u8], &[u8]),
) {
    let (dst_ch, src_ch) = (dst.channels(), src.channels());
    let (dst_w, src_w) = (dst.width() as usize, src.width() as usize);
    let src_data = src.data();
    let dst_data = dst.data_mut();
    for row in 0..area.height {
        let s0 = ((area.sy + row) * src_w + area.sx) * src_ch;
        let d0 = ((area.dy + row) * dst_w + area.dx) * dst_ch;
        f(
            &mut dst_data[d0..d0 + area.width * dst_ch],
            &src_data[s0..s0 + area.width * src_ch],
        );
    }
}

/// Composite the `width x height` block at `(sx, sy)` of `src` onto `dst` at `(dx, dy)`.
///
/// The rectangle is clipped to both images.
#[allow(clippy::too_many_arguments)]
pub fn combine_area(
    dst: &mut RImage,
    src: &RImage,
    sx: i32,
    sy: i32,
    width: u32,
    height: u32,
    dx: i32,
    dy: i32,
) {
    combine_area_with_opaqueness(dst, src, sx, sy, width, height, dx, dy, 255);
}

/// [`combine_area`] with the source scaled by `opacity`.
#[allow(clippy::too_many_arguments)]
pub fn combine_area_with_opaqueness(
    dst: &mut RImage,
    src: &RImage,
    sx: i32,
    sy: i32,
    width: u32,
    height: u32,
    dx: i32,
    dy: i32,
    opacity: u8,
) {
    let Some(area) = clip_area(dst, src, sx, sy, width, height, dx, dy) else {
        return;
    };
    let (dst_ch, src_ch) = (dst.channels(), src.channels());
    for_each_area_row(dst, src, area, |d, s| {
        for (dp, sp) in d.chunks_exact_mut(dst_ch).zip(s.chunks_exact(src_ch)) {
            merge_pixel(dp, sp, opacity);
        }
    });
}

/// Copy a block without blending. RGB sources write alpha 255 into RGBA destinations.
#[allow(clippy::too_many_arguments)]
pub fn copy_area(
    dst: &mut RImage,
    src: &RImage,
    sx: i32,
    sy: i32,
    width: u32,
    height: u32,
    dx: i32,
    dy: i32,
) {
    let Some(area) = clip_area(dst, src, sx, sy, width, height, dx, dy) else {
        return;
    };
    let (dst_ch, src_ch) = (dst.channels(), src.channels());
    for_each_area_row(dst, src, area, |d, s| {
        if dst_ch == src_ch {
            d.copy_from_slice(s);
            return;
        }
        for (dp, sp) in d.chunks_exact_mut(dst_ch).zip(s.chunks_exact(src_ch)) {
            dp[..3].copy_from_slice(&sp[..3]);
            if dst_ch == 4 {
                dp[3] = 255;
            }
        }
    });
}

/// Flatten an RGBA image onto `color` through its per-pixel alpha. RGB images are unchanged.
pub fn combine_with_color(img: &mut RImage, color: Color) {
    if !img.has_alpha() {
        return;
    }
    let bg = [color.red, color.green, color.blue];
    for px in img.data_mut().chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        for (d, b) in px[..3].iter_mut().zip(bg) {
            *d = (mul_div255(u32::from(*d), a) + mul_div255(u32::from(b), 255 - a)) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
