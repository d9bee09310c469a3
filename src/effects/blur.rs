use crate::raster::image::RImage;

/// 3x3 blur with mask `1 1 1 / 1 2 1 / 1 1 1` (sum 10) over every channel.
///
/// Only interior pixels change; the one-pixel border keeps its values.
pub fn blur_image(img: &mut RImage) {
    if img.width() < 3 || img.height() < 3 {
        return;
    }
    let (w, h, ch) = (img.width() as usize, img.height() as usize, img.channels());
    let src = img.data().to_vec();
    let stride = w * ch;
    let dst = img.data_mut();

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let center = y * stride + x * ch;
            for c in 0..ch {
                let mut acc = u32::from(src[center + c]);
                for row in [center - stride, center, center + stride] {
                    acc += u32::from(src[row - ch + c])
                        + u32::from(src[row + c])
                        + u32::from(src[row + ch + c]);
                }
                dst[center + c] = (acc / 10) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
