use crate::draw::line::{draw_line, operate_line};
use crate::draw::ops::Operation;
use crate::foundation::math::blend_div256;
use crate::raster::color::Color;
use crate::raster::image::RImage;

/// Bevel style drawn by [`bevel_image`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BevelKind {
    /// Dark top/left, light bottom/right.
    Sunken,
    /// No bevel.
    #[default]
    None,
    /// Light top/left, dark bottom/right.
    Raised,
    /// [`BevelKind::Raised`] with a black outer bottom/right edge.
    Raised2,
    /// [`BevelKind::Raised2`] with a second highlight line.
    Raised3,
}

/// Overwrite every pixel with an opaque `color`, or blend a translucent one into RGB.
pub fn clear_image(img: &mut RImage, color: Color) {
    if color.alpha == 255 {
        fill_image(img, color);
        return;
    }
    let ch = img.channels();
    for px in img.data_mut().chunks_exact_mut(ch) {
        px[0] = blend_div256(px[0], color.red, color.alpha);
        px[1] = blend_div256(px[1], color.green, color.alpha);
        px[2] = blend_div256(px[2], color.blue, color.alpha);
    }
}

/// Write `color`, alpha included, into every pixel.
pub fn fill_image(img: &mut RImage, color: Color) {
    let ch = img.channels();
    let px = [color.red, color.green, color.blue, color.alpha];
    for dst in img.data_mut().chunks_exact_mut(ch) {
        dst.copy_from_slice(&px[..ch]);
    }
}

/// Scale every channel by `color.alpha / 128` and add the color: `min(255, (d * alpha + c) / 128)`.
pub fn light_image(img: &mut RImage, color: Color) {
    let alpha = u32::from(color.alpha);
    let add = [color.red, color.green, color.blue].map(u32::from);
    let ch = img.channels();
    for px in img.data_mut().chunks_exact_mut(ch) {
        for (d, c) in px[..3].iter_mut().zip(add) {
            *d = ((u32::from(*d) * alpha + c) / 128).min(255) as u8;
        }
    }
}

/// Draw a 3D bevel along the edges. Images smaller than 3x3 are left alone.
pub fn bevel_image(img: &mut RImage, kind: BevelKind) {
    if img.width() < 3 || img.height() < 3 || kind == BevelKind::None {
        return;
    }
    let w = img.width().min(i32::MAX as u32) as i32;
    let h = img.height().min(i32::MAX as u32) as i32;
    let light = Color::rgb(80, 80, 80);
    let dark = Color::rgb(40, 40, 40);

    if kind == BevelKind::Sunken {
        operate_line(img, Operation::Subtract, 0, 0, w - 1, 0, dark);
        operate_line(img, Operation::Subtract, 0, 1, 0, h - 1, dark);
        operate_line(img, Operation::Add, 0, h - 1, w - 1, h - 1, light);
        operate_line(img, Operation::Add, w - 1, 0, w - 1, h - 2, light);
        return;
    }

    operate_line(img, Operation::Add, 0, 0, w - 1, 0, light);
    if kind == BevelKind::Raised3 && w > 3 {
        operate_line(img, Operation::Add, 1, 1, w - 3, 1, light);
    }
    operate_line(img, Operation::Add, 0, 1, 0, h - 1, light);
    if kind == BevelKind::Raised3 && h > 3 {
        operate_line(img, Operation::Add, 1, 2, 1, h - 3, light);
    }

    if kind == BevelKind::Raised {
        operate_line(img, Operation::Subtract, 0, h - 1, w - 1, h - 1, dark);
        operate_line(img, Operation::Subtract, w - 1, 0, w - 1, h - 2, dark);
    } else {
        operate_line(img, Operation::Subtract, 0, h - 2, w - 3, h - 2, dark);
        draw_line(img, 0, h - 1, w - 1, h - 1, Color::BLACK);
        operate_line(img, Operation::Subtract, w - 2, 0, w - 2, h - 2, dark);
        draw_line(img, w - 1, 0, w - 1, h - 2, Color::BLACK);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/paint.rs"]
mod tests;
