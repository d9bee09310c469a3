use super::*;
use crate::draw::pixel::get_pixel;
use crate::raster::image::PixelFormat;

#[test]
fn clear_with_opaque_color_sets_alpha() {
    let mut img = RImage::new(2, 2, true).unwrap();
    clear_image(&mut img, Color::rgb(1, 2, 3));
    assert_eq!(img.data(), [1, 2, 3, 255].repeat(4).as_slice());
}

#[test]
fn clear_with_translucent_color_blends_rgb_only() {
    let mut img = RImage::from_raw(1, 1, PixelFormat::Rgba, vec![100, 100, 100, 7]).unwrap();
    clear_image(&mut img, Color::rgba(200, 0, 100, 128));
    assert_eq!(img.data(), &[149, 49, 99, 7]);
}

#[test]
fn fill_writes_alpha() {
    let mut img = RImage::new(3, 1, true).unwrap();
    fill_image(&mut img, Color::rgba(5, 6, 7, 8));
    assert_eq!(img.data(), [5, 6, 7, 8].repeat(3).as_slice());

    let mut rgb = RImage::new(2, 1, false).unwrap();
    fill_image(&mut rgb, Color::rgba(5, 6, 7, 8));
    assert_eq!(rgb.data(), &[5, 6, 7, 5, 6, 7]);
}

#[test]
fn light_scales_and_saturates() {
    let mut img = RImage::from_raw(1, 1, PixelFormat::Rgb, vec![100, 200, 10]).unwrap();
    light_image(&mut img, Color::rgba(0, 0, 128, 192));
    assert_eq!(img.data(), &[150, 255, 16]);
}

#[test]
fn raised_bevel_lightens_top_left_and_darkens_bottom_right() {
    let mut img = RImage::from_raw(4, 4, PixelFormat::Rgb, vec![100; 48]).unwrap();
    bevel_image(&mut img, BevelKind::Raised);
    assert_eq!(get_pixel(&img, 1, 0).unwrap().red, 180);
    assert_eq!(get_pixel(&img, 0, 2).unwrap().red, 180);
    assert_eq!(get_pixel(&img, 2, 3).unwrap().red, 60);
    assert_eq!(get_pixel(&img, 3, 1).unwrap().red, 60);
    assert_eq!(get_pixel(&img, 1, 1).unwrap().red, 100);
}

#[test]
fn raised2_draws_black_outer_edge() {
    let mut img = RImage::from_raw(4, 4, PixelFormat::Rgb, vec![100; 48]).unwrap();
    bevel_image(&mut img, BevelKind::Raised2);
    assert_eq!(get_pixel(&img, 2, 3).unwrap(), Color::BLACK);
    assert_eq!(get_pixel(&img, 3, 1).unwrap(), Color::BLACK);
    assert_eq!(get_pixel(&img, 1, 2).unwrap().red, 60);
}

#[test]
fn sunken_bevel_keeps_alpha() {
    let mut img = RImage::from_raw(3, 3, PixelFormat::Rgba, [100, 100, 100, 200].repeat(9))
        .unwrap();
    bevel_image(&mut img, BevelKind::Sunken);
    assert_eq!(get_pixel(&img, 1, 0).unwrap(), Color::rgba(60, 60, 60, 200));
    assert_eq!(get_pixel(&img, 1, 2).unwrap(), Color::rgba(180, 180, 180, 200));
}

#[test]
fn small_images_and_none_are_untouched() {
    let mut img = RImage::from_raw(2, 2, PixelFormat::Rgb, vec![100; 12]).unwrap();
    bevel_image(&mut img, BevelKind::Raised);
    assert_eq!(img.data(), &[100; 12]);
    let mut img = RImage::from_raw(3, 3, PixelFormat::Rgb, vec![100; 27]).unwrap();
    bevel_image(&mut img, BevelKind::None);
    assert_eq!(img.data(), &[100; 27]);
}
