use super::*;

fn numbered(w: u32, h: u32, format: PixelFormat) -> RImage {
    let ch = format.channels();
    let mut data = Vec::new();
    for i in 0..w * h {
        let mut px = vec![i as u8, (i * 3) as u8, 7, 255];
        px.truncate(ch);
        data.extend(px);
    }
    RImage::from_raw(w, h, format, data).unwrap()
}

fn red_at(img: &RImage, x: u32, y: u32) -> u8 {
    img.data()[(y * img.width() + x) as usize * img.channels()]
}

#[test]
fn zero_rotation_is_identity() {
    let img = numbered(3, 2, PixelFormat::Rgb);
    assert_eq!(rotate(&img, 0.0).unwrap(), img);
    assert_eq!(rotate(&img, 360.0).unwrap(), img);
    assert_eq!(rotate(&img, -0.001).unwrap(), img);
}

#[test]
fn quarter_turn_is_clockwise() {
    let img = numbered(3, 2, PixelFormat::Rgb);
    let r = rotate(&img, 90.0).unwrap();
    assert_eq!((r.width(), r.height()), (2, 3));
    // Top-left of the source lands in the top-right corner.
    assert_eq!(red_at(&r, 1, 0), 0);
    assert_eq!(red_at(&r, 0, 0), 3);
    assert_eq!(red_at(&r, 1, 2), 2);
}

#[test]
fn ninety_then_two_seventy_round_trips() {
    for format in [PixelFormat::Rgb, PixelFormat::Rgba] {
        let img = numbered(5, 3, format);
        let back = rotate(&rotate(&img, 90.0).unwrap(), 270.0).unwrap();
        assert_eq!(back, img);
        let back = rotate(&rotate(&img, -90.0).unwrap(), 90.004).unwrap();
        assert_eq!(back, img);
    }
}

#[test]
fn half_turn_reverses_both_axes() {
    let img = numbered(4, 3, PixelFormat::Rgba);
    let r = rotate(&img, 180.0).unwrap();
    for y in 0..3 {
        for x in 0..4 {
            assert_eq!(red_at(&r, x, y), red_at(&img, 3 - x, 2 - y));
        }
    }
    assert_eq!(rotate(&img, -180.0).unwrap(), r);
}

#[test]
fn arbitrary_angle_grows_bounding_box_with_transparent_corners() {
    let img = RImage::from_raw(10, 10, PixelFormat::Rgb, vec![200; 300]).unwrap();
    let r = rotate(&img, 45.0).unwrap();
    assert!(r.has_alpha());
    assert_eq!((r.width(), r.height()), (15, 15));
    let corner = &r.data()[..4];
    assert_eq!(corner[3], 0);
    let mid = ((7 * 15 + 7) * 4) as usize;
    assert_eq!(&r.data()[mid..mid + 4], &[200, 200, 200, 255]);
}

#[test]
fn small_angle_keeps_content() {
    let img = RImage::from_raw(8, 4, PixelFormat::Rgb, vec![50; 96]).unwrap();
    let r = rotate(&img, 10.0).unwrap();
    assert!(r.width() >= 8 && r.height() >= 4);
    let opaque = r.data().chunks_exact(4).filter(|p| p[3] == 255).count();
    assert!(opaque.abs_diff(32) <= 8, "opaque={opaque}");
}

#[test]
fn non_finite_angles_are_rejected() {
    let img = numbered(2, 2, PixelFormat::Rgb);
    assert!(rotate(&img, f64::NAN).is_err());
    assert!(rotate(&img, f64::INFINITY).is_err());
}
