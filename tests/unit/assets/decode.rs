use std::io::Cursor;

use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, Rgba, RgbaImage};

use super::*;

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

fn gif_two_frames() -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut enc = GifEncoder::new(&mut buf);
        let frames = [[255u8, 0, 0, 255], [0, 0, 255, 255]].map(|px| {
            Frame::from_parts(
                RgbaImage::from_pixel(2, 2, Rgba(px)),
                0,
                0,
                Delay::from_numer_denom_ms(100, 1),
            )
        });
        enc.encode_frames(frames).unwrap();
    }
    buf
}

fn chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = (data.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&[0, 0, 0, 0]);
    out
}

fn png_with(depth: u8, color_type: u8, extra: &[Vec<u8>]) -> Vec<u8> {
    let mut out = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    out.extend(chunk(b"IHDR", &[0, 0, 0, 1, 0, 0, 0, 1, depth, color_type, 0, 0, 0]));
    for c in extra {
        out.extend_from_slice(c);
    }
    out.extend(chunk(b"IDAT", &[]));
    out
}

#[test]
fn png_keeps_alpha_layout() {
    let rgb = image::RgbImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
    let bytes = encode(DynamicImage::ImageRgb8(rgb), ImageFormat::Png);
    let img = ImageCrateDecoder::new(ImageFormat::Png).decode(&bytes, 0).unwrap();
    assert_eq!(img.format(), PixelFormat::Rgb);
    assert_eq!(img.data(), &[1, 2, 3, 4, 5, 6]);

    let rgba = RgbaImage::from_raw(1, 1, vec![9, 8, 7, 6]).unwrap();
    let bytes = encode(DynamicImage::ImageRgba8(rgba), ImageFormat::Png);
    let img = ImageCrateDecoder::new(ImageFormat::Png).decode(&bytes, 0).unwrap();
    assert_eq!(img.format(), PixelFormat::Rgba);
    assert_eq!(img.data(), &[9, 8, 7, 6]);
}

#[test]
fn single_frame_formats_reject_other_indices() {
    let rgb = image::RgbImage::from_pixel(1, 1, image::Rgb([0, 0, 0]));
    let bytes = encode(DynamicImage::ImageRgb8(rgb), ImageFormat::Png);
    let err = ImageCrateDecoder::new(ImageFormat::Png)
        .decode(&bytes, 1)
        .unwrap_err();
    assert!(matches!(err, RasterError::BadFrameIndex { index: 1 }));
    assert!(matches!(
        XpmDecoder.decode(b"/* XPM */", 2),
        Err(RasterError::BadFrameIndex { index: 2 })
    ));
}

#[test]
fn gif_frames_are_selectable() {
    let bytes = gif_two_frames();
    let first = GifDecoder.decode(&bytes, 0).unwrap();
    let second = GifDecoder.decode(&bytes, 1).unwrap();
    assert_eq!(first.format(), PixelFormat::Rgb);
    assert_eq!(&first.data()[..3], &[255, 0, 0]);
    assert_eq!(&second.data()[..3], &[0, 0, 255]);
    assert!(matches!(
        GifDecoder.decode(&bytes, 2),
        Err(RasterError::BadFrameIndex { index: 2 })
    ));
}

fn tiff_two_pages() -> Vec<u8> {
    use tiff::encoder::{TiffEncoder, colortype};

    let mut buf = Vec::new();
    {
        let mut enc = TiffEncoder::new(Cursor::new(&mut buf)).unwrap();
        enc.write_image::<colortype::RGB8>(2, 1, &[255, 0, 0, 255, 0, 0])
            .unwrap();
        enc.write_image::<colortype::Gray8>(1, 1, &[77]).unwrap();
    }
    buf
}

#[test]
fn tiff_pages_are_selectable() {
    let bytes = tiff_two_pages();
    let first = TiffDecoder.decode(&bytes, 0).unwrap();
    assert_eq!((first.width(), first.height()), (2, 1));
    assert_eq!(first.format(), PixelFormat::Rgb);
    assert_eq!(first.data(), &[255, 0, 0, 255, 0, 0]);

    let second = TiffDecoder.decode(&bytes, 1).unwrap();
    assert_eq!((second.width(), second.height()), (1, 1));
    assert_eq!(second.data(), &[77, 77, 77]);

    assert!(matches!(
        TiffDecoder.decode(&bytes, 2),
        Err(RasterError::BadFrameIndex { index: 2 })
    ));

    let reg = DecoderRegistry::with_builtin(false);
    assert_eq!(reg.decode(&bytes, 1).unwrap().data(), &[77, 77, 77]);
}

#[test]
fn truncated_tiff_is_an_error() {
    let bytes = tiff_two_pages();
    assert!(TiffDecoder.decode(&bytes[..6], 0).is_err());
}

#[test]
fn truncated_png_is_corrupt() {
    let rgb = image::RgbImage::from_pixel(8, 8, image::Rgb([1, 2, 3]));
    let bytes = encode(DynamicImage::ImageRgb8(rgb), ImageFormat::Png);
    let err = ImageCrateDecoder::new(ImageFormat::Png)
        .decode(&bytes[..40], 0)
        .unwrap_err();
    assert_ne!(err.code(), crate::foundation::error::ErrorCode::None);
}

#[test]
fn bkgd_is_parsed_per_color_type() {
    assert_eq!(
        png_background(&png_with(8, 2, &[chunk(b"bKGD", &[0, 10, 0, 20, 0, 30])])),
        Some(Color::rgb(10, 20, 30))
    );
    assert_eq!(
        png_background(&png_with(16, 0, &[chunk(b"bKGD", &[0x80, 0x11])])),
        Some(Color::rgb(0x80, 0x80, 0x80))
    );
    assert_eq!(
        png_background(&png_with(2, 0, &[chunk(b"bKGD", &[0, 1])])),
        Some(Color::rgb(85, 85, 85))
    );
    let palette = chunk(b"PLTE", &[0, 0, 0, 200, 100, 50]);
    assert_eq!(
        png_background(&png_with(8, 3, &[palette, chunk(b"bKGD", &[1])])),
        Some(Color::rgb(200, 100, 50))
    );
    assert_eq!(png_background(&png_with(8, 2, &[])), None);
    assert_eq!(png_background(b"short"), None);
}

#[test]
fn registry_dispatches_by_signature() {
    let reg = DecoderRegistry::with_builtin(false);
    let img = reg.decode(b"P3\n1 1\n255\n10 20 30\n", 0).unwrap();
    assert_eq!(img.data(), &[10, 20, 30]);

    let err = reg.decode(b"not an image at all", 0).unwrap_err();
    assert!(matches!(err, RasterError::UnsupportedFormat(_)));

    let empty = DecoderRegistry::empty();
    assert!(matches!(
        empty.decode(b"P3\n1 1\n255\n10 20 30\n", 0),
        Err(RasterError::UnsupportedFormat(_))
    ));
}

#[test]
fn generic_fallback_handles_unsniffed_formats() {
    let rgb = image::RgbImage::from_pixel(2, 2, image::Rgb([7, 8, 9]));
    let bmp = encode(DynamicImage::ImageRgb8(rgb), ImageFormat::Bmp);
    assert!(DecoderRegistry::with_builtin(false).decode(&bmp, 0).is_err());
    let img = DecoderRegistry::with_builtin(true).decode(&bmp, 0).unwrap();
    assert_eq!((img.width(), img.height()), (2, 2));
    assert_eq!(&img.data()[..3], &[7, 8, 9]);
}

#[test]
fn registry_debug_lists_formats() {
    let text = format!("{:?}", DecoderRegistry::with_builtin(true));
    assert!(text.contains("XPM"));
    assert!(text.contains("fallback: true"));
}
