use super::*;

fn sample(alpha: bool) -> RImage {
    let mut img = RImage::new(3, 2, alpha).unwrap();
    for (i, b) in img.data_mut().iter_mut().enumerate() {
        *b = (i * 20) as u8;
    }
    img
}

#[test]
fn png_is_rgb_and_round_trips() {
    let img = sample(false);
    let bytes = PngEncoderRgb.encode(&img, None).unwrap();
    let back = image::load_from_memory(&bytes).unwrap();
    assert_eq!(back.color(), image::ColorType::Rgb8);
    assert_eq!(back.to_rgb8().into_raw(), img.data());
}

#[test]
fn png_title_is_a_text_chunk() {
    let bytes = PngEncoderRgb.encode(&sample(true), Some("héllo ☃")).unwrap();
    let reader = png::Decoder::new(std::io::Cursor::new(&bytes))
        .read_info()
        .unwrap();
    let info = reader.info();
    assert_eq!((info.width, info.height), (3, 2));
    assert_eq!(info.color_type, png::ColorType::Rgb);
    let text = &info.uncompressed_latin1_text;
    assert_eq!(text.len(), 1);
    assert_eq!(text[0].keyword, "Title");
    assert_eq!(text[0].text, "héllo ?");
}

#[test]
fn png_without_title_has_no_text() {
    let bytes = PngEncoderRgb.encode(&sample(false), None).unwrap();
    let reader = png::Decoder::new(std::io::Cursor::new(&bytes))
        .read_info()
        .unwrap();
    assert!(reader.info().uncompressed_latin1_text.is_empty());
}

#[test]
fn jpeg_carries_comment_and_decodes() {
    let bytes = JpegEncoderRgb.encode(&sample(false), Some("caption")).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    assert_eq!(&bytes[2..4], &[0xFF, 0xFE]);
    assert_eq!(&bytes[4..6], &9u16.to_be_bytes());
    assert_eq!(&bytes[6..13], b"caption");
    let back = image::load_from_memory(&bytes).unwrap();
    assert_eq!((back.width(), back.height()), (3, 2));
}

#[test]
fn titles_fold_to_latin1() {
    assert_eq!(latin1("café ☃"), vec![b'c', b'a', b'f', 0xE9, b' ', b'?']);
}

#[test]
fn xpm_encoder_ignores_title() {
    let img = sample(false);
    let bytes = XpmEncoder.encode(&img, Some("x")).unwrap();
    assert!(bytes.starts_with(b"/* XPM */"));
    assert_eq!(xpm::decode_xpm(&bytes).unwrap(), img);
}

#[test]
fn registry_names_are_case_insensitive() {
    let reg = EncoderRegistry::with_builtin();
    assert_eq!(reg.names(), ["JPEG", "JPG", "PNG", "XPM"]);
    assert!(reg.get("png").is_ok());
    assert!(reg.get("Jpg").is_ok());
    let err = reg.get("bmp").err().unwrap();
    assert!(matches!(err, RasterError::UnsupportedFormat(_)));
}
