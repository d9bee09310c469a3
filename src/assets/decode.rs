use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;

use image::{AnimationDecoder, DynamicImage, ImageFormat};

use crate::assets::format::{FileFormat, sniff};
use crate::assets::xpm;
use crate::foundation::error::{RasterError, RasterResult};
use crate::raster::color::Color;
use crate::raster::image::{PixelFormat, RImage};

/// Turns the bytes of one container into an [`RImage`].
///
/// Decoders hold no engine state. Single-frame decoders reject every `frame_index` but `0` with
/// [`RasterError::BadFrameIndex`].
pub trait Decoder: Send + Sync {
    /// Decode frame `frame_index` of `bytes`.
    fn decode(&self, bytes: &[u8], frame_index: usize) -> RasterResult<RImage>;
}

fn single_frame(frame_index: usize) -> RasterResult<()> {
    if frame_index != 0 {
        return Err(RasterError::BadFrameIndex { index: frame_index });
    }
    Ok(())
}

/// Convert a decoded `image` buffer, keeping an alpha channel only when the source has one.
pub(crate) fn from_dynamic(img: DynamicImage) -> RasterResult<RImage> {
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(RasterError::corrupt(format!(
            "decoded image has empty size {width}x{height}"
        )));
    }
    if img.color().has_alpha() {
        RImage::from_raw(width, height, PixelFormat::Rgba, img.into_rgba8().into_raw())
    } else {
        RImage::from_raw(width, height, PixelFormat::Rgb, img.into_rgb8().into_raw())
    }
}

/// Normalized XPM text.
#[derive(Clone, Copy, Debug, Default)]
pub struct XpmDecoder;

impl Decoder for XpmDecoder {
    fn decode(&self, bytes: &[u8], frame_index: usize) -> RasterResult<RImage> {
        single_frame(frame_index)?;
        xpm::decode_xpm(bytes)
    }
}

/// Single-frame formats handled by the `image` crate.
#[derive(Clone, Copy, Debug)]
pub struct ImageCrateDecoder {
    format: ImageFormat,
}

impl ImageCrateDecoder {
    /// Decoder for one `image` crate format.
    pub fn new(format: ImageFormat) -> Self {
        Self { format }
    }
}

impl Decoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8], frame_index: usize) -> RasterResult<RImage> {
        single_frame(frame_index)?;
        let dyn_img = image::load_from_memory_with_format(bytes, self.format)
            .map_err(RasterError::from_image)?;
        let mut img = from_dynamic(dyn_img)?;
        if self.format == ImageFormat::Png
            && let Some(bg) = png_background(bytes)
        {
            img.background = bg;
        }
        Ok(img)
    }
}

/// GIF, honoring the frame index. Frames are composited onto the logical screen.
#[derive(Clone, Copy, Debug, Default)]
pub struct GifDecoder;

impl Decoder for GifDecoder {
    fn decode(&self, bytes: &[u8], frame_index: usize) -> RasterResult<RImage> {
        let decoder = image::codecs::gif::GifDecoder::new(Cursor::new(bytes))
            .map_err(RasterError::from_image)?;
        let frame = decoder
            .into_frames()
            .nth(frame_index)
            .ok_or(RasterError::BadFrameIndex { index: frame_index })?
            .map_err(RasterError::from_image)?;
        let rgba = DynamicImage::ImageRgba8(frame.into_buffer());
        let opaque = rgba.as_bytes().chunks_exact(4).all(|px| px[3] == 255);
        if opaque {
            from_dynamic(DynamicImage::ImageRgb8(rgba.into_rgb8()))
        } else {
            from_dynamic(rgba)
        }
    }
}

/// TIFF, honoring the image file directory index.
#[derive(Clone, Copy, Debug, Default)]
pub struct TiffDecoder;

impl Decoder for TiffDecoder {
    fn decode(&self, bytes: &[u8], frame_index: usize) -> RasterResult<RImage> {
        use tiff::ColorType as Ct;
        use tiff::decoder::DecodingResult;

        let mut dec =
            tiff::decoder::Decoder::new(Cursor::new(bytes)).map_err(RasterError::from_tiff)?;
        if frame_index != 0 {
            dec.seek_to_image(frame_index).map_err(|e| match e {
                tiff::TiffError::FormatError(
                    tiff::TiffFormatError::ImageFileDirectoryNotFound,
                ) => RasterError::BadFrameIndex { index: frame_index },
                e => RasterError::from_tiff(e),
            })?;
        }
        let (width, height) = dec.dimensions().map_err(RasterError::from_tiff)?;
        let color = dec.colortype().map_err(RasterError::from_tiff)?;
        let samples = match dec.read_image().map_err(RasterError::from_tiff)? {
            DecodingResult::U8(v) => v,
            DecodingResult::U16(v) => v.into_iter().map(|s| (s >> 8) as u8).collect(),
            _ => {
                return Err(RasterError::unsupported(format!(
                    "tiff sample type for {color:?}"
                )));
            }
        };
        match color {
            Ct::Gray(8 | 16) => {
                let rgb = samples.iter().flat_map(|&g| [g, g, g]).collect();
                RImage::from_raw(width, height, PixelFormat::Rgb, rgb)
            }
            Ct::GrayA(8 | 16) => {
                let rgba = samples
                    .chunks_exact(2)
                    .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                    .collect();
                RImage::from_raw(width, height, PixelFormat::Rgba, rgba)
            }
            Ct::RGB(8 | 16) => RImage::from_raw(width, height, PixelFormat::Rgb, samples),
            Ct::RGBA(8 | 16) => RImage::from_raw(width, height, PixelFormat::Rgba, samples),
            other => Err(RasterError::unsupported(format!("tiff color type {other:?}"))),
        }
    }
}

/// Let the `image` crate guess the container. Used for unrecognized signatures when enabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericDecoder;

impl Decoder for GenericDecoder {
    fn decode(&self, bytes: &[u8], frame_index: usize) -> RasterResult<RImage> {
        single_frame(frame_index)?;
        let dyn_img = image::load_from_memory(bytes).map_err(RasterError::from_image)?;
        from_dynamic(dyn_img)
    }
}

fn be_u32(b: &[u8]) -> Option<u32> {
    Some(u32::from_be_bytes(b.get(..4)?.try_into().ok()?))
}

fn be_u16(b: &[u8], at: usize) -> Option<u16> {
    Some(u16::from_be_bytes(b.get(at..at + 2)?.try_into().ok()?))
}

fn scale_sample(v: u16, depth: u8) -> u8 {
    match depth {
        16 => (v >> 8) as u8,
        1 | 2 | 4 => {
            let max = (1u32 << depth) - 1;
            ((u32::from(v).min(max) * 255) / max) as u8
        }
        _ => v.min(255) as u8,
    }
}

/// Read the `bKGD` default background of a PNG, if any.
pub(crate) fn png_background(bytes: &[u8]) -> Option<Color> {
    let mut rest = bytes.get(8..)?;
    let mut depth = 8;
    let mut color_type = 0;
    let mut palette: &[u8] = &[];

    while rest.len() >= 12 {
        let len = be_u32(rest)? as usize;
        let kind = rest.get(4..8)?;
        let data = rest.get(8..8usize.checked_add(len)?)?;
        match kind {
            b"IHDR" if data.len() >= 10 => {
                depth = data[8];
                color_type = data[9];
            }
            b"PLTE" => palette = data,
            b"bKGD" => {
                return match color_type {
                    0 | 4 => {
                        let g = scale_sample(be_u16(data, 0)?, depth);
                        Some(Color::rgb(g, g, g))
                    }
                    2 | 6 => Some(Color::rgb(
                        scale_sample(be_u16(data, 0)?, depth),
                        scale_sample(be_u16(data, 2)?, depth),
                        scale_sample(be_u16(data, 4)?, depth),
                    )),
                    3 => {
                        let i = usize::from(*data.first()?) * 3;
                        let rgb = palette.get(i..i + 3)?;
                        Some(Color::rgb(rgb[0], rgb[1], rgb[2]))
                    }
                    _ => None,
                };
            }
            b"IDAT" | b"IEND" => return None,
            _ => {}
        }
        rest = rest.get(12 + len..)?;
    }
    None
}

/// Decoders keyed by [`FileFormat`], plus an optional generic fallback.
pub struct DecoderRegistry {
    decoders: HashMap<FileFormat, Box<dyn Decoder>>,
    fallback: Option<Box<dyn Decoder>>,
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formats: Vec<_> = self.decoders.keys().map(|k| k.name()).collect();
        formats.sort_unstable();
        f.debug_struct("DecoderRegistry")
            .field("formats", &formats)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

impl DecoderRegistry {
    /// Registry without any decoder.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
            fallback: None,
        }
    }

    /// Registry with a decoder for every [`FileFormat`].
    pub fn with_builtin(generic_fallback: bool) -> Self {
        let mut reg = Self::empty();
        reg.register(FileFormat::Xpm, Box::new(XpmDecoder));
        reg.register(FileFormat::Gif, Box::new(GifDecoder));
        reg.register(FileFormat::Tiff, Box::new(TiffDecoder));
        for (kind, format) in [
            (FileFormat::Png, ImageFormat::Png),
            (FileFormat::Ppm, ImageFormat::Pnm),
            (FileFormat::Jpeg, ImageFormat::Jpeg),
            (FileFormat::Webp, ImageFormat::WebP),
        ] {
            reg.register(kind, Box::new(ImageCrateDecoder::new(format)));
        }
        if generic_fallback {
            reg.fallback = Some(Box::new(GenericDecoder));
        }
        reg
    }

    /// Install (or replace) the decoder for `format`.
    pub fn register(&mut self, format: FileFormat, decoder: Box<dyn Decoder>) {
        self.decoders.insert(format, decoder);
    }

    /// Decoder registered for `format`.
    pub fn get(&self, format: FileFormat) -> Option<&dyn Decoder> {
        self.decoders.get(&format).map(|d| &**d)
    }

    /// Sniff `bytes` and run the matching decoder.
    pub fn decode(&self, bytes: &[u8], frame_index: usize) -> RasterResult<RImage> {
        let decoder = match sniff(bytes) {
            Some(format) => self
                .get(format)
                .ok_or_else(|| RasterError::unsupported(format!("no decoder for {format}")))?,
            None => self
                .fallback
                .as_deref()
                .ok_or_else(|| RasterError::unsupported("unknown file signature"))?,
        };
        decoder.decode(bytes, frame_index)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
