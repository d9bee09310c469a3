use std::collections::HashMap;
use std::fmt;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::assets::xpm;
use crate::foundation::error::{RasterError, RasterResult};
use crate::raster::image::RImage;

/// Quality used for JPEG output.
pub const JPEG_QUALITY: u8 = 85;

/// Serializes an [`RImage`] into one container format.
pub trait Encoder: Send + Sync {
    /// Encode `img`, embedding `title` where the format has room for it.
    fn encode(&self, img: &RImage, title: Option<&str>) -> RasterResult<Vec<u8>>;
}

/// Packed RGB bytes of `img`, dropping alpha.
fn rgb_bytes(img: &RImage) -> Vec<u8> {
    if !img.has_alpha() {
        return img.data().to_vec();
    }
    img.data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect()
}

/// Title text restricted to Latin-1, as text chunks and comments expect.
fn latin1(title: &str) -> Vec<u8> {
    title
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// Normalized XPM.
#[derive(Clone, Copy, Debug, Default)]
pub struct XpmEncoder;

impl Encoder for XpmEncoder {
    fn encode(&self, img: &RImage, _title: Option<&str>) -> RasterResult<Vec<u8>> {
        Ok(xpm::encode_xpm(img)?.into_bytes())
    }
}

/// 8-bit RGB PNG with an optional `Title` text chunk.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngEncoderRgb;

impl Encoder for PngEncoderRgb {
    fn encode(&self, img: &RImage, title: Option<&str>) -> RasterResult<Vec<u8>> {
        let mut buf = Vec::new();
        let mut enc = png::Encoder::new(&mut buf, img.width(), img.height());
        enc.set_color(png::ColorType::Rgb);
        enc.set_depth(png::BitDepth::Eight);
        if let Some(title) = title {
            let text = latin1(title).into_iter().map(char::from).collect();
            enc.add_text_chunk("Title".to_string(), text)
                .map_err(RasterError::from_png)?;
        }
        let mut writer = enc.write_header().map_err(RasterError::from_png)?;
        writer
            .write_image_data(&rgb_bytes(img))
            .map_err(RasterError::from_png)?;
        writer.finish().map_err(RasterError::from_png)?;
        Ok(buf)
    }
}

/// Baseline JPEG at [`JPEG_QUALITY`] with an optional comment marker.
#[derive(Clone, Copy, Debug, Default)]
pub struct JpegEncoderRgb;

impl Encoder for JpegEncoderRgb {
    fn encode(&self, img: &RImage, title: Option<&str>) -> RasterResult<Vec<u8>> {
        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
            .write_image(
                &rgb_bytes(img),
                img.width(),
                img.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(RasterError::from_image)?;

        if let Some(title) = title {
            let mut text = latin1(title);
            text.truncate(usize::from(u16::MAX) - 2);
            let mut marker = vec![0xFF, 0xFE];
            marker.extend_from_slice(&((text.len() + 2) as u16).to_be_bytes());
            marker.extend(text);
            // COM goes right after SOI.
            let tail = buf.split_off(2);
            buf.extend(marker);
            buf.extend(tail);
        }
        Ok(buf)
    }
}

/// Encoders keyed by upper-case format name.
pub struct EncoderRegistry {
    encoders: HashMap<String, Box<dyn Encoder>>,
}

impl fmt::Debug for EncoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncoderRegistry")
            .field("formats", &self.names())
            .finish()
    }
}

impl Default for EncoderRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl EncoderRegistry {
    /// Registry with `XPM`, `PNG` and `JPEG` (alias `JPG`).
    pub fn with_builtin() -> Self {
        let mut reg = Self {
            encoders: HashMap::new(),
        };
        reg.register("XPM", Box::new(XpmEncoder));
        reg.register("PNG", Box::new(PngEncoderRgb));
        reg.register("JPEG", Box::new(JpegEncoderRgb));
        reg.register("JPG", Box::new(JpegEncoderRgb));
        reg
    }

    /// Install (or replace) the encoder for a case-insensitive format name.
    pub fn register(&mut self, name: &str, encoder: Box<dyn Encoder>) {
        self.encoders.insert(name.to_ascii_uppercase(), encoder);
    }

    /// Encoder for a case-insensitive format name.
    pub fn get(&self, name: &str) -> RasterResult<&dyn Encoder> {
        self.encoders
            .get(&name.to_ascii_uppercase())
            .map(|e| &**e)
            .ok_or_else(|| RasterError::unsupported(format!("no encoder for '{name}'")))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.encoders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
