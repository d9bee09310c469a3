use std::sync::Arc;

use crate::foundation::error::{RasterError, RasterResult};
use crate::raster::color::Color;

/// Channel layout of an [`RImage`] buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 3 bytes per pixel: R, G, B.
    Rgb,
    /// 4 bytes per pixel: R, G, B, A (straight alpha).
    Rgba,
}

impl PixelFormat {
    /// Format for an image with or without an alpha channel.
    pub fn with_alpha(alpha: bool) -> Self {
        if alpha { Self::Rgba } else { Self::Rgb }
    }

    /// Bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Whether the format carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        self == Self::Rgba
    }
}

/// Raster image: dimensions, pixel format and a shared, copy-on-write byte buffer.
///
/// The buffer always holds exactly `width * height * channels` bytes in R,G,B[,A] order and
/// both dimensions are non-zero.
///
/// Handles are cheap to clone. Cloning (or [`RImage::retain`]) shares the buffer; the first
/// mutation through [`RImage::data_mut`] on a shared buffer copies it, so a clone never observes
/// writes made through another handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RImage {
    width: u32,
    height: u32,
    format: PixelFormat,
    /// Default background, set by codecs that define one (e.g. PNG `bKGD`).
    pub background: Color,
    data: Arc<Vec<u8>>,
}

pub(crate) fn buffer_len(width: u32, height: u32, format: PixelFormat) -> RasterResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(format.channels()))
        .ok_or_else(|| {
            RasterError::out_of_memory(format!("{width}x{height} image size overflows"))
        })
}

pub(crate) fn alloc_zeroed(len: usize) -> RasterResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| RasterError::out_of_memory(format!("allocating {len} bytes: {e}")))?;
    buf.resize(len, 0);
    Ok(buf)
}

fn check_dims(width: u32, height: u32) -> RasterResult<()> {
    if width == 0 || height == 0 {
        return Err(RasterError::validation(format!(
            "image dimensions must be non-zero, got {width}x{height}"
        )));
    }
    Ok(())
}

impl RImage {
    /// Create a zero-filled image.
    pub fn new(width: u32, height: u32, alpha: bool) -> RasterResult<Self> {
        check_dims(width, height)?;
        let format = PixelFormat::with_alpha(alpha);
        let data = alloc_zeroed(buffer_len(width, height, format)?)?;
        Ok(Self {
            width,
            height,
            format,
            background: Color::default(),
            data: Arc::new(data),
        })
    }

    /// Wrap an existing buffer, validating its length.
    pub fn from_raw(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> RasterResult<Self> {
        check_dims(width, height)?;
        let expected = buffer_len(width, height, format)?;
        if data.len() != expected {
            return Err(RasterError::validation(format!(
                "buffer length {} does not match {width}x{height} {format:?} ({expected})",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            background: Color::default(),
            data: Arc::new(data),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Whether the buffer has an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.format.has_alpha()
    }

    /// Bytes per pixel.
    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// `width * height`.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable pixel bytes; copies the buffer first if another handle shares it.
    pub fn data_mut(&mut self) -> &mut [u8] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Take the pixel bytes, copying only when the buffer is shared.
    pub fn into_raw(self) -> Vec<u8> {
        Arc::unwrap_or_clone(self.data)
    }

    /// Byte offset of pixel `(x, y)`, or `None` outside the image.
    pub fn pixel_offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * self.channels())
    }

    /// Another handle on the same buffer.
    pub fn retain(&self) -> Self {
        self.clone()
    }

    /// Drop this handle; the buffer is freed with its last handle.
    pub fn release(self) {
        drop(self);
    }

    /// Number of handles currently sharing the buffer.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.data)
    }

    /// Independent copy with its own buffer.
    pub fn deep_copy(&self) -> Self {
        Self {
            data: Arc::new(self.data.as_ref().clone()),
            ..self.clone()
        }
    }

    /// Crop the rectangle `(x, y, width, height)`, which must lie inside the image.
    pub fn sub_image(&self, x: u32, y: u32, width: u32, height: u32) -> RasterResult<Self> {
        let fits = width > 0
            && height > 0
            && x.checked_add(width).is_some_and(|r| r <= self.width)
            && y.checked_add(height).is_some_and(|b| b <= self.height);
        if !fits {
            return Err(RasterError::invalid_region(format!(
                "{width}x{height}+{x}+{y} is outside {}x{}",
                self.width, self.height
            )));
        }

        let ch = self.channels();
        let row_len = width as usize * ch;
        let mut out = alloc_zeroed(buffer_len(width, height, self.format)?)?;
        for (row, dst) in out.chunks_exact_mut(row_len).enumerate() {
            let start = ((y as usize + row) * self.width as usize + x as usize) * ch;
            dst.copy_from_slice(&self.data[start..start + row_len]);
        }
        let mut img = Self::from_raw(width, height, self.format, out)?;
        img.background = self.background;
        Ok(img)
    }

    /// Convert to `format`. Adding alpha makes every pixel opaque; removing it drops it.
    pub fn with_format(&self, format: PixelFormat) -> RasterResult<Self> {
        if format == self.format {
            return Ok(self.clone());
        }
        let mut out = alloc_zeroed(buffer_len(self.width, self.height, format)?)?;
        let (src_ch, dst_ch) = (self.channels(), format.channels());
        for (src, dst) in self
            .data
            .chunks_exact(src_ch)
            .zip(out.chunks_exact_mut(dst_ch))
        {
            dst[..3].copy_from_slice(&src[..3]);
            if dst_ch == 4 {
                dst[3] = 255;
            }
        }
        let mut img = Self::from_raw(self.width, self.height, format, out)?;
        img.background = self.background;
        Ok(img)
    }

    /// Pixel at byte `offset` as a color; RGB images report alpha 255.
    pub(crate) fn color_at(&self, offset: usize) -> Color {
        let p = &self.data[offset..offset + self.channels()];
        Color::rgba(p[0], p[1], p[2], if self.has_alpha() { p[3] } else { 255 })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/image.rs"]
mod tests;
