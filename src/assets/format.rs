use std::fmt;

/// Number of leading bytes inspected when sniffing a container.
pub const SNIFF_LEN: usize = 32;

/// Container kinds recognized by [`sniff`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// X PixMap text.
    Xpm,
    /// TIFF, either byte order.
    Tiff,
    /// PNG.
    Png,
    /// Netpbm (PBM, PGM, PPM; ASCII or raw).
    Ppm,
    /// JPEG/JFIF.
    Jpeg,
    /// GIF87a or GIF89a.
    Gif,
    /// RIFF WebP (lossy, lossless or extended).
    Webp,
}

impl FileFormat {
    /// Every sniffable format.
    pub const ALL: [FileFormat; 7] = [
        Self::Xpm,
        Self::Tiff,
        Self::Png,
        Self::Ppm,
        Self::Jpeg,
        Self::Gif,
        Self::Webp,
    ];

    /// Upper-case name reported by format queries.
    pub fn name(self) -> &'static str {
        match self {
            Self::Xpm => "XPM",
            Self::Tiff => "TIFF",
            Self::Png => "PNG",
            Self::Ppm => "PPM",
            Self::Jpeg => "JPEG",
            Self::Gif => "GIF",
            Self::Webp => "WEBP",
        }
    }

    /// Frames a container of this kind may hold beyond the first.
    pub fn is_multi_frame(self) -> bool {
        matches!(self, Self::Gif | Self::Tiff)
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Names of the formats the loader understands, including the `PNM` family alias.
pub fn supported_formats() -> &'static [&'static str] {
    &["XPM", "PNM", "PPM", "TIFF", "PNG", "JPEG", "GIF", "WEBP"]
}

/// Identify a container from its first bytes.
///
/// Only the first [`SNIFF_LEN`] bytes are looked at; shorter inputs are matched on what is
/// available.
pub fn sniff(bytes: &[u8]) -> Option<FileFormat> {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];

    if head.starts_with(b"/* XPM */") {
        return Some(FileFormat::Xpm);
    }
    if head.starts_with(b"II*\0") || head.starts_with(b"MM\0*") {
        return Some(FileFormat::Tiff);
    }
    if head.starts_with(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]) {
        return Some(FileFormat::Png);
    }
    if let [b'P', kind, sep, ..] = head
        && (b'1'..=b'6').contains(kind)
        && matches!(sep, b' ' | b'\t' | b'\n' | b'\r')
    {
        return Some(FileFormat::Ppm);
    }
    if head.starts_with(&[0xff, 0xd8]) {
        return Some(FileFormat::Jpeg);
    }
    if head.starts_with(b"GIF87a") || head.starts_with(b"GIF89a") {
        return Some(FileFormat::Gif);
    }
    if head.len() >= 16
        && head.starts_with(b"RIFF")
        && &head[8..15] == b"WEBPVP8"
        && matches!(head[15], b' ' | b'L' | b'X')
    {
        return Some(FileFormat::Webp);
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/assets/format.rs"]
mod tests;
