use std::collections::HashMap;
use std::fmt::Write as _;

use crate::foundation::error::{RasterError, RasterResult};
use crate::raster::color::Color;
use crate::raster::image::RImage;

/// Color used for symbols whose color value cannot be interpreted.
const FALLBACK_GRAY: Color = Color::rgb(0xbe, 0xbe, 0xbe);

/// Pixels with alpha at or below this value are written as the transparent color.
const SAVE_ALPHA_THRESHOLD: u8 = 127;

/// Decode an XPM file from its raw bytes.
pub fn decode_xpm(bytes: &[u8]) -> RasterResult<RImage> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| RasterError::corrupt(format!("xpm is not valid text: {e}")))?;
    let strings = quoted_strings(text)?;
    image_from_lines(&strings)
}

/// Decode an in-memory XPM given as its string literals (header, colors, rows).
pub fn load_xpm_data<S: AsRef<str>>(lines: &[S]) -> RasterResult<RImage> {
    let lines: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
    image_from_lines(&lines)
}

/// Collect the contents of every C string literal, skipping block comments.
fn quoted_strings(text: &str) -> RasterResult<Vec<&str>> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = text[i + 2..]
                    .find("*/")
                    .ok_or_else(|| RasterError::corrupt("unterminated comment in xpm"))?;
                i += end + 4;
            }
            b'"' => {
                let start = i + 1;
                let mut j = start;
                while j < bytes.len() && bytes[j] != b'"' {
                    if bytes[j] == b'\\' {
                        j += 1;
                    }
                    j += 1;
                }
                if j >= bytes.len() {
                    return Err(RasterError::corrupt("unterminated string in xpm"));
                }
                out.push(&text[start..j]);
                i = j + 1;
            }
            _ => i += 1,
        }
    }
    Ok(out)
}

struct Header {
    width: u32,
    height: u32,
    colors: usize,
    cpp: usize,
}

fn parse_header(line: &str) -> RasterResult<Header> {
    let bad = || RasterError::corrupt(format!("bad xpm header '{line}'"));
    let mut fields = line.split_ascii_whitespace();
    let mut next = || -> RasterResult<usize> {
        fields
            .next()
            .and_then(|f| f.parse::<usize>().ok())
            .filter(|v| *v > 0)
            .ok_or_else(bad)
    };
    let width = u32::try_from(next()?).map_err(|_| bad())?;
    let height = u32::try_from(next()?).map_err(|_| bad())?;
    let colors = next()?;
    let cpp = next()?;
    Ok(Header {
        width,
        height,
        colors,
        cpp,
    })
}

/// Parse `#rgb`-style hex with 1 to 4 digits per channel, keeping the top 8 bits.
fn parse_hex_color(hex: &str) -> Option<Color> {
    if hex.is_empty() || hex.len() % 3 != 0 || hex.len() > 12 || !hex.is_ascii() {
        return None;
    }
    let n = hex.len() / 3;
    let channel = |i: usize| -> Option<u8> {
        let v = u32::from_str_radix(&hex[i * n..(i + 1) * n], 16).ok()?;
        let v = match n {
            1 => v * 17,
            2 => v,
            3 => v >> 4,
            _ => v >> 8,
        };
        u8::try_from(v).ok()
    };
    Some(Color::rgb(channel(0)?, channel(1)?, channel(2)?))
}

/// Pick the best visual from a color definition (`c` first, then grayscale, then mono).
fn parse_color_spec(spec: &str) -> Color {
    let tokens: Vec<&str> = spec.split_ascii_whitespace().collect();
    let mut by_key: HashMap<&str, &str> = HashMap::new();
    let mut i = 0;
    while i + 1 < tokens.len() {
        by_key.entry(tokens[i]).or_insert(tokens[i + 1]);
        i += 2;
    }

    let value = ["c", "g", "g4", "m"]
        .iter()
        .find_map(|key| by_key.get(key).copied());
    match value {
        Some(v) if v.eq_ignore_ascii_case("none") => Color::rgba(0, 0, 0, 0),
        Some(v) if v.starts_with('#') => parse_hex_color(&v[1..]).unwrap_or(FALLBACK_GRAY),
        Some(v) => {
            tracing::debug!(value = v, "unknown xpm color name");
            FALLBACK_GRAY
        }
        None => FALLBACK_GRAY,
    }
}

fn image_from_lines(lines: &[&str]) -> RasterResult<RImage> {
    let header = parse_header(
        lines
            .first()
            .ok_or_else(|| RasterError::corrupt("empty xpm"))?,
    )?;
    let rows_start = header
        .colors
        .checked_add(1)
        .ok_or_else(|| RasterError::corrupt("xpm color count overflows"))?;
    let color_lines = lines
        .get(1..rows_start)
        .ok_or_else(|| RasterError::corrupt("xpm color table is truncated"))?;

    let mut table: HashMap<&[u8], Color> = HashMap::with_capacity(header.colors);
    let mut first = None;
    for line in color_lines {
        let bytes = line.as_bytes();
        if bytes.len() < header.cpp {
            return Err(RasterError::corrupt(format!("bad xpm color line '{line}'")));
        }
        let (symbol, spec) = bytes.split_at(header.cpp);
        let color = parse_color_spec(&String::from_utf8_lossy(spec));
        first.get_or_insert(color);
        table.entry(symbol).or_insert(color);
    }
    // Unknown symbols take the first color.
    let fallback = first.unwrap_or(FALLBACK_GRAY);
    let alpha = table.values().any(|c| c.alpha != 255);

    let rows = lines
        .get(rows_start..)
        .filter(|rows| rows.len() >= header.height as usize)
        .ok_or_else(|| RasterError::corrupt("xpm pixel data is truncated"))?;

    let mut img = RImage::new(header.width, header.height, alpha)?;
    let channels = img.channels();
    let row_bytes = header.width as usize * header.cpp;
    let dst_stride = header.width as usize * channels;
    let data = img.data_mut();
    for (y, row) in rows.iter().take(header.height as usize).enumerate() {
        let row = row.as_bytes();
        if row.len() < row_bytes {
            return Err(RasterError::corrupt(format!("xpm row {y} is too short")));
        }
        let dst = &mut data[y * dst_stride..(y + 1) * dst_stride];
        for (symbol, px) in row[..row_bytes]
            .chunks_exact(header.cpp)
            .zip(dst.chunks_exact_mut(channels))
        {
            let c = table.get(symbol).copied().unwrap_or(fallback);
            px[0] = c.red;
            px[1] = c.green;
            px[2] = c.blue;
            if channels == 4 {
                px[3] = c.alpha;
            }
        }
    }
    Ok(img)
}

fn index_char(i: usize) -> char {
    let i = (i & 63) as u8;
    let c = match i {
        0..12 => b'0' + i,
        12..38 => b'A' + i - 12,
        _ => b'a' + i - 38,
    };
    c as char
}

fn symbol_for(mut index: usize, cpp: usize) -> String {
    let mut s = String::with_capacity(cpp);
    for _ in 0..cpp {
        s.push(index_char(index));
        index >>= 6;
    }
    s
}

/// Serialize an image as a normalized XPM.
///
/// Every distinct opaque color gets a symbol; pixels with alpha at or below 127 map to the `None`
/// color, which is only emitted for images with an alpha channel.
pub fn encode_xpm(img: &RImage) -> RasterResult<String> {
    write_xpm(img).map_err(|e| RasterError::Other(anyhow::anyhow!("format xpm: {e}")))
}

fn write_xpm(img: &RImage) -> Result<String, std::fmt::Error> {
    let channels = img.channels();
    let has_alpha = img.has_alpha();
    let visible = |px: &[u8]| !has_alpha || px[3] > SAVE_ALPHA_THRESHOLD;

    let mut order: Vec<[u8; 3]> = Vec::new();
    let mut index: HashMap<[u8; 3], usize> = HashMap::new();
    for px in img.data().chunks_exact(channels) {
        if visible(px) {
            let key = [px[0], px[1], px[2]];
            index.entry(key).or_insert_with(|| {
                order.push(key);
                order.len() - 1
            });
        }
    }

    let count = order.len() + usize::from(has_alpha);
    let mut cpp = 1;
    while cpp < 8 && (1usize << (cpp * 6)) < count {
        cpp += 1;
    }
    let transparent = " ".repeat(cpp);

    let mut out = String::new();
    writeln!(out, "/* XPM */")?;
    writeln!(out, "static char *image[] = {{")?;
    writeln!(out, "\"{} {} {count} {cpp}\",", img.width(), img.height())?;
    if has_alpha {
        writeln!(out, "\"{transparent} c None\",")?;
    }
    for (i, [r, g, b]) in order.iter().enumerate() {
        writeln!(out, "\"{} c #{r:02x}{g:02x}{b:02x}\",", symbol_for(i, cpp))?;
    }

    let width = img.width() as usize;
    let rows = img.data().chunks_exact(width * channels);
    let last = img.height() as usize - 1;
    for (y, row) in rows.enumerate() {
        out.push('"');
        for px in row.chunks_exact(channels) {
            match index.get(&[px[0], px[1], px[2]]) {
                Some(&i) if visible(px) => out.push_str(&symbol_for(i, cpp)),
                _ => out.push_str(&transparent),
            }
        }
        out.push_str(if y < last { "\",\n" } else { "\"};\n" });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/xpm.rs"]
mod tests;
