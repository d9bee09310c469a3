use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::RasterError;

/// 8-bit RGBA color. `alpha` only matters for RGBA images.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel, 255 is opaque.
    pub alpha: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    /// Color with explicit alpha.
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, RasterError> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> Result<u8, RasterError> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| RasterError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        if !s.is_ascii() || (s.len() != 6 && s.len() != 8) {
            return Err(RasterError::validation(
                "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            ));
        }
        let alpha = if s.len() == 8 { hex_byte(&s[6..8])? } else { 255 };
        Ok(Self::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            alpha,
        ))
    }

    /// `#rrggbb` form, or `#rrggbbaa` when not opaque.
    pub fn to_hex(self) -> String {
        if self.alpha == 255 {
            format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.red, self.green, self.blue, self.alpha
            )
        }
    }

    /// Convert to HSV. See [`rgb_to_hsv`].
    pub fn to_hsv(self) -> HsvColor {
        rgb_to_hsv(self)
    }
}

impl FromStr for Color {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// HSV color: `hue` in degrees (`0..360`), `saturation` and `value` in `0..=255`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HsvColor {
    /// Hue in degrees. Values of 360 or more wrap around.
    pub hue: u16,
    /// Saturation, 0 is achromatic.
    pub saturation: u8,
    /// Value (brightness).
    pub value: u8,
}

impl HsvColor {
    /// Convert to an opaque RGB color. See [`hsv_to_rgb`].
    pub fn to_rgb(self) -> Color {
        hsv_to_rgb(self)
    }
}

/// Integer six-sector HSV to RGB conversion. Hue is taken modulo 360.
pub fn hsv_to_rgb(hsv: HsvColor) -> Color {
    let h = i32::from(hsv.hue % 360);
    let s = i32::from(hsv.saturation);
    let v = i32::from(hsv.value);

    if s == 0 {
        return Color::rgb(hsv.value, hsv.value, hsv.value);
    }

    let f = h % 60;
    let p = (v * (255 - s) / 255) as u8;
    let q = (v * (255 - s * f / 60) / 255) as u8;
    let t = (v * (255 - s * (60 - f) / 60) / 255) as u8;
    let v = hsv.value;

    match h / 60 {
        0 => Color::rgb(v, t, p),
        1 => Color::rgb(q, v, p),
        2 => Color::rgb(p, v, t),
        3 => Color::rgb(p, q, v),
        4 => Color::rgb(t, p, v),
        _ => Color::rgb(v, p, q),
    }
}

/// Integer RGB to HSV conversion. Alpha is ignored.
pub fn rgb_to_hsv(rgb: Color) -> HsvColor {
    let (r, g, b) = (
        i32::from(rgb.red),
        i32::from(rgb.green),
        i32::from(rgb.blue),
    );
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    let s = if max == 0 { 0 } else { (max - min) * 255 / max };
    let h = if s == 0 {
        0
    } else {
        let span = max - min;
        let rc = (max - r) * 255 / span;
        let gc = (max - g) * 255 / span;
        let bc = (max - b) * 255 / span;
        let h = if r == max {
            (bc - gc) * 60 / 255
        } else if g == max {
            120 + (rc - bc) * 60 / 255
        } else {
            240 + (gc - rc) * 60 / 255
        };
        if h < 0 { h + 360 } else { h }
    };

    HsvColor {
        hue: h as u16,
        saturation: s as u8,
        value: max as u8,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/color.rs"]
mod tests;
