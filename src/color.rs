use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing or reading colors.
#[derive(Debug, Error)]
pub enum ColorError {
    #[error("invalid hex color format: {0:?}")]
    InvalidHex(String),

    #[error("invalid pixel data: requires at least 4 components (RGBA), got {0}")]
    TruncatedPixel(usize),
}

/// The discrete palettes a color can be quantized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Palette {
    Cga,
    Web,
    Gbc,
    #[default]
    Full,
}

/// An 8-bit-per-channel RGBA color, immutable after construction.
///
/// Derived equality compares all four channels exactly. Palette membership
/// (`includes`, `dedupe`) deliberately compares by the opaque hex instead,
/// so a color picked at any opacity still matches its palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl PixelColor {
    pub const TRANSPARENT: PixelColor = PixelColor::new(0, 0, 0, 0);
    pub const BLACK: PixelColor = PixelColor::new(0, 0, 0, 255);
    pub const WHITE: PixelColor = PixelColor::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from arbitrary channel values, clamping each into
    /// 0..=255 rather than rejecting out-of-range input.
    pub fn clamped(r: i32, g: i32, b: i32, a: i32) -> Self {
        Self {
            r: r.clamp(0, 255) as u8,
            g: g.clamp(0, 255) as u8,
            b: b.clamp(0, 255) as u8,
            a: a.clamp(0, 255) as u8,
        }
    }

    /// Parse `#rgb` or `#rrggbb` into an opaque color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorError::InvalidHex(hex.to_owned()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_owned()));
        }
        let expanded: String = match digits.len() {
            // #rgb -> #rrggbb
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_owned(),
            _ => return Err(ColorError::InvalidHex(hex.to_owned())),
        };
        let value = u32::from_str_radix(&expanded, 16)
            .map_err(|_| ColorError::InvalidHex(hex.to_owned()))?;
        Ok(Self::new(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
            255,
        ))
    }

    /// Parse `#rrggbbaa`.
    pub fn from_hex_with_alpha(hex: &str) -> Result<Self, ColorError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorError::InvalidHex(hex.to_owned()))?;
        if digits.len() != 8 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_owned()));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorError::InvalidHex(hex.to_owned()))?;
        Ok(Self::new(
            ((value >> 24) & 0xff) as u8,
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        ))
    }

    /// Read one RGBA pixel from raw buffer bytes.
    pub fn from_pixel(data: &[u8]) -> Result<Self, ColorError> {
        match data {
            [r, g, b, a, ..] => Ok(Self::new(*r, *g, *b, *a)),
            _ => Err(ColorError::TruncatedPixel(data.len())),
        }
    }

    /// `#rrggbb`, alpha omitted.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `#rrggbbaa`.
    pub fn hex_with_alpha(&self) -> String {
        format!("{}{:02x}", self.hex(), self.a)
    }

    /// True when `list` contains a color with the same opaque hex.
    pub fn includes(list: &[PixelColor], value: PixelColor) -> bool {
        list.iter().any(|col| col.hex() == value.hex())
    }

    /// Remove exact opaque-hex duplicates, preserving first-seen order.
    pub fn dedupe(list: &[PixelColor]) -> Vec<PixelColor> {
        let mut unique = Vec::new();
        for &color in list {
            if !Self::includes(&unique, color) {
                unique.push(color);
            }
        }
        unique
    }

    fn round_to(component: u8, possibilities: &[u8]) -> u8 {
        let target = component as i32;
        possibilities
            .iter()
            .copied()
            .min_by_key(|&p| (p as i32 - target).abs())
            .unwrap_or(component)
    }

    /// Quantize to the 16-entry CGA palette.
    ///
    /// Rounding channels independently can land outside the legal palette,
    /// so the green and blue option sets depend on the rounded red.
    pub fn cga(&self) -> PixelColor {
        let r = Self::round_to(self.r, &[0x00, 0x55, 0xaa, 0xff]);
        let green_options: &[u8] = match r {
            0x00 => &[0x00, 0xaa],
            0x55 => &[0x55, 0xff],
            0xaa => &[0x00, 0x55, 0xaa],
            _ => &[0x55, 0xff],
        };
        let g = Self::round_to(self.g, green_options);
        let blue_options: &[u8] = match r {
            0x00 => &[0x00, 0xaa],
            0x55 => &[0x55, 0xff],
            0xaa => match g {
                0x00 => &[0x00, 0xaa],
                // Brown and light gray are the only legal mid-green entries.
                0x55 => return PixelColor::new(r, g, 0x00, 255),
                _ => return PixelColor::new(r, g, 0xaa, 255),
            },
            _ => &[0x55, 0xff],
        };
        let b = Self::round_to(self.b, blue_options);
        PixelColor::new(r, g, b, 255)
    }

    /// Quantize to the 216-color web-safe palette, alpha included.
    pub fn web(&self) -> PixelColor {
        let fragments = [0x00, 0x33, 0x66, 0x99, 0xcc, 0xff];
        PixelColor::new(
            Self::round_to(self.r, &fragments),
            Self::round_to(self.g, &fragments),
            Self::round_to(self.b, &fragments),
            Self::round_to(self.a, &fragments),
        )
    }

    /// Quantize to the Game Boy Color's 5-step channel grid; alpha snaps
    /// to fully transparent or fully opaque.
    pub fn gbc(&self) -> PixelColor {
        let step = |c: u8| -> u8 { (((c as f32 / 5.0).round() * 5.0) as i32).clamp(0, 255) as u8 };
        PixelColor::new(
            step(self.r),
            step(self.g),
            step(self.b),
            Self::round_to(self.a, &[0, 255]),
        )
    }

    pub fn quantize(&self, palette: Palette) -> PixelColor {
        match palette {
            Palette::Cga => self.cga(),
            Palette::Web => self.web(),
            Palette::Gbc => self.gbc(),
            Palette::Full => *self,
        }
    }

    /// Hue (0..360), saturation (0..100), value (0..100).
    pub fn hsv(&self) -> Hsv {
        let max_c = self.r.max(self.g).max(self.b) as f32;
        let min_c = self.r.min(self.g).min(self.b) as f32;
        let v = max_c / 255.0 * 100.0;
        if max_c == min_c {
            return Hsv { h: 0.0, s: 0.0, v };
        }
        let s = (max_c - min_c) / max_c;
        let rc = (max_c - self.r as f32) / (max_c - min_c);
        let gc = (max_c - self.g as f32) / (max_c - min_c);
        let bc = (max_c - self.b as f32) / (max_c - min_c);
        let mut h = if self.r as f32 == max_c {
            bc - gc
        } else if self.g as f32 == max_c {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };
        h = (h / 6.0).rem_euclid(1.0);
        Hsv {
            h: h * 360.0,
            s: s * 100.0,
            v,
        }
    }

    /// Hue-then-saturation-then-value ordering for palette display.
    pub fn cmp_hsv(a: &PixelColor, b: &PixelColor) -> Ordering {
        let (ah, bh) = (a.hsv(), b.hsv());
        ah.h.total_cmp(&bh.h)
            .then(ah.s.total_cmp(&bh.s))
            .then(ah.v.total_cmp(&bh.v))
    }
}

/// A color in HSV space, used only for ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}
