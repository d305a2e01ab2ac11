//! A deliberately small CSS color parser.
//!
//! Covers `rgb()`/`rgba()`, 3- and 6-digit hex and five named colors. Anything
//! else (HSL, `currentColor`, variables, `transparent`, other keywords) is
//! `None`, so callers skip the element instead of misjudging it.

use std::str::FromStr;

use once_cell::sync::Lazy;
use palette::Srgb;
use regex::Regex;

static RGB_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^rgba?\(\s*(\d+(?:\.\d+)?)\s*,\s*(\d+(?:\.\d+)?)\s*,\s*(\d+(?:\.\d+)?)\s*(?:,\s*(\d*\.?\d+)\s*)?\)$",
    )
    .expect("valid rgb() pattern")
});

const NAMED_COLORS: [(&str, [u8; 3]); 5] = [
    ("white", [255, 255, 255]),
    ("black", [0, 0, 0]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
];

/// An sRGB color with 8-bit channels and alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl RgbaColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Parses a CSS color string. Case-insensitive; surrounding whitespace ignored.
pub fn parse_color(input: &str) -> Option<RgbaColor> {
    let value = input.trim().to_ascii_lowercase();
    if value.is_empty() {
        return None;
    }

    if let Some(caps) = RGB_FUNCTION.captures(&value) {
        let channel = |i: usize| -> Option<u8> {
            let n: f64 = caps.get(i)?.as_str().parse().ok()?;
            Some(n.round().clamp(0.0, 255.0) as u8)
        };
        let a = match caps.get(4) {
            Some(m) => m.as_str().parse::<f32>().ok()?.clamp(0.0, 1.0),
            None => 1.0,
        };
        return Some(RgbaColor {
            r: channel(1)?,
            g: channel(2)?,
            b: channel(3)?,
            a,
        });
    }

    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 3 && hex.len() != 6 {
            return None;
        }
        let rgb = Srgb::<u8>::from_str(hex).ok()?;
        return Some(RgbaColor::rgb(rgb.red, rgb.green, rgb.blue));
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, [r, g, b])| RgbaColor::rgb(*r, *g, *b))
}
