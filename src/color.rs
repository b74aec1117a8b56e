//! 24-bit RGB colors as used by the scene, the palette and the info panel.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CubeError;

/// An sRGB color packed as `0xRRGGBB`.
///
/// Serializes as a `"#RRGGBB"` string so options files stay readable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0x00_0000);
    pub const WHITE: Color = Color(0xFF_FFFF);

    /// Color from a packed `0xRRGGBB` value. Bits above 24 are dropped.
    pub const fn from_rgb_hex(value: u32) -> Self {
        Self(value & 0xFF_FFFF)
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(text: &str) -> Result<Self, CubeError> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CubeError::InvalidColor(text.to_owned()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| CubeError::InvalidColor(text.to_owned()))
    }

    pub const fn rgb_hex(self) -> u32 {
        self.0
    }

    /// Upper-case `#RRGGBB` form.
    pub fn hex(self) -> String {
        format!("#{:06X}", self.0)
    }

    /// Channels in `0.0..=1.0`, still sRGB encoded.
    pub fn to_srgb(self) -> [f32; 3] {
        let r = ((self.0 >> 16) & 0xFF) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xFF) as f32 / 255.0;
        let b = (self.0 & 0xFF) as f32 / 255.0;
        [r, g, b]
    }

    /// Channels converted to linear light for an sRGB render target.
    pub fn to_linear(self) -> [f32; 3] {
        self.to_srgb().map(srgb_to_linear)
    }

    /// Every channel multiplied by `factor` and clamped.
    pub fn scaled(self, factor: f32) -> Self {
        let [r, g, b] = self.to_srgb().map(|c| {
            (c * factor * 255.0).round().clamp(0.0, 255.0) as u32
        });
        Self((r << 16) | (g << 8) | b)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = CubeError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::from_hex(&text)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.hex()
    }
}
