// File: crates/chart-core/src/color.rs
// Summary: 8-bit RGB color value with conversions from 16-bit toolkit channels and `#rrggbb` strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GraphError;

/// An opaque 8-bit-per-channel color. Always formats as lowercase `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::new(0x00, 0x00, 0x00);
    pub const WHITE: RgbColor = RgbColor::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert toolkit color channels (0..=65535) to 8 bits, rounding to nearest.
    pub fn from_u16_channels(r: u16, g: u16, b: u16) -> Self {
        Self::new(channel_to_u8(r), channel_to_u8(g), channel_to_u8(b))
    }

    /// Inverse of [`RgbColor::from_u16_channels`]; 0xab becomes 0xabab.
    pub fn to_u16_channels(self) -> (u16, u16, u16) {
        let up = |c: u8| (c as u16) * 257;
        (up(self.r), up(self.g), up(self.b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` (case-insensitive, leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, GraphError> {
        let t = s.trim();
        let hex = t.strip_prefix('#').unwrap_or(t);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GraphError::InvalidColor(s.to_string()));
        }
        let ch = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| GraphError::InvalidColor(s.to_string()))
        };
        Ok(Self::new(ch(0)?, ch(2)?, ch(4)?))
    }

    /// Mix toward white by `amount` in `[0, 1]`.
    pub fn lighten(self, amount: f64) -> Self {
        let t = amount.clamp(0.0, 1.0);
        let mix = |c: u8| (c as f64 + (255.0 - c as f64) * t).round() as u8;
        Self::new(mix(self.r), mix(self.g), mix(self.b))
    }
}

fn channel_to_u8(c: u16) -> u8 {
    (c as f64 / 65535.0 * 255.0).round() as u8
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for RgbColor {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for RgbColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RgbColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
