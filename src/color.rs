use std::fmt;
use std::str::FromStr;

use egui::Color32;
use rand::Rng;

use crate::error::{GridError, GridResult};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// An RGB color with a real-valued alpha in `[0, 1]`.
///
/// The hex form (`#RRGGBB`) carries no alpha, so converting to hex drops it.
/// Any color with zero alpha is the transparent sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl Color {
    /// The empty color of a cell that was never painted or has been erased
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0.0 };
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a: a.clamp(0.0, 1.0) }
    }

    pub fn from_hex(hex: &str) -> GridResult<Self> {
        let (r, g, b) = hex_to_rgb(hex)?;
        Ok(Self::rgb(r, g, b))
    }

    /// Lowercase `#rrggbb`; alpha is dropped
    pub fn to_hex(&self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Resolve to an opaque color for formats without an alpha channel.
    /// The transparent sentinel becomes white; anything else keeps its RGB.
    pub fn flatten(&self) -> Self {
        if self.is_transparent() {
            Self::WHITE
        } else {
            Self::rgb(self.r, self.g, self.b)
        }
    }

    pub fn to_color32(&self) -> Color32 {
        if self.is_transparent() {
            return Color32::TRANSPARENT;
        }
        Color32::from_rgba_unmultiplied(self.r, self.g, self.b, (self.a * 255.0).round() as u8)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_transparent() {
            write!(f, "transparent")
        } else if self.a >= 1.0 {
            write!(f, "{}", self.to_hex())
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }
        Self::from_hex(s)
    }
}

/// Parse `#RRGGBB` into its three channels
pub fn hex_to_rgb(hex: &str) -> GridResult<(u8, u8, u8)> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or_else(|| GridError::InvalidFormat(hex.to_owned()))?;

    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| GridError::InvalidFormat(hex.to_owned()))
    };
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Six independent uniformly random hex digits. Not suitable for anything
/// but visual variety.
pub fn random_hex_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut color = String::with_capacity(7);
    color.push('#');
    for _ in 0..6 {
        color.push(HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char);
    }
    color
}
