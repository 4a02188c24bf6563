//! Fill color parsing.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// RGBA8 color parsed from an element's `fill` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl FillColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or `transparent`.
    ///
    /// Returns `None` for anything else; fills are free-form strings and the
    /// renderer may understand more than this.
    pub fn parse(fill: &str) -> Option<Self> {
        let fill = fill.trim();
        if fill.eq_ignore_ascii_case("transparent") {
            return Some(Self::transparent());
        }

        let hex = fill.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(0..1)?;
                let g = channel(1..2)?;
                let b = channel(2..3)?;
                Some(Self::new(r * 17, g * 17, b * 17, 255))
            }
            6 => Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Some(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Apply an element opacity percentage (0-100) to the alpha channel.
    pub fn with_opacity(self, opacity: u8) -> Self {
        let factor = f64::from(opacity.min(100)) / 100.0;
        let a = (f64::from(self.a) * factor).round() as u8;
        Self { a, ..self }
    }
}

impl From<Color> for FillColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<FillColor> for Color {
    fn from(color: FillColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}
