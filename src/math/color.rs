use std::str::FromStr;

use crate::errors::*;

/// A RGBA `Color`. Each color component is a floating point value
/// with a range from 0 to 1.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Color::sky_blue()
    }
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    /// Parses a web color in the `#RRGGBB` or `#RGB` form. The short form
    /// doubles each hex digit, so `#FA0` equals `#FFAA00`. Alpha is opaque.
    pub fn from_hex(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(s.to_owned());

        let digits = if s.starts_with('#') {
            &s[1..]
        } else {
            return Err(invalid());
        };

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| invalid());

        let rgb = match digits.len() {
            6 => [
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ],
            3 => [
                channel(&digits[0..1])? * 17,
                channel(&digits[1..2])? * 17,
                channel(&digits[2..3])? * 17,
            ],
            _ => return Err(invalid()),
        };

        Ok([rgb[0], rgb[1], rgb[2], 0xFF].into())
    }

    /// Clip to [0.0, 1.0] range.
    pub fn clip(&self) -> Self {
        Color {
            r: self.r.max(0.0).min(1.0),
            g: self.g.max(0.0).min(1.0),
            b: self.b.max(0.0).min(1.0),
            a: self.a.max(0.0).min(1.0),
        }
    }

    pub fn black() -> Self {
        Color::new(0.0, 0.0, 0.0, 1.0)
    }

    /// The default background, `#87CEEB`.
    pub fn sky_blue() -> Self {
        [0x87, 0xCE, 0xEB, 0xFF].into()
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

impl From<[u8; 4]> for Color {
    fn from(v: [u8; 4]) -> Self {
        let max = 255.0;
        Color::new(
            f32::from(v[0]) / max,
            f32::from(v[1]) / max,
            f32::from(v[2]) / max,
            f32::from(v[3]) / max,
        )
    }
}

impl Into<[u8; 4]> for Color {
    fn into(self) -> [u8; 4] {
        let v = self.clip();
        let max = 255.0;
        [
            (v.r * max).round() as u8,
            (v.g * max).round() as u8,
            (v.b * max).round() as u8,
            (v.a * max).round() as u8,
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn short_form_doubles_digits() {
        let long = Color::from_hex("#FFAA00").unwrap();
        let short = Color::from_hex("#FA0").unwrap();
        assert_eq!(long, short);
    }

    #[test]
    fn rejects_malformed() {
        assert!(Color::from_hex("87CEEB").is_err());
        assert!(Color::from_hex("#87CEE").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("#").is_err());
    }

    #[test]
    fn bytes() {
        let v: [u8; 4] = Color::sky_blue().into();
        assert_eq!(v, [0x87, 0xCE, 0xEB, 0xFF]);
    }
}
