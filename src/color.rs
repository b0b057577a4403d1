//! RGBA display colors, and parsing of the color names used for edges and masks.

use std::fmt;
use std::str::FromStr;

use crate::error::{GgsegError, Result};

/// An 8 bit per channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// The fill used for the mask region overlay.
pub const MASK_GRAY: Rgba = Rgba::rgb(0xA1, 0xA1, 0xA1);

pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

/// Fully transparent. Edges in this color are not drawn.
pub const NONE: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
        Rgba { r, g, b, a: 255 }
    }

    /// Construct from float channels in `[0, 1]`. Values outside the range are clamped.
    pub fn from_f64(r: f64, g: f64, b: f64, a: f64) -> Rgba {
        Rgba {
            r: unit_to_u8(r),
            g: unit_to_u8(g),
            b: unit_to_u8(b),
            a: unit_to_u8(a),
        }
    }

    /// Linear interpolation between two colors, `t` in `[0, 1]`.
    pub fn lerp(&self, other: &Rgba, t: f64) -> Rgba {
        let mix = |x: u8, y: u8| -> u8 {
            let v = x as f64 + (y as f64 - x as f64) * t;
            v.round().max(0.0).min(255.0) as u8
        };
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// The alpha channel as a fraction in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }

    /// Hex notation, `#rrggbb` for opaque colors and `#rrggbbaa` otherwise.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

fn unit_to_u8(v: f64) -> u8 {
    (v.max(0.0).min(1.0) * 255.0).round() as u8
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Parses `#rgb`, `#rrggbb`, `#rrggbbaa` and a small set of color names (`black`, `white`, `gray`/`grey`, `red`, `green`, `blue`, `none`).
impl FromStr for Rgba {
    type Err = GgsegError;

    fn from_str(s: &str) -> Result<Rgba> {
        let spec = s.trim().to_ascii_lowercase();
        let named = match spec.as_str() {
            "black" => Some(BLACK),
            "white" => Some(WHITE),
            "gray" | "grey" => Some(Rgba::rgb(128, 128, 128)),
            "red" => Some(Rgba::rgb(255, 0, 0)),
            "green" => Some(Rgba::rgb(0, 128, 0)),
            "blue" => Some(Rgba::rgb(0, 0, 255)),
            "none" | "transparent" => Some(NONE),
            _ => None,
        };
        if let Some(c) = named {
            return Ok(c);
        }

        let invalid = || GgsegError::InvalidColor(s.to_string());
        let hex = spec.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let short = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17).map_err(|_| invalid());
                Ok(Rgba::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Ok(Rgba::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Rgba { r: channel(0)?, g: channel(2)?, b: channel(4)?, a: channel(6)? }),
            _ => Err(invalid()),
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hex_and_named_colors_can_be_parsed() {
        assert_eq!(MASK_GRAY, "#A1A1A1".parse::<Rgba>().unwrap());
        assert_eq!(BLACK, "black".parse::<Rgba>().unwrap());
        assert_eq!(Rgba::rgb(255, 0, 170), "#f0a".parse::<Rgba>().unwrap());
        assert_eq!(Rgba { r: 1, g: 2, b: 3, a: 4 }, "#01020304".parse::<Rgba>().unwrap());
        assert!("none".parse::<Rgba>().unwrap().is_transparent());
    }

    #[test]
    fn malformed_colors_are_rejected() {
        assert!("#12345".parse::<Rgba>().is_err());
        assert!("#gggggg".parse::<Rgba>().is_err());
        assert!("chartreuse-ish".parse::<Rgba>().is_err());
    }

    #[test]
    fn colors_interpolate_linearly() {
        let mid = BLACK.lerp(&WHITE, 0.5);
        assert_eq!(Rgba::rgb(128, 128, 128), mid);
        assert_eq!(BLACK, BLACK.lerp(&WHITE, 0.0));
        assert_eq!(WHITE, BLACK.lerp(&WHITE, 1.0));
        assert_eq!("#a1a1a1", MASK_GRAY.to_hex());
    }
}
