//! Rule colors and the colour-string parser.
//!
//! Colors are parsed once, when a rule tree is deserialized. Accepted forms:
//!
//! - hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - functional: `rgb(r, g, b)`, `rgba(r, g, b, a)`, channels as `0-255` or `0%-100%`
//!   (percentages may be fractional, e.g. `50.5%`)
//! - cylindrical: `hsl(h, s%, l%)`, `hsv(h, s%, v%)` and its alias `hsb(h, s%, b%)`,
//!   hue in degrees
//! - CSS/X11 names such as `white` or `darkslategray` (case-insensitive)
//!
//! # Matching contract
//!
//! Decoded pixels are always compared as RGBA8. The red, green, and blue
//! channels must be equal. Alpha only takes part when the rule color names
//! one: `#ffffff` matches a white pixel of any opacity, while `#ffffff80`
//! only matches a white pixel whose alpha is exactly `0x80`.

mod named;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use named::NAMED_COLORS;

/// An 8-bit RGB color with an optional alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// `None` means "any alpha".
    pub a: Option<u8>,
}

/// Errors produced while parsing a colour string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty colour string")]
    Empty,

    #[error("invalid hex colour '{0}' (expected #rgb, #rgba, #rrggbb or #rrggbbaa)")]
    InvalidHex(String),

    #[error("invalid colour function '{0}' (expected rgb(), rgba(), hsl(), hsv() or hsb())")]
    InvalidFunction(String),

    #[error("channel '{channel}' in '{input}' is outside 0-255")]
    ChannelOutOfRange { input: String, channel: String },

    #[error("unknown colour name '{0}'")]
    UnknownName(String),
}

impl Color {
    /// Creates an RGB color that matches pixels of any opacity.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    /// Creates an RGBA color whose alpha must match exactly.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a: Some(a) }
    }

    /// Creates black.
    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// Creates white.
    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Wraps a decoded RGBA8 pixel, keeping its alpha.
    pub const fn from_pixel(pixel: [u8; 4]) -> Self {
        Self::rgba(pixel[0], pixel[1], pixel[2], pixel[3])
    }

    /// Returns true if `pixel` (RGBA8) equals this color under the matching contract.
    pub fn matches(&self, pixel: [u8; 4]) -> bool {
        let [r, g, b, a] = pixel;
        if (self.r, self.g, self.b) != (r, g, b) {
            return false;
        }
        match self.a {
            Some(alpha) => alpha == a,
            None => true,
        }
    }

    fn from_hex(input: &str, digits: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidHex(input.to_string());
        let nibbles = digits
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(invalid)?;

        let color = match nibbles.as_slice() {
            &[r, g, b] => Self::rgb(r * 17, g * 17, b * 17),
            &[r, g, b, a] => Self::rgba(r * 17, g * 17, b * 17, a * 17),
            &[r1, r0, g1, g0, b1, b0] => Self::rgb(r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0),
            &[r1, r0, g1, g0, b1, b0, a1, a0] => {
                Self::rgba(r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0, a1 << 4 | a0)
            }
            _ => return Err(invalid()),
        };
        Ok(color)
    }

    fn from_function(input: &str, lowered: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidFunction(input.to_string());

        let (function, args) = lowered.split_once('(').ok_or_else(invalid)?;
        let args: Vec<&str> = args
            .strip_suffix(')')
            .ok_or_else(invalid)?
            .split(',')
            .map(str::trim)
            .collect();

        match (function.trim_end(), args.as_slice()) {
            ("rgb", &[r, g, b]) => Ok(Self::rgb(
                parse_channel(input, r)?,
                parse_channel(input, g)?,
                parse_channel(input, b)?,
            )),
            ("rgba", &[r, g, b, a]) => Ok(Self::rgba(
                parse_channel(input, r)?,
                parse_channel(input, g)?,
                parse_channel(input, b)?,
                parse_channel(input, a)?,
            )),
            ("hsl", &[h, s, l]) => {
                let (r, g, b) = hsl_to_rgb(
                    parse_hue(input, h)?,
                    parse_fraction(input, s)?,
                    parse_fraction(input, l)?,
                );
                Ok(Self::rgb(r, g, b))
            }
            ("hsv" | "hsb", &[h, s, v]) => {
                let (r, g, b) = hsv_to_rgb(
                    parse_hue(input, h)?,
                    parse_fraction(input, s)?,
                    parse_fraction(input, v)?,
                );
                Ok(Self::rgb(r, g, b))
            }
            _ => Err(invalid()),
        }
    }

    fn from_name(input: &str, lowered: &str) -> Result<Self, ColorParseError> {
        let index = NAMED_COLORS
            .binary_search_by(|(name, _)| name.cmp(&lowered))
            .map_err(|_| ColorParseError::UnknownName(input.to_string()))?;
        let value = NAMED_COLORS[index].1;
        Ok(Self::rgb(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ))
    }
}

fn out_of_range(input: &str, channel: &str) -> ColorParseError {
    ColorParseError::ChannelOutOfRange {
        input: input.to_string(),
        channel: channel.to_string(),
    }
}

/// Scales a unit value to a channel, rounding half up.
fn to_channel(unit: f64) -> u8 {
    (unit * 255.0 + 0.5) as u8
}

/// Parses one functional-notation channel: `0-255` or `0%-100%`.
fn parse_channel(input: &str, channel: &str) -> Result<u8, ColorParseError> {
    if channel.ends_with('%') {
        return parse_fraction(input, channel).map(to_channel);
    }
    channel
        .parse::<u8>()
        .map_err(|_| out_of_range(input, channel))
}

/// Parses a percentage (`0%-100%`, fractions allowed) into `0.0..=1.0`.
fn parse_fraction(input: &str, channel: &str) -> Result<f64, ColorParseError> {
    let percent: f64 = channel
        .strip_suffix('%')
        .and_then(|p| p.trim().parse().ok())
        .ok_or_else(|| out_of_range(input, channel))?;
    if !(0.0..=100.0).contains(&percent) {
        return Err(out_of_range(input, channel));
    }
    Ok(percent / 100.0)
}

/// Parses a hue in degrees into a turn fraction in `0.0..1.0`.
fn parse_hue(input: &str, channel: &str) -> Result<f64, ColorParseError> {
    let degrees: f64 = channel
        .parse()
        .map_err(|_| out_of_range(input, channel))?;
    if !degrees.is_finite() || degrees < 0.0 {
        return Err(out_of_range(input, channel));
    }
    Ok((degrees / 360.0).rem_euclid(1.0))
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    if saturation == 0.0 {
        let grey = to_channel(lightness);
        return (grey, grey, grey);
    }
    let high = if lightness <= 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let low = 2.0 * lightness - high;

    let component = |offset: f64| {
        let h = (hue + offset).rem_euclid(1.0);
        let value = if h < 1.0 / 6.0 {
            low + (high - low) * h * 6.0
        } else if h < 0.5 {
            high
        } else if h < 2.0 / 3.0 {
            low + (high - low) * (2.0 / 3.0 - h) * 6.0
        } else {
            low
        };
        to_channel(value)
    };
    (
        component(1.0 / 3.0),
        component(0.0),
        component(-1.0 / 3.0),
    )
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> (u8, u8, u8) {
    if saturation == 0.0 {
        let grey = to_channel(value);
        return (grey, grey, grey);
    }
    let sector = (hue * 6.0).floor();
    let f = hue * 6.0 - sector;
    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * f);
    let t = value * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match sector as u32 % 6 {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };
    (to_channel(r), to_channel(g), to_channel(b))
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ColorParseError::Empty);
        }

        if let Some(digits) = trimmed.strip_prefix('#') {
            return Self::from_hex(s, digits);
        }

        let lowered = trimmed.to_ascii_lowercase();
        if lowered.contains('(') {
            Self::from_function(s, &lowered)
        } else {
            Self::from_name(s, &lowered)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if let Some(a) = self.a {
            write!(f, "{:02x}", a)?;
        }
        Ok(())
    }
}
