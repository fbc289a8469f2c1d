//! Color definitions for cells and grid lines

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// 8-bit RGB color, written in config files as `"r,g,b"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(c: Rgb) -> Self {
        crossterm::style::Color::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("expected \"r,g,b\", got {:?}", s));
        }
        let channel = |p: &str| {
            p.parse::<u8>()
                .map_err(|e| format!("bad color channel {:?} in {:?}: {}", p, s, e))
        };
        Ok(Self::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!("0,255,0".parse::<Rgb>().unwrap(), Rgb::new(0, 255, 0));
        assert_eq!(" 1, 2 ,3 ".parse::<Rgb>().unwrap(), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_parse_rgb_errors() {
        assert!("0,255".parse::<Rgb>().is_err());
        assert!("0,256,0".parse::<Rgb>().is_err());
        assert!("green".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_display_round_trips_config_format() {
        assert_eq!(Rgb::new(0, 0, 128).to_string(), "0,0,128");
    }
}
