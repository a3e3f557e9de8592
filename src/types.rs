//! Strongly-typed numeric primitives (zero-cost newtypes).
//!
//! Geometry code works in [`Px`] and [`Percent`] rather than raw `f64`, so a
//! percentage can never be added to a pixel distance by accident.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
    /// Value is zero when positive required
    Zero,
    /// Value is outside its permitted range
    OutOfRange,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::OutOfRange => write!(f, "value is out of range"),
        }
    }
}

impl std::error::Error for NumericError {}

/// A distance in canvas pixels. May be negative (signed offsets, left-biased sizes).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Px(pub f64);

impl Px {
    pub const ZERO: Px = Px(0.0);

    /// Create a Px with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Px, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Px(val))
        }
    }

    /// Create a non-negative Px with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Px, NumericError> {
        let px = Px::try_new(val)?;
        if px.0 < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(px)
        }
    }

    /// Create a strictly positive Px with validation
    #[inline]
    pub fn try_positive(val: f64) -> Result<Px, NumericError> {
        let px = Px::try_non_negative(val)?;
        if px.0 == 0.0 { Err(NumericError::Zero) } else { Ok(px) }
    }

    #[inline]
    pub fn abs(self) -> Px {
        Px(self.0.abs())
    }

    #[inline]
    pub fn min(self, other: Px) -> Px {
        Px(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Px) -> Px {
        Px(self.0.max(other.0))
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Px {
    type Output = Px;
    fn add(self, rhs: Px) -> Px {
        Px(self.0 + rhs.0)
    }
}

impl Sub for Px {
    type Output = Px;
    fn sub(self, rhs: Px) -> Px {
        Px(self.0 - rhs.0)
    }
}

impl Mul<f64> for Px {
    type Output = Px;
    fn mul(self, rhs: f64) -> Px {
        Px(self.0 * rhs)
    }
}

impl Div<f64> for Px {
    type Output = Px;
    fn div(self, rhs: f64) -> Px {
        Px(self.0 / rhs)
    }
}

impl Neg for Px {
    type Output = Px;
    fn neg(self) -> Px {
        Px(-self.0)
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// A position along a column, as a percentage of the column width.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// Create a Percent with validation (finite, within `0..=100`)
    pub fn try_new(val: f64) -> Result<Percent, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else if !(0.0..=100.0).contains(&val) {
            Err(NumericError::OutOfRange)
        } else {
            Ok(Percent(val))
        }
    }

    /// This percentage limited to `0..=100`. NaN becomes 0.
    pub fn clamped(self) -> Percent {
        if self.0.is_nan() {
            Percent(0.0)
        } else {
            Percent(self.0.clamp(0.0, 100.0))
        }
    }

    /// The pixel distance this percentage represents within `total`.
    #[inline]
    pub fn of(self, total: Px) -> Px {
        total * (self.0 / 100.0)
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A drawing colour.
///
/// Hex notations are normalised to `#rrggbb`; anything else is kept as a
/// named CSS colour and passed through to the backend untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    Rgb(u8, u8, u8),
    Named(String),
}

impl Color {
    /// Build a colour from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Color {
        Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ConfigError::InvalidColor {
            value: s.to_string(),
        };

        let Some(hex) = s.strip_prefix('#') else {
            if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(invalid());
            }
            return Ok(Color::Named(s.to_ascii_lowercase()));
        };

        let digits = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(invalid)?;

        match digits.as_slice() {
            [r, g, b] => Ok(Color::Rgb(r * 17, g * 17, b * 17)),
            [r1, r2, g1, g2, b1, b2] => Ok(Color::Rgb(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            Color::Named(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Px tests ====================

    #[test]
    fn px_try_new_rejects_non_finite() {
        assert_eq!(Px::try_new(f64::NAN), Err(NumericError::NaN));
        assert_eq!(Px::try_new(f64::INFINITY), Err(NumericError::Infinite));
        assert!(Px::try_new(-3.0).is_ok());
    }

    #[test]
    fn px_try_non_negative_rejects_negative() {
        assert_eq!(Px::try_non_negative(-1.0), Err(NumericError::Negative));
        assert_eq!(Px::try_non_negative(0.0), Ok(Px(0.0)));
    }

    #[test]
    fn px_try_positive_rejects_zero() {
        assert_eq!(Px::try_positive(0.0), Err(NumericError::Zero));
        assert_eq!(Px::try_positive(2.0), Ok(Px(2.0)));
    }

    #[test]
    fn px_arithmetic() {
        let a = Px(3.0);
        let b = Px(2.0);

        assert_eq!(a + b, Px(5.0));
        assert_eq!(a - b, Px(1.0));
        assert_eq!(a * 2.0, Px(6.0));
        assert_eq!(a / 2.0, Px(1.5));
        assert_eq!(-a, Px(-3.0));
        assert_eq!(Px(-4.0).abs(), Px(4.0));
    }

    // ==================== Percent tests ====================

    #[test]
    fn percent_of_column() {
        assert_eq!(Percent(20.0).of(Px(180.0)), Px(36.0));
        assert_eq!(Percent(50.0).of(Px(180.0)), Px(90.0));
    }

    #[test]
    fn percent_clamped_stays_in_range() {
        assert_eq!(Percent(140.0).clamped(), Percent(100.0));
        assert_eq!(Percent(-5.0).clamped(), Percent(0.0));
        assert_eq!(Percent(f64::NAN).clamped(), Percent(0.0));
        assert_eq!(Percent(20.0).clamped(), Percent(20.0));
    }

    #[test]
    fn percent_rejects_out_of_range() {
        assert_eq!(Percent::try_new(120.0), Err(NumericError::OutOfRange));
        assert_eq!(Percent::try_new(-0.5), Err(NumericError::OutOfRange));
        assert_eq!(Percent::try_new(f64::NAN), Err(NumericError::NaN));
        assert!(Percent::try_new(100.0).is_ok());
    }

    // ==================== Color tests ====================

    #[test]
    fn color_parses_short_and_long_hex() {
        assert_eq!("#999".parse::<Color>().unwrap(), Color::Rgb(0x99, 0x99, 0x99));
        assert_eq!("#22C55E".parse::<Color>().unwrap(), Color::from_hex(0x22c55e));
        assert_eq!(Color::from_hex(0x9ca3af).to_string(), "#9ca3af");
    }

    #[test]
    fn color_keeps_named_colors() {
        assert_eq!("Tomato".parse::<Color>().unwrap(), Color::Named("tomato".into()));
    }

    #[test]
    fn color_rejects_garbage() {
        assert!("#12".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
        assert!("rgb(1,2,3)".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
    }
}
