//! Phasor helpers on top of [`num_complex::Complex64`].
//!
//! Arithmetic (add, subtract, multiply, divide, power) comes from `num_complex`
//! directly. This module adds the polar constructors and extractors used by the
//! short-circuit data, and the `∡` notation used in reports.

use std::fmt;

pub use num_complex::Complex64;

/// Polar construction and extraction in the units the fault study uses.
pub trait PhasorExt {
    /// Build a phasor from a magnitude and an angle in degrees.
    fn from_polar_degrees(magnitude: f64, angle_deg: f64) -> Self;

    /// Magnitude (modulus).
    fn magnitude(&self) -> f64;

    /// Angle in degrees, in `(-180, 180]`.
    fn angle_degrees(&self) -> f64;

    /// Real part.
    fn real_part(&self) -> f64;
}

impl PhasorExt for Complex64 {
    fn from_polar_degrees(magnitude: f64, angle_deg: f64) -> Self {
        Complex64::from_polar(magnitude, angle_deg.to_radians())
    }

    fn magnitude(&self) -> f64 {
        self.norm()
    }

    fn angle_degrees(&self) -> f64 {
        self.arg().to_degrees()
    }

    fn real_part(&self) -> f64 {
        self.re
    }
}

/// Separator between magnitude and angle in polar notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolarStyle {
    /// `10.0000∡ 0.00°`
    Tight,
    /// `10.0000 ∡ 0.00°`
    Spaced,
}

/// A phasor rendered as magnitude (4 decimals) and angle in degrees (2 decimals).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub magnitude: f64,
    pub angle_deg: f64,
    pub style: PolarStyle,
}

impl Polar {
    pub fn new(value: Complex64, style: PolarStyle) -> Self {
        Self {
            magnitude: value.magnitude(),
            angle_deg: value.angle_degrees(),
            style,
        }
    }
}

impl fmt::Display for Polar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = match self.style {
            PolarStyle::Tight => "∡",
            PolarStyle::Spaced => " ∡",
        };
        write!(
            f,
            "{}{} {}°",
            to_fixed(self.magnitude, 4),
            sep,
            to_fixed(self.angle_deg, 2)
        )
    }
}

/// Digits examined past the requested precision when looking for an exact tie.
const TIE_DIGITS: usize = 30;

/// Fixed-point text with exact ties rounded away from zero.
///
/// `format!("{:.N}")` rounds ties to even (`0.125` → `0.12`), while the
/// existing export files round them up (`0.13`). A tie is only possible when
/// the binary value sits exactly on the midpoint, so the digits past the
/// precision are inspected rather than scaling the value.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    let value = unsigned_zero(value);
    if !value.is_finite() {
        return format!("{:.*}", decimals, value);
    }

    let exact = format!("{:.*}", decimals + TIE_DIGITS, value);
    let (kept, rest) = exact.split_at(exact.len() - TIE_DIGITS);
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{:.*}", decimals, value);
    }

    increment_last_digit(kept.trim_end_matches('.'))
}

/// Add one unit in the last place to a decimal string, carrying as needed.
fn increment_last_digit(digits: &str) -> String {
    let mut chars: Vec<char> = digits.chars().collect();
    let mut i = chars.len();
    loop {
        if i == 0 || chars[i - 1] == '-' {
            chars.insert(i, '1');
            break;
        }
        i -= 1;
        match chars[i] {
            '.' => continue,
            '9' => chars[i] = '0',
            d => {
                chars[i] = char::from(d as u8 + 1);
                break;
            }
        }
    }
    chars.into_iter().collect()
}

/// Negative zero prints as "-0.00"; downstream files expect "0.00".
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
