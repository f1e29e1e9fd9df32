use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::PadError;

/// Exact ratio of two positive integers, e.g. the `4:5` aspect ratio of a portrait feed post
/// or the `1080/2000` scale factor of a large photo.
#[derive(Debug, Copy, Clone)]
pub struct Fraction {
    numerator: u32,
    denominator: u32,
}

impl Fraction {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Fraction {
            numerator,
            denominator,
        }
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    pub fn is_positive(&self) -> bool {
        self.numerator != 0 && self.denominator != 0
    }

    /// Multiplies `value` by this fraction, rounding half up.
    /// Returns `None` if the denominator is zero or the result does not fit in `u32`.
    pub fn scale(&self, value: u32) -> Option<u32> {
        if self.denominator == 0 {
            return None;
        }
        let numerator = u64::from(value) * u64::from(self.numerator);
        let denominator = u64::from(self.denominator);
        let rounded = (2 * numerator + denominator) / (2 * denominator);
        u32::try_from(rounded).ok()
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = self.cross_multiply(other);
        a == b
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = self.cross_multiply(other);
        a.cmp(&b)
    }
}

impl Fraction {
    /// Cross-multiplication to compare fractions without using floating-point arithmetic
    /// `a/b < c/d` is equivalent to `a * d < c * b`
    fn cross_multiply(&self, other: &Self) -> (u64, u64) {
        (
            u64::from(self.numerator) * u64::from(other.denominator),
            u64::from(other.numerator) * u64::from(self.denominator),
        )
    }

    pub fn to_float(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}

/// Parses `W:H` (also accepts `W/H`), as used for aspect ratios on the command line.
impl FromStr for Fraction {
    type Err = PadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            PadError::InvalidConfiguration(format!(
                "invalid ratio `{s}', expected two positive integers such as 4:5"
            ))
        };
        let (numerator, denominator) = s.trim().split_once([':', '/']).ok_or_else(invalid)?;
        let numerator: u32 = numerator.trim().parse().map_err(|_| invalid())?;
        let denominator: u32 = denominator.trim().parse().map_err(|_| invalid())?;
        let fraction = Fraction::new(numerator, denominator);
        if !fraction.is_positive() {
            return Err(invalid());
        }
        Ok(fraction)
    }
}
