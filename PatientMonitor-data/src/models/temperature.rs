use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thousandths of a degree per degree
const SCALE: i64 = 1_000;

/// Maximum number of fraction digits a temperature may carry
const FRACTION_DIGITS: usize = 3;

/// Readings at or above this magnitude are rejected when parsing
const MAX_DEGREES: i64 = 1_000;

/// Error returned when a temperature string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemperatureParseError {
    /// Input was empty or whitespace
    #[error("Temperature is empty")]
    Empty,

    /// Input is not a decimal number
    #[error("Invalid temperature: {0}")]
    Invalid(String),

    /// Input has more fraction digits than can be stored exactly
    #[error("Temperature has more than three fraction digits: {0}")]
    TooPrecise(String),

    /// Input magnitude is outside the supported range
    #[error("Temperature out of range: {0}")]
    OutOfRange(String),
}

/// Body temperature in degrees Celsius.
///
/// Stored as a whole number of thousandths of a degree so that subtraction and
/// comparison are exact: `36.6 - 35.2` is exactly `1.4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Temperature {
    millidegrees: i64,
}

impl Temperature {
    /// Build a temperature from thousandths of a degree
    pub const fn from_millidegrees(millidegrees: i64) -> Self {
        Self { millidegrees }
    }

    /// Thousandths of a degree
    pub const fn millidegrees(self) -> i64 {
        self.millidegrees
    }
}

/// Exact difference, saturating at the bounds of `i64` thousandths
impl Sub for Temperature {
    type Output = Temperature;

    fn sub(self, rhs: Temperature) -> Temperature {
        Temperature::from_millidegrees(self.millidegrees.saturating_sub(rhs.millidegrees))
    }
}

impl FromStr for Temperature {
    type Err = TemperatureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TemperatureParseError::Empty);
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((_, "")) => return Err(TemperatureParseError::Invalid(s.to_string())),
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
            return Err(TemperatureParseError::Invalid(s.to_string()));
        }
        if fraction.len() > FRACTION_DIGITS {
            return Err(TemperatureParseError::TooPrecise(s.to_string()));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| TemperatureParseError::OutOfRange(s.to_string()))?;
        if whole >= MAX_DEGREES {
            return Err(TemperatureParseError::OutOfRange(s.to_string()));
        }

        // Right-pad the fraction so "6" and "600" both mean 600 thousandths
        let fraction = fraction
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(FRACTION_DIGITS)
            .fold(0i64, |acc, digit| acc * 10 + i64::from(digit - b'0'));

        let magnitude = whole * SCALE + fraction;
        Ok(Self::from_millidegrees(if negative { -magnitude } else { magnitude }))
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.millidegrees < 0 { "-" } else { "" };
        let magnitude = self.millidegrees.unsigned_abs();
        let whole = magnitude / SCALE as u64;
        let fraction = magnitude % SCALE as u64;

        if fraction == 0 {
            return write!(f, "{}{}", sign, whole);
        }

        let digits = format!("{:0width$}", fraction, width = FRACTION_DIGITS);
        write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
    }
}

impl TryFrom<String> for Temperature {
    type Error = TemperatureParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Temperature> for String {
    fn from(temperature: Temperature) -> Self {
        temperature.to_string()
    }
}
