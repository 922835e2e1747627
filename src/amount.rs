use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Fixed-point decimal with 4 decimal places, stored as a scaled integer.
///
/// Formatting honours the requested precision (up to 4), rounding half away
/// from zero, so `format!("{:.2}", amount)` prints pence.
///
/// Arithmetic saturates at the bounds of the scaled `i64` instead of
/// overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Amount(i64);

impl Amount {
    const PLACES: usize = 4;
    const SCALE: i64 = 10_000;

    pub const ZERO: Amount = Amount(0);

    pub const MAX: Amount = Amount(i64::MAX);
    pub const MIN: Amount = Amount(i64::MIN);

    /// Saturates out-of-range values; NaN becomes zero.
    pub fn from_float(value: f64) -> Self {
        Amount((value * Self::SCALE as f64).round() as i64)
    }

    /// Like [`Amount::from_float`], but `None` for values that are not finite
    /// or do not fit.
    pub fn checked_from_float(value: f64) -> Option<Self> {
        let scaled = (value * Self::SCALE as f64).round();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        (scaled.is_finite() && scaled >= i64::MIN as f64 && scaled < i64::MAX as f64)
            .then_some(Amount(scaled as i64))
    }

    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    pub fn to_float(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Convert into another currency by multiplying with `rate`.
    pub fn convert(self, rate: Rate) -> Amount {
        let product = self.0 as i128 * rate.0 as i128;
        Amount(saturate(div_round(product, Rate::SCALE as i128)))
    }

    /// Percentage of `self` relative to `whole`, `None` when `whole` is zero.
    pub fn percent_of(self, whole: Amount) -> Option<f64> {
        if whole.is_zero() {
            return None;
        }
        Some(self.0 as f64 * 100.0 / whole.0 as f64)
    }
}

/// Integer division rounding half away from zero.
fn div_round(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.abs() * 2 >= denominator.abs() {
        if (numerator < 0) != (denominator < 0) {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    }
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = f.precision().unwrap_or(Self::PLACES).min(Self::PLACES);
        let divisor = 10i128.pow((Self::PLACES - places) as u32);
        let rounded = div_round(self.0 as i128, divisor);
        let unit = 10u128.pow(places as u32);

        let sign = if rounded < 0 { "-" } else { "" };
        let abs = rounded.unsigned_abs();
        let whole = abs / unit;
        let frac = abs % unit;
        if places == 0 {
            write!(f, "{sign}{whole}")
        } else {
            write!(f, "{sign}{whole}.{frac:0places$}")
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::from_float(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.to_float()
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// Split evenly, e.g. a monthly remainder into days.
impl Div<i64> for Amount {
    type Output = Self;

    fn div(self, rhs: i64) -> Self::Output {
        Amount(saturate(div_round(self.0 as i128, rhs as i128)))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Currency conversion multiplier with 8 decimal places.
///
/// Rates given with more digits are rounded half away from zero to the 8th
/// place on construction, so `0.123456789` is stored as `0.12345679`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Rate(i64);

impl Rate {
    const SCALE: i64 = 100_000_000;

    pub fn from_float(value: f64) -> Self {
        Rate((value * Self::SCALE as f64).round() as i64)
    }

    pub fn to_float(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let whole = abs / Self::SCALE;
        let frac = abs % Self::SCALE;
        let digits = format!("{frac:08}");
        let digits = digits.trim_end_matches('0');
        if digits.is_empty() {
            write!(f, "{sign}{whole}")
        } else {
            write!(f, "{sign}{whole}.{digits}")
        }
    }
}

impl From<f64> for Rate {
    fn from(value: f64) -> Self {
        Rate::from_float(value)
    }
}

impl From<Rate> for f64 {
    fn from(rate: Rate) -> Self {
        rate.to_float()
    }
}
