//! Per-area rates using decimal arithmetic.
//!
//! Base rates and offered rates are quoted in INR per square foot. Rates are
//! serialized as decimal strings; numbers written by older clients are
//! accepted on load. Negative rates are rejected on every input path.
//! Sums saturate at [`Decimal::MAX`] instead of overflowing.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unit every rate is quoted in.
pub const RATE_UNIT: &str = "INR/sqft";

/// Errors that can occur when parsing a [`Rate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    /// The input is not a decimal number.
    #[error("invalid rate: {0}")]
    Invalid(String),
    /// The input is below zero.
    #[error("rate cannot be negative: {0}")]
    Negative(String),
}

/// A rate in [`RATE_UNIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rate(Decimal);

impl Rate {
    /// Zero rate.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Parse a form input. Blank input is zero.
    ///
    /// # Errors
    ///
    /// Returns [`RateError`] if the input is not a non-negative decimal.
    pub fn from_input(input: &str) -> Result<Self, RateError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }
        trimmed.parse()
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Arithmetic mean of the given rates, rounded to two places.
    ///
    /// Returns zero for an empty input.
    #[must_use]
    pub fn mean<'a>(rates: impl IntoIterator<Item = &'a Self>) -> Self {
        let (sum, count) = rates
            .into_iter()
            .fold((Decimal::ZERO, 0_u32), |(sum, count), rate| {
                (sum.saturating_add(rate.0), count.saturating_add(1))
            });
        if count == 0 {
            return Self::ZERO;
        }
        Self((sum / Decimal::from(count)).round_dp(2).normalize())
    }
}

impl FromStr for Rate {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| RateError::Invalid(s.to_owned()))?;
        Self::try_from(amount)
    }
}

impl TryFrom<Decimal> for Rate {
    type Error = RateError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(RateError::Negative(amount.to_string()));
        }
        Ok(Self(amount))
    }
}

impl From<Rate> for Decimal {
    fn from(rate: Rate) -> Self {
        rate.0
    }
}

impl fmt::Display for Rate {
    /// Shortest form of the amount: `5000`, `4500.5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl From<u32> for Rate {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl Add for Rate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Rate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
