//! Money type for representing currency amounts
//!
//! Wraps an exact decimal so sums never drift the way binary floats do.
//! Serializes as a decimal string ("12.50").

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use crate::error::{ExpenseError, ExpenseResult};

/// Whole-unit ceiling for any single stored amount
const MAX_WHOLE_AMOUNT: i64 = 1_000_000_000_000;

/// A monetary amount backed by an exact decimal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10", "1,250.00".
    /// Commas are only accepted as thousands separators.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (rest, None),
        };

        let whole_digits = strip_group_separators(whole).ok_or_else(invalid)?;
        let fraction_digits = fraction.unwrap_or("");
        if !fraction_digits.chars().all(|c| c.is_ascii_digit())
            || (whole_digits.is_empty() && fraction_digits.is_empty())
        {
            return Err(invalid());
        }

        let normalized = match (whole_digits.is_empty(), fraction_digits.is_empty()) {
            (_, true) => whole_digits,
            (true, false) => format!("0.{}", fraction_digits),
            (false, false) => format!("{}.{}", whole_digits, fraction_digits),
        };

        let value = Decimal::from_str(&normalized).map_err(|_| invalid())?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Add two amounts, `None` on overflow
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Total of a sequence of amounts
    ///
    /// # Errors
    ///
    /// Returns a validation error if the total does not fit in a decimal.
    pub fn checked_sum<I>(amounts: I) -> ExpenseResult<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts.into_iter().try_fold(Self::zero(), |total, amount| {
            total.checked_add(amount).ok_or_else(|| {
                ExpenseError::Validation("Total amount is too large to represent".into())
            })
        })
    }

    /// Largest amount a single expense or budget may carry
    pub fn max_amount() -> Self {
        Self(Decimal::new(MAX_WHOLE_AMOUNT, 0))
    }

    /// Format with a currency symbol, always two decimal places
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.0.round_dp(2);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{}{:.2}", symbol, rounded.abs())
        } else {
            format!("{}{:.2}", symbol, rounded.abs())
        }
    }

    /// Plain decimal representation without a symbol, as stored on disk
    pub fn to_plain_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

/// Digits of an integer part with thousands separators removed
///
/// Returns `None` unless every comma separates a group of exactly three
/// digits and the leading group has one to three digits.
fn strip_group_separators(whole: &str) -> Option<String> {
    if !whole.chars().all(|c| c.is_ascii_digit() || c == ',') {
        return None;
    }
    if !whole.contains(',') {
        return Some(whole.to_string());
    }

    let mut groups = whole.split(',');
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 {
        return None;
    }

    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
