//! Money type for representing rupee amounts
//!
//! Internally stores amounts in paise (i64) so sums and comparisons are exact.
//! On disk an amount is a plain decimal rupee number (`3000`, `150.5`), which
//! keeps the snapshot shape readable by anything that wrote plain numbers.
//! Arithmetic saturates at the ends of the `i64` range instead of wrapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Largest rupee magnitude accepted from user input or files
const MAX_RUPEES: f64 = 1.0e15;

/// Represents a monetary amount stored as paise (hundredths of a rupee)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from paise
    ///
    /// # Examples
    /// ```
    /// use family_budget::models::Money;
    /// let amount = Money::from_paise(1050); // ₹10.50
    /// assert_eq!(amount.rupees(), 10);
    /// ```
    pub const fn from_paise(paise: i64) -> Self {
        Self(paise)
    }

    /// Create a Money amount from whole rupees
    pub const fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }

    /// Convert a decimal rupee value, rounding to the nearest paisa
    ///
    /// Returns `None` for NaN, infinities and absurdly large magnitudes.
    ///
    /// # Examples
    /// ```
    /// use family_budget::models::Money;
    /// assert_eq!(Money::from_decimal(150.5), Some(Money::from_paise(15050)));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(rupees: f64) -> Option<Self> {
        if !rupees.is_finite() || rupees.abs() > MAX_RUPEES {
            return None;
        }
        Some(Self((rupees * 100.0).round() as i64))
    }

    /// The amount as a decimal rupee value
    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in paise
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Get the whole rupees portion (truncated toward zero)
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Get the paise portion (0-99)
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Divide into `parts` equal shares, rounding half away from zero to the paisa
    ///
    /// Returns zero when `parts` is zero.
    pub fn split_evenly(self, parts: u32) -> Self {
        if parts == 0 {
            return Self::zero();
        }
        let parts = i128::from(parts);
        let value = i128::from(self.0);
        let rounded = if value >= 0 {
            (2 * value + parts) / (2 * parts)
        } else {
            -((2 * -value + parts) / (2 * parts))
        };
        Self(rounded as i64)
    }

    /// Parse a rupee amount typed by a user
    ///
    /// Accepts "150", "150.50", "₹150.50", "1,23,456.78" and "-5".
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('₹').unwrap_or(rest).trim();
        let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

        if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let value: f64 = cleaned
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;
        let value = if negative { -value } else { value };

        Self::from_decimal(value).ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))
    }

    /// Format with a currency symbol using Indian digit grouping (`1,23,456.78`)
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let whole = (self.0 / 100).unsigned_abs();
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_indian(whole),
            self.paise_part()
        )
    }
}

/// Group digits the en-IN way: the last three together, then pairs
fn group_indian(whole: u64) -> String {
    let digits = whole.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("₹"))
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.to_decimal()
    }
}

impl TryFrom<f64> for Money {
    type Error = MoneyParseError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_decimal(value).ok_or_else(|| MoneyParseError::OutOfRange(value.to_string()))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
