//! Money type for representing currency amounts
//!
//! Wraps an exact `Decimal` so amounts keep the precision and scale they were
//! entered with. Binary floating point never touches a currency value.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Largest amount a single transaction or budget may carry (10^15)
///
/// Sums of many bounded amounts stay far inside `Decimal`'s range, so
/// aggregation over a ledger cannot overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x38D7_E, 0, false, 0);

/// Currency symbols tolerated around typed amounts
const CURRENCY_SYMBOLS: &[char] = &['€', '$', '£', '¥', '₹', '₽', '₩', '₺', '¢'];

/// A monetary amount with arbitrary decimal precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from a decimal value
    ///
    /// # Examples
    /// ```
    /// use budget_ledger::models::Money;
    /// use rust_decimal::Decimal;
    /// let amount = Money::new(Decimal::new(1050, 2)); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal value
    pub const fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Whether the magnitude exceeds [`MAX_AMOUNT`]
    pub fn exceeds_limit(&self) -> bool {
        self.0.abs() > MAX_AMOUNT
    }

    /// Clamp negative amounts to zero
    pub fn floor_at_zero(self) -> Self {
        if self.is_negative() {
            Self::zero()
        } else {
            self
        }
    }

    /// `self * 100 / whole`, rounded half-up to a whole percent
    ///
    /// Returns `None` when `whole` is zero.
    pub fn percent_of(&self, whole: Money) -> Option<i64> {
        if whole.is_zero() {
            return None;
        }
        self.0
            .checked_mul(Decimal::ONE_HUNDRED)?
            .checked_div(whole.0)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
    }

    /// Parse a money amount from a string
    ///
    /// Accepts plain decimal notation only: "10.50", "-3", "0.005". Anything
    /// else (currency symbols, thousands separators, words) is rejected so
    /// that malformed CSV amounts surface as row failures.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        if !s
            .chars()
            .enumerate()
            .all(|(i, c)| c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+')))
        {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }
        Decimal::from_str(s)
            .map(Self)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))
    }

    /// Parse user-typed input, tolerating a leading or trailing currency
    /// symbol, surrounding spaces and a decimal comma ("€ 12,50", "3 $").
    /// Any other stray character is an error, as are mixed separators such
    /// as "1,234.56".
    pub fn parse_input(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_prefix(CURRENCY_SYMBOLS)
            .or_else(|| trimmed.strip_suffix(CURRENCY_SYMBOLS))
            .unwrap_or(trimmed)
            .trim();
        if number.contains('.') && number.contains(',') {
            return Err(MoneyParseError::InvalidFormat(trimmed.to_string()));
        }
        Self::parse(&number.replace(',', ".")).map_err(|e| match e {
            MoneyParseError::Empty => MoneyParseError::Empty,
            MoneyParseError::InvalidFormat(_) => MoneyParseError::InvalidFormat(trimmed.to_string()),
        })
    }

    /// Format with a currency symbol, rounded to cents for display
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self
            .0
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if self.is_negative() && !rounded.is_zero() {
            format!("-{}{:.2}", symbol, rounded)
        } else {
            format!("{}{:.2}", symbol, rounded)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Plain decimal text, scale preserved. This is the CSV wire form.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
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
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is empty"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

impl From<MoneyParseError> for crate::error::LedgerError {
    fn from(err: MoneyParseError) -> Self {
        Self::Validation(err.to_string())
    }
}
