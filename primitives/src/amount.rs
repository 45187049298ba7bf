use {
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    str::FromStr,
  },
  thiserror::Error,
};

/// Number of fractional decimal digits between one whole unit of the
/// chain's currency and its smallest indivisible unit.
pub const DECIMALS: u32 = 18;

const UNIT: u128 = 10u128.pow(DECIMALS);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
  #[error("amount is empty")]
  Empty,

  #[error("amount must not be negative")]
  Negative,

  #[error("'{0}' is not a decimal number")]
  Malformed(String),

  #[error("amount has {0} fractional digits, at most 18 allowed")]
  TooManyDecimals(usize),

  #[error("amount does not fit in 128 bits")]
  Overflow,
}

/// A monetary value expressed in the smallest unit of the chain's
/// currency (10^-18 of a whole coin).
///
/// Campaign targets, collected totals and individual donations are all
/// carried in this unit. There is intentionally no conversion to or
/// from floating point, comparisons and sums are exact.
#[derive(
  Copy,
  Clone,
  Default,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
)]
pub struct Amount(u128);

impl Amount {
  pub const ZERO: Amount = Amount(0);

  pub const fn from_units(units: u128) -> Self {
    Self(units)
  }

  /// Whole coins, e.g. `Amount::from_whole(2)` is two ether.
  pub const fn from_whole(whole: u64) -> Self {
    Self(whole as u128 * UNIT)
  }

  pub const fn units(&self) -> u128 {
    self.0
  }

  pub const fn is_zero(&self) -> bool {
    self.0 == 0
  }

  pub fn checked_add(self, other: Amount) -> Option<Amount> {
    self.0.checked_add(other.0).map(Amount)
  }

  pub fn checked_sub(self, other: Amount) -> Option<Amount> {
    self.0.checked_sub(other.0).map(Amount)
  }

  /// Parses human-entered decimal text denominated in whole coins
  /// ("0.25", "10", ".5") into the smallest unit.
  ///
  /// Leading and trailing whitespace is ignored. Signs, exponents,
  /// thousands separators and more than [`DECIMALS`] fractional digits
  /// are rejected.
  pub fn parse_ether(text: &str) -> Result<Self, Error> {
    let text = text.trim();
    if text.is_empty() {
      return Err(Error::Empty);
    }
    if text.starts_with('-') {
      return Err(Error::Negative);
    }

    let (whole, fraction) = match text.split_once('.') {
      Some((whole, fraction)) => (whole, fraction),
      None => (text, ""),
    };

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty())
      || !is_digits(whole)
      || !is_digits(fraction)
    {
      return Err(Error::Malformed(text.to_owned()));
    }

    if fraction.len() > DECIMALS as usize {
      return Err(Error::TooManyDecimals(fraction.len()));
    }

    let accumulate = |acc: u128, digits: &str| {
      digits.bytes().try_fold(acc, |acc, b| {
        acc.checked_mul(10)?.checked_add(u128::from(b - b'0'))
      })
    };

    let whole = accumulate(0, whole)
      .and_then(|w| w.checked_mul(UNIT))
      .ok_or(Error::Overflow)?;
    let scale = 10u128.pow(DECIMALS - fraction.len() as u32);
    let fraction = accumulate(0, fraction)
      .and_then(|f| f.checked_mul(scale))
      .ok_or(Error::Overflow)?;

    whole
      .checked_add(fraction)
      .map(Amount)
      .ok_or(Error::Overflow)
  }
}

impl FromStr for Amount {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse_ether(s)
  }
}

/// Renders whole coins with the fractional part trimmed of trailing
/// zeros, always keeping at least one fractional digit: `1.5`, `2.0`.
impl Display for Amount {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let whole = self.0 / UNIT;
    let fraction = format!("{:018}", self.0 % UNIT);
    let fraction = fraction.trim_end_matches('0');
    let fraction = if fraction.is_empty() { "0" } else { fraction };
    write!(f, "{whole}.{fraction}")
  }
}

impl Debug for Amount {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "amount({})", self.0)
  }
}

impl From<u128> for Amount {
  fn from(units: u128) -> Self {
    Self(units)
  }
}
