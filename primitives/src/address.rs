use {
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
  },
  thiserror::Error,
};

#[derive(Debug, Error, PartialEq)]
pub enum Error {
  #[error("invalid hex in address: {0}")]
  InvalidHex(#[from] hex::FromHexError),

  #[error("address must be 20 bytes, got {0}")]
  InvalidLength(usize),
}

/// Represents an account on the chain the contract is deployed to.
///
/// This is the identifier the wallet provider hands out when account
/// access is granted, the owner recorded on a campaign and each entry
/// in a campaign's donor list. The same account may appear many times
/// in a donor list, once for every donation it made.
#[derive(
  Copy,
  Clone,
  Default,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
pub struct Address([u8; 20]);

impl Address {
  pub const fn new(bytes: [u8; 20]) -> Self {
    Self(bytes)
  }

  /// Abbreviated form for headers and donor lists, e.g. `0x2430...8dA1`.
  ///
  /// Keeps the first four and the last two bytes in hex.
  pub fn short(&self) -> String {
    let full = self.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
  }
}

impl AsRef<[u8]> for Address {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl Deref for Address {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "0x{}", hex::encode(self.0))
  }
}

impl Debug for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "address(0x{})", hex::encode(self.0))
  }
}

impl From<Address> for String {
  fn from(addr: Address) -> Self {
    addr.to_string()
  }
}

impl From<[u8; 20]> for Address {
  fn from(bytes: [u8; 20]) -> Self {
    Self(bytes)
  }
}

impl FromStr for Address {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    let digits = s
      .strip_prefix("0x")
      .or_else(|| s.strip_prefix("0X"))
      .unwrap_or(s);

    let bytes = hex::decode(digits)?;
    let len = bytes.len();
    let bytes: [u8; 20] =
      bytes.try_into().map_err(|_| Error::InvalidLength(len))?;
    Ok(Self(bytes))
  }
}

impl TryFrom<&str> for Address {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    FromStr::from_str(value)
  }
}
