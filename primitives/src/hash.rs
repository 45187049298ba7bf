use {
  serde::{Deserialize, Serialize},
  std::fmt::{Debug, Display},
};

/// Identifies a submitted write transaction, for awaiting its
/// confirmation and for log correlation.
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TxHash([u8; 32]);

impl TxHash {
  pub const fn new(bytes: [u8; 32]) -> Self {
    Self(bytes)
  }

  pub fn as_bytes(&self) -> &[u8; 32] {
    &self.0
  }
}

impl From<[u8; 32]> for TxHash {
  fn from(bytes: [u8; 32]) -> Self {
    Self(bytes)
  }
}

impl Display for TxHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "0x{}", hex::encode(self.0))
  }
}

impl Debug for TxHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "tx(0x{})", hex::encode(self.0))
  }
}
