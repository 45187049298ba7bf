use {
  crate::provider::ProviderError,
  crowdfund_primitives::{AmountError, TxHash},
  std::time::Duration,
  thiserror::Error,
};

/// Every way a client operation can fail.
///
/// Failures never escape an operation as panics. Each one is reported
/// as a value of this type and none of them leaves the campaign store
/// partially updated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
  #[error("no wallet provider is available in this environment")]
  WalletUnavailable,

  #[error("the wallet request was declined")]
  UserRejected,

  #[error("wallet is not connected")]
  NotConnected,

  #[error("no campaign is open for donations")]
  NoCampaignSelected,

  #[error("failed to fetch campaigns: {0}")]
  FetchFailed(String),

  #[error("invalid amount: {0}")]
  InvalidAmount(String),

  #[error("invalid deadline: {0}")]
  InvalidDeadline(String),

  #[error("{0} is required")]
  MissingField(&'static str),

  #[error("transaction rejected: {0}")]
  TransactionRejected(String),

  #[error("insufficient funds to cover the amount and network fee")]
  InsufficientFunds,

  #[error("transaction {0} was not confirmed within {1:?}")]
  ConfirmationTimeout(TxHash, Duration),

  #[error("another transaction from this session is still pending")]
  OperationInFlight,

  #[error(
    "transaction {0} confirmed but the campaign list could not be \
     refreshed: {1}"
  )]
  StaleAfterConfirmation(TxHash, String),

  #[error("{0}")]
  Unknown(String),
}

/// How a failure should be presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageClass {
  /// Shown next to the offending form input.
  FormValidation,

  /// Interrupts the user until acknowledged.
  BlockingAlert,

  /// A dismissible message.
  Notice,

  /// Logged only.
  SilentLog,
}

impl Error {
  pub fn class(&self) -> MessageClass {
    match self {
      Error::InvalidAmount(_)
      | Error::InvalidDeadline(_)
      | Error::MissingField(_) => MessageClass::FormValidation,
      Error::InsufficientFunds | Error::WalletUnavailable => {
        MessageClass::BlockingAlert
      }
      Error::UserRejected | Error::FetchFailed(_) => MessageClass::SilentLog,
      Error::NotConnected
      | Error::NoCampaignSelected
      | Error::TransactionRejected(_)
      | Error::ConfirmationTimeout(..)
      | Error::OperationInFlight
      | Error::StaleAfterConfirmation(..)
      | Error::Unknown(_) => MessageClass::Notice,
    }
  }

  /// Interprets a fault raised while reading contract state.
  pub(crate) fn from_read(error: ProviderError) -> Self {
    Error::FetchFailed(error.to_string())
  }

  /// Interprets a fault raised while submitting or awaiting a write.
  pub(crate) fn from_write(error: ProviderError) -> Self {
    match error {
      ProviderError::UserRejected => Error::UserRejected,
      ProviderError::InsufficientFunds => Error::InsufficientFunds,
      ProviderError::Reverted(reason) => Error::TransactionRejected(reason),
      e @ (ProviderError::Transport(_) | ProviderError::Other(_)) => {
        Error::Unknown(e.to_string())
      }
    }
  }
}

impl From<AmountError> for Error {
  fn from(e: AmountError) -> Self {
    Error::InvalidAmount(e.to_string())
  }
}
