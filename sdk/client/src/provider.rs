//! The surface through which the client reaches the outside world: the
//! wallet injected into the environment and the crowdfunding contract
//! it signs calls for.
//!
//! Implementations live outside this crate. The devnode crate provides
//! an in-memory one and tests provide mocks.

use {
  crowdfund_primitives::{Address, Amount, Campaign, CampaignId, TxHash},
  futures::future::BoxFuture,
  thiserror::Error,
};

/// Raw fault classes reported by a wallet or contract call.
///
/// These are translated into [`crate::Error`] at the operation boundary,
/// where the same fault may mean different things depending on whether
/// a read or a write was attempted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
  #[error("request rejected by the user")]
  UserRejected,

  #[error("insufficient funds for value and network fee")]
  InsufficientFunds,

  #[error("execution reverted: {0}")]
  Reverted(String),

  #[error("transport failure: {0}")]
  Transport(String),

  #[error("{0}")]
  Other(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Arguments of the contract's `createCampaign` call, already
/// converted to on-chain units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCampaign {
  pub owner: Address,
  pub title: String,
  pub description: String,
  pub target: Amount,
  pub deadline: u64,
  pub image: String,
}

/// Final state of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxOutcome {
  /// Included in a block and executed successfully.
  Confirmed { block: u64 },

  /// Included in a block but execution reverted, no state changed.
  Reverted(String),
}

/// A write that was broadcast and awaits inclusion.
///
/// Once a pending transaction exists it cannot be withdrawn, dropping
/// this value only stops waiting for it.
pub trait PendingTransaction: Send + 'static {
  fn hash(&self) -> TxHash;

  /// Suspends until the transaction is final or known to have failed.
  fn wait(self) -> BoxFuture<'static, ProviderResult<TxOutcome>>;
}

/// A handle to the crowdfunding contract bound to a signing account.
pub trait Contract: Send + Sync + 'static {
  type Pending: PendingTransaction;

  /// Reads the full campaign list.
  fn get_campaigns(&self) -> BoxFuture<'_, ProviderResult<Vec<Campaign>>>;

  fn create_campaign(
    &self,
    call: CreateCampaign,
  ) -> BoxFuture<'_, ProviderResult<Self::Pending>>;

  /// Sends `value` along with the call as the transaction amount.
  fn donate_to_campaign(
    &self,
    id: CampaignId,
    value: Amount,
  ) -> BoxFuture<'_, ProviderResult<Self::Pending>>;
}

/// The wallet capability injected into the environment.
pub trait WalletProvider: Send + Sync + 'static {
  type Contract: Contract;

  /// Asks the user to grant access to their accounts. The first
  /// returned account is the active one.
  fn request_accounts(&self) -> BoxFuture<'_, ProviderResult<Vec<Address>>>;

  /// Builds a contract handle that signs with `signer`.
  fn contract(&self, signer: Address) -> ProviderResult<Self::Contract>;
}
