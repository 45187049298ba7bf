use {
  crate::{
    provider::{ProviderError, WalletProvider},
    Error,
  },
  crowdfund_primitives::Address,
  parking_lot::RwLock,
  std::sync::Arc,
  tracing::{info, warn},
};

/// Connection state of a wallet session.
enum SessionState<C> {
  Disconnected,
  Connected { account: Address, contract: Arc<C> },
}

/// Binds the user's wallet account to a contract handle.
///
/// A session starts disconnected and becomes connected after a
/// successful [`WalletSession::connect`]. It is never persisted and
/// there is no automatic reconnection: after a rejection or when no
/// wallet is present, the caller decides whether to try again.
pub struct WalletSession<P: WalletProvider> {
  provider: Option<P>,
  state: RwLock<SessionState<P::Contract>>,
}

impl<P: WalletProvider> WalletSession<P> {
  /// `provider` is `None` when the environment has no wallet injected.
  pub fn new(provider: Option<P>) -> Self {
    Self {
      provider,
      state: RwLock::new(SessionState::Disconnected),
    }
  }

  /// Requests account access and builds a contract handle signing
  /// with the active account.
  ///
  /// Calling this on a connected session replaces the connection,
  /// which picks up an account switch made in the wallet.
  pub async fn connect(&self) -> Result<Address, Error> {
    let provider = self.provider.as_ref().ok_or_else(|| {
      warn!("no wallet provider present");
      Error::WalletUnavailable
    })?;

    let accounts = provider.request_accounts().await.map_err(|e| {
      warn!("account request failed: {e}");
      match e {
        ProviderError::UserRejected => Error::UserRejected,
        other => Error::Unknown(other.to_string()),
      }
    })?;

    let account = *accounts.first().ok_or_else(|| {
      warn!("wallet granted access to zero accounts");
      Error::Unknown("wallet returned no accounts".into())
    })?;

    let contract = provider
      .contract(account)
      .map_err(|e| Error::Unknown(e.to_string()))?;

    *self.state.write() = SessionState::Connected {
      account,
      contract: Arc::new(contract),
    };

    info!("wallet connected as {account}");
    Ok(account)
  }

  pub fn account(&self) -> Option<Address> {
    match &*self.state.read() {
      SessionState::Connected { account, .. } => Some(*account),
      SessionState::Disconnected => None,
    }
  }

  pub fn contract(&self) -> Option<Arc<P::Contract>> {
    match &*self.state.read() {
      SessionState::Connected { contract, .. } => Some(contract.clone()),
      SessionState::Disconnected => None,
    }
  }

  pub fn is_connected(&self) -> bool {
    self.account().is_some()
  }
}
