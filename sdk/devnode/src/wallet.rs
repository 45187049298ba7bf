use {
  crate::{block::Call, chain::LocalChain},
  crowdfund_client_sdk::provider::{
    Contract,
    CreateCampaign,
    PendingTransaction,
    ProviderError,
    ProviderResult,
    TxOutcome,
    WalletProvider,
  },
  crowdfund_primitives::{Address, Amount, Campaign, CampaignId, TxHash},
  futures::{future::BoxFuture, FutureExt},
  multihash::{Hasher, Sha3_256},
  std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
  tokio::sync::oneshot::Receiver,
  tracing::info,
};

/// Deterministic development accounts, the same `count` always yields
/// the same addresses.
pub fn dev_accounts(count: usize) -> Vec<Address> {
  (0..count as u64)
    .map(|index| {
      let mut hasher = Sha3_256::default();
      hasher.update(b"crowdfund-devnode/account");
      hasher.update(&index.to_le_bytes());
      let mut bytes = [0u8; 20];
      bytes.copy_from_slice(&hasher.finalize()[12..]);
      Address::new(bytes)
    })
    .collect()
}

/// A wallet holding a fixed set of accounts on a [`LocalChain`].
pub struct LocalWallet {
  chain: Arc<LocalChain>,
  accounts: Vec<Address>,
  rejecting: AtomicBool,
}

impl LocalWallet {
  pub fn new(chain: Arc<LocalChain>, accounts: Vec<Address>) -> Self {
    Self {
      chain,
      accounts,
      rejecting: AtomicBool::new(false),
    }
  }

  /// Makes the wallet decline account requests, as a user closing the
  /// wallet prompt would.
  pub fn set_rejecting(&self, rejecting: bool) {
    self.rejecting.store(rejecting, Ordering::SeqCst);
  }

  pub fn chain(&self) -> &Arc<LocalChain> {
    &self.chain
  }
}

impl WalletProvider for LocalWallet {
  type Contract = LocalContract;

  fn request_accounts(&self) -> BoxFuture<'_, ProviderResult<Vec<Address>>> {
    async move {
      if self.rejecting.load(Ordering::SeqCst) {
        info!("account request declined");
        return Err(ProviderError::UserRejected);
      }
      Ok(self.accounts.clone())
    }
    .boxed()
  }

  fn contract(&self, signer: Address) -> ProviderResult<Self::Contract> {
    if !self.accounts.contains(&signer) {
      return Err(ProviderError::Other(format!(
        "account {signer} is not managed by this wallet"
      )));
    }

    Ok(LocalContract {
      chain: self.chain.clone(),
      signer,
    })
  }
}

/// The crowdfunding contract on a [`LocalChain`], signing as one
/// account.
pub struct LocalContract {
  chain: Arc<LocalChain>,
  signer: Address,
}

impl LocalContract {
  fn submit(
    &self,
    value: Amount,
    call: Call,
  ) -> BoxFuture<'_, ProviderResult<LocalPending>> {
    let pending = self
      .chain
      .submit(self.signer, value, call)
      .map(|(hash, outcome)| LocalPending { hash, outcome });
    async move { pending }.boxed()
  }
}

impl Contract for LocalContract {
  type Pending = LocalPending;

  fn get_campaigns(&self) -> BoxFuture<'_, ProviderResult<Vec<Campaign>>> {
    async move { Ok(self.chain.campaigns()) }.boxed()
  }

  fn create_campaign(
    &self,
    call: CreateCampaign,
  ) -> BoxFuture<'_, ProviderResult<Self::Pending>> {
    self.submit(Amount::ZERO, call.into())
  }

  fn donate_to_campaign(
    &self,
    id: CampaignId,
    value: Amount,
  ) -> BoxFuture<'_, ProviderResult<Self::Pending>> {
    self.submit(value, Call::DonateToCampaign { id })
  }
}

pub struct LocalPending {
  hash: TxHash,
  outcome: Receiver<TxOutcome>,
}

impl PendingTransaction for LocalPending {
  fn hash(&self) -> TxHash {
    self.hash
  }

  fn wait(self) -> BoxFuture<'static, ProviderResult<TxOutcome>> {
    let Self { hash, outcome } = self;
    async move {
      outcome.await.map_err(|_| {
        ProviderError::Transport(format!(
          "chain stopped before transaction {hash} was mined"
        ))
      })
    }
    .boxed()
  }
}
