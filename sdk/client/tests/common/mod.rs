#![allow(dead_code)]

use {
  crowdfund_client_sdk::{
    primitives::{Address, Amount, Campaign, CampaignId, TxHash},
    provider::{
      Contract,
      CreateCampaign,
      PendingTransaction,
      ProviderError,
      ProviderResult,
      TxOutcome,
      WalletProvider,
    },
  },
  futures::{future::BoxFuture, FutureExt},
  parking_lot::Mutex,
  std::sync::{
    atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
    Arc,
  },
  tokio::sync::oneshot,
};

/// 2023-11-14T22:13:20Z
pub const NOW: u64 = 1_700_000_000_000;
pub const DAY: u64 = 86_400;

pub fn alice() -> Address {
  "0x00000000000000000000000000000000000a11ce".parse().unwrap()
}

pub fn bob() -> Address {
  "0x0000000000000000000000000000000000000b0b".parse().unwrap()
}

/// A campaign whose donation history is a single donation by bob
/// covering everything collected so far.
pub fn campaign(
  id: CampaignId,
  target: Amount,
  collected: Amount,
  deadline: u64,
) -> Campaign {
  let (donators, donations) = match collected.is_zero() {
    true => (vec![], vec![]),
    false => (vec![bob()], vec![collected]),
  };
  Campaign {
    id,
    owner: alice(),
    title: format!("campaign {id}"),
    description: "test campaign".into(),
    image: "https://example.org/cover.png".into(),
    target,
    deadline,
    amount_collected: collected,
    donators,
    donations,
  }
}

/// Faults injected into the next calls against the mock chain.
#[derive(Debug, Default)]
pub struct Faults {
  /// Fails every read while set.
  pub reads: Option<ProviderError>,

  /// Fails the next write submission.
  pub submit: Option<ProviderError>,

  /// Reverts the next write at confirmation.
  pub revert: Option<String>,

  /// The next write never confirms.
  pub hang: bool,
}

/// Contract state shared by every handle of a mock wallet.
#[derive(Debug, Default)]
pub struct MockChain {
  campaigns: Mutex<Vec<Campaign>>,
  pub faults: Mutex<Faults>,
  pub reject_accounts: AtomicBool,
  held_read: Mutex<Option<oneshot::Receiver<()>>>,
  reads: AtomicUsize,
  writes: AtomicUsize,
  blocks: AtomicU64,
}

impl MockChain {
  pub fn with_campaigns(campaigns: Vec<Campaign>) -> Arc<Self> {
    Arc::new(Self {
      campaigns: Mutex::new(campaigns),
      ..Default::default()
    })
  }

  pub fn reads(&self) -> usize {
    self.reads.load(Ordering::SeqCst)
  }

  /// Number of write transactions submitted, confirmed or not.
  pub fn writes(&self) -> usize {
    self.writes.load(Ordering::SeqCst)
  }

  pub fn campaigns(&self) -> Vec<Campaign> {
    self.campaigns.lock().clone()
  }

  /// The next read captures the campaign list right away but does not
  /// return it until the sender fires or is dropped.
  pub fn hold_next_read(&self) -> oneshot::Sender<()> {
    let (release, held) = oneshot::channel();
    *self.held_read.lock() = Some(held);
    release
  }

  /// Adds a campaign as if another client had created it.
  pub fn insert(&self, campaign: Campaign) {
    self.campaigns.lock().push(campaign);
  }

  fn submit(
    self: &Arc<Self>,
    signer: Address,
    effect: Effect,
  ) -> ProviderResult<MockPending> {
    if let Some(e) = self.faults.lock().submit.take() {
      return Err(e);
    }

    let nonce = self.writes.fetch_add(1, Ordering::SeqCst) as u8;
    let mut faults = self.faults.lock();
    Ok(MockPending {
      hash: TxHash::new([nonce.wrapping_add(1); 32]),
      chain: self.clone(),
      signer,
      effect,
      revert: faults.revert.take(),
      hang: std::mem::take(&mut faults.hang),
    })
  }

  fn execute(&self, signer: Address, effect: Effect) -> TxOutcome {
    let mut campaigns = self.campaigns.lock();
    match effect {
      Effect::Create(call) => {
        let id = campaigns.len() as CampaignId;
        campaigns.push(Campaign {
          id,
          owner: call.owner,
          title: call.title,
          description: call.description,
          image: call.image,
          target: call.target,
          deadline: call.deadline,
          amount_collected: Amount::ZERO,
          donators: vec![],
          donations: vec![],
        });
      }
      Effect::Donate(id, value) => {
        let campaign = match campaigns.iter_mut().find(|c| c.id == id) {
          Some(campaign) => campaign,
          None => {
            return TxOutcome::Reverted(format!("no campaign with id {id}"));
          }
        };
        campaign.donators.push(signer);
        campaign.donations.push(value);
        campaign.amount_collected =
          campaign.amount_collected.checked_add(value).unwrap();
      }
    }
    TxOutcome::Confirmed {
      block: self.blocks.fetch_add(1, Ordering::SeqCst) + 1,
    }
  }
}

#[derive(Debug)]
enum Effect {
  Create(CreateCampaign),
  Donate(CampaignId, Amount),
}

pub struct MockPending {
  hash: TxHash,
  chain: Arc<MockChain>,
  signer: Address,
  effect: Effect,
  revert: Option<String>,
  hang: bool,
}

impl PendingTransaction for MockPending {
  fn hash(&self) -> TxHash {
    self.hash
  }

  fn wait(self) -> BoxFuture<'static, ProviderResult<TxOutcome>> {
    if self.hang {
      return futures::future::pending().boxed();
    }

    async move {
      if let Some(reason) = self.revert {
        return Ok(TxOutcome::Reverted(reason));
      }
      Ok(self.chain.execute(self.signer, self.effect))
    }
    .boxed()
  }
}

pub struct MockContract {
  chain: Arc<MockChain>,
  signer: Address,
}

impl Contract for MockContract {
  type Pending = MockPending;

  fn get_campaigns(&self) -> BoxFuture<'_, ProviderResult<Vec<Campaign>>> {
    async move {
      self.chain.reads.fetch_add(1, Ordering::SeqCst);
      if let Some(e) = self.chain.faults.lock().reads.clone() {
        return Err(e);
      }
      let campaigns = self.chain.campaigns();
      let held = self.chain.held_read.lock().take();
      if let Some(held) = held {
        let _ = held.await;
      }
      Ok(campaigns)
    }
    .boxed()
  }

  fn create_campaign(
    &self,
    call: CreateCampaign,
  ) -> BoxFuture<'_, ProviderResult<Self::Pending>> {
    let result = self.chain.submit(self.signer, Effect::Create(call));
    async move { result }.boxed()
  }

  fn donate_to_campaign(
    &self,
    id: CampaignId,
    value: Amount,
  ) -> BoxFuture<'_, ProviderResult<Self::Pending>> {
    let result = self.chain.submit(self.signer, Effect::Donate(id, value));
    async move { result }.boxed()
  }
}

pub struct MockWallet {
  chain: Arc<MockChain>,
  accounts: Vec<Address>,
}

impl MockWallet {
  pub fn new(chain: Arc<MockChain>, accounts: Vec<Address>) -> Self {
    Self { chain, accounts }
  }
}

impl WalletProvider for MockWallet {
  type Contract = MockContract;

  fn request_accounts(&self) -> BoxFuture<'_, ProviderResult<Vec<Address>>> {
    async move {
      match self.chain.reject_accounts.load(Ordering::SeqCst) {
        true => Err(ProviderError::UserRejected),
        false => Ok(self.accounts.clone()),
      }
    }
    .boxed()
  }

  fn contract(&self, signer: Address) -> ProviderResult<Self::Contract> {
    Ok(MockContract {
      chain: self.chain.clone(),
      signer,
    })
  }
}
