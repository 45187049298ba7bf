use {
  crate::{
    classify::{self, Metrics},
    clock::{Clock, SystemClock},
    coordinator::{CampaignForm, Receipt, TransactionCoordinator},
    provider::WalletProvider,
    session::WalletSession,
    store::CampaignStore,
    Config,
    Error,
  },
  crowdfund_primitives::{Address, Campaign, CampaignId},
  std::sync::Arc,
  tracing::{debug, warn},
};

/// What the user is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
  /// The active and closed campaign lists.
  Browsing,

  /// The campaign creation form.
  CreateModalOpen,

  /// One campaign with its donors and the donation form.
  DetailView(CampaignId),

  /// A donation to this campaign failed for lack of funds.
  LowBalanceAlert(CampaignId),
}

/// A campaign together with its display metrics.
#[derive(Debug, Clone)]
pub struct CampaignCard {
  pub campaign: Campaign,
  pub metrics: Metrics,
}

#[derive(Debug, Clone, Default)]
pub struct Listing {
  pub active: Vec<CampaignCard>,
  pub closed: Vec<CampaignCard>,
}

/// Owns the UI state of one browser session and routes user actions to
/// the wallet session, the campaign store and the transaction
/// coordinator.
///
/// View transitions happen only in response to explicit user actions
/// and to the outcome of writes.
pub struct Dashboard<P: WalletProvider> {
  session: WalletSession<P>,
  coordinator: TransactionCoordinator,
  clock: Arc<dyn Clock>,
  view: ViewState,
}

impl<P: WalletProvider> Dashboard<P> {
  pub fn new(provider: Option<P>, config: Config) -> Self {
    Self::with_clock(provider, config, Arc::new(SystemClock))
  }

  pub fn with_clock(
    provider: Option<P>,
    config: Config,
    clock: Arc<dyn Clock>,
  ) -> Self {
    let store = Arc::new(CampaignStore::new());
    Self {
      session: WalletSession::new(provider),
      coordinator: TransactionCoordinator::new(store, config, clock.clone()),
      clock,
      view: ViewState::Browsing,
    }
  }

  pub fn session(&self) -> &WalletSession<P> {
    &self.session
  }

  pub fn store(&self) -> &CampaignStore {
    self.coordinator.store()
  }

  pub fn coordinator(&self) -> &TransactionCoordinator {
    &self.coordinator
  }

  pub fn view(&self) -> ViewState {
    self.view
  }

  /// Connects the wallet and loads the campaign list.
  ///
  /// A failed initial load does not fail the connection, the list stays
  /// empty until the next successful refresh.
  pub async fn connect(&self) -> Result<Address, Error> {
    let account = self.session.connect().await?;
    if let Err(e) = self.refresh().await {
      warn!("initial campaign load failed: {e}");
    }
    Ok(account)
  }

  pub async fn refresh(&self) -> Result<(), Error> {
    let contract = self.session.contract();
    self.store().refresh(contract.as_deref()).await.map(|_| ())
  }

  /// Abbreviated connected account for the page header.
  pub fn account_label(&self) -> Option<String> {
    self.session.account().map(|account| account.short())
  }

  /// Current campaigns split into active and closed, with metrics
  /// evaluated at the same instant for all of them.
  pub fn listing(&self) -> Listing {
    let now = self.clock.now_millis();
    let campaigns = self.store().snapshot();
    let (active, closed) = classify::partition(&campaigns, now);
    let cards = |set: Vec<&Campaign>| -> Vec<CampaignCard> {
      set
        .into_iter()
        .map(|campaign| CampaignCard {
          campaign: campaign.clone(),
          metrics: classify::metrics(campaign, now),
        })
        .collect()
    };

    Listing {
      active: cards(active),
      closed: cards(closed),
    }
  }

  /// The campaign shown in the detail view, as of the latest refresh.
  pub fn selected(&self) -> Option<CampaignCard> {
    match self.view {
      ViewState::DetailView(id) | ViewState::LowBalanceAlert(id) => {
        self.store().get(id).map(|campaign| CampaignCard {
          metrics: classify::metrics(&campaign, self.clock.now_millis()),
          campaign,
        })
      }
      ViewState::Browsing | ViewState::CreateModalOpen => None,
    }
  }

  pub fn open_create(&mut self) -> bool {
    match self.view {
      ViewState::Browsing => self.transition(ViewState::CreateModalOpen),
      _ => false,
    }
  }

  /// Opens the detail view of a known campaign.
  pub fn select(&mut self, id: CampaignId) -> bool {
    match self.view {
      ViewState::Browsing if self.store().get(id).is_some() => {
        self.transition(ViewState::DetailView(id))
      }
      _ => false,
    }
  }

  /// Closes the detail view or the creation form.
  pub fn close(&mut self) -> bool {
    match self.view {
      ViewState::DetailView(_) | ViewState::CreateModalOpen => {
        self.transition(ViewState::Browsing)
      }
      _ => false,
    }
  }

  /// Acknowledges the low balance alert and returns to the campaign.
  pub fn dismiss_alert(&mut self) -> bool {
    match self.view {
      ViewState::LowBalanceAlert(id) => {
        self.transition(ViewState::DetailView(id))
      }
      _ => false,
    }
  }

  /// Submits the creation form on behalf of the connected account.
  /// The form closes once the new campaign is in the store.
  pub async fn submit_create(
    &mut self,
    form: &CampaignForm,
  ) -> Result<Receipt, Error> {
    let (account, contract) = self.connection()?;
    let receipt = self
      .coordinator
      .create_campaign(&*contract, account, form)
      .await?;

    if self.view == ViewState::CreateModalOpen {
      self.transition(ViewState::Browsing);
    }
    Ok(receipt)
  }

  /// Donates to the campaign in the detail view. Any other view,
  /// including the low balance alert, refuses with
  /// [`Error::NoCampaignSelected`].
  ///
  /// On success the detail view closes. When the wallet cannot cover
  /// the amount plus fee the low balance alert is raised.
  pub async fn donate(&mut self, amount: &str) -> Result<Receipt, Error> {
    let id = match self.view {
      ViewState::DetailView(id) => id,
      _ => return Err(Error::NoCampaignSelected),
    };

    let (_, contract) = self.connection()?;
    let result = self.coordinator.donate(&*contract, id, amount).await;
    match result {
      Ok(receipt) => {
        self.transition(ViewState::Browsing);
        Ok(receipt)
      }
      Err(Error::InsufficientFunds) => {
        self.transition(ViewState::LowBalanceAlert(id));
        Err(Error::InsufficientFunds)
      }
      Err(e) => Err(e),
    }
  }

  fn connection(&self) -> Result<(Address, Arc<P::Contract>), Error> {
    match (self.session.account(), self.session.contract()) {
      (Some(account), Some(contract)) => Ok((account, contract)),
      _ => Err(Error::NotConnected),
    }
  }

  fn transition(&mut self, next: ViewState) -> bool {
    debug!("view {:?} -> {next:?}", self.view);
    self.view = next;
    true
  }
}
