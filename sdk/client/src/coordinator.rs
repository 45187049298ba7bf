use {
  crate::{
    clock::Clock,
    input,
    provider::{
      Contract,
      CreateCampaign,
      PendingTransaction,
      ProviderResult,
      TxOutcome,
    },
    store::CampaignStore,
    Config,
    Error,
  },
  crowdfund_primitives::{Address, CampaignId, TxHash},
  futures::future::BoxFuture,
  std::sync::Arc,
  tokio::sync::{watch, Mutex},
  tracing::{debug, info, warn},
};

/// The write a transaction performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  Create,
  Donate(CampaignId),
}

/// Proof that a write was confirmed and is reflected in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
  pub hash: TxHash,
  pub block: u64,
}

/// Lifecycle of the most recent write of a session.
///
/// A write moves `Idle -> Submitting -> Confirming` and ends in either
/// `Succeeded` or `Failed`. Input validation failures are reported
/// before anything is submitted and leave the phase untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxPhase {
  Idle,
  Submitting(Operation),
  Confirming(Operation, TxHash),
  Succeeded(Operation, Receipt),
  Failed(Operation, Error),
}

/// Values as typed into the campaign creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignForm {
  pub title: String,
  pub description: String,
  /// Target in whole coins, e.g. "2.5".
  pub target: String,
  /// Local date or date-time, e.g. "2024-05-01T18:30".
  pub deadline: String,
  pub image: String,
}

/// Drives campaign creation and donations through
/// submit, confirm and refresh.
///
/// A write is only reported as successful after the campaign store
/// was refreshed, so whoever reads the store after a success sees the
/// effect of that write. At most one write per session is in flight,
/// a second one started meanwhile fails with
/// [`Error::OperationInFlight`] without reaching the wallet.
pub struct TransactionCoordinator {
  store: Arc<CampaignStore>,
  config: Config,
  clock: Arc<dyn Clock>,
  in_flight: Mutex<()>,
  phase: watch::Sender<TxPhase>,
}

impl TransactionCoordinator {
  pub fn new(
    store: Arc<CampaignStore>,
    config: Config,
    clock: Arc<dyn Clock>,
  ) -> Self {
    let (phase, _) = watch::channel(TxPhase::Idle);
    Self {
      store,
      config,
      clock,
      in_flight: Mutex::new(()),
      phase,
    }
  }

  /// Observes phase changes of writes issued through this coordinator.
  pub fn subscribe(&self) -> watch::Receiver<TxPhase> {
    self.phase.subscribe()
  }

  pub fn phase(&self) -> TxPhase {
    self.phase.borrow().clone()
  }

  pub fn store(&self) -> &Arc<CampaignStore> {
    &self.store
  }

  /// Creates a campaign owned by `owner`.
  ///
  /// The target must be a positive amount and the deadline must lie in
  /// the future, otherwise nothing is submitted.
  pub async fn create_campaign<C: Contract>(
    &self,
    contract: &C,
    owner: Address,
    form: &CampaignForm,
  ) -> Result<Receipt, Error> {
    let call = self.prepare_create(owner, form)?;
    info!("creating campaign '{}' with target {}", call.title, call.target);
    self
      .execute(contract, Operation::Create, move |c| c.create_campaign(call))
      .await
  }

  /// Donates `amount` whole coins to campaign `id`.
  pub async fn donate<C: Contract>(
    &self,
    contract: &C,
    id: CampaignId,
    amount: &str,
  ) -> Result<Receipt, Error> {
    let value = input::parse_positive_amount(amount)?;
    info!("donating {value} to campaign {id}");
    self
      .execute(contract, Operation::Donate(id), move |c| {
        c.donate_to_campaign(id, value)
      })
      .await
  }

  fn prepare_create(
    &self,
    owner: Address,
    form: &CampaignForm,
  ) -> Result<CreateCampaign, Error> {
    input::require("title", &form.title)?;
    input::require("description", &form.description)?;

    let target = input::parse_positive_amount(&form.target)?;
    let deadline =
      input::parse_deadline(&form.deadline, self.config.utc_offset)?;

    let now = self.clock.now_millis();
    if u128::from(deadline) * 1000 <= u128::from(now) {
      return Err(Error::InvalidDeadline(format!(
        "'{}' is not in the future",
        form.deadline.trim()
      )));
    }

    Ok(CreateCampaign {
      owner,
      title: form.title.trim().to_owned(),
      description: form.description.trim().to_owned(),
      target,
      deadline,
      image: form.image.trim().to_owned(),
    })
  }

  async fn execute<'c, C, F>(
    &self,
    contract: &'c C,
    operation: Operation,
    submit: F,
  ) -> Result<Receipt, Error>
  where
    C: Contract,
    F: FnOnce(&'c C) -> BoxFuture<'c, ProviderResult<C::Pending>>,
  {
    let _guard = self.in_flight.try_lock().map_err(|_| {
      warn!("{operation:?} refused, another write is in flight");
      Error::OperationInFlight
    })?;

    let result = self.drive(contract, operation, submit).await;
    match &result {
      Ok(receipt) => {
        info!("{operation:?} succeeded in {receipt:?}");
        self.transition(TxPhase::Succeeded(operation, *receipt));
      }
      Err(e) => {
        warn!("{operation:?} failed: {e}");
        self.transition(TxPhase::Failed(operation, e.clone()));
      }
    }
    result
  }

  async fn drive<'c, C, F>(
    &self,
    contract: &'c C,
    operation: Operation,
    submit: F,
  ) -> Result<Receipt, Error>
  where
    C: Contract,
    F: FnOnce(&'c C) -> BoxFuture<'c, ProviderResult<C::Pending>>,
  {
    self.transition(TxPhase::Submitting(operation));
    let pending = submit(contract).await.map_err(Error::from_write)?;

    let hash = pending.hash();
    self.transition(TxPhase::Confirming(operation, hash));

    let outcome = match self.config.confirmation_timeout {
      Some(limit) => tokio::time::timeout(limit, pending.wait())
        .await
        .map_err(|_| Error::ConfirmationTimeout(hash, limit))?,
      None => pending.wait().await,
    }
    .map_err(Error::from_write)?;

    let block = match outcome {
      TxOutcome::Confirmed { block } => block,
      TxOutcome::Reverted(reason) => {
        return Err(Error::TransactionRejected(reason));
      }
    };

    // the write is final, but success is only declared once
    // the store reflects it.
    self
      .store
      .refresh(Some(contract))
      .await
      .map_err(|e| Error::StaleAfterConfirmation(hash, e.to_string()))?;

    Ok(Receipt { hash, block })
  }

  fn transition(&self, phase: TxPhase) {
    debug!("transaction phase: {phase:?}");
    self.phase.send_replace(phase);
  }
}
