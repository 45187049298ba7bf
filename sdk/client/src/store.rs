use {
  crate::{provider::Contract, Error},
  crowdfund_primitives::{Campaign, CampaignId},
  parking_lot::RwLock,
  std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
  },
  tracing::{debug, warn},
};

/// The most recently fetched campaign list.
///
/// The list is only ever replaced as a whole. Readers hold an [`Arc`] to
/// the snapshot they got, so they never see a half-updated list.
/// Every refresh is numbered when it starts, and a list is installed
/// only if no later-started refresh has installed one already.
#[derive(Debug, Default)]
pub struct CampaignStore {
  fetches: AtomicU64,
  current: RwLock<Installed>,
}

/// A campaign list and the number of the fetch that produced it.
#[derive(Debug, Default)]
struct Installed {
  fetch: u64,
  campaigns: Arc<Vec<Campaign>>,
}

impl CampaignStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Fetches the authoritative campaign list from the contract and
  /// installs it.
  ///
  /// On failure the previous list stays in place. No retries happen
  /// here, that decision belongs to the caller.
  ///
  /// When a refresh that started later has already installed its
  /// list, this fetch is outdated and the newer list is returned
  /// instead.
  pub async fn refresh<C: Contract>(
    &self,
    contract: Option<&C>,
  ) -> Result<Arc<Vec<Campaign>>, Error> {
    let contract = contract.ok_or_else(|| {
      Error::FetchFailed("no contract handle, wallet is not connected".into())
    })?;
    let fetch = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;

    let campaigns = contract.get_campaigns().await.map_err(|e| {
      warn!("campaign fetch failed: {e}");
      Error::from_read(e)
    })?;

    for campaign in campaigns.iter().filter(|c| !c.is_consistent()) {
      warn!(
        "campaign {} has a donation history that does not add up to {}",
        campaign.id, campaign.amount_collected
      );
    }

    let mut current = self.current.write();
    if current.fetch > fetch {
      debug!(
        "discarding campaign fetch {fetch}, fetch {} is newer",
        current.fetch
      );
      return Ok(current.campaigns.clone());
    }

    let campaigns = Arc::new(campaigns);
    *current = Installed {
      fetch,
      campaigns: campaigns.clone(),
    };
    debug!("campaign list refreshed, {} campaigns", campaigns.len());

    Ok(campaigns)
  }

  /// The current list. Cheap, shares the stored allocation.
  pub fn snapshot(&self) -> Arc<Vec<Campaign>> {
    self.current.read().campaigns.clone()
  }

  pub fn get(&self, id: CampaignId) -> Option<Campaign> {
    let current = self.current.read();
    current.campaigns.iter().find(|c| c.id == id).cloned()
  }

  pub fn len(&self) -> usize {
    self.current.read().campaigns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
