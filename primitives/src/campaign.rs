use {
  crate::{Address, Amount},
  serde::{Deserialize, Serialize},
};

/// Position of a campaign in the contract's campaign list.
///
/// Assigned by the contract when the campaign is created and
/// never reused afterwards.
pub type CampaignId = u64;

/// A fundraising record as returned by the contract.
///
/// This is a read-only projection, clients never patch it in place.
/// Every change to a campaign happens on-chain and is observed by
/// fetching the whole campaign list again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
  pub id: CampaignId,

  /// The account that created the campaign.
  pub owner: Address,

  pub title: String,
  pub description: String,

  /// Link to the campaign's cover image, opaque to the client.
  pub image: String,

  /// Amount the campaign is trying to raise.
  pub target: Amount,

  /// Unix timestamp in seconds, fixed when the campaign is created.
  pub deadline: u64,

  /// Sum of all donations. Grows only through confirmed donations.
  pub amount_collected: Amount,

  /// Donor accounts in donation order. An account that donated
  /// several times appears several times.
  pub donators: Vec<Address>,

  /// Donated amounts, `donations[i]` was given by `donators[i]`.
  pub donations: Vec<Amount>,
}

impl Campaign {
  /// Iterates the donation history as `(donor, amount)` pairs.
  pub fn donations(&self) -> impl Iterator<Item = (&Address, &Amount)> {
    self.donators.iter().zip(self.donations.iter())
  }

  /// Number of donations made, counting repeat donors each time.
  pub fn backers(&self) -> usize {
    self.donators.len()
  }

  /// Deadline expressed in milliseconds, the resolution clients
  /// compare against.
  pub fn deadline_millis(&self) -> u128 {
    u128::from(self.deadline) * 1000
  }

  /// Checks that the donation history lines up and adds up to the
  /// collected total.
  pub fn is_consistent(&self) -> bool {
    if self.donators.len() != self.donations.len() {
      return false;
    }

    self
      .donations
      .iter()
      .try_fold(Amount::ZERO, |acc, amount| acc.checked_add(*amount))
      .map(|sum| sum == self.amount_collected)
      .unwrap_or(false)
  }
}
