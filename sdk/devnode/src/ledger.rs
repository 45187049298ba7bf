use {
  crate::block::{Call, Transaction},
  crowdfund_primitives::{Address, Amount, Campaign, CampaignId},
  std::collections::HashMap,
  thiserror::Error,
};

/// Reasons the contract refuses to execute a transaction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Revert {
  #[error("the deadline should be a date in the future")]
  DeadlineNotInFuture,

  #[error("no campaign with id {0}")]
  UnknownCampaign(CampaignId),

  #[error("sender balance does not cover value and fee")]
  InsufficientBalance,

  #[error("arithmetic overflow")]
  Overflow,
}

/// Contract storage and account balances.
#[derive(Debug, Default)]
pub struct Ledger {
  campaigns: Vec<Campaign>,
  balances: HashMap<Address, Amount>,
}

impl Ledger {
  pub fn campaigns(&self) -> &[Campaign] {
    &self.campaigns
  }

  pub fn balance(&self, account: &Address) -> Amount {
    self.balances.get(account).copied().unwrap_or_default()
  }

  pub fn credit(
    &mut self,
    account: Address,
    amount: Amount,
  ) -> Result<(), Revert> {
    let balance = self
      .balance(&account)
      .checked_add(amount)
      .ok_or(Revert::Overflow)?;
    self.balances.insert(account, balance);
    Ok(())
  }

  /// Runs a transaction at block time `timestamp`.
  ///
  /// The fee is charged whenever the sender can cover value and fee,
  /// even if the call itself reverts. A reverted call changes nothing
  /// else.
  pub fn execute(
    &mut self,
    tx: &Transaction,
    timestamp: u64,
    fee: Amount,
  ) -> Result<(), Revert> {
    let cost = tx.value.checked_add(fee).ok_or(Revert::Overflow)?;
    let balance = self.balance(&tx.sender);
    if balance < cost {
      return Err(Revert::InsufficientBalance);
    }

    let after_fee = balance.checked_sub(fee).ok_or(Revert::Overflow)?;
    self.balances.insert(tx.sender, after_fee);
    self.apply(tx, timestamp)
  }

  fn apply(&mut self, tx: &Transaction, timestamp: u64) -> Result<(), Revert> {
    match &tx.call {
      Call::CreateCampaign {
        owner,
        title,
        description,
        target,
        deadline,
        image,
      } => {
        if *deadline <= timestamp {
          return Err(Revert::DeadlineNotInFuture);
        }
        self.campaigns.push(Campaign {
          id: self.campaigns.len() as CampaignId,
          owner: *owner,
          title: title.clone(),
          description: description.clone(),
          image: image.clone(),
          target: *target,
          deadline: *deadline,
          amount_collected: Amount::ZERO,
          donators: vec![],
          donations: vec![],
        });
        Ok(())
      }
      Call::DonateToCampaign { id } => self.donate(tx.sender, *id, tx.value),
    }
  }

  fn donate(
    &mut self,
    donor: Address,
    id: CampaignId,
    value: Amount,
  ) -> Result<(), Revert> {
    let campaign = usize::try_from(id)
      .ok()
      .and_then(|index| self.campaigns.get(index))
      .ok_or(Revert::UnknownCampaign(id))?;

    let owner = campaign.owner;
    let collected = campaign
      .amount_collected
      .checked_add(value)
      .ok_or(Revert::Overflow)?;

    // all checks happen before the first write
    let donor_after = self
      .balance(&donor)
      .checked_sub(value)
      .ok_or(Revert::InsufficientBalance)?;
    let owner_before = match owner == donor {
      true => donor_after,
      false => self.balance(&owner),
    };
    let owner_after =
      owner_before.checked_add(value).ok_or(Revert::Overflow)?;

    self.balances.insert(donor, donor_after);
    self.balances.insert(owner, owner_after);

    let campaign = &mut self.campaigns[id as usize];
    campaign.donators.push(donor);
    campaign.donations.push(value);
    campaign.amount_collected = collected;
    Ok(())
  }
}
