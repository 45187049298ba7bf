mod address;
mod amount;
mod campaign;
mod hash;

pub use {
  address::{Address, Error as AddressError},
  amount::{Amount, Error as AmountError, DECIMALS},
  campaign::{Campaign, CampaignId},
  hash::TxHash,
};
