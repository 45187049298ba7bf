mod classify;
mod clock;
mod config;
mod coordinator;
mod error;
mod input;
mod session;
mod store;
mod view;

pub mod provider;

pub use {
  classify::{is_active, metrics, partition, Metrics},
  clock::{Clock, FixedClock, SystemClock},
  config::Config,
  coordinator::{
    CampaignForm,
    Operation,
    Receipt,
    TransactionCoordinator,
    TxPhase,
  },
  crowdfund_primitives as primitives,
  error::{Error, MessageClass},
  input::{parse_amount, parse_deadline},
  session::WalletSession,
  store::CampaignStore,
  view::{CampaignCard, Dashboard, Listing, ViewState},
};
