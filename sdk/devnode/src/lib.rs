//! A crowdfunding chain that lives in process memory.
//!
//! [`LocalWallet`] and [`LocalContract`] implement the client SDK's
//! provider traits on top of a [`LocalChain`], so the complete client
//! stack can run without a browser wallet or a deployed contract.

mod block;
mod chain;
mod ledger;
mod mempool;
mod wallet;

pub use {
  block::{Block, Call, Transaction},
  chain::{LocalChain, Mining},
  ledger::Revert,
  wallet::{dev_accounts, LocalContract, LocalPending, LocalWallet},
};
