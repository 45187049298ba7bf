use {
  crate::{
    block::{Block, Transaction},
    ledger::Ledger,
  },
  crowdfund_client_sdk::provider::TxOutcome,
  crowdfund_primitives::{Amount, TxHash},
};

#[derive(Default)]
pub struct Mempool {
  txs: Vec<(TxHash, Transaction)>,
}

impl Mempool {
  pub fn consume(&mut self, hash: TxHash, tx: Transaction) {
    self.txs.push((hash, tx));
  }

  pub fn len(&self) -> usize {
    self.txs.len()
  }

  /// Executes all pending transactions in submission order on top of
  /// `ledger` and packs them into the next block.
  pub fn produce(
    &mut self,
    ledger: &mut Ledger,
    parent: &Block,
    timestamp: u64,
    fee: Amount,
  ) -> (Block, Vec<(TxHash, TxOutcome)>) {
    let height = parent.height + 1;
    let txs = std::mem::take(&mut self.txs);
    let outcomes = txs
      .iter()
      .map(|(hash, tx)| {
        let outcome = match ledger.execute(tx, timestamp, fee) {
          Ok(()) => TxOutcome::Confirmed { block: height },
          Err(revert) => TxOutcome::Reverted(revert.to_string()),
        };
        (*hash, outcome)
      })
      .collect();

    let block = Block {
      height,
      timestamp,
      transactions: txs.into_iter().map(|(_, tx)| tx).collect(),
    };

    (block, outcomes)
  }
}
