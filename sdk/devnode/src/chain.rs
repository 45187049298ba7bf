use {
  crate::{
    block::{Block, Call, Transaction},
    ledger::{Ledger, Revert},
    mempool::Mempool,
  },
  crowdfund_client_sdk::{
    provider::{ProviderError, ProviderResult, TxOutcome},
    Clock,
  },
  crowdfund_primitives::{Address, Amount, Campaign, TxHash},
  dashmap::DashMap,
  parking_lot::{Mutex, RwLock},
  std::{
    sync::{
      atomic::{AtomicU64, Ordering},
      Arc,
      Weak,
    },
    time::Duration,
  },
  tokio::{
    sync::oneshot::{self, Receiver, Sender},
    time::{interval, MissedTickBehavior},
  },
  tracing::{debug, info, warn},
};

/// When the chain turns pending transactions into blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mining {
  /// Every submitted transaction is mined in its own block right away.
  Instant,

  /// A block is produced on every tick, including empty ones.
  Interval(Duration),
}

/// A single node chain running the crowdfunding contract in memory,
/// with no consensus, for dev, CI and test scenarios.
pub struct LocalChain {
  fee: Amount,
  mining: Mining,
  clock: Arc<dyn Clock>,
  nonce: AtomicU64,
  ledger: RwLock<Ledger>,
  mempool: Mutex<Mempool>,
  head: RwLock<Block>,
  watchlist: DashMap<TxHash, Sender<TxOutcome>>,
}

impl LocalChain {
  /// Starts a chain that charges a flat `fee` per transaction.
  ///
  /// With [`Mining::Interval`] the block producer runs as a tokio task,
  /// so this must be called from within a runtime. The task stops once
  /// the last handle to the chain is dropped.
  pub fn new(
    mining: Mining,
    fee: Amount,
    clock: Arc<dyn Clock>,
  ) -> Arc<Self> {
    let genesis = Block::genesis(clock.now_millis() / 1000);
    let chain = Arc::new(Self {
      fee,
      mining,
      clock,
      nonce: AtomicU64::new(0),
      ledger: RwLock::new(Ledger::default()),
      mempool: Mutex::new(Mempool::default()),
      head: RwLock::new(genesis),
      watchlist: DashMap::new(),
    });

    if let Mining::Interval(period) = mining {
      tokio::spawn(Self::runloop(Arc::downgrade(&chain), period));
    }

    chain
  }

  async fn runloop(chain: Weak<Self>, period: Duration) {
    let mut interval = interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await; // first tick completes immediately

    loop {
      interval.tick().await;
      match chain.upgrade() {
        Some(chain) => chain.produce_block(),
        None => break,
      };
    }
    debug!("block producer stopped");
  }

  pub fn fee(&self) -> Amount {
    self.fee
  }

  pub fn mining(&self) -> Mining {
    self.mining
  }

  /// Mints `amount` into `account`.
  pub fn fund(&self, account: Address, amount: Amount) -> Result<(), Revert> {
    self.ledger.write().credit(account, amount)?;
    info!("funded {account} with {amount}");
    Ok(())
  }

  pub fn balance(&self, account: &Address) -> Amount {
    self.ledger.read().balance(account)
  }

  pub fn campaigns(&self) -> Vec<Campaign> {
    self.ledger.read().campaigns().to_vec()
  }

  pub fn head(&self) -> Block {
    self.head.read().clone()
  }

  pub fn height(&self) -> u64 {
    self.head.read().height
  }

  /// Number of transactions waiting for the next block.
  pub fn pending(&self) -> usize {
    self.mempool.lock().len()
  }

  /// Accepts a call into the mempool and returns its hash and a
  /// receiver for its outcome.
  ///
  /// The sender must hold enough to pay `value` and the fee at
  /// submission time. The balance is checked again at execution, when
  /// earlier transactions may have spent it.
  pub(crate) fn submit(
    &self,
    sender: Address,
    value: Amount,
    call: Call,
  ) -> ProviderResult<(TxHash, Receiver<TxOutcome>)> {
    let cost = value
      .checked_add(self.fee)
      .ok_or(ProviderError::InsufficientFunds)?;
    if self.balance(&sender) < cost {
      warn!("{sender} cannot cover {value} plus fee {}", self.fee);
      return Err(ProviderError::InsufficientFunds);
    }

    let tx = Transaction {
      sender,
      nonce: self.nonce.fetch_add(1, Ordering::SeqCst),
      value,
      call,
    };
    let hash = tx
      .hash()
      .map_err(|e| ProviderError::Other(format!("encoding failed: {e}")))?;

    let (signal, receiver) = oneshot::channel();
    self.watchlist.insert(hash, signal);
    self.mempool.lock().consume(hash, tx);
    debug!("transaction {hash} from {sender} entered the mempool");

    if self.mining == Mining::Instant {
      self.produce_block();
    }

    Ok((hash, receiver))
  }

  /// Executes everything in the mempool in a new block and signals
  /// the outcome to whoever awaits each transaction.
  pub fn produce_block(&self) -> u64 {
    let timestamp = self.clock.now_millis() / 1000;

    let (block, outcomes) = {
      let mut ledger = self.ledger.write();
      let mut head = self.head.write();
      let (block, outcomes) = self.mempool.lock().produce(
        &mut ledger,
        &head,
        timestamp,
        self.fee,
      );
      *head = block.clone();
      (block, outcomes)
    };

    match block.transactions.len() {
      0 => debug!("produced empty block {}", block.height),
      count => {
        info!("produced block {} with {count} transactions", block.height)
      }
    }

    for (hash, outcome) in outcomes {
      if let TxOutcome::Reverted(reason) = &outcome {
        warn!("transaction {hash} reverted: {reason}");
      }
      if let Some((_, signal)) = self.watchlist.remove(&hash) {
        if signal.send(outcome).is_err() {
          debug!("nobody is awaiting transaction {hash}");
        }
      }
    }

    block.height
  }
}
