use {
  clap::Parser,
  crowdfund_devnode::Mining,
  crowdfund_primitives::Amount,
  humantime::Duration,
};

/// Crowdfunding Local Devnode
///
/// Runs the crowdfunding contract on a single node in-memory chain
/// and drives a scripted session of browser dashboards against it.
#[derive(Debug, Parser)]
pub struct SystemSettings {
  /// Block production interval, zero mines every transaction at once
  #[clap(long, short = 't', value_name = "DURATION", default_value = "2s")]
  block_time: Duration,

  /// Number of funded development accounts, at least two
  #[clap(long, short, value_name = "COUNT", default_value = "3")]
  accounts: usize,

  /// Initial balance of every development account
  #[clap(long, short, value_name = "AMOUNT", default_value = "100")]
  balance: Amount,

  /// Flat network fee charged for every transaction
  #[clap(long, short, value_name = "AMOUNT", default_value = "0.001")]
  fee: Amount,
}

impl SystemSettings {
  pub fn mining(&self) -> Mining {
    match std::time::Duration::from(self.block_time) {
      period if period.is_zero() => Mining::Instant,
      period => Mining::Interval(period),
    }
  }

  pub fn accounts(&self) -> usize {
    self.accounts
  }

  pub fn balance(&self) -> Amount {
    self.balance
  }

  pub fn fee(&self) -> Amount {
    self.fee
  }
}
