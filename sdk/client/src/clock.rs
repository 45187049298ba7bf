use std::{
  sync::atomic::{AtomicU64, Ordering},
  time::{SystemTime, UNIX_EPOCH},
};

/// Source of the current time, in milliseconds since the unix epoch.
pub trait Clock: Send + Sync {
  fn now_millis(&self) -> u64;
}

/// Wall clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now_millis(&self) -> u64 {
    SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map(|d| d.as_millis() as u64)
      .unwrap_or_default()
  }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct FixedClock(AtomicU64);

impl FixedClock {
  pub fn new(now_millis: u64) -> Self {
    Self(AtomicU64::new(now_millis))
  }

  pub fn set(&self, now_millis: u64) {
    self.0.store(now_millis, Ordering::SeqCst);
  }

  pub fn advance(&self, millis: u64) {
    self.0.fetch_add(millis, Ordering::SeqCst);
  }
}

impl Clock for FixedClock {
  fn now_millis(&self) -> u64 {
    self.0.load(Ordering::SeqCst)
  }
}
