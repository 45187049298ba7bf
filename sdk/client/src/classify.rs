//! Presentation state derived from campaign records.
//!
//! Everything here is a pure function of a campaign and a caller
//! supplied `now` (milliseconds since the unix epoch). Nothing reads
//! the clock on its own, so the same inputs always classify the same
//! way.

use crowdfund_primitives::Campaign;

const MILLIS_PER_DAY: i128 = 86_400_000;

/// Resolution of [`Metrics::progress_bps`], basis points of the target.
const PROGRESS_SCALE: u128 = 10_000;

/// A campaign accepts donations while its deadline is ahead of `now`
/// and it has not yet reached its target. A campaign that collected
/// exactly its target is closed.
pub fn is_active(campaign: &Campaign, now: u64) -> bool {
  campaign.deadline_millis() > u128::from(now)
    && campaign.amount_collected < campaign.target
}

/// Splits campaigns into `(active, closed)`, each keeping the input's
/// relative order.
pub fn partition(
  campaigns: &[Campaign],
  now: u64,
) -> (Vec<&Campaign>, Vec<&Campaign>) {
  campaigns.iter().partition(|c| is_active(c, now))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
  /// Collected amount relative to the target in whole basis points,
  /// rounded down and capped at 10000. `None` when the target is zero.
  pub progress_bps: Option<u32>,

  /// Whole days until the deadline, rounded up. Zero or negative once
  /// the deadline has passed.
  pub days_left: i64,
}

impl Metrics {
  /// Progress as a fraction in `[0, 1]`, for progress bars.
  ///
  /// Derived from [`Metrics::progress_bps`], so it carries at most four
  /// decimal places and is never above the exact ratio.
  pub fn progress_fraction(&self) -> Option<f64> {
    self
      .progress_bps
      .map(|bps| f64::from(bps) / PROGRESS_SCALE as f64)
  }
}

pub fn metrics(campaign: &Campaign, now: u64) -> Metrics {
  Metrics {
    progress_bps: progress_bps(campaign),
    days_left: days_left(campaign, now),
  }
}

fn progress_bps(campaign: &Campaign) -> Option<u32> {
  let target = campaign.target.units();
  if target == 0 {
    return None;
  }

  let collected = campaign.amount_collected.units();
  let bps = match collected.checked_mul(PROGRESS_SCALE) {
    Some(scaled) => scaled / target,
    // amounts this large can afford to lose the low digits of the target
    None => collected / (target / PROGRESS_SCALE).max(1),
  };

  Some(bps.min(PROGRESS_SCALE) as u32)
}

fn days_left(campaign: &Campaign, now: u64) -> i64 {
  let remaining = campaign.deadline_millis() as i128 - i128::from(now);
  let days = remaining / MILLIS_PER_DAY;
  let days = if remaining % MILLIS_PER_DAY > 0 {
    days + 1
  } else {
    days
  };
  days as i64
}
