use {
  std::time::Duration,
  time::UtcOffset,
  tracing::{debug, warn},
};

/// Client-wide settings.
#[derive(Debug, Clone)]
pub struct Config {
  /// How long to wait for a submitted transaction to be confirmed.
  ///
  /// When elapsed, the operation fails with
  /// [`crate::Error::ConfirmationTimeout`]. The transaction itself may
  /// still be mined later, a subsequent refresh will reflect that.
  /// `None` waits indefinitely.
  pub confirmation_timeout: Option<Duration>,

  /// Offset of the user's local time zone. Deadlines typed into the
  /// create form are local wall-clock times and are converted to
  /// unix timestamps using this offset.
  pub utc_offset: UtcOffset,
}

impl Config {
  /// Default settings with `utc_offset` taken from the time zone of
  /// this machine, falling back to UTC when it cannot be determined.
  ///
  /// The offset can only be read reliably while the process is single
  /// threaded, so call this before starting an async runtime.
  pub fn local() -> Self {
    let utc_offset = match UtcOffset::current_local_offset() {
      Ok(offset) => {
        debug!("local utc offset is {offset}");
        offset
      }
      Err(e) => {
        warn!("local utc offset unavailable, using UTC: {e}");
        UtcOffset::UTC
      }
    };

    Self {
      utc_offset,
      ..Default::default()
    }
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      confirmation_timeout: Some(Duration::from_secs(300)), // 5 min
      utc_offset: UtcOffset::UTC,
    }
  }
}
