//! Conversion of human-entered form values into on-chain units.

use {
  crate::Error,
  crowdfund_primitives::Amount,
  time::{
    format_description::FormatItem,
    macros::format_description,
    Date,
    PrimitiveDateTime,
    Time,
    UtcOffset,
  },
};

const DATE: &[FormatItem<'static>] =
  format_description!("[year]-[month]-[day]");

const DATETIME_MINUTES: &[FormatItem<'static>] =
  format_description!("[year]-[month]-[day]T[hour]:[minute]");

const DATETIME_SECONDS: &[FormatItem<'static>] =
  format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Parses an amount of whole coins ("0.5", "12") into the smallest unit.
pub fn parse_amount(text: &str) -> Result<Amount, Error> {
  Ok(Amount::parse_ether(text)?)
}

/// Like [`parse_amount`] but also rejects zero.
pub fn parse_positive_amount(text: &str) -> Result<Amount, Error> {
  let amount = parse_amount(text)?;
  if amount.is_zero() {
    return Err(Error::InvalidAmount("amount must be greater than zero".into()));
  }
  Ok(amount)
}

/// Parses a local wall-clock deadline into a unix timestamp in seconds.
///
/// Accepts the formats produced by date and date-time form inputs:
/// `2024-05-01`, `2024-05-01T18:30` and `2024-05-01T18:30:15`. A bare
/// date means midnight at the start of that day.
pub fn parse_deadline(text: &str, offset: UtcOffset) -> Result<u64, Error> {
  let text = text.trim();
  let local = PrimitiveDateTime::parse(text, DATETIME_MINUTES)
    .or_else(|_| PrimitiveDateTime::parse(text, DATETIME_SECONDS))
    .or_else(|_| {
      Date::parse(text, DATE).map(|date| date.with_time(Time::MIDNIGHT))
    })
    .map_err(|e| Error::InvalidDeadline(format!("'{text}': {e}")))?;

  let timestamp = local.assume_offset(offset).unix_timestamp();
  u64::try_from(timestamp).map_err(|_| {
    Error::InvalidDeadline(format!("'{text}' is before the unix epoch"))
  })
}

/// Rejects blank required text fields.
pub(crate) fn require(
  field: &'static str,
  value: &str,
) -> Result<(), Error> {
  match value.trim().is_empty() {
    true => Err(Error::MissingField(field)),
    false => Ok(()),
  }
}
