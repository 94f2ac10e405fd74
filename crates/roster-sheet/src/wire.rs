//! Wire format of the Apps Script exchange.
//!
//! Outbound: the record's fields under their French sheet-column keys plus
//! the submission date. Inbound: whatever text the script returned,
//! interpreted as a JSON object with a `status` and an optional `message`.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use roster_core::record::ValidatedRecord;

use crate::error::{EXCERPT_MAX_CHARS, Error, Result};

// ─── Outbound payload ────────────────────────────────────────────────────────

/// The JSON body POSTed to the script. Keys match the spreadsheet's
/// column vocabulary; absent optionals are omitted entirely.
#[derive(Debug, Serialize)]
pub(crate) struct SubmissionPayload<'a> {
  #[serde(rename = "prenom")]
  pub first_name: &'a str,
  #[serde(rename = "nom")]
  pub last_name: &'a str,
  pub email: &'a str,
  #[serde(rename = "telephone", skip_serializing_if = "Option::is_none")]
  pub phone: Option<&'a str>,
  #[serde(rename = "typeMembre", skip_serializing_if = "Option::is_none")]
  pub member_type: Option<&'a str>,
  #[serde(rename = "dateSoumission")]
  pub submission_date: NaiveDate,
}

impl<'a> SubmissionPayload<'a> {
  pub fn new(record: &'a ValidatedRecord, submission_date: NaiveDate) -> Self {
    Self {
      first_name: &record.first_name,
      last_name: &record.last_name,
      email: &record.email,
      phone: record.phone.as_deref(),
      member_type: record.member_type.as_deref(),
      submission_date,
    }
  }
}

// ─── Inbound reply ───────────────────────────────────────────────────────────

/// Interpret the raw reply text.
///
/// Returns the backend's human-readable `message`, if it sent one. The
/// body is parsed as a `Value` first so a reply that is valid JSON but
/// not an object still reads as "`status` absent" rather than a parse
/// failure, matching the script's loose contract.
pub(crate) fn interpret_reply(raw: &str) -> Result<Option<String>> {
  let value: Value = serde_json::from_str(raw)
    .map_err(|_| Error::MalformedResponse { excerpt: excerpt(raw) })?;

  let status = value.get("status").and_then(Value::as_str);
  if status != Some("success") {
    let message = value
      .get("message")
      .and_then(Value::as_str)
      .map(str::to_string)
      .unwrap_or_else(|| {
        format!("script status: {}", status.unwrap_or("unknown"))
      });
    return Err(Error::BackendRejected { message });
  }

  Ok(value.get("message").and_then(Value::as_str).map(str::to_string))
}

/// First `EXCERPT_MAX_CHARS` characters of `raw`, respecting char
/// boundaries.
fn excerpt(raw: &str) -> String {
  raw.chars().take(EXCERPT_MAX_CHARS).collect()
}
