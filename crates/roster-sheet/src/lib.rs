//! Submission pipeline for the spreadsheet-backed script endpoint.
//!
//! One [`SheetClient::submit`] call performs exactly one POST exchange:
//! serialize the validated record, ship it as a `text/plain` body (the
//! Apps Script side reads the raw text and parses the JSON itself; a JSON
//! content type would trigger a preflight the script cannot answer), read
//! the reply text, and interpret it. No retries, no user-triggered abort.

pub mod error;
mod wire;

pub use error::{Error, Result};

use std::time::Duration;

use chrono::Local;
use reqwest::{Client, header};

use roster_core::record::{CommittedRecord, ValidatedRecord};

use wire::SubmissionPayload;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Connection settings for the sheet backend. The URL is fixed for the
/// whole session; it is not editable at runtime.
#[derive(Debug, Clone)]
pub struct SheetConfig {
  pub endpoint_url: String,
}

// ─── Result of a committed exchange ──────────────────────────────────────────

/// A successful pipeline resolution: the sealed record plus whatever
/// human-readable acknowledgment the script sent along.
#[derive(Debug)]
pub struct Submitted {
  pub record:  CommittedRecord,
  pub message: Option<String>,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async HTTP client for the sheet script endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct SheetClient {
  client: Client,
  config: SheetConfig,
}

impl SheetClient {
  pub fn new(config: SheetConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .map_err(Error::ClientBuild)?;
    Ok(Self { client, config })
  }

  /// Submit one validated record.
  ///
  /// The submission date is today's local calendar date, computed here so
  /// the payload and the sealed record always agree. The HTTP status line
  /// is not consulted; the reply body text is authoritative.
  pub async fn submit(&self, record: &ValidatedRecord) -> Result<Submitted> {
    let submission_date = Local::now().date_naive();
    let body =
      serde_json::to_string(&SubmissionPayload::new(record, submission_date))?;

    let response = self
      .client
      .post(&self.config.endpoint_url)
      .header(header::CONTENT_TYPE, "text/plain")
      .body(body)
      .send()
      .await
      .map_err(Error::transport)?;

    let raw = response.text().await.map_err(Error::transport)?;
    let message = wire::interpret_reply(&raw)?;

    Ok(Submitted {
      record: CommittedRecord::new(record.clone(), submission_date),
      message,
    })
  }
}

// ─── Integration tests ───────────────────────────────────────────────────────
