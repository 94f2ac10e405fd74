//! Error taxonomy for the sheet submission pipeline.
//!
//! Every variant is terminal for exactly one submission attempt: the
//! caller turns it into a user-visible notification and the form stays
//! usable. Nothing here is fatal to the process.

use thiserror::Error;

/// How many characters of a non-JSON reply are kept for diagnostics.
pub const EXCERPT_MAX_CHARS: usize = 1000;

#[derive(Debug, Error)]
pub enum Error {
  /// The request never completed — connection, DNS, TLS, or a
  /// browser-style cross-origin rejection proxied through the transport.
  #[error("network error: {message}")]
  Transport {
    message: String,
    /// Set when `message` matches known cross-origin indicators; the UI
    /// appends a deployment hint for this case.
    cors_hint: bool,
  },

  /// The reply body was not valid JSON. Carries a truncated excerpt of
  /// the raw text so the operator can inspect what the script returned.
  #[error("backend returned a non-JSON reply: {excerpt}")]
  MalformedResponse { excerpt: String },

  /// Valid JSON, but `status` was not `"success"`.
  #[error("backend rejected the submission: {message}")]
  BackendRejected { message: String },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("failed to build HTTP client: {0}")]
  ClientBuild(#[source] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  /// Wrap a transport-level failure, flagging cross-origin-looking ones.
  pub(crate) fn transport(source: reqwest::Error) -> Self {
    let message = error_chain(&source);
    let cors_hint = looks_cross_origin(&message);
    Error::Transport { message, cors_hint }
  }

  /// Whether this failure should carry the cross-origin deployment hint.
  pub fn is_cross_origin(&self) -> bool {
    matches!(self, Error::Transport { cors_hint: true, .. })
  }
}

/// Flatten an error and its sources into one line; reqwest's `Display`
/// alone often hides the interesting cause.
fn error_chain(error: &dyn std::error::Error) -> String {
  let mut message = error.to_string();
  let mut source = error.source();
  while let Some(cause) = source {
    message.push_str(": ");
    message.push_str(&cause.to_string());
    source = cause.source();
  }
  message
}

/// Known indicators that a transport failure is a cross-origin rejection
/// rather than an ordinary network fault.
fn looks_cross_origin(message: &str) -> bool {
  let lower = message.to_ascii_lowercase();
  lower.contains("cors")
    || lower.contains("cross-origin")
    || lower.contains("networkerror")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cross_origin_indicators_are_detected() {
    assert!(looks_cross_origin("NetworkError when attempting to fetch"));
    assert!(looks_cross_origin("blocked by CORS policy"));
    assert!(looks_cross_origin("Cross-Origin request rejected"));
    assert!(!looks_cross_origin("connection refused"));
  }

  #[test]
  fn transport_display_carries_the_message() {
    let err = Error::Transport {
      message:   "connection refused".into(),
      cors_hint: false,
    };
    assert_eq!(err.to_string(), "network error: connection refused");
    assert!(!err.is_cross_origin());
  }
}
