//! Field validators — pure presence/format checks over a draft.
//!
//! The contract is a mapping from field to error for every field that
//! fails its rule; an empty mapping means the draft is valid. No side
//! effects, fully deterministic.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::record::{DraftInput, Field};

/// Why a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
  #[error("required")]
  Required,
  #[error("invalid format")]
  InvalidFormat,
}

/// Per-field validation failures, ordered by form traversal order.
pub type FieldErrors = BTreeMap<Field, FieldError>;

/// Run every field rule over `draft`.
///
/// Rules:
/// - `first_name`, `last_name`: required (non-empty after trimming).
/// - `email`: required, then must contain a `local@domain.tld` shape.
/// - `phone`, `member_type`: never fail.
pub fn check(draft: &DraftInput) -> FieldErrors {
  let mut errors = FieldErrors::new();

  if draft.first_name.trim().is_empty() {
    errors.insert(Field::FirstName, FieldError::Required);
  }
  if draft.last_name.trim().is_empty() {
    errors.insert(Field::LastName, FieldError::Required);
  }
  if draft.email.trim().is_empty() {
    errors.insert(Field::Email, FieldError::Required);
  } else if !has_email_shape(&draft.email) {
    errors.insert(Field::Email, FieldError::InvalidFormat);
  }

  errors
}

/// Lenient email shape test: some whitespace-delimited token must contain
/// non-whitespace, `@`, non-whitespace, `.`, non-whitespace. A search, not
/// an anchored match, so surrounding text does not disqualify an address.
fn has_email_shape(input: &str) -> bool {
  input.split_whitespace().any(|token| {
    let Some((local, domain)) = token.split_once('@') else {
      return false;
    };
    if local.is_empty() {
      return false;
    }
    match domain.rsplit_once('.') {
      Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
      None => false,
    }
  })
}
