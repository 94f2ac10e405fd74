//! Record types — the three stages a person's details pass through.
//!
//! A `DraftInput` is what the user is typing. Validation freezes it into a
//! `ValidatedRecord`, and a backend acknowledgment seals that into a
//! `CommittedRecord`. Each stage is immutable from the next one's point of
//! view; nothing flows backwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{self, FieldErrors};

// ─── Fields ──────────────────────────────────────────────────────────────────

/// The editable fields of the entry form, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
  FirstName,
  LastName,
  Email,
  Phone,
  MemberType,
}

impl Field {
  /// All fields, in the order they appear on the form.
  pub const ALL: [Field; 5] = [
    Field::FirstName,
    Field::LastName,
    Field::Email,
    Field::Phone,
    Field::MemberType,
  ];

  /// Whether the field must be filled in for a draft to validate.
  pub fn is_required(self) -> bool {
    matches!(self, Field::FirstName | Field::LastName | Field::Email)
  }
}

/// Membership labels offered as suggestions for [`Field::MemberType`].
/// Free text is equally acceptable; these are never enforced.
pub const MEMBER_TYPE_SUGGESTIONS: [&str; 3] =
  ["Adhérent", "Actif", "Bienfaiteur"];

// ─── DraftInput ──────────────────────────────────────────────────────────────

/// In-progress, unvalidated form state. Owned by the form controller while
/// the user is editing; reset to defaults after a successful submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftInput {
  pub first_name:  String,
  pub last_name:   String,
  pub email:       String,
  pub phone:       String,
  pub member_type: String,
}

impl DraftInput {
  pub fn field(&self, field: Field) -> &str {
    match field {
      Field::FirstName => &self.first_name,
      Field::LastName => &self.last_name,
      Field::Email => &self.email,
      Field::Phone => &self.phone,
      Field::MemberType => &self.member_type,
    }
  }

  pub fn set_field(&mut self, field: Field, value: String) {
    match field {
      Field::FirstName => self.first_name = value,
      Field::LastName => self.last_name = value,
      Field::Email => self.email = value,
      Field::Phone => self.phone = value,
      Field::MemberType => self.member_type = value,
    }
  }
}

// ─── ValidatedRecord ─────────────────────────────────────────────────────────

/// A draft that passed every field rule, frozen for submission.
///
/// Required fields are non-empty after trimming and the email has the
/// minimal `local@domain.tld` shape. Optional fields that were left empty
/// are normalised to `None` so the wire payload can omit them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatedRecord {
  pub first_name:  String,
  pub last_name:   String,
  pub email:       String,
  pub phone:       Option<String>,
  pub member_type: Option<String>,
}

impl ValidatedRecord {
  /// Validate `draft`; on failure, the per-field error map is returned for
  /// display and no record is produced.
  pub fn from_draft(draft: &DraftInput) -> Result<Self, FieldErrors> {
    let errors = validate::check(draft);
    if !errors.is_empty() {
      return Err(errors);
    }
    Ok(Self {
      first_name:  draft.first_name.clone(),
      last_name:   draft.last_name.clone(),
      email:       draft.email.clone(),
      phone:       none_if_empty(&draft.phone),
      member_type: none_if_empty(&draft.member_type),
    })
  }
}

fn none_if_empty(value: &str) -> Option<String> {
  if value.trim().is_empty() {
    None
  } else {
    Some(value.to_string())
  }
}

// ─── CommittedRecord ─────────────────────────────────────────────────────────

/// A validated record acknowledged by the backend, enriched with an id and
/// the submission date. Once appended to the record log it is never
/// mutated; it lives for the rest of the session and no longer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommittedRecord {
  /// Process-unique, time-ordered token (UUIDv7).
  pub id: Uuid,
  pub first_name:  String,
  pub last_name:   String,
  pub email:       String,
  pub phone:       Option<String>,
  pub member_type: Option<String>,
  /// Local calendar date computed when the submission was dispatched.
  pub submission_date: NaiveDate,
}

impl CommittedRecord {
  /// Seal `record` with a fresh id and the date it was submitted under.
  pub fn new(record: ValidatedRecord, submission_date: NaiveDate) -> Self {
    Self {
      id: Uuid::now_v7(),
      first_name: record.first_name,
      last_name: record.last_name,
      email: record.email,
      phone: record.phone,
      member_type: record.member_type,
      submission_date,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn full_draft() -> DraftInput {
    DraftInput {
      first_name:  "Jean".into(),
      last_name:   "Dupont".into(),
      email:       "jean.dupont@example.com".into(),
      phone:       "0612345678".into(),
      member_type: "Actif".into(),
    }
  }

  #[test]
  fn from_draft_keeps_optionals_when_present() {
    let record = ValidatedRecord::from_draft(&full_draft()).unwrap();
    assert_eq!(record.first_name, "Jean");
    assert_eq!(record.phone.as_deref(), Some("0612345678"));
    assert_eq!(record.member_type.as_deref(), Some("Actif"));
  }

  #[test]
  fn from_draft_normalises_empty_optionals_to_none() {
    let mut draft = full_draft();
    draft.phone = String::new();
    draft.member_type = "   ".into();

    let record = ValidatedRecord::from_draft(&draft).unwrap();
    assert_eq!(record.phone, None);
    assert_eq!(record.member_type, None);
  }

  #[test]
  fn from_draft_rejects_missing_required_fields() {
    let mut draft = full_draft();
    draft.first_name = "  ".into();

    let errors = ValidatedRecord::from_draft(&draft).unwrap_err();
    assert!(errors.contains_key(&Field::FirstName));
  }

  #[test]
  fn committed_ids_are_distinct() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let record = ValidatedRecord::from_draft(&full_draft()).unwrap();
    let a = CommittedRecord::new(record.clone(), date);
    let b = CommittedRecord::new(record, date);
    assert_ne!(a.id, b.id);
    assert_eq!(a.submission_date, date);
  }
}
