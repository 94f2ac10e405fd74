//! Form controller — the state machine between keystrokes and the
//! submission pipeline.
//!
//! The controller owns the draft while the user edits, runs the validators
//! when a submission is requested, and hands out an immutable
//! [`ValidatedRecord`] snapshot exactly once per in-flight request. It
//! never performs network activity itself; the caller dispatches the
//! snapshot and reports the outcome back via `resolve_success` /
//! `resolve_failure`.

use crate::{
  record::{DraftInput, Field, ValidatedRecord},
  validate::FieldErrors,
};

/// Where the controller is in the submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
  /// Accepting edits; submission may be requested.
  Editing,
  /// A snapshot is in flight; further submit requests are ignored.
  Submitting,
}

#[derive(Debug)]
pub struct FormController {
  draft:  DraftInput,
  errors: FieldErrors,
  phase:  FormPhase,
}

impl Default for FormController {
  fn default() -> Self {
    Self::new()
  }
}

impl FormController {
  pub fn new() -> Self {
    Self {
      draft:  DraftInput::default(),
      errors: FieldErrors::new(),
      phase:  FormPhase::Editing,
    }
  }

  pub fn draft(&self) -> &DraftInput {
    &self.draft
  }

  pub fn errors(&self) -> &FieldErrors {
    &self.errors
  }

  pub fn phase(&self) -> FormPhase {
    self.phase
  }

  pub fn is_submitting(&self) -> bool {
    self.phase == FormPhase::Submitting
  }

  /// Replace a field's value. Allowed in any phase; clears that field's
  /// error (and no other) so stale messages vanish as the user types.
  pub fn update_field(&mut self, field: Field, value: String) {
    self.draft.set_field(field, value);
    self.errors.remove(&field);
  }

  /// Request a submission.
  ///
  /// Returns the frozen snapshot when validation passes, transitioning to
  /// `Submitting`. On validation failure the error map is stored for
  /// display and the controller stays in `Editing`. While already
  /// `Submitting` this is a no-op: the submit affordance is disabled until
  /// the in-flight request resolves.
  pub fn submit(&mut self) -> Option<ValidatedRecord> {
    if self.phase == FormPhase::Submitting {
      return None;
    }
    match ValidatedRecord::from_draft(&self.draft) {
      Ok(record) => {
        self.errors.clear();
        self.phase = FormPhase::Submitting;
        Some(record)
      }
      Err(errors) => {
        self.errors = errors;
        None
      }
    }
  }

  /// The in-flight submission was committed: clear the draft for the next
  /// entry and return to `Editing`.
  pub fn resolve_success(&mut self) {
    self.draft = DraftInput::default();
    self.errors.clear();
    self.phase = FormPhase::Editing;
  }

  /// The in-flight submission failed: keep the draft untouched so the user
  /// does not retype it, and return to `Editing`.
  pub fn resolve_failure(&mut self) {
    self.phase = FormPhase::Editing;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::validate::FieldError;

  fn filled_controller() -> FormController {
    let mut form = FormController::new();
    form.update_field(Field::FirstName, "Jean".into());
    form.update_field(Field::LastName, "Dupont".into());
    form.update_field(Field::Email, "jean@example.com".into());
    form
  }

  #[test]
  fn submit_with_invalid_draft_sets_errors_and_stays_editing() {
    let mut form = FormController::new();
    assert!(form.submit().is_none());
    assert_eq!(form.phase(), FormPhase::Editing);
    assert!(!form.errors().is_empty());
    assert_eq!(
      form.errors().get(&Field::Email),
      Some(&FieldError::Required)
    );
  }

  #[test]
  fn submit_with_valid_draft_freezes_snapshot_and_enters_submitting() {
    let mut form = filled_controller();
    let record = form.submit().expect("snapshot");
    assert_eq!(record.first_name, "Jean");
    assert_eq!(form.phase(), FormPhase::Submitting);
    assert!(form.errors().is_empty());
  }

  #[test]
  fn submit_while_submitting_is_ignored() {
    let mut form = filled_controller();
    assert!(form.submit().is_some());
    assert!(form.submit().is_none());
    assert_eq!(form.phase(), FormPhase::Submitting);
  }

  #[test]
  fn update_field_clears_only_that_fields_error() {
    let mut form = FormController::new();
    form.submit();
    assert!(form.errors().contains_key(&Field::FirstName));
    assert!(form.errors().contains_key(&Field::Email));

    form.update_field(Field::FirstName, "Jean".into());
    assert!(!form.errors().contains_key(&Field::FirstName));
    assert!(form.errors().contains_key(&Field::Email));
  }

  #[test]
  fn updates_are_allowed_while_submitting() {
    let mut form = filled_controller();
    form.submit();
    form.update_field(Field::Phone, "0612345678".into());
    assert_eq!(form.draft().phone, "0612345678");
  }

  #[test]
  fn resolve_success_clears_the_draft() {
    let mut form = filled_controller();
    form.submit();
    form.resolve_success();
    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(form.draft(), &DraftInput::default());
  }

  #[test]
  fn resolve_failure_preserves_the_draft() {
    let mut form = filled_controller();
    form.submit();
    form.resolve_failure();
    assert_eq!(form.phase(), FormPhase::Editing);
    assert_eq!(form.draft().first_name, "Jean");

    // The user can immediately retry without retyping.
    assert!(form.submit().is_some());
  }
}
