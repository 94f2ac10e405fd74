//! Application state and event dispatcher.
//!
//! All state transitions happen here, on the event-loop thread: key
//! events mutate the form controller, submissions are dispatched onto a
//! spawned task, and their outcomes come back through a channel that
//! [`App::on_tick`] drains. Exactly one submission can be outstanding;
//! the form controller refuses a second while the first is in flight.

use std::{sync::Arc, time::Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use roster_core::{
  form::FormController,
  log::RecordLog,
  notify::{NotificationCenter, Severity},
  record::{Field, MEMBER_TYPE_SUGGESTIONS},
};
use roster_sheet::{SheetClient, Submitted};

/// Resolution of one dispatched submission.
type SubmitOutcome = Result<Submitted, roster_sheet::Error>;

/// Posted once when the session starts.
const STARTUP_ADVISORY: &str = "Entries are sent to an external sheet \
  script. Verify the configured endpoint URL points at your deployed \
  script before the first submission.";

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Draft, validation errors, and the Editing/Submitting phase.
  pub form: FormController,

  /// Session-local log of records the backend accepted, newest first.
  pub log: RecordLog,

  /// Live transient messages.
  pub notifications: NotificationCenter,

  /// The form field keyboard focus is on.
  pub focus: Field,

  /// Shared HTTP client.
  pub client: Arc<SheetClient>,

  outcome_tx: mpsc::UnboundedSender<SubmitOutcome>,
  outcome_rx: mpsc::UnboundedReceiver<SubmitOutcome>,
}

impl App {
  /// Create an [`App`] with an empty form and post the one-time startup
  /// advisory.
  pub fn new(client: SheetClient) -> Self {
    let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
    let mut notifications = NotificationCenter::new();
    notifications.post(STARTUP_ADVISORY, Severity::Info);

    Self {
      form: FormController::new(),
      log: RecordLog::new(),
      notifications,
      focus: Field::FirstName,
      client: Arc::new(client),
      outcome_tx,
      outcome_rx,
    }
  }

  // ── Per-tick maintenance ──────────────────────────────────────────────────

  /// Drain resolved submissions and expire stale notifications. Called
  /// once per event-loop iteration.
  pub fn on_tick(&mut self) {
    while let Ok(outcome) = self.outcome_rx.try_recv() {
      self.apply_outcome(outcome);
    }
    self.notifications.sweep(Instant::now());
  }

  fn apply_outcome(&mut self, outcome: SubmitOutcome) {
    match outcome {
      Ok(submitted) => {
        let record = &submitted.record;
        tracing::info!(id = %record.id, "submission committed");

        let mut message =
          format!("Added {} {}", record.first_name, record.last_name);
        if let Some(member_type) = &record.member_type {
          message.push_str(&format!(" as {member_type}"));
        }
        message.push_str(". ");
        message.push_str(
          submitted
            .message
            .as_deref()
            .unwrap_or("Record stored in the sheet."),
        );

        self.form.resolve_success();
        self.log.commit(submitted.record);
        self.notifications.post(message, Severity::Success);
      }
      Err(error) => {
        tracing::warn!(%error, "submission failed");

        let mut message = format!("Could not submit the record: {error}.");
        if error.is_cross_origin() {
          message.push_str(
            " Cross-origin rejections usually mean the script is not \
             deployed with anonymous access.",
          );
        }

        self.form.resolve_failure();
        self.notifications.post(message, Severity::Error);
      }
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL)
      && key.code == KeyCode::Char('c')
    {
      return false;
    }

    match key.code {
      // Focus traversal
      KeyCode::Tab | KeyCode::Down => self.focus_next(),
      KeyCode::BackTab | KeyCode::Up => self.focus_prev(),

      // Submit
      KeyCode::Enter => self.request_submit(),

      // Dismiss the oldest notification
      KeyCode::Esc => {
        let oldest = self.notifications.iter().next().map(|n| n.id);
        if let Some(id) = oldest {
          self.notifications.dismiss(id);
        }
      }

      // Member-type suggestion cycling
      KeyCode::Left if self.focus == Field::MemberType => {
        self.cycle_member_type(false);
      }
      KeyCode::Right if self.focus == Field::MemberType => {
        self.cycle_member_type(true);
      }

      // Text editing in the focused field
      KeyCode::Backspace => self.pop_char(),
      KeyCode::Char(c) => self.push_char(c),

      _ => {}
    }
    true
  }

  fn focus_next(&mut self) {
    let i = Field::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
    self.focus = Field::ALL[(i + 1) % Field::ALL.len()];
  }

  fn focus_prev(&mut self) {
    let i = Field::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
    self.focus = Field::ALL[(i + Field::ALL.len() - 1) % Field::ALL.len()];
  }

  fn push_char(&mut self, c: char) {
    let mut value = self.form.draft().field(self.focus).to_string();
    value.push(c);
    self.form.update_field(self.focus, value);
  }

  fn pop_char(&mut self) {
    let mut value = self.form.draft().field(self.focus).to_string();
    value.pop();
    self.form.update_field(self.focus, value);
  }

  /// Step through the suggested membership labels. Free text typed into
  /// the field is kept as-is until the user cycles away from it.
  fn cycle_member_type(&mut self, forward: bool) {
    let current = self.form.draft().member_type.as_str();
    let position =
      MEMBER_TYPE_SUGGESTIONS.iter().position(|s| *s == current);

    let next = match (position, forward) {
      (Some(i), true) => {
        MEMBER_TYPE_SUGGESTIONS[(i + 1) % MEMBER_TYPE_SUGGESTIONS.len()]
      }
      (Some(i), false) => {
        MEMBER_TYPE_SUGGESTIONS
          [(i + MEMBER_TYPE_SUGGESTIONS.len() - 1) % MEMBER_TYPE_SUGGESTIONS.len()]
      }
      (None, true) => MEMBER_TYPE_SUGGESTIONS[0],
      (None, false) => MEMBER_TYPE_SUGGESTIONS[MEMBER_TYPE_SUGGESTIONS.len() - 1],
    };
    self.form.update_field(Field::MemberType, next.to_string());
  }

  /// Validate and, if clean, dispatch the frozen snapshot. Ignored while
  /// a submission is already in flight.
  fn request_submit(&mut self) {
    let Some(record) = self.form.submit() else {
      return;
    };
    tracing::info!(email = %record.email, "dispatching submission");

    let client = self.client.clone();
    let tx = self.outcome_tx.clone();
    tokio::spawn(async move {
      // The receiver only closes on shutdown; a dropped send is fine then.
      let _ = tx.send(client.submit(&record).await);
    });
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use roster_core::record::{CommittedRecord, ValidatedRecord};
  use roster_sheet::SheetConfig;

  use super::*;

  fn app() -> App {
    let client = SheetClient::new(SheetConfig {
      endpoint_url: "http://127.0.0.1:9/unused".into(),
    })
    .unwrap();
    App::new(client)
  }

  fn committed() -> CommittedRecord {
    CommittedRecord::new(
      ValidatedRecord {
        first_name:  "Jean".into(),
        last_name:   "Dupont".into(),
        email:       "jean@example.com".into(),
        phone:       None,
        member_type: Some("Actif".into()),
      },
      NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    )
  }

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  #[test]
  fn startup_posts_exactly_one_advisory() {
    let app = app();
    assert_eq!(app.notifications.len(), 1);
    assert_eq!(
      app.notifications.iter().next().unwrap().severity,
      Severity::Info
    );
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn submitting_an_invalid_draft_only_sets_errors() {
    let mut app = app();
    assert!(app.handle_key(key(KeyCode::Enter)));

    assert!(!app.form.errors().is_empty());
    assert!(app.log.is_empty());
    // Only the startup advisory is showing; validation errors render
    // inline on the form, not as notifications.
    assert_eq!(app.notifications.len(), 1);
  }

  #[test]
  fn success_outcome_commits_and_notifies_with_the_name() {
    let mut app = app();
    app.apply_outcome(Ok(Submitted {
      record:  committed(),
      message: Some("Done".into()),
    }));

    assert_eq!(app.log.len(), 1);
    let note = app.notifications.iter().last().unwrap();
    assert_eq!(note.severity, Severity::Success);
    assert!(note.message.contains("Jean Dupont"));
    assert!(note.message.contains("as Actif"));
    assert!(note.message.contains("Done"));
  }

  #[test]
  fn failure_outcome_leaves_the_log_untouched() {
    let mut app = app();
    app.apply_outcome(Err(roster_sheet::Error::BackendRejected {
      message: "Duplicate entry".into(),
    }));

    assert!(app.log.is_empty());
    let note = app.notifications.iter().last().unwrap();
    assert_eq!(note.severity, Severity::Error);
    assert!(note.message.contains("Duplicate entry"));
  }

  #[test]
  fn cross_origin_failures_get_the_deployment_hint() {
    let mut app = app();
    app.apply_outcome(Err(roster_sheet::Error::Transport {
      message:   "NetworkError when attempting to fetch".into(),
      cors_hint: true,
    }));

    let note = app.notifications.iter().last().unwrap();
    assert!(note.message.contains("anonymous access"));
  }

  #[test]
  fn typing_edits_the_focused_field() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('J')));
    app.handle_key(key(KeyCode::Char('o')));
    app.handle_key(key(KeyCode::Backspace));
    assert_eq!(app.form.draft().first_name, "J");

    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Char('D')));
    assert_eq!(app.form.draft().last_name, "D");
  }

  #[test]
  fn member_type_cycles_through_suggestions() {
    let mut app = app();
    app.focus = Field::MemberType;

    app.handle_key(key(KeyCode::Right));
    assert_eq!(app.form.draft().member_type, MEMBER_TYPE_SUGGESTIONS[0]);
    app.handle_key(key(KeyCode::Right));
    assert_eq!(app.form.draft().member_type, MEMBER_TYPE_SUGGESTIONS[1]);
    app.handle_key(key(KeyCode::Left));
    assert_eq!(app.form.draft().member_type, MEMBER_TYPE_SUGGESTIONS[0]);
  }

  #[test]
  fn escape_dismisses_the_oldest_notification() {
    let mut app = app();
    app.notifications.post("second", Severity::Info);
    assert_eq!(app.notifications.len(), 2);

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.notifications.len(), 1);
    assert_eq!(app.notifications.iter().next().unwrap().message, "second");

    // With nothing left to dismiss, Esc is a no-op.
    app.handle_key(key(KeyCode::Esc));
    app.handle_key(key(KeyCode::Esc));
    assert!(app.notifications.is_empty());
  }

  #[test]
  fn ctrl_c_quits() {
    let mut app = app();
    let quit = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(!app.handle_key(quit));
  }
}
