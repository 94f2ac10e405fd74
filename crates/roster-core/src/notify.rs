//! Transient user-facing notifications with independent expiry clocks.
//!
//! Every posted notification carries its own deadline, fixed at posting
//! time. The event loop calls [`NotificationCenter::sweep`] each tick,
//! which removes everything past its deadline; manual dismissal targets
//! the same removal path, so the two can race freely — removal is
//! idempotent either way.

use std::time::{Duration, Instant};

use uuid::Uuid;

/// How long a notification stays on screen unless dismissed first.
pub const AUTO_DISMISS_AFTER: Duration = Duration::from_secs(7);

/// Visual class of a notification. Presentation (colour, badge) is an
/// external lookup owned by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Success,
  Error,
  Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
  pub id:       Uuid,
  pub message:  String,
  pub severity: Severity,
  deadline:     Instant,
}

/// Insertion-ordered set of live notifications.
#[derive(Debug)]
pub struct NotificationCenter {
  entries: Vec<Notification>,
  ttl:     Duration,
}

impl Default for NotificationCenter {
  fn default() -> Self {
    Self::new()
  }
}

impl NotificationCenter {
  pub fn new() -> Self {
    Self::with_ttl(AUTO_DISMISS_AFTER)
  }

  /// A center whose notifications expire after `ttl` instead of the
  /// default duration.
  pub fn with_ttl(ttl: Duration) -> Self {
    Self { entries: Vec::new(), ttl }
  }

  /// Post a notification. Its expiry deadline is `now + ttl`, measured
  /// from this call regardless of any later activity.
  pub fn post(&mut self, message: impl Into<String>, severity: Severity) -> Uuid {
    let id = Uuid::now_v7();
    self.entries.push(Notification {
      id,
      message: message.into(),
      severity,
      deadline: Instant::now() + self.ttl,
    });
    id
  }

  /// Remove a notification by id. A no-op when the id is unknown or was
  /// already removed, so a stale expiry can never fail.
  pub fn dismiss(&mut self, id: Uuid) {
    self.entries.retain(|n| n.id != id);
  }

  /// Drop every notification whose deadline is at or before `now`.
  pub fn sweep(&mut self, now: Instant) {
    self.entries.retain(|n| n.deadline > now);
  }

  /// Live notifications in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = &Notification> {
    self.entries.iter()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
