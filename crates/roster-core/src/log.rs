//! The in-memory record log — the session's local view of what the
//! backend has accepted.
//!
//! Append-only: records are never mutated or removed, and everything is
//! discarded when the process exits. Newest entries sit at the front so
//! the table shows the latest submission first.

use std::collections::VecDeque;

use crate::record::CommittedRecord;

#[derive(Debug, Default)]
pub struct RecordLog {
  entries: VecDeque<CommittedRecord>,
}

impl RecordLog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a committed record at the front.
  pub fn commit(&mut self, record: CommittedRecord) {
    self.entries.push_front(record);
  }

  /// Records in display order, newest first.
  pub fn iter(&self) -> impl Iterator<Item = &CommittedRecord> {
    self.entries.iter()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
