//! Notification stack — transient messages under the header.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Style},
  text::{Line, Span},
  widgets::Paragraph,
};

use roster_core::notify::Severity;

use crate::app::App;

/// Presentation lookup for each severity. The core contract knows only
/// the enumeration; badge and colour live here.
fn presentation(severity: Severity) -> (&'static str, Color) {
  match severity {
    Severity::Success => ("✔", Color::Green),
    Severity::Error => ("✖", Color::Red),
    Severity::Info => ("ℹ", Color::Cyan),
  }
}

/// Render the live notifications into `area`, one line each, insertion
/// order top to bottom.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  if app.notifications.is_empty() {
    return;
  }

  let lines: Vec<Line> = app
    .notifications
    .iter()
    .map(|notification| {
      let (badge, color) = presentation(notification.severity);
      Line::from(vec![
        Span::styled(format!(" {badge} "), Style::default().fg(color)),
        Span::styled(
          notification.message.clone(),
          Style::default().fg(color),
        ),
      ])
    })
    .collect();

  f.render_widget(Paragraph::new(lines), area);
}
