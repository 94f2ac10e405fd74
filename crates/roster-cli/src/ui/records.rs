//! Record table pane — right panel, the session's committed entries.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

/// Render the record log into `area`, newest first.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" Entries ({}) ", app.log.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let inner = block.inner(area);
  f.render_widget(block, area);

  if app.log.is_empty() {
    f.render_widget(
      Paragraph::new(vec![
        Line::from(Span::styled(
          "No entries submitted yet.",
          Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
          "Records appear here once the sheet accepts them.",
          Style::default().fg(Color::DarkGray),
        )),
      ]),
      inner,
    );
    return;
  }

  let mut lines: Vec<Line> = Vec::new();

  lines.push(Line::from(Span::styled(
    format!(
      "{:<22}{:<28}{:<14}{:<14}{}",
      "Name", "Email", "Phone", "Type", "Date"
    ),
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  )));

  for record in app.log.iter() {
    let name = format!("{} {}", record.first_name, record.last_name);
    lines.push(Line::from(vec![
      Span::styled(
        format!("{name:<22}"),
        Style::default().add_modifier(Modifier::BOLD),
      ),
      Span::raw(format!("{:<28}", record.email)),
      Span::raw(format!("{:<14}", record.phone.as_deref().unwrap_or("—"))),
      Span::raw(format!(
        "{:<14}",
        record.member_type.as_deref().unwrap_or("—")
      )),
      Span::styled(
        record.submission_date.to_string(),
        Style::default().fg(Color::DarkGray),
      ),
    ]));
  }

  f.render_widget(Paragraph::new(lines), inner);
}
