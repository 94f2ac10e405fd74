//! Entry form pane — left panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use chrono::Local;
use roster_core::record::Field;

use crate::app::App;

/// Human label for a field, with the required marker where it applies.
fn label(field: Field) -> &'static str {
  match field {
    Field::FirstName => "First name *",
    Field::LastName => "Last name *",
    Field::Email => "Email *",
    Field::Phone => "Phone",
    Field::MemberType => "Member type",
  }
}

/// Render the entry form into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" New person ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();

  // The date that will be recorded on submission.
  let date = Local::now().format("%Y-%m-%d").to_string();
  lines.push(Line::from(vec![
    Span::styled("Submission date ", Style::default().fg(Color::DarkGray)),
    Span::styled(
      date,
      Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD),
    ),
  ]));
  lines.push(Line::from(""));

  for field in Field::ALL {
    let focused = app.focus == field;
    let value = app.form.draft().field(field);

    let label_style = if focused {
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![
      Span::styled(format!("{:<14}", label(field)), label_style),
      Span::raw(value.to_string()),
    ];
    if focused {
      spans.push(Span::styled(
        "_",
        Style::default().fg(Color::Cyan),
      ));
    }
    if focused && field == Field::MemberType {
      spans.push(Span::styled(
        "  ◂ ▸ suggestions",
        Style::default().fg(Color::DarkGray),
      ));
    }
    lines.push(Line::from(spans));

    if let Some(error) = app.form.errors().get(&field) {
      lines.push(Line::from(Span::styled(
        format!("{:<14}{error}", ""),
        Style::default().fg(Color::Red),
      )));
    }
  }

  lines.push(Line::from(""));
  let submit_line = if app.form.is_submitting() {
    Line::from(Span::styled(
      "Submitting…",
      Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD),
    ))
  } else {
    Line::from(vec![
      Span::styled(
        "[Enter] ",
        Style::default()
          .fg(Color::Green)
          .add_modifier(Modifier::BOLD),
      ),
      Span::raw("Validate entry"),
    ])
  };
  lines.push(submit_line);

  f.render_widget(Paragraph::new(lines), inner);
}
