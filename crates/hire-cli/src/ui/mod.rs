//! TUI rendering: orchestrates all panes.

pub mod add_form;
pub mod equipment_list;

use hire_core::{clock::Clock, storage::SlotStorage, tracker::View};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Mode};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<S: SlotStorage, C: Clock>(f: &mut Frame, app: &App<S, C>) {
  let area = f.area();

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);

  if let Mode::Adding(form) = &app.mode {
    add_form::draw(f, area, form);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<S: SlotStorage, C: Clock>(f: &mut Frame, area: Rect, app: &App<S, C>) {
  let left = Span::styled(
    " hire  [a] add  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{} ", app.tracker.today()),
    Style::default().fg(Color::Gray),
  );

  let pad = area
    .width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<S: SlotStorage, C: Clock>(f: &mut Frame, area: Rect, app: &App<S, C>) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(area);

  equipment_list::draw(f, cols[0], app, View::Active);
  equipment_list::draw(f, cols[1], app, View::Archived);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<S: SlotStorage, C: Clock>(f: &mut Frame, area: Rect, app: &App<S, C>) {
  let (mode_label, hints) = match (&app.mode, app.pane) {
    (Mode::Adding(_), _) => (
      "ADD",
      "Tab next field  Enter confirm  Esc cancel",
    ),
    (Mode::Browse, View::Active) => (
      "ACTIVE",
      "↑↓/jk move  Tab switch  x archive  d delete  q quit",
    ),
    (Mode::Browse, View::Archived) => (
      "ARCHIVED",
      "↑↓/jk move  Tab switch  r restore  d delete  q quit",
    ),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_style = if app.status_msg.starts_with("Error") {
    Style::default().fg(Color::Red)
  } else {
    Style::default().fg(Color::Gray)
  };
  let hint_span = Span::styled(format!("  {status}"), hint_style);

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
