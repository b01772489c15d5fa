//! The "add equipment" popup.

use ratatui::{
  Frame,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{AddForm, FORM_LABELS};

const LABEL_WIDTH: usize = 12;

pub fn draw(f: &mut Frame, area: Rect, form: &AddForm) {
  let popup = centered(area, 50, FORM_LABELS.len() as u16 + 2);

  let lines: Vec<Line> = FORM_LABELS
    .iter()
    .zip(&form.fields)
    .enumerate()
    .map(|(i, (label, value))| {
      let focused = i == form.focus;
      let value_style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };
      let cursor = if focused { "_" } else { "" };
      Line::from(vec![
        Span::styled(
          format!("{label:<LABEL_WIDTH$}"),
          Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("{value}{cursor}"), value_style),
      ])
    })
    .collect();

  let block = Block::default()
    .title(" Add equipment ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));

  f.render_widget(Clear, popup);
  f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let [row] = Layout::vertical([Constraint::Length(height)])
    .flex(Flex::Center)
    .areas(area);
  let [cell] = Layout::horizontal([Constraint::Length(width)])
    .flex(Flex::Center)
    .areas(row);
  cell
}
