//! One equipment pane: site headings, items and the pane total.

use hire_core::{clock::Clock, cost, storage::SlotStorage, tracker::View};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
  app::{App, Mode, Row},
  report,
};

/// Render `pane` into `area`.
pub fn draw<S: SlotStorage, C: Clock>(
  f: &mut Frame,
  area: Rect,
  app: &App<S, C>,
  pane: View,
) {
  let focused = app.pane == pane && app.mode == Mode::Browse;
  let members: Vec<_> = app.tracker.view(pane).collect();
  let total = cost::total_cost(members.iter().copied(), app.tracker.today());

  let name = match pane {
    View::Active => "Active",
    View::Archived => "Archived",
  };
  let title = format!(
    " {name} ({})  {} ",
    members.len(),
    report::money(&app.currency, total)
  );

  let border = if focused { Color::Cyan } else { Color::DarkGray };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let rows = app.rows(pane);
  if rows.is_empty() {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("No items").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = rows
    .iter()
    .map(|row| match row {
      Row::Site(label) => ListItem::new(Line::from(Span::styled(
        label.clone(),
        Style::default()
          .fg(Color::Yellow)
          .add_modifier(Modifier::BOLD),
      ))),
      Row::Item(item) => ListItem::new(Line::from(vec![
        Span::raw("  "),
        Span::raw(report::describe(item, &app.currency)),
      ])),
    })
    .collect();

  let mut state = ListState::default();
  if focused {
    state.select(app.selected_row(pane));
  }

  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
    area,
    &mut state,
  );
}
