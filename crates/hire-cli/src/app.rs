//! Application state machine and key dispatcher for the terminal UI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hire_core::{
  clock::Clock,
  equipment::{Equipment, NewEquipment},
  storage::SlotStorage,
  tracker::{Tracker, View},
};

// ─── Add form ─────────────────────────────────────────────────────────────────

pub const FORM_LABELS: [&str; 4] = ["Name", "Site", "Rate / day", "Start date"];

/// The in-progress "add equipment" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddForm {
  /// Raw text of name, site, rate and start date, in [`FORM_LABELS`] order.
  pub fields: [String; 4],
  /// Index of the field receiving keystrokes.
  pub focus:  usize,
}

impl AddForm {
  /// An empty form whose start date is pre-filled with `today`.
  pub fn new(today: String) -> Self {
    Self {
      fields: [String::new(), String::new(), String::new(), today],
      focus:  0,
    }
  }

  fn next(&mut self) { self.focus = (self.focus + 1) % self.fields.len(); }

  fn prev(&mut self) {
    self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
  }

  fn is_last(&self) -> bool { self.focus + 1 == self.fields.len() }

  fn parse(&self) -> Result<NewEquipment, hire_core::ValidationError> {
    let [name, site, rate, start] = &self.fields;
    NewEquipment::parse(name, site, rate, start)
  }
}

// ─── Mode ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
  /// Moving around the two lists.
  Browse,
  /// Filling in the add form (shown as a popup).
  Adding(AddForm),
}

/// One line of a rendered pane.
#[derive(Debug, Clone, PartialEq)]
pub enum Row<'a> {
  Site(String),
  Item(&'a Equipment),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S, C> {
  pub tracker:    Tracker<S, C>,

  /// Which pane has keyboard focus.
  pub pane:       View,

  pub mode:       Mode,

  /// Cursor within the selectable items of each pane, in display order.
  active_cursor:   usize,
  archived_cursor: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub currency:   String,
}

impl<S: SlotStorage, C: Clock> App<S, C> {
  pub fn new(tracker: Tracker<S, C>, currency: impl Into<String>) -> Self {
    Self {
      tracker,
      pane: View::Active,
      mode: Mode::Browse,
      active_cursor: 0,
      archived_cursor: 0,
      status_msg: String::new(),
      currency: currency.into(),
    }
  }

  // ── Views ─────────────────────────────────────────────────────────────────

  /// The rows of `pane`: a heading per site label followed by its items.
  pub fn rows(&self, pane: View) -> Vec<Row<'_>> {
    let mut rows = Vec::new();
    for (label, group) in self.tracker.groups(pane) {
      rows.push(Row::Site(label));
      rows.extend(group.into_iter().map(Row::Item));
    }
    rows
  }

  /// Items of `pane` in the order they are displayed.
  pub fn selectable(&self, pane: View) -> Vec<&Equipment> {
    self
      .tracker
      .groups(pane)
      .into_values()
      .flatten()
      .collect()
  }

  pub fn cursor(&self, pane: View) -> usize {
    match pane {
      View::Active => self.active_cursor,
      View::Archived => self.archived_cursor,
    }
  }

  fn cursor_mut(&mut self, pane: View) -> &mut usize {
    match pane {
      View::Active => &mut self.active_cursor,
      View::Archived => &mut self.archived_cursor,
    }
  }

  /// The item under the cursor in the focused pane.
  pub fn selected(&self) -> Option<&Equipment> {
    self.selectable(self.pane).get(self.cursor(self.pane)).copied()
  }

  /// Index into [`App::rows`] of the cursor item, for list highlighting.
  pub fn selected_row(&self, pane: View) -> Option<usize> {
    let target = self.selectable(pane).get(self.cursor(pane))?.id().clone();
    self.rows(pane).iter().position(|row| {
      matches!(row, Row::Item(item) if *item.id() == target)
    })
  }

  fn clamp_cursors(&mut self) {
    for pane in [View::Active, View::Archived] {
      let len = self.selectable(pane).len();
      let cursor = self.cursor_mut(pane);
      *cursor = (*cursor).min(len.saturating_sub(1));
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.mode {
      Mode::Browse => self.handle_browse_key(key),
      Mode::Adding(_) => {
        self.handle_form_key(key);
        true
      }
    }
  }

  fn handle_browse_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right
      | KeyCode::Char('h') | KeyCode::Char('l') => {
        self.pane = match self.pane {
          View::Active => View::Archived,
          View::Archived => View::Active,
        };
      }

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.selectable(self.pane).len();
        let cursor = self.cursor_mut(self.pane);
        if *cursor + 1 < len {
          *cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        let cursor = self.cursor_mut(self.pane);
        *cursor = cursor.saturating_sub(1);
      }

      KeyCode::Char('a') => {
        let today = self.tracker.today().to_string();
        self.mode = Mode::Adding(AddForm::new(today));
        self.status_msg.clear();
      }
      KeyCode::Char('x') if self.pane == View::Active => {
        self.apply("Archived", |t, id| t.archive(id));
      }
      KeyCode::Char('r') if self.pane == View::Archived => {
        self.apply("Restored", |t, id| t.restore(id));
      }
      KeyCode::Char('d') => {
        self.apply("Deleted", |t, id| t.delete(id));
      }

      _ => {}
    }
    true
  }

  /// Run a collection operation against the selected item and report the
  /// outcome in the status bar.
  fn apply<F>(&mut self, verb: &str, op: F)
  where
    F: FnOnce(&mut Tracker<S, C>, &str) -> hire_core::Result<bool>,
  {
    let Some((id, name)) = self
      .selected()
      .map(|item| (item.id().to_string(), item.name.clone()))
    else {
      return;
    };

    self.status_msg = match op(&mut self.tracker, &id) {
      Ok(true) => format!("{verb} {name}"),
      Ok(false) => String::new(),
      Err(e) => format!("Error: {e}"),
    };
    self.clamp_cursors();
  }

  fn handle_form_key(&mut self, key: KeyEvent) {
    let Mode::Adding(form) = &mut self.mode else {
      return;
    };

    match key.code {
      KeyCode::Esc => {
        self.mode = Mode::Browse;
        self.status_msg.clear();
      }
      KeyCode::Tab | KeyCode::Down => form.next(),
      KeyCode::BackTab | KeyCode::Up => form.prev(),
      KeyCode::Enter if !form.is_last() => form.next(),
      KeyCode::Enter => self.submit_form(),
      KeyCode::Backspace => {
        form.fields[form.focus].pop();
      }
      KeyCode::Char(c) => form.fields[form.focus].push(c),
      _ => {}
    }
  }

  fn submit_form(&mut self) {
    let Mode::Adding(form) = &self.mode else {
      return;
    };

    let draft = match form.parse() {
      Ok(draft) => draft,
      Err(e) => {
        self.status_msg = format!("Invalid: {e}");
        return;
      }
    };

    let name = draft.name.clone();
    match self.tracker.add(draft) {
      Ok(_) => {
        self.mode = Mode::Browse;
        self.pane = View::Active;
        self.status_msg = format!("Added {name}");
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use hire_core::{clock::FixedClock, storage::MemoryStorage};

  use super::*;

  type TestApp = App<MemoryStorage, FixedClock>;

  fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

  fn app_with(storage: MemoryStorage) -> TestApp {
    let tracker = Tracker::open(storage, FixedClock(date("2026-02-22"))).unwrap();
    App::new(tracker, "£")
  }

  fn app() -> TestApp { app_with(MemoryStorage::new()) }

  fn press(app: &mut TestApp, code: KeyCode) -> bool {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
  }

  fn type_text(app: &mut TestApp, text: &str) {
    for c in text.chars() {
      press(app, KeyCode::Char(c));
    }
  }

  fn add_via_form(app: &mut TestApp, name: &str, site: &str, rate: &str) {
    press(app, KeyCode::Char('a'));
    type_text(app, name);
    press(app, KeyCode::Enter);
    type_text(app, site);
    press(app, KeyCode::Enter);
    type_text(app, rate);
    press(app, KeyCode::Enter);
    press(app, KeyCode::Enter);
  }

  #[test]
  fn quit_keys() {
    let mut a = app();
    assert!(!press(&mut a, KeyCode::Char('q')));
    assert!(!a.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
  }

  #[test]
  fn form_prefills_today_and_adds() {
    let mut a = app();
    press(&mut a, KeyCode::Char('a'));
    let Mode::Adding(form) = &a.mode else {
      panic!("expected add form");
    };
    assert_eq!(form.fields[3], "2026-02-22");
    press(&mut a, KeyCode::Esc);

    add_via_form(&mut a, "Genie Lift", "Site A", "120");
    assert_eq!(a.mode, Mode::Browse);
    assert_eq!(a.status_msg, "Added Genie Lift");
    assert_eq!(a.tracker.items().len(), 1);
    assert_eq!(a.tracker.total_cost(), 120.0);
  }

  #[test]
  fn invalid_form_stays_open() {
    let mut a = app();
    add_via_form(&mut a, "Lift", "Site A", "abc");
    assert!(matches!(a.mode, Mode::Adding(_)));
    assert!(a.status_msg.starts_with("Invalid:"), "{}", a.status_msg);
    assert!(a.tracker.items().is_empty());
  }

  #[test]
  fn rows_group_by_sorted_site() {
    let mut a = app();
    add_via_form(&mut a, "Lift", "Site B", "10");
    add_via_form(&mut a, "Plate", "Site A", "10");
    add_via_form(&mut a, "Mixer", "Site B", "10");

    let rows = a.rows(View::Active);
    let text: Vec<String> = rows
      .iter()
      .map(|row| match row {
        Row::Site(label) => format!("# {label}"),
        Row::Item(item) => item.name.clone(),
      })
      .collect();
    assert_eq!(text, ["# Site A", "Plate", "# Site B", "Lift", "Mixer"]);
    assert_eq!(a.selected_row(View::Active), Some(1));

    press(&mut a, KeyCode::Char('j'));
    assert_eq!(a.selected().unwrap().name, "Lift");
    assert_eq!(a.selected_row(View::Active), Some(3));
  }

  #[test]
  fn archive_restore_delete_from_panes() {
    let mut a = app();
    add_via_form(&mut a, "Lift", "Site A", "10");
    add_via_form(&mut a, "Plate", "Site A", "10");

    press(&mut a, KeyCode::Char('x'));
    assert_eq!(a.status_msg, "Archived Lift");
    assert_eq!(a.tracker.archived().count(), 1);

    // 'r' does nothing in the active pane.
    press(&mut a, KeyCode::Char('r'));
    assert_eq!(a.tracker.archived().count(), 1);

    press(&mut a, KeyCode::Tab);
    assert_eq!(a.pane, View::Archived);
    press(&mut a, KeyCode::Char('r'));
    assert_eq!(a.status_msg, "Restored Lift");
    assert_eq!(a.tracker.archived().count(), 0);
    assert!(a.selected().is_none());

    press(&mut a, KeyCode::Tab);
    press(&mut a, KeyCode::Char('j'));
    press(&mut a, KeyCode::Char('d'));
    assert_eq!(a.tracker.items().len(), 1);
    assert_eq!(a.cursor(View::Active), 0);
  }

  #[test]
  fn storage_errors_show_in_status() {
    let mut a = app_with(MemoryStorage::with_quota(16));
    add_via_form(&mut a, "Lift", "Site A", "10");
    assert!(a.status_msg.starts_with("Error: storage error"), "{}", a.status_msg);
    assert!(matches!(a.mode, Mode::Adding(_)));
    assert!(a.tracker.items().is_empty());
  }
}
