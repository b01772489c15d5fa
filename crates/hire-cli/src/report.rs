//! Plain-text rendering of the two grouped views, used by `hire list`.

use std::fmt::Write as _;

use chrono::NaiveDate;
use hire_core::{
  cost,
  equipment::{Equipment, Status},
  site,
  tracker::View,
};

/// Format an amount with two decimals behind the currency symbol.
pub fn money(currency: &str, amount: f64) -> String {
  format!("{currency}{amount:.2}")
}

/// One line describing `item` in its view.
pub fn describe(item: &Equipment, currency: &str) -> String {
  match item.status() {
    Status::Archived { on } => format!("{}  Archived {on}", item.name),
    Status::Active => format!(
      "{}  {currency}{}/day since {}",
      item.name,
      item.rate(),
      item.start_date()
    ),
  }
}

pub fn render(items: &[Equipment], today: NaiveDate, currency: &str) -> String {
  let mut out = String::new();
  for (i, view) in [View::Active, View::Archived].into_iter().enumerate() {
    if i > 0 {
      out.push('\n');
    }
    render_view(&mut out, items, view, today, currency);
  }
  out
}

fn render_view(
  out: &mut String,
  items: &[Equipment],
  view: View,
  today: NaiveDate,
  currency: &str,
) {
  let title = match view {
    View::Active => "Active",
    View::Archived => "Archived",
  };
  let members: Vec<&Equipment> =
    items.iter().filter(|item| view.includes(item)).collect();
  let total = cost::total_cost(members.iter().copied(), today);

  // Writing to a String cannot fail.
  let _ = writeln!(out, "{title} (total {})", money(currency, total));

  let groups = site::group_by_site(members);
  if groups.is_empty() {
    let _ = writeln!(out, "  No items");
    return;
  }
  for (label, group) in groups {
    let _ = writeln!(out, "  {label}");
    for item in group {
      let _ = writeln!(out, "    {}  [{}]", describe(item, currency), item.id());
    }
  }
}
