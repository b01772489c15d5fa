//! Hire-cost arithmetic.
//!
//! Every function takes `today` explicitly; nothing here reads the wall
//! clock. A hire is charged per calendar day touched, with a minimum of one
//! day once it has started.

use chrono::NaiveDate;

use crate::equipment::Equipment;

/// Whole days charged between `start` and `today`, never fewer than one.
pub fn billable_days(start: NaiveDate, today: NaiveDate) -> i64 {
  (today - start).num_days().max(1)
}

pub fn hire_cost(rate: f64, start: NaiveDate, today: NaiveDate) -> f64 {
  rate * billable_days(start, today) as f64
}

/// Sum of [`hire_cost`] over `items`; `0.0` when empty.
pub fn total_cost<'a, I>(items: I, today: NaiveDate) -> f64
where
  I: IntoIterator<Item = &'a Equipment>,
{
  // `Sum for f64` starts from -0.0, which would print as "-0.00".
  items
    .into_iter()
    .fold(0.0, |acc, item| acc + item.hire_cost(today))
}

/// The two aggregate figures shown alongside the grouped views.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
  pub active:   f64,
  pub archived: f64,
}

pub fn totals<'a, I>(items: I, today: NaiveDate) -> Totals
where
  I: IntoIterator<Item = &'a Equipment>,
{
  items.into_iter().fold(Totals::default(), |mut acc, item| {
    let cost = item.hire_cost(today);
    if item.is_archived() {
      acc.archived += cost;
    } else {
      acc.active += cost;
    }
    acc
  })
}
