//! Sources of "today".

use chrono::{NaiveDate, Utc};

pub trait Clock {
  fn today(&self) -> NaiveDate;
}

/// The current UTC calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> NaiveDate { Utc::now().date_naive() }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
  fn today(&self) -> NaiveDate { self.0 }
}

impl<C: Clock + ?Sized> Clock for &C {
  fn today(&self) -> NaiveDate { (**self).today() }
}
