//! Equipment, the sole record type of the tracker.
//!
//! An equipment item is created once from a validated [`NewEquipment`] draft.
//! Afterwards only its archive status changes; `id`, `rate` and `start_date`
//! are fixed for the life of the record.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ValidationError, cost};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque, stable identifier of an equipment item.
///
/// Freshly created items get a UUID v4 string, but any non-empty string read
/// back from storage is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentId(String);

impl EquipmentId {
  pub fn generate() -> Self { Self(Uuid::new_v4().to_string()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for EquipmentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl PartialEq<str> for EquipmentId {
  fn eq(&self, other: &str) -> bool { self.0 == other }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Lifecycle state of an item. Deletion is terminal and has no variant: a
/// deleted item simply stops existing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  Active,
  Archived { on: NaiveDate },
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// Input to [`Equipment::create`] and [`crate::tracker::Tracker::add`].
///
/// Fields are taken as already validated; use [`NewEquipment::parse`] to
/// build one from raw form text.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEquipment {
  pub name:       String,
  pub site:       String,
  /// Currency units per day.
  pub rate:       f64,
  pub start_date: NaiveDate,
}

impl NewEquipment {
  pub fn new(
    name: impl Into<String>,
    site: impl Into<String>,
    rate: f64,
    start_date: NaiveDate,
  ) -> Self {
    Self { name: name.into(), site: site.into(), rate, start_date }
  }

  /// Validate raw form input: names and sites are trimmed and must be
  /// non-empty, the rate must be a positive finite number and the start date
  /// must be `YYYY-MM-DD`.
  pub fn parse(
    name: &str,
    site: &str,
    rate: &str,
    start_date: &str,
  ) -> Result<Self, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
      return Err(ValidationError::EmptyName);
    }

    let site = site.trim();
    if site.is_empty() {
      return Err(ValidationError::EmptySite);
    }

    let rate_text = rate.trim();
    let rate: f64 = rate_text
      .parse()
      .map_err(|_| ValidationError::InvalidRate(rate_text.to_owned()))?;
    if !rate.is_finite() || rate <= 0.0 {
      return Err(ValidationError::NonPositiveRate(rate));
    }

    let date_text = start_date.trim();
    let start_date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
      .map_err(|_| ValidationError::InvalidDate(date_text.to_owned()))?;

    Ok(Self::new(name, site, rate, start_date))
  }
}

// ─── Equipment ───────────────────────────────────────────────────────────────

/// A hired equipment item, serialised with the field names of the storage
/// slot (`startDate`, `isArchived`, `archivedDate`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
  id:            EquipmentId,
  pub name:      String,
  /// Free-text location. Kept exactly as entered; see
  /// [`crate::site::site_label`] for the grouping label.
  pub site:      String,
  rate:          f64,
  start_date:    NaiveDate,
  is_archived:   bool,
  archived_date: Option<NaiveDate>,
}

impl Equipment {
  /// Build a new active item with a fresh id. Performs no validation.
  pub fn create(draft: NewEquipment) -> Self {
    Self {
      id:            EquipmentId::generate(),
      name:          draft.name,
      site:          draft.site,
      rate:          draft.rate,
      start_date:    draft.start_date,
      is_archived:   false,
      archived_date: None,
    }
  }

  pub fn id(&self) -> &EquipmentId { &self.id }

  pub fn rate(&self) -> f64 { self.rate }

  pub fn start_date(&self) -> NaiveDate { self.start_date }

  pub fn is_archived(&self) -> bool { self.is_archived }

  pub fn archived_date(&self) -> Option<NaiveDate> { self.archived_date }

  pub fn status(&self) -> Status {
    match self.archived_date {
      Some(on) if self.is_archived => Status::Archived { on },
      _ => Status::Active,
    }
  }

  /// Move an active item to the archive. Returns `false` if it was already
  /// archived, in which case the first archive date is kept.
  pub fn archive(&mut self, on: NaiveDate) -> bool {
    if self.is_archived {
      return false;
    }
    self.is_archived = true;
    self.archived_date = Some(on);
    true
  }

  /// Return an archived item to active. Returns `false` if it was active.
  pub fn restore(&mut self) -> bool {
    if !self.is_archived {
      return false;
    }
    self.is_archived = false;
    self.archived_date = None;
    true
  }

  /// Accrued hire cost as of `today`.
  pub fn hire_cost(&self, today: NaiveDate) -> f64 {
    cost::hire_cost(self.rate, self.start_date, today)
  }

  /// Describe the first broken record invariant, if any.
  pub(crate) fn invariant_violation(&self) -> Option<&'static str> {
    if self.id.0.is_empty() {
      return Some("empty id");
    }
    if self.name.trim().is_empty() {
      return Some("empty name");
    }
    if !self.rate.is_finite() || self.rate <= 0.0 {
      return Some("rate is not a positive number");
    }
    if self.is_archived != self.archived_date.is_some() {
      return Some("archivedDate must be set exactly when isArchived is true");
    }
    None
  }
}
