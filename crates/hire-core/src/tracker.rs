//! [`Tracker`]: the owned equipment collection and its operations.
//!
//! The tracker holds the only in-memory copy of the collection together with
//! the storage backend and clock it depends on. Every successful mutation is
//! followed by a full write of the collection; a failed write rolls the
//! mutation back so memory never runs ahead of storage.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
  Result,
  clock::Clock,
  cost::{self, Totals},
  equipment::{Equipment, NewEquipment},
  persist::{self, STORAGE_KEY},
  site,
  storage::SlotStorage,
};

/// Which half of the collection a view covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
  Active,
  Archived,
}

impl View {
  pub fn includes(self, item: &Equipment) -> bool {
    match self {
      Self::Active => !item.is_archived(),
      Self::Archived => item.is_archived(),
    }
  }
}

pub struct Tracker<S, C> {
  storage: S,
  clock:   C,
  key:     String,
  items:   Vec<Equipment>,
}

impl<S: SlotStorage, C: Clock> Tracker<S, C> {
  /// Load the collection from the default slot.
  pub fn open(storage: S, clock: C) -> Result<Self> {
    Self::open_with_key(storage, clock, STORAGE_KEY)
  }

  pub fn open_with_key(
    storage: S,
    clock: C,
    key: impl Into<String>,
  ) -> Result<Self> {
    let key = key.into();
    let items = persist::load(&storage, &key)?;
    tracing::info!(key = %key, count = items.len(), "loaded equipment");
    Ok(Self { storage, clock, key, items })
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn items(&self) -> &[Equipment] { &self.items }

  pub fn get(&self, id: &str) -> Option<&Equipment> {
    self.items.iter().find(|item| item.id() == id)
  }

  pub fn view(&self, view: View) -> impl Iterator<Item = &Equipment> + '_ {
    self.items.iter().filter(move |item| view.includes(item))
  }

  pub fn active(&self) -> impl Iterator<Item = &Equipment> + '_ {
    self.view(View::Active)
  }

  pub fn archived(&self) -> impl Iterator<Item = &Equipment> + '_ {
    self.view(View::Archived)
  }

  /// Items of `view` grouped by site label, in display order.
  pub fn groups(&self, view: View) -> BTreeMap<String, Vec<&Equipment>> {
    site::group_by_site(self.view(view))
  }

  pub fn today(&self) -> NaiveDate { self.clock.today() }

  pub fn total_cost(&self) -> f64 {
    cost::total_cost(&self.items, self.today())
  }

  pub fn totals(&self) -> Totals { cost::totals(&self.items, self.today()) }

  pub fn into_storage(self) -> S { self.storage }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Create an item from `draft`, append it and persist.
  pub fn add(&mut self, draft: NewEquipment) -> Result<&Equipment> {
    let item = Equipment::create(draft);
    tracing::info!(id = %item.id(), name = %item.name, "adding equipment");

    let index = self.items.len();
    self.items.push(item);
    self.persist_or_undo(|items| {
      items.pop();
    })?;
    Ok(&self.items[index])
  }

  /// Archive the item with `id` as of today. Returns `false` without writing
  /// if there is no such item or it is already archived.
  pub fn archive(&mut self, id: &str) -> Result<bool> {
    let today = self.today();
    let Some(index) = self.position(id) else {
      tracing::debug!(id, "archive: no such equipment");
      return Ok(false);
    };

    let before = self.items[index].clone();
    if !self.items[index].archive(today) {
      tracing::debug!(id, "archive: already archived");
      return Ok(false);
    }

    tracing::info!(id, %today, "archiving equipment");
    self.persist_or_undo(move |items| items[index] = before)?;
    Ok(true)
  }

  /// Return the item with `id` to active. Returns `false` without writing if
  /// there is no such item or it is not archived.
  pub fn restore(&mut self, id: &str) -> Result<bool> {
    let Some(index) = self.position(id) else {
      tracing::debug!(id, "restore: no such equipment");
      return Ok(false);
    };

    let before = self.items[index].clone();
    if !self.items[index].restore() {
      tracing::debug!(id, "restore: not archived");
      return Ok(false);
    }

    tracing::info!(id, "restoring equipment");
    self.persist_or_undo(move |items| items[index] = before)?;
    Ok(true)
  }

  /// Permanently remove the item with `id`. Deleting an unknown id is a
  /// no-op that returns `false`.
  pub fn delete(&mut self, id: &str) -> Result<bool> {
    let Some(index) = self.position(id) else {
      tracing::debug!(id, "delete: no such equipment");
      return Ok(false);
    };

    let removed = self.items.remove(index);
    tracing::info!(id, name = %removed.name, "deleting equipment");
    self.persist_or_undo(move |items| items.insert(index, removed))?;
    Ok(true)
  }

  // ── Internals ─────────────────────────────────────────────────────────────

  fn position(&self, id: &str) -> Option<usize> {
    self.items.iter().position(|item| item.id() == id)
  }

  /// Write the collection; if the write fails apply `undo` to the in-memory
  /// copy and return the storage error.
  fn persist_or_undo<F>(&mut self, undo: F) -> Result<()>
  where
    F: FnOnce(&mut Vec<Equipment>),
  {
    if let Err(err) = persist::save(&mut self.storage, &self.key, &self.items) {
      tracing::warn!(key = %self.key, error = %err, "save failed; rolling back");
      undo(&mut self.items);
      return Err(err);
    }
    Ok(())
  }
}
