//! The `SlotStorage` trait and an in-memory backend.
//!
//! A slot store is a flat string-to-string map, the shape of browser local
//! storage. The tracker keeps its whole collection in a single slot.

use std::collections::HashMap;

use thiserror::Error;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a durable key-value slot backend.
///
/// `write` replaces the slot's previous value in full; there is no partial
/// update.
pub trait SlotStorage {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the value held in `key`, or `None` if the slot was never written.
  fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

  /// Overwrite `key` with `value`.
  fn write(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

impl<S: SlotStorage + ?Sized> SlotStorage for &mut S {
  type Error = S::Error;

  fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
    (**self).read(key)
  }

  fn write(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
    (**self).write(key, value)
  }
}

// ─── In-memory backend ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum MemoryStorageError {
  #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
  QuotaExceeded { needed: usize, quota: usize },
}

/// Slots held in a `HashMap`, with an optional byte quota over all keys and
/// values combined.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  slots: HashMap<String, String>,
  quota: Option<usize>,
}

impl MemoryStorage {
  pub fn new() -> Self { Self::default() }

  /// A store that refuses writes once keys plus values exceed `quota` bytes.
  pub fn with_quota(quota: usize) -> Self {
    Self { slots: HashMap::new(), quota: Some(quota) }
  }

  /// Raw access to a slot, bypassing the trait. Handy for seeding fixtures.
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
    self.slots.insert(key.into(), value.into());
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.slots.get(key).map(String::as_str)
  }

  fn used_without(&self, key: &str) -> usize {
    self
      .slots
      .iter()
      .filter(|(k, _)| k.as_str() != key)
      .map(|(k, v)| k.len() + v.len())
      .sum()
  }
}

impl SlotStorage for MemoryStorage {
  type Error = MemoryStorageError;

  fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
    Ok(self.slots.get(key).cloned())
  }

  fn write(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
    if let Some(quota) = self.quota {
      let needed = self.used_without(key) + key.len() + value.len();
      if needed > quota {
        return Err(MemoryStorageError::QuotaExceeded { needed, quota });
      }
    }
    self.slots.insert(key.to_owned(), value.to_owned());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unwritten_slot_reads_none() {
    let store = MemoryStorage::new();
    assert_eq!(store.read("missing").unwrap(), None);
  }

  #[test]
  fn write_overwrites() {
    let mut store = MemoryStorage::new();
    store.write("k", "first").unwrap();
    store.write("k", "second").unwrap();
    assert_eq!(store.read("k").unwrap().as_deref(), Some("second"));
  }

  #[test]
  fn quota_counts_replacement_not_previous_value() {
    let mut store = MemoryStorage::with_quota(10);
    store.write("k", "12345678").unwrap();
    // Replacing the same slot only needs room for the new value.
    store.write("k", "87654321").unwrap();

    let err = store.write("k", "123456789abc").unwrap_err();
    assert!(matches!(
      err,
      MemoryStorageError::QuotaExceeded { needed: 13, quota: 10 }
    ));
    assert_eq!(store.get("k"), Some("87654321"));
  }
}
