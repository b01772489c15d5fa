//! Reading and writing the equipment collection to a storage slot.
//!
//! The slot holds a JSON array of [`Equipment`] records. It is always
//! rewritten whole; there is no incremental update and no schema version.

use std::collections::HashSet;

use crate::{Error, Result, equipment::Equipment, storage::SlotStorage};

/// Name of the slot the tracker uses unless told otherwise.
pub const STORAGE_KEY: &str = "equipmentTracker_v1";

/// Serialise `items`, refusing any record that [`decode`] would reject.
pub fn encode(items: &[Equipment]) -> Result<String> {
  if let Some((item, reason)) = items
    .iter()
    .find_map(|item| item.invariant_violation().map(|reason| (item, reason)))
  {
    return Err(Error::InvalidRecord {
      id: item.id().as_str().to_owned(),
      reason,
    });
  }
  Ok(serde_json::to_string(items)?)
}

/// Parse the contents of slot `key`, rejecting anything that is not a valid
/// collection.
pub fn decode(key: &str, raw: &str) -> Result<Vec<Equipment>> {
  let corrupt = |reason: String| Error::CorruptData {
    key: key.to_owned(),
    reason,
  };

  let items: Vec<Equipment> =
    serde_json::from_str(raw).map_err(|e| corrupt(e.to_string()))?;

  let mut seen = HashSet::with_capacity(items.len());
  for item in &items {
    if let Some(problem) = item.invariant_violation() {
      return Err(corrupt(format!("item {:?}: {problem}", item.id().as_str())));
    }
    if !seen.insert(item.id()) {
      return Err(corrupt(format!("duplicate id {:?}", item.id().as_str())));
    }
  }

  Ok(items)
}

/// Overwrite slot `key` with the full collection.
pub fn save<S: SlotStorage>(
  storage: &mut S,
  key: &str,
  items: &[Equipment],
) -> Result<()> {
  let raw = encode(items)?;
  storage.write(key, &raw).map_err(Error::storage)?;
  tracing::debug!(key, count = items.len(), bytes = raw.len(), "saved collection");
  Ok(())
}

/// Read the collection from slot `key`. A slot that was never written is the
/// first-run state and yields an empty collection.
pub fn load<S: SlotStorage>(storage: &S, key: &str) -> Result<Vec<Equipment>> {
  match storage.read(key).map_err(Error::storage)? {
    Some(raw) => decode(key, &raw),
    None => {
      tracing::debug!(key, "slot empty; starting with no equipment");
      Ok(Vec::new())
    }
  }
}
