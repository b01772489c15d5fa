//! Tests for `SqliteSlots`, mostly against an in-memory database.

use chrono::NaiveDate;
use hire_core::{
  Error as CoreError,
  clock::FixedClock,
  equipment::NewEquipment,
  persist::STORAGE_KEY,
  storage::SlotStorage,
  tracker::Tracker,
};

use crate::SqliteSlots;

fn store() -> SqliteSlots {
  SqliteSlots::open_in_memory().expect("in-memory store")
}

fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

// ─── Raw slots ───────────────────────────────────────────────────────────────

#[test]
fn missing_slot_reads_none() {
  let s = store();
  assert_eq!(s.read("nothing-here").unwrap(), None);
}

#[test]
fn write_then_read() {
  let mut s = store();
  s.write("greeting", "hello").unwrap();
  assert_eq!(s.read("greeting").unwrap().as_deref(), Some("hello"));
}

#[test]
fn write_overwrites_whole_value() {
  let mut s = store();
  s.write("k", "a much longer first value").unwrap();
  s.write("k", "short").unwrap();
  assert_eq!(s.read("k").unwrap().as_deref(), Some("short"));

  let rows: i64 = s
    .connection()
    .query_row("SELECT COUNT(*) FROM slots", [], |row| row.get(0))
    .unwrap();
  assert_eq!(rows, 1);
}

#[test]
fn keys_are_independent() {
  let mut s = store();
  s.write("b", "2").unwrap();
  s.write("a", "1").unwrap();
  assert_eq!(s.read("a").unwrap().as_deref(), Some("1"));
  assert_eq!(s.read("b").unwrap().as_deref(), Some("2"));
}

// ─── Through the tracker ─────────────────────────────────────────────────────

#[test]
fn tracker_round_trip() {
  let clock = FixedClock(date("2026-02-22"));
  let mut t = Tracker::open(store(), clock).unwrap();
  t.add(NewEquipment::new("Genie Lift", "Site A", 120.0, date("2026-02-01")))
    .unwrap();
  let id = t
    .add(NewEquipment::new("Wacker Plate", "Site B", 40.0, date("2026-02-10")))
    .unwrap()
    .id()
    .clone();
  t.archive(id.as_str()).unwrap();
  let expected = t.items().to_vec();

  let reopened = Tracker::open(t.into_storage(), clock).unwrap();
  assert_eq!(reopened.items(), expected);
}

#[test]
fn corrupt_slot_surfaces_as_corrupt_data() {
  let mut s = store();
  s.write(STORAGE_KEY, "not json at all").unwrap();
  let result = Tracker::open(s, FixedClock(date("2026-02-22")));
  assert!(matches!(result, Err(CoreError::CorruptData { .. })));
}

#[test]
fn data_survives_reopen_on_disk() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("hire.db");
  let clock = FixedClock(date("2026-02-22"));

  let id = {
    let mut t = Tracker::open(SqliteSlots::open(&path).unwrap(), clock).unwrap();
    let id = t
      .add(NewEquipment::new("Mini Digger", "Depot", 85.0, date("2026-02-20")))
      .unwrap()
      .id()
      .clone();
    id
  };

  let t = Tracker::open(SqliteSlots::open(&path).unwrap(), clock).unwrap();
  let item = t.get(id.as_str()).expect("item persisted");
  assert_eq!(item.name, "Mini Digger");
  assert_eq!(t.total_cost(), 170.0);
}

#[test]
fn unwritable_database_is_a_storage_error() {
  let s = store();
  s.connection()
    .execute_batch("PRAGMA query_only = ON;")
    .unwrap();
  let mut t = Tracker::open(s, FixedClock(date("2026-02-22"))).unwrap();
  let err = t
    .add(NewEquipment::new("Lift", "A", 10.0, date("2026-02-01")))
    .unwrap_err();
  assert!(matches!(err, CoreError::Storage(_)));
  assert!(t.items().is_empty());
}
