//! SQLite backend for the tracker's storage slots.
//!
//! Gives [`hire_core::storage::SlotStorage`] a durable home in a single
//! SQLite file, the way a browser keeps local storage on disk.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteSlots;

#[cfg(test)]
mod tests;
