//! Core types and operations for the equipment-hire tracker.
//!
//! This crate owns the domain model, the cost arithmetic, and the
//! collection service. Durable storage is reached only through the
//! [`storage::SlotStorage`] trait; concrete backends live in other crates.

pub mod clock;
pub mod cost;
pub mod equipment;
pub mod error;
pub mod persist;
pub mod site;
pub mod storage;
pub mod tracker;

pub use error::{Error, Result, ValidationError};
