//! Error types for `hire-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The slot backend failed to read or write.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The slot held something that is not a valid equipment collection.
  #[error("stored data under {key:?} is corrupt: {reason}")]
  CorruptData { key: String, reason: String },

  /// A record that would be unreadable once stored; nothing was written.
  #[error("refusing to store item {id:?}: {reason}")]
  InvalidRecord { id: String, reason: &'static str },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub(crate) fn storage<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(err))
  }
}

/// Rejections produced while turning raw form input into a
/// [`NewEquipment`](crate::equipment::NewEquipment).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
  #[error("name must not be empty")]
  EmptyName,

  #[error("site must not be empty")]
  EmptySite,

  #[error("rate {0:?} is not a number")]
  InvalidRate(String),

  #[error("rate must be positive, got {0}")]
  NonPositiveRate(f64),

  #[error("start date {0:?} is not a YYYY-MM-DD date")]
  InvalidDate(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
