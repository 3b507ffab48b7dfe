//! Error types for `duo-core`.
//!
//! Every variant maps to one stable [`Error::code`], which transport layers
//! surface verbatim.

use thiserror::Error;

use crate::kind::EntityKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{kind} with dtgs {tag:?} already exists")]
  DuplicateTag { kind: EntityKind, tag: String },

  #[error("ctgr_b {0:?} already used by another subject")]
  DuplicateBindingCategory(String),

  #[error("no subject with ctgr_b {0:?}")]
  DanglingReference(String),

  #[error("no change detected for {kind} {tag:?}")]
  NoChange { kind: EntityKind, tag: String },

  #[error("{kind} not found: {tag:?}")]
  NotFound { kind: EntityKind, tag: String },

  #[error("cannot delete subject {tag:?}: {count} associated object(s) exist")]
  HasDependents { tag: String, count: u64 },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn not_found(kind: EntityKind, tag: impl Into<String>) -> Self {
    Self::NotFound { kind, tag: tag.into() }
  }

  pub fn duplicate_tag(kind: EntityKind, tag: impl Into<String>) -> Self {
    Self::DuplicateTag { kind, tag: tag.into() }
  }

  /// Wrap a backend failure.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }

  /// Stable, machine-readable signal for this failure kind.
  pub fn code(&self) -> &'static str {
    match self {
      Self::DuplicateTag { .. } => "duplicate_tag",
      Self::DuplicateBindingCategory(_) => "duplicate_binding_category",
      Self::DanglingReference(_) => "dangling_reference",
      Self::NoChange { .. } => "no_change",
      Self::NotFound { .. } => "not_found",
      Self::HasDependents { .. } => "has_dependents",
      Self::Store(_) => "store_error",
    }
  }

  /// `true` for integrity failures, `false` for backend failures.
  pub fn is_rejection(&self) -> bool { !matches!(self, Self::Store(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
