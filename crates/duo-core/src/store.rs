//! The `EntityStore` trait and the row-level primitives it hands out.
//!
//! The trait is implemented by storage backends (e.g. `duo-store-sqlite`).
//! Higher layers depend on this abstraction, not on any concrete backend.
//!
//! Row access is synchronous: a backend opens one unit of work, hands the
//! caller an [`EntityReader`] or [`EntityWriter`] for its duration, and
//! closes it when the caller's closure returns. This keeps validation and
//! persistence of a mutation inside the same transaction.

use std::future::Future;

use crate::{Result, object::Object, subject::Subject};

// ─── Row primitives ──────────────────────────────────────────────────────────

/// Read primitives over both tables.
///
/// All list methods return rows ordered by `dtgs`.
pub trait EntityReader {
  // ── Subjects ──────────────────────────────────────────────────────────

  /// Look a subject up by primary tag.
  fn subject(&self, dtgs: &str) -> Result<Option<Subject>>;

  /// Look a subject up by its binding category. At most one can match.
  fn subject_by_binding(&self, ctgr_b: &str) -> Result<Option<Subject>>;

  /// All subjects whose `ctgr` equals `ctgr`.
  fn subjects_by_category(&self, ctgr: &str) -> Result<Vec<Subject>>;

  fn subjects(&self) -> Result<Vec<Subject>>;

  // ── Objects ───────────────────────────────────────────────────────────

  fn object(&self, dtgs: &str) -> Result<Option<Object>>;

  /// All objects bound to the binding category `ctgr_b`.
  fn objects_by_binding(&self, ctgr_b: &str) -> Result<Vec<Object>>;

  /// Number of objects bound to `ctgr_b`.
  fn count_objects_by_binding(&self, ctgr_b: &str) -> Result<u64>;

  fn objects_by_category(&self, ctgr: &str) -> Result<Vec<Object>>;

  fn objects(&self) -> Result<Vec<Object>>;
}

/// Write primitives, available only inside [`EntityStore::write`].
///
/// Inserts fail with [`Error::DuplicateTag`](crate::Error::DuplicateTag) or
/// [`Error::DuplicateBindingCategory`](crate::Error::DuplicateBindingCategory)
/// when the backend's own uniqueness constraints reject the row. Updates and
/// deletes of a missing row fail with
/// [`Error::NotFound`](crate::Error::NotFound).
pub trait EntityWriter: EntityReader {
  fn insert_subject(&self, subject: &Subject) -> Result<()>;

  /// Persist `dst`, `ctgr` and `ltpr` of an existing subject.
  fn update_subject(&self, subject: &Subject) -> Result<()>;

  fn delete_subject(&self, dtgs: &str) -> Result<()>;

  fn insert_object(&self, object: &Object) -> Result<()>;

  /// Persist `dst`, `ctgr`, `ctgr_b` and `ltpr` of an existing object.
  fn update_object(&self, object: &Object) -> Result<()>;

  fn delete_object(&self, dtgs: &str) -> Result<()>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a duo storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait EntityStore: Send + Sync {
  /// Run `f` against a consistent read view of the store.
  fn read<T, F>(&self, f: F) -> impl Future<Output = Result<T>> + Send + '_
  where
    F: FnOnce(&dyn EntityReader) -> Result<T> + Send + 'static,
    T: Send + 'static;

  /// Run `f` as one atomic unit of work.
  ///
  /// Every write made through the writer commits if `f` returns `Ok`, and is
  /// rolled back if `f` returns `Err`. The error from `f` is returned as-is;
  /// a failure to commit surfaces as [`Error::Store`](crate::Error::Store).
  fn write<T, F>(&self, f: F) -> impl Future<Output = Result<T>> + Send + '_
  where
    F: FnOnce(&dyn EntityWriter) -> Result<T> + Send + 'static,
    T: Send + 'static;
}
