//! Subject: the owning side of the binding-category relationship.
//!
//! A subject claims one binding category (`ctgr_b`) for itself. Objects attach
//! to a subject by carrying the same `ctgr_b` value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted subject row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  /// Primary tag; immutable once created.
  pub dtgs:   String,
  /// Binding category; unique among subjects and never changed after
  /// creation.
  pub ctgr_b: String,
  /// Free-text description.
  pub dst:    Option<String>,
  /// Category label used for filtered listings.
  pub ctgr:   Option<String>,
  /// Creation time.
  pub etpr:   DateTime<Utc>,
  /// Time of the last successful mutation.
  pub ltpr:   DateTime<Utc>,
}

impl Subject {
  /// Build the row for a freshly created subject; both timestamps are `at`.
  pub fn create(input: NewSubject, at: DateTime<Utc>) -> Self {
    Self {
      dtgs:   input.dtgs,
      ctgr_b: input.ctgr_b,
      dst:    input.dst,
      ctgr:   input.ctgr,
      etpr:   at,
      ltpr:   at,
    }
  }

  /// Replace the mutable fields with `update` and stamp `ltpr`.
  pub fn apply(&mut self, update: SubjectUpdate, at: DateTime<Utc>) {
    self.dst = update.dst;
    self.ctgr = update.ctgr;
    self.ltpr = at;
  }
}

/// Input to [`crate::Registry::create_subject`].
/// Timestamps are always set by the registry; they are not accepted from
/// callers.
#[derive(Debug, Clone)]
pub struct NewSubject {
  pub dtgs:   String,
  pub ctgr_b: String,
  pub dst:    Option<String>,
  pub ctgr:   Option<String>,
}

impl NewSubject {
  pub fn new(dtgs: impl Into<String>, ctgr_b: impl Into<String>) -> Self {
    Self {
      dtgs:   dtgs.into(),
      ctgr_b: ctgr_b.into(),
      dst:    None,
      ctgr:   None,
    }
  }
}

/// Replacement values for a subject's mutable fields. A `None` clears the
/// field. Neither `dtgs` nor `ctgr_b` can be changed through an update.
#[derive(Debug, Clone, Default)]
pub struct SubjectUpdate {
  pub dst:  Option<String>,
  pub ctgr: Option<String>,
}
