//! Object: the dependent side of the binding-category relationship.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted object row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
  /// Primary tag; immutable once created.
  pub dtgs:   String,
  /// Must equal the `ctgr_b` of an existing subject.
  pub ctgr_b: String,
  pub dst:    Option<String>,
  pub ctgr:   Option<String>,
  pub etpr:   DateTime<Utc>,
  pub ltpr:   DateTime<Utc>,
}

impl Object {
  pub fn create(input: NewObject, at: DateTime<Utc>) -> Self {
    Self {
      dtgs:   input.dtgs,
      ctgr_b: input.ctgr_b,
      dst:    input.dst,
      ctgr:   input.ctgr,
      etpr:   at,
      ltpr:   at,
    }
  }

  /// Binding category this object would carry after `update`.
  pub fn proposed_binding<'a>(&'a self, update: &'a ObjectUpdate) -> &'a str {
    update.ctgr_b.as_deref().unwrap_or(&self.ctgr_b)
  }

  /// Replace the mutable fields with `update` and stamp `ltpr`.
  ///
  /// `dst` and `ctgr` are replaced outright; `ctgr_b` is non-nullable and is
  /// kept when the update leaves it out.
  pub fn apply(&mut self, update: ObjectUpdate, at: DateTime<Utc>) {
    self.dst = update.dst;
    self.ctgr = update.ctgr;
    if let Some(ctgr_b) = update.ctgr_b {
      self.ctgr_b = ctgr_b;
    }
    self.ltpr = at;
  }
}

/// Input to [`crate::Registry::create_object`].
#[derive(Debug, Clone)]
pub struct NewObject {
  pub dtgs:   String,
  pub ctgr_b: String,
  pub dst:    Option<String>,
  pub ctgr:   Option<String>,
}

impl NewObject {
  pub fn new(dtgs: impl Into<String>, ctgr_b: impl Into<String>) -> Self {
    Self {
      dtgs:   dtgs.into(),
      ctgr_b: ctgr_b.into(),
      dst:    None,
      ctgr:   None,
    }
  }
}

/// Replacement values for an object's mutable fields.
#[derive(Debug, Clone, Default)]
pub struct ObjectUpdate {
  pub dst:    Option<String>,
  pub ctgr:   Option<String>,
  /// Re-point the object at another subject's binding category.
  pub ctgr_b: Option<String>,
}
