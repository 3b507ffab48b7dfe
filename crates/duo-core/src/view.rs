//! Read models. Never stored, always derived.
//!
//! Each view is an explicit struct with its own constructor. Related-entity
//! summaries are looked up from the store at projection time; nothing about a
//! subject's objects is cached on the subject row.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  kind::EntityKind,
  object::Object,
  store::EntityReader,
  subject::Subject,
};

// ─── Embedded summaries ──────────────────────────────────────────────────────

/// An object as embedded in [`SubjectDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
  pub dtgs: String,
  pub ctgr: Option<String>,
}

impl From<Object> for ObjectRef {
  fn from(o: Object) -> Self { Self { dtgs: o.dtgs, ctgr: o.ctgr } }
}

/// Tag-only object view, used both for object listings and as the embedded
/// form in [`SubjectSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectBrief {
  pub dtgs: String,
}

impl From<Object> for ObjectBrief {
  fn from(o: Object) -> Self { Self { dtgs: o.dtgs } }
}

/// The owning subject as embedded in [`ObjectDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRef {
  pub dtgs: String,
}

/// Tag-only subject view for category-filtered listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectBrief {
  pub dtgs: String,
}

impl From<Subject> for SubjectBrief {
  fn from(s: Subject) -> Self { Self { dtgs: s.dtgs } }
}

// ─── Subject views ───────────────────────────────────────────────────────────

/// A subject with every object bound to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectDetail {
  pub dtgs:   String,
  pub ctgr_b: String,
  pub dst:    Option<String>,
  pub ctgr:   Option<String>,
  pub etpr:   DateTime<Utc>,
  pub ltpr:   DateTime<Utc>,
  /// Bound objects, ordered by `dtgs`.
  pub objs:   Vec<ObjectRef>,
}

impl SubjectDetail {
  pub fn new(subject: Subject, objects: Vec<Object>) -> Self {
    Self {
      dtgs:   subject.dtgs,
      ctgr_b: subject.ctgr_b,
      dst:    subject.dst,
      ctgr:   subject.ctgr,
      etpr:   subject.etpr,
      ltpr:   subject.ltpr,
      objs:   objects.into_iter().map(ObjectRef::from).collect(),
    }
  }
}

/// A subject's identifying fields and the tags of its objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectSummary {
  pub dtgs:   String,
  pub ctgr_b: String,
  pub objs:   Vec<ObjectBrief>,
}

impl SubjectSummary {
  pub fn new(subject: Subject, objects: Vec<ObjectBrief>) -> Self {
    Self { dtgs: subject.dtgs, ctgr_b: subject.ctgr_b, objs: objects }
  }
}

// ─── Object views ────────────────────────────────────────────────────────────

/// An object with a reference to its owning subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDetail {
  pub dtgs:   String,
  pub dst:    Option<String>,
  pub ctgr:   Option<String>,
  pub ctgr_b: String,
  pub etpr:   DateTime<Utc>,
  pub ltpr:   DateTime<Utc>,
  /// `None` when no subject currently owns `ctgr_b`. Writes never produce
  /// that state; reads tolerate it.
  pub sbj:    Option<SubjectRef>,
}

impl ObjectDetail {
  pub fn new(object: Object, owner: Option<Subject>) -> Self {
    Self {
      dtgs:   object.dtgs,
      dst:    object.dst,
      ctgr:   object.ctgr,
      ctgr_b: object.ctgr_b,
      etpr:   object.etpr,
      ltpr:   object.ltpr,
      sbj:    owner.map(|s| SubjectRef { dtgs: s.dtgs }),
    }
  }
}

// ─── Delete confirmation ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deletion {
  pub message: String,
}

impl Deletion {
  pub fn new(kind: EntityKind, dtgs: &str) -> Self {
    Self {
      message: format!("{} '{dtgs}' deleted successfully", kind.title()),
    }
  }
}

// ─── Projection from the store ───────────────────────────────────────────────

/// Attach the subject's currently bound objects.
pub fn subject_detail<R>(reader: &R, subject: Subject) -> Result<SubjectDetail>
where
  R: EntityReader + ?Sized,
{
  let objects = reader.objects_by_binding(&subject.ctgr_b)?;
  Ok(SubjectDetail::new(subject, objects))
}

/// Every subject with the tags of its bound objects, in two reads.
pub fn subject_summaries<R>(reader: &R) -> Result<Vec<SubjectSummary>>
where
  R: EntityReader + ?Sized,
{
  let subjects = reader.subjects()?;

  let mut by_binding: HashMap<String, Vec<ObjectBrief>> = HashMap::new();
  for object in reader.objects()? {
    by_binding
      .entry(object.ctgr_b.clone())
      .or_default()
      .push(ObjectBrief::from(object));
  }

  Ok(
    subjects
      .into_iter()
      .map(|s| {
        let objs = by_binding.remove(&s.ctgr_b).unwrap_or_default();
        SubjectSummary::new(s, objs)
      })
      .collect(),
  )
}

/// Attach the owning subject, if one exists.
pub fn object_detail<R>(reader: &R, object: Object) -> Result<ObjectDetail>
where
  R: EntityReader + ?Sized,
{
  let owner = reader.subject_by_binding(&object.ctgr_b)?;
  Ok(ObjectDetail::new(object, owner))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixture::Memory;

  #[test]
  fn subject_detail_lists_bound_objects_in_tag_order() {
    let mut m = Memory::default();
    m.put_subject("s1", "b1", None);
    m.put_object("o2", "b1", Some("blue"));
    m.put_object("o1", "b1", None);
    m.put_object("o3", "b2", None);

    let s1 = m.subject("s1").unwrap().unwrap();
    let view = subject_detail(&m, s1).unwrap();

    assert_eq!(view.objs, vec![
      ObjectRef { dtgs: "o1".into(), ctgr: None },
      ObjectRef { dtgs: "o2".into(), ctgr: Some("blue".into()) },
    ]);
  }

  #[test]
  fn summaries_group_objects_by_binding() {
    let mut m = Memory::default();
    m.put_subject("s1", "b1", None);
    m.put_subject("s2", "b2", None);
    m.put_object("o1", "b1", None);
    m.put_object("o2", "b1", None);

    let summaries = subject_summaries(&m).unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].dtgs, "s1");
    assert_eq!(
      summaries[0].objs.iter().map(|o| o.dtgs.as_str()).collect::<Vec<_>>(),
      ["o1", "o2"]
    );
    assert!(summaries[1].objs.is_empty());
  }

  #[test]
  fn object_detail_tolerates_missing_owner() {
    let mut m = Memory::default();
    m.put_subject("s1", "b1", None);
    m.put_object("o1", "b1", None);
    m.put_object("orphan", "gone", None);

    let o1 = m.object("o1").unwrap().unwrap();
    let view = object_detail(&m, o1).unwrap();
    assert_eq!(view.sbj, Some(SubjectRef { dtgs: "s1".into() }));

    let orphan = m.object("orphan").unwrap().unwrap();
    let view = object_detail(&m, orphan).unwrap();
    assert_eq!(view.sbj, None);
  }

  #[test]
  fn detail_serialises_absent_owner_as_null() {
    let mut m = Memory::default();
    m.put_object("orphan", "gone", None);
    let orphan = m.object("orphan").unwrap().unwrap();
    let json = serde_json::to_value(ObjectDetail::new(orphan, None)).unwrap();
    assert!(json["sbj"].is_null());
  }

  #[test]
  fn deletion_message_names_the_tag() {
    let d = Deletion::new(EntityKind::Subject, "s1");
    assert_eq!(d.message, "Subject 's1' deleted successfully");
  }
}
