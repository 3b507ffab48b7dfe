//! Integrity rules.
//!
//! Pure predicates over store reads. None of these functions write; they run
//! inside the same unit of work as the mutation they guard, before any row is
//! touched. The backend's uniqueness constraints remain the final authority
//! for `dtgs` and subject `ctgr_b`; these checks report the same failures
//! earlier and with a precise kind.
//!
//! The object → subject link is by value (`Object::ctgr_b` equals
//! `Subject::ctgr_b`) and is not a storage-level foreign key, so the
//! referential checks here are the only thing that keeps it intact.

use crate::{
  Error, Result,
  kind::EntityKind,
  object::{NewObject, Object, ObjectUpdate},
  store::EntityReader,
  subject::{NewSubject, Subject, SubjectUpdate},
};

// ─── Existence ───────────────────────────────────────────────────────────────

/// The current subject row, or [`Error::NotFound`].
pub fn existing_subject<R>(reader: &R, dtgs: &str) -> Result<Subject>
where
  R: EntityReader + ?Sized,
{
  reader
    .subject(dtgs)?
    .ok_or_else(|| Error::not_found(EntityKind::Subject, dtgs))
}

/// The current object row, or [`Error::NotFound`].
pub fn existing_object<R>(reader: &R, dtgs: &str) -> Result<Object>
where
  R: EntityReader + ?Sized,
{
  reader
    .object(dtgs)?
    .ok_or_else(|| Error::not_found(EntityKind::Object, dtgs))
}

// ─── Create ──────────────────────────────────────────────────────────────────

pub fn check_new_subject<R>(reader: &R, input: &NewSubject) -> Result<()>
where
  R: EntityReader + ?Sized,
{
  if reader.subject(&input.dtgs)?.is_some() {
    return Err(Error::duplicate_tag(EntityKind::Subject, &input.dtgs));
  }
  if reader.subject_by_binding(&input.ctgr_b)?.is_some() {
    return Err(Error::DuplicateBindingCategory(input.ctgr_b.clone()));
  }
  Ok(())
}

pub fn check_new_object<R>(reader: &R, input: &NewObject) -> Result<()>
where
  R: EntityReader + ?Sized,
{
  if reader.object(&input.dtgs)?.is_some() {
    return Err(Error::duplicate_tag(EntityKind::Object, &input.dtgs));
  }
  check_binding_exists(reader, &input.ctgr_b)
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// Reject an update that would leave every mutable field as it is.
pub fn check_subject_update(current: &Subject, update: &SubjectUpdate) -> Result<()> {
  if current.dst == update.dst && current.ctgr == update.ctgr {
    return Err(Error::NoChange {
      kind: EntityKind::Subject,
      tag:  current.dtgs.clone(),
    });
  }
  Ok(())
}

/// Reject a no-op update, and an update that re-points the object at a
/// binding category no subject owns.
pub fn check_object_update<R>(
  reader: &R,
  current: &Object,
  update: &ObjectUpdate,
) -> Result<()>
where
  R: EntityReader + ?Sized,
{
  let ctgr_b = current.proposed_binding(update);

  if current.dst == update.dst
    && current.ctgr == update.ctgr
    && current.ctgr_b == ctgr_b
  {
    return Err(Error::NoChange {
      kind: EntityKind::Object,
      tag:  current.dtgs.clone(),
    });
  }

  if ctgr_b != current.ctgr_b {
    check_binding_exists(reader, ctgr_b)?;
  }
  Ok(())
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// A subject can only go once no object is bound to its `ctgr_b`.
pub fn check_subject_delete<R>(reader: &R, subject: &Subject) -> Result<()>
where
  R: EntityReader + ?Sized,
{
  let count = reader.count_objects_by_binding(&subject.ctgr_b)?;
  if count > 0 {
    return Err(Error::HasDependents {
      tag: subject.dtgs.clone(),
      count,
    });
  }
  Ok(())
}

/// Nothing depends on an object.
pub fn check_object_delete(_object: &Object) -> Result<()> { Ok(()) }

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn check_binding_exists<R>(reader: &R, ctgr_b: &str) -> Result<()>
where
  R: EntityReader + ?Sized,
{
  match reader.subject_by_binding(ctgr_b)? {
    Some(_) => Ok(()),
    None => Err(Error::DanglingReference(ctgr_b.to_owned())),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixture::Memory;

  fn seeded() -> Memory {
    let mut m = Memory::default();
    m.put_subject("s1", "b1", Some("red"));
    m.put_subject("s2", "b2", None);
    m.put_object("o1", "b1", None);
    m
  }

  #[test]
  fn new_subject_with_taken_tag_is_duplicate() {
    let m = seeded();
    let err = check_new_subject(&m, &NewSubject::new("s1", "b9")).unwrap_err();
    assert!(matches!(err, Error::DuplicateTag { kind: EntityKind::Subject, ref tag } if tag == "s1"));
  }

  #[test]
  fn new_subject_with_taken_binding_is_duplicate_binding() {
    let m = seeded();
    let err = check_new_subject(&m, &NewSubject::new("s9", "b2")).unwrap_err();
    assert!(matches!(err, Error::DuplicateBindingCategory(ref b) if b == "b2"));
  }

  #[test]
  fn tag_is_checked_before_binding() {
    let m = seeded();
    let err = check_new_subject(&m, &NewSubject::new("s1", "b2")).unwrap_err();
    assert_eq!(err.code(), "duplicate_tag");
  }

  #[test]
  fn new_object_needs_owning_subject() {
    let m = seeded();
    assert!(check_new_object(&m, &NewObject::new("o2", "b2")).is_ok());

    let err = check_new_object(&m, &NewObject::new("o2", "nope")).unwrap_err();
    assert!(matches!(err, Error::DanglingReference(ref b) if b == "nope"));
  }

  #[test]
  fn object_tags_do_not_collide_with_subject_tags() {
    let m = seeded();
    assert!(check_new_object(&m, &NewObject::new("s1", "b1")).is_ok());
  }

  #[test]
  fn identical_subject_update_is_rejected() {
    let m = seeded();
    let current = existing_subject(&m, "s1").unwrap();
    let same = SubjectUpdate { dst: None, ctgr: Some("red".into()) };
    let err = check_subject_update(&current, &same).unwrap_err();
    assert_eq!(err.code(), "no_change");

    let cleared = SubjectUpdate::default();
    assert!(check_subject_update(&current, &cleared).is_ok());
  }

  #[test]
  fn object_update_without_binding_keeps_current() {
    let m = seeded();
    let current = existing_object(&m, "o1").unwrap();

    let err = check_object_update(&m, &current, &ObjectUpdate::default())
      .unwrap_err();
    assert_eq!(err.code(), "no_change");

    let same_binding = ObjectUpdate {
      ctgr_b: Some("b1".into()),
      ..Default::default()
    };
    let err = check_object_update(&m, &current, &same_binding).unwrap_err();
    assert_eq!(err.code(), "no_change");
  }

  #[test]
  fn object_rebinding_is_checked() {
    let m = seeded();
    let current = existing_object(&m, "o1").unwrap();

    let to_b2 = ObjectUpdate {
      ctgr_b: Some("b2".into()),
      ..Default::default()
    };
    assert!(check_object_update(&m, &current, &to_b2).is_ok());

    let to_nowhere = ObjectUpdate {
      ctgr_b: Some("b404".into()),
      ..Default::default()
    };
    let err = check_object_update(&m, &current, &to_nowhere).unwrap_err();
    assert_eq!(err.code(), "dangling_reference");
  }

  #[test]
  fn subject_with_dependents_cannot_be_deleted() {
    let m = seeded();
    let s1 = existing_subject(&m, "s1").unwrap();
    let err = check_subject_delete(&m, &s1).unwrap_err();
    assert!(matches!(err, Error::HasDependents { count: 1, .. }));

    let s2 = existing_subject(&m, "s2").unwrap();
    assert!(check_subject_delete(&m, &s2).is_ok());
  }

  #[test]
  fn missing_rows_are_not_found() {
    let m = seeded();
    let err = existing_subject(&m, "ghost").unwrap_err();
    assert!(matches!(err, Error::NotFound { kind: EntityKind::Subject, .. }));
    let err = existing_object(&m, "ghost").unwrap_err();
    assert!(matches!(err, Error::NotFound { kind: EntityKind::Object, .. }));
  }
}
