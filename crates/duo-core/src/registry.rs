//! [`Registry`]: one entry point per subject/object operation.
//!
//! A mutation moves through [`Stage::Validating`], [`Stage::Persisting`],
//! [`Stage::Projecting`] and ends [`Stage::Complete`]. Validation and
//! persistence share one [`EntityStore::write`] unit of work, so a failure in
//! either leaves the store untouched. Projection runs in a separate read after
//! commit; if it fails, the committed change stays.

use std::fmt;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::{
  Result,
  kind::EntityKind,
  object::{NewObject, Object, ObjectUpdate},
  rules,
  store::EntityStore,
  subject::{NewSubject, Subject, SubjectUpdate},
  view::{
    self, Deletion, ObjectBrief, ObjectDetail, SubjectBrief, SubjectDetail,
    SubjectSummary,
  },
};

/// Where a mutation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Validating,
  Persisting,
  Projecting,
  Complete,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Validating => "validating",
      Self::Persisting => "persisting",
      Self::Projecting => "projecting",
      Self::Complete => "complete",
    })
  }
}

/// Log the outcome of the write step and pass it through.
fn settle<T>(
  op: &'static str,
  kind: EntityKind,
  tag: &str,
  outcome: Result<T>,
) -> Result<T> {
  match &outcome {
    Ok(_) => debug!(op, %kind, tag, stage = %Stage::Projecting, "committed"),
    Err(e) if e.is_rejection() => {
      warn!(op, %kind, tag, code = e.code(), "mutation rejected: {e}")
    }
    Err(e) => warn!(op, %kind, tag, code = e.code(), "mutation failed: {e}"),
  }
  outcome
}

fn complete(op: &'static str, kind: EntityKind, tag: &str) {
  info!(op, %kind, tag, stage = %Stage::Complete, "mutation complete");
}

/// Coordinates rules, persistence and projection over an [`EntityStore`].
///
/// Cloning is as cheap as cloning the store.
#[derive(Debug, Clone)]
pub struct Registry<S> {
  store: S,
}

impl<S: EntityStore> Registry<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  // ── Subjects ──────────────────────────────────────────────────────────

  /// Create a subject. Its detail view starts with no objects.
  pub async fn create_subject(&self, input: NewSubject) -> Result<SubjectDetail> {
    const OP: &str = "create_subject";
    let tag = input.dtgs.clone();
    debug!(op = OP, tag = %tag, stage = %Stage::Validating, "begin");

    let outcome = self
      .store
      .write(move |tx| {
        rules::check_new_subject(tx, &input)?;
        debug!(op = OP, stage = %Stage::Persisting);
        let subject = Subject::create(input, Utc::now());
        tx.insert_subject(&subject)?;
        Ok(subject)
      })
      .await;
    let subject = settle(OP, EntityKind::Subject, &tag, outcome)?;

    let detail = self
      .store
      .read(move |r| view::subject_detail(r, subject))
      .await?;
    complete(OP, EntityKind::Subject, &tag);
    Ok(detail)
  }

  pub async fn list_subjects(&self) -> Result<Vec<SubjectSummary>> {
    self.store.read(|r| view::subject_summaries(r)).await
  }

  pub async fn subject(&self, dtgs: &str) -> Result<SubjectDetail> {
    let dtgs = dtgs.to_owned();
    self
      .store
      .read(move |r| {
        let subject = rules::existing_subject(r, &dtgs)?;
        view::subject_detail(r, subject)
      })
      .await
  }

  pub async fn subjects_by_category(&self, ctgr: &str) -> Result<Vec<SubjectBrief>> {
    let ctgr = ctgr.to_owned();
    self
      .store
      .read(move |r| {
        Ok(
          r.subjects_by_category(&ctgr)?
            .into_iter()
            .map(SubjectBrief::from)
            .collect(),
        )
      })
      .await
  }

  /// Replace `dst` and `ctgr`. Fails with `NoChange` if both already match.
  pub async fn update_subject(
    &self,
    dtgs: &str,
    update: SubjectUpdate,
  ) -> Result<SubjectDetail> {
    const OP: &str = "update_subject";
    let tag = dtgs.to_owned();
    debug!(op = OP, tag = %tag, stage = %Stage::Validating, "begin");

    let key = tag.clone();
    let outcome = self
      .store
      .write(move |tx| {
        let mut subject = rules::existing_subject(tx, &key)?;
        rules::check_subject_update(&subject, &update)?;
        debug!(op = OP, stage = %Stage::Persisting);
        subject.apply(update, Utc::now());
        tx.update_subject(&subject)?;
        Ok(subject)
      })
      .await;
    let subject = settle(OP, EntityKind::Subject, &tag, outcome)?;

    let detail = self
      .store
      .read(move |r| view::subject_detail(r, subject))
      .await?;
    complete(OP, EntityKind::Subject, &tag);
    Ok(detail)
  }

  /// Delete a subject that no object is bound to.
  pub async fn delete_subject(&self, dtgs: &str) -> Result<Deletion> {
    const OP: &str = "delete_subject";
    let tag = dtgs.to_owned();
    debug!(op = OP, tag = %tag, stage = %Stage::Validating, "begin");

    let key = tag.clone();
    let outcome = self
      .store
      .write(move |tx| {
        let subject = rules::existing_subject(tx, &key)?;
        rules::check_subject_delete(tx, &subject)?;
        debug!(op = OP, stage = %Stage::Persisting);
        tx.delete_subject(&subject.dtgs)
      })
      .await;
    settle(OP, EntityKind::Subject, &tag, outcome)?;

    complete(OP, EntityKind::Subject, &tag);
    Ok(Deletion::new(EntityKind::Subject, &tag))
  }

  // ── Objects ───────────────────────────────────────────────────────────

  /// Create an object bound to an existing subject's `ctgr_b`.
  pub async fn create_object(&self, input: NewObject) -> Result<ObjectDetail> {
    const OP: &str = "create_object";
    let tag = input.dtgs.clone();
    debug!(op = OP, tag = %tag, stage = %Stage::Validating, "begin");

    let outcome = self
      .store
      .write(move |tx| {
        rules::check_new_object(tx, &input)?;
        debug!(op = OP, stage = %Stage::Persisting);
        let object = Object::create(input, Utc::now());
        tx.insert_object(&object)?;
        Ok(object)
      })
      .await;
    let object = settle(OP, EntityKind::Object, &tag, outcome)?;

    let detail = self
      .store
      .read(move |r| view::object_detail(r, object))
      .await?;
    complete(OP, EntityKind::Object, &tag);
    Ok(detail)
  }

  pub async fn list_objects(&self) -> Result<Vec<ObjectBrief>> {
    self
      .store
      .read(|r| Ok(r.objects()?.into_iter().map(ObjectBrief::from).collect()))
      .await
  }

  pub async fn object(&self, dtgs: &str) -> Result<ObjectDetail> {
    let dtgs = dtgs.to_owned();
    self
      .store
      .read(move |r| {
        let object = rules::existing_object(r, &dtgs)?;
        view::object_detail(r, object)
      })
      .await
  }

  pub async fn objects_by_category(&self, ctgr: &str) -> Result<Vec<ObjectBrief>> {
    let ctgr = ctgr.to_owned();
    self
      .store
      .read(move |r| {
        Ok(
          r.objects_by_category(&ctgr)?
            .into_iter()
            .map(ObjectBrief::from)
            .collect(),
        )
      })
      .await
  }

  /// Replace `dst` and `ctgr`, and `ctgr_b` when supplied.
  pub async fn update_object(
    &self,
    dtgs: &str,
    update: ObjectUpdate,
  ) -> Result<ObjectDetail> {
    const OP: &str = "update_object";
    let tag = dtgs.to_owned();
    debug!(op = OP, tag = %tag, stage = %Stage::Validating, "begin");

    let key = tag.clone();
    let outcome = self
      .store
      .write(move |tx| {
        let mut object = rules::existing_object(tx, &key)?;
        rules::check_object_update(tx, &object, &update)?;
        debug!(op = OP, stage = %Stage::Persisting);
        object.apply(update, Utc::now());
        tx.update_object(&object)?;
        Ok(object)
      })
      .await;
    let object = settle(OP, EntityKind::Object, &tag, outcome)?;

    let detail = self
      .store
      .read(move |r| view::object_detail(r, object))
      .await?;
    complete(OP, EntityKind::Object, &tag);
    Ok(detail)
  }

  pub async fn delete_object(&self, dtgs: &str) -> Result<Deletion> {
    const OP: &str = "delete_object";
    let tag = dtgs.to_owned();
    debug!(op = OP, tag = %tag, stage = %Stage::Validating, "begin");

    let key = tag.clone();
    let outcome = self
      .store
      .write(move |tx| {
        let object = rules::existing_object(tx, &key)?;
        rules::check_object_delete(&object)?;
        debug!(op = OP, stage = %Stage::Persisting);
        tx.delete_object(&object.dtgs)
      })
      .await;
    settle(OP, EntityKind::Object, &tag, outcome)?;

    complete(OP, EntityKind::Object, &tag);
    Ok(Deletion::new(EntityKind::Object, &tag))
  }
}
