//! In-memory store fakes for unit tests.

use std::{
  cell::RefCell,
  collections::BTreeMap,
  io,
  sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
  },
};

use chrono::Utc;

use crate::{
  Error, Result,
  kind::EntityKind,
  object::Object,
  store::{EntityReader, EntityStore, EntityWriter},
  subject::Subject,
};

/// Both tables as ordered maps. Writes go through `&self` like a real
/// connection.
#[derive(Default, Clone)]
pub struct Memory {
  subjects: RefCell<BTreeMap<String, Subject>>,
  objects:  RefCell<BTreeMap<String, Object>>,
}

impl Memory {
  pub fn put_subject(&mut self, dtgs: &str, ctgr_b: &str, ctgr: Option<&str>) {
    let now = Utc::now();
    self.subjects.get_mut().insert(dtgs.to_owned(), Subject {
      dtgs:   dtgs.to_owned(),
      ctgr_b: ctgr_b.to_owned(),
      dst:    None,
      ctgr:   ctgr.map(str::to_owned),
      etpr:   now,
      ltpr:   now,
    });
  }

  pub fn put_object(&mut self, dtgs: &str, ctgr_b: &str, ctgr: Option<&str>) {
    let now = Utc::now();
    self.objects.get_mut().insert(dtgs.to_owned(), Object {
      dtgs:   dtgs.to_owned(),
      ctgr_b: ctgr_b.to_owned(),
      dst:    None,
      ctgr:   ctgr.map(str::to_owned),
      etpr:   now,
      ltpr:   now,
    });
  }
}

impl EntityReader for Memory {
  fn subject(&self, dtgs: &str) -> Result<Option<Subject>> {
    Ok(self.subjects.borrow().get(dtgs).cloned())
  }

  fn subject_by_binding(&self, ctgr_b: &str) -> Result<Option<Subject>> {
    Ok(
      self
        .subjects
        .borrow()
        .values()
        .find(|s| s.ctgr_b == ctgr_b)
        .cloned(),
    )
  }

  fn subjects_by_category(&self, ctgr: &str) -> Result<Vec<Subject>> {
    Ok(
      self
        .subjects
        .borrow()
        .values()
        .filter(|s| s.ctgr.as_deref() == Some(ctgr))
        .cloned()
        .collect(),
    )
  }

  fn subjects(&self) -> Result<Vec<Subject>> {
    Ok(self.subjects.borrow().values().cloned().collect())
  }

  fn object(&self, dtgs: &str) -> Result<Option<Object>> {
    Ok(self.objects.borrow().get(dtgs).cloned())
  }

  fn objects_by_binding(&self, ctgr_b: &str) -> Result<Vec<Object>> {
    Ok(
      self
        .objects
        .borrow()
        .values()
        .filter(|o| o.ctgr_b == ctgr_b)
        .cloned()
        .collect(),
    )
  }

  fn count_objects_by_binding(&self, ctgr_b: &str) -> Result<u64> {
    Ok(
      self
        .objects
        .borrow()
        .values()
        .filter(|o| o.ctgr_b == ctgr_b)
        .count() as u64,
    )
  }

  fn objects_by_category(&self, ctgr: &str) -> Result<Vec<Object>> {
    Ok(
      self
        .objects
        .borrow()
        .values()
        .filter(|o| o.ctgr.as_deref() == Some(ctgr))
        .cloned()
        .collect(),
    )
  }

  fn objects(&self) -> Result<Vec<Object>> {
    Ok(self.objects.borrow().values().cloned().collect())
  }
}

impl EntityWriter for Memory {
  fn insert_subject(&self, subject: &Subject) -> Result<()> {
    let mut subjects = self.subjects.borrow_mut();
    if subjects.contains_key(&subject.dtgs) {
      return Err(Error::duplicate_tag(EntityKind::Subject, &subject.dtgs));
    }
    if subjects.values().any(|s| s.ctgr_b == subject.ctgr_b) {
      return Err(Error::DuplicateBindingCategory(subject.ctgr_b.clone()));
    }
    subjects.insert(subject.dtgs.clone(), subject.clone());
    Ok(())
  }

  fn update_subject(&self, subject: &Subject) -> Result<()> {
    match self.subjects.borrow_mut().get_mut(&subject.dtgs) {
      Some(row) => {
        *row = subject.clone();
        Ok(())
      }
      None => Err(Error::not_found(EntityKind::Subject, &subject.dtgs)),
    }
  }

  fn delete_subject(&self, dtgs: &str) -> Result<()> {
    self
      .subjects
      .borrow_mut()
      .remove(dtgs)
      .map(drop)
      .ok_or_else(|| Error::not_found(EntityKind::Subject, dtgs))
  }

  fn insert_object(&self, object: &Object) -> Result<()> {
    let mut objects = self.objects.borrow_mut();
    if objects.contains_key(&object.dtgs) {
      return Err(Error::duplicate_tag(EntityKind::Object, &object.dtgs));
    }
    objects.insert(object.dtgs.clone(), object.clone());
    Ok(())
  }

  fn update_object(&self, object: &Object) -> Result<()> {
    match self.objects.borrow_mut().get_mut(&object.dtgs) {
      Some(row) => {
        *row = object.clone();
        Ok(())
      }
      None => Err(Error::not_found(EntityKind::Object, &object.dtgs)),
    }
  }

  fn delete_object(&self, dtgs: &str) -> Result<()> {
    self
      .objects
      .borrow_mut()
      .remove(dtgs)
      .map(drop)
      .ok_or_else(|| Error::not_found(EntityKind::Object, dtgs))
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// [`EntityStore`] over a [`Memory`], with a switch that makes every
/// subsequent `read` fail.
///
/// `write` runs against a copy and swaps it in on `Ok`.
#[derive(Default)]
pub struct MemoryStore {
  memory:     Mutex<Memory>,
  fail_reads: AtomicBool,
}

impl MemoryStore {
  pub fn fail_reads(&self) { self.fail_reads.store(true, Ordering::SeqCst); }

  /// Inspect the committed state.
  pub fn snapshot(&self) -> Memory {
    self.memory.lock().unwrap().clone()
  }
}

impl EntityStore for MemoryStore {
  async fn read<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&dyn EntityReader) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    if self.fail_reads.load(Ordering::SeqCst) {
      return Err(Error::store(io::Error::other("read failed")));
    }
    let memory = self.memory.lock().unwrap().clone();
    f(&memory)
  }

  async fn write<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&dyn EntityWriter) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    let draft = self.memory.lock().unwrap().clone();
    let outcome = f(&draft);
    if outcome.is_ok() {
      *self.memory.lock().unwrap() = draft;
    }
    outcome
  }
}
