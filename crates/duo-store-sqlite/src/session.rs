//! [`Session`]: row primitives over a borrowed connection or transaction.

use duo_core::{
  EntityKind,
  object::Object,
  store::{EntityReader, EntityWriter},
  subject::Subject,
};
use rusqlite::{Connection, ErrorCode, OptionalExtension as _, Params};

use crate::{
  Error,
  encode::{COLUMNS, RawRow, encode_dt},
};

type CoreResult<T> = duo_core::Result<T>;

fn db(e: rusqlite::Error) -> duo_core::Error { Error::Sqlite(e).into() }

/// Translate a failed `INSERT` into the integrity error it stands for.
///
/// Covers writers that raced past the rules pre-check: the table's own
/// `PRIMARY KEY` and `UNIQUE` constraints reject the second row.
fn insert_error(
  kind: EntityKind,
  dtgs: &str,
  ctgr_b: &str,
  e: rusqlite::Error,
) -> duo_core::Error {
  if let rusqlite::Error::SqliteFailure(failure, message) = &e
    && failure.code == ErrorCode::ConstraintViolation
  {
    let on_binding = message
      .as_deref()
      .is_some_and(|m| m.ends_with(".ctgr_b"));
    return if on_binding {
      duo_core::Error::DuplicateBindingCategory(ctgr_b.to_owned())
    } else {
      duo_core::Error::duplicate_tag(kind, dtgs)
    };
  }
  db(e)
}

/// A view onto one SQLite connection for the duration of a unit of work.
///
/// Built over a plain connection for reads and over a
/// [`rusqlite::Transaction`] (via deref) for writes.
pub struct Session<'c> {
  conn: &'c Connection,
}

impl<'c> Session<'c> {
  pub fn new(conn: &'c Connection) -> Self { Self { conn } }

  fn query_rows<P: Params>(&self, sql: &str, params: P) -> CoreResult<Vec<RawRow>> {
    let mut stmt = self.conn.prepare_cached(sql).map_err(db)?;
    stmt
      .query_map(params, RawRow::from_row)
      .map_err(db)?
      .collect::<rusqlite::Result<Vec<_>>>()
      .map_err(db)
  }

  fn query_row<P: Params>(&self, sql: &str, params: P) -> CoreResult<Option<RawRow>> {
    self
      .conn
      .query_row(sql, params, RawRow::from_row)
      .optional()
      .map_err(db)
  }

  fn subjects_where<P: Params>(&self, clause: &str, params: P) -> CoreResult<Vec<Subject>> {
    let sql = format!("SELECT {COLUMNS} FROM subjects {clause} ORDER BY dtgs");
    self
      .query_rows(&sql, params)?
      .into_iter()
      .map(|raw| raw.into_subject().map_err(Into::into))
      .collect()
  }

  fn objects_where<P: Params>(&self, clause: &str, params: P) -> CoreResult<Vec<Object>> {
    let sql = format!("SELECT {COLUMNS} FROM objects {clause} ORDER BY dtgs");
    self
      .query_rows(&sql, params)?
      .into_iter()
      .map(|raw| raw.into_object().map_err(Into::into))
      .collect()
  }

  fn one_subject<P: Params>(&self, clause: &str, params: P) -> CoreResult<Option<Subject>> {
    let sql = format!("SELECT {COLUMNS} FROM subjects {clause}");
    self
      .query_row(&sql, params)?
      .map(|raw| raw.into_subject().map_err(Into::into))
      .transpose()
  }

  /// Run a single-row `UPDATE`/`DELETE`; zero affected rows means the row
  /// does not exist.
  fn execute_one<P: Params>(
    &self,
    sql: &str,
    params: P,
    kind: EntityKind,
    dtgs: &str,
  ) -> CoreResult<()> {
    let changed = self.conn.execute(sql, params).map_err(db)?;
    if changed == 0 {
      return Err(duo_core::Error::not_found(kind, dtgs));
    }
    Ok(())
  }
}

// ─── Reads ───────────────────────────────────────────────────────────────────

impl EntityReader for Session<'_> {
  fn subject(&self, dtgs: &str) -> CoreResult<Option<Subject>> {
    self.one_subject("WHERE dtgs = ?1", rusqlite::params![dtgs])
  }

  fn subject_by_binding(&self, ctgr_b: &str) -> CoreResult<Option<Subject>> {
    self.one_subject("WHERE ctgr_b = ?1", rusqlite::params![ctgr_b])
  }

  fn subjects_by_category(&self, ctgr: &str) -> CoreResult<Vec<Subject>> {
    self.subjects_where("WHERE ctgr = ?1", rusqlite::params![ctgr])
  }

  fn subjects(&self) -> CoreResult<Vec<Subject>> {
    self.subjects_where("", rusqlite::params![])
  }

  fn object(&self, dtgs: &str) -> CoreResult<Option<Object>> {
    let sql = format!("SELECT {COLUMNS} FROM objects WHERE dtgs = ?1");
    self
      .query_row(&sql, rusqlite::params![dtgs])?
      .map(|raw| raw.into_object().map_err(Into::into))
      .transpose()
  }

  fn objects_by_binding(&self, ctgr_b: &str) -> CoreResult<Vec<Object>> {
    self.objects_where("WHERE ctgr_b = ?1", rusqlite::params![ctgr_b])
  }

  fn count_objects_by_binding(&self, ctgr_b: &str) -> CoreResult<u64> {
    let count: i64 = self
      .conn
      .query_row(
        "SELECT COUNT(*) FROM objects WHERE ctgr_b = ?1",
        rusqlite::params![ctgr_b],
        |r| r.get(0),
      )
      .map_err(db)?;
    Ok(count.max(0) as u64)
  }

  fn objects_by_category(&self, ctgr: &str) -> CoreResult<Vec<Object>> {
    self.objects_where("WHERE ctgr = ?1", rusqlite::params![ctgr])
  }

  fn objects(&self) -> CoreResult<Vec<Object>> {
    self.objects_where("", rusqlite::params![])
  }
}

// ─── Writes ──────────────────────────────────────────────────────────────────

impl EntityWriter for Session<'_> {
  fn insert_subject(&self, s: &Subject) -> CoreResult<()> {
    self
      .conn
      .execute(
        "INSERT INTO subjects (dtgs, ctgr_b, dst, ctgr, etpr, ltpr)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
          s.dtgs,
          s.ctgr_b,
          s.dst,
          s.ctgr,
          encode_dt(s.etpr),
          encode_dt(s.ltpr),
        ],
      )
      .map_err(|e| insert_error(EntityKind::Subject, &s.dtgs, &s.ctgr_b, e))?;
    Ok(())
  }

  fn update_subject(&self, s: &Subject) -> CoreResult<()> {
    self.execute_one(
      "UPDATE subjects SET dst = ?2, ctgr = ?3, ltpr = ?4 WHERE dtgs = ?1",
      rusqlite::params![s.dtgs, s.dst, s.ctgr, encode_dt(s.ltpr)],
      EntityKind::Subject,
      &s.dtgs,
    )
  }

  fn delete_subject(&self, dtgs: &str) -> CoreResult<()> {
    self.execute_one(
      "DELETE FROM subjects WHERE dtgs = ?1",
      rusqlite::params![dtgs],
      EntityKind::Subject,
      dtgs,
    )
  }

  fn insert_object(&self, o: &Object) -> CoreResult<()> {
    self
      .conn
      .execute(
        "INSERT INTO objects (dtgs, ctgr_b, dst, ctgr, etpr, ltpr)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
          o.dtgs,
          o.ctgr_b,
          o.dst,
          o.ctgr,
          encode_dt(o.etpr),
          encode_dt(o.ltpr),
        ],
      )
      .map_err(|e| insert_error(EntityKind::Object, &o.dtgs, &o.ctgr_b, e))?;
    Ok(())
  }

  fn update_object(&self, o: &Object) -> CoreResult<()> {
    self.execute_one(
      "UPDATE objects SET dst = ?2, ctgr = ?3, ctgr_b = ?4, ltpr = ?5
       WHERE dtgs = ?1",
      rusqlite::params![o.dtgs, o.dst, o.ctgr, o.ctgr_b, encode_dt(o.ltpr)],
      EntityKind::Object,
      &o.dtgs,
    )
  }

  fn delete_object(&self, dtgs: &str) -> CoreResult<()> {
    self.execute_one(
      "DELETE FROM objects WHERE dtgs = ?1",
      rusqlite::params![dtgs],
      EntityKind::Object,
      dtgs,
    )
  }
}
