//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use duo_core::{object::Object, subject::Subject};
use rusqlite::Row;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list shared by every `SELECT` over either table, in the order
/// [`RawRow::from_row`] expects.
pub const COLUMNS: &str = "dtgs, ctgr_b, dst, ctgr, etpr, ltpr";

/// Raw strings read directly from a `subjects` or `objects` row. Both tables
/// share one column layout.
pub struct RawRow {
  pub dtgs:   String,
  pub ctgr_b: String,
  pub dst:    Option<String>,
  pub ctgr:   Option<String>,
  pub etpr:   String,
  pub ltpr:   String,
}

impl RawRow {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      dtgs:   row.get(0)?,
      ctgr_b: row.get(1)?,
      dst:    row.get(2)?,
      ctgr:   row.get(3)?,
      etpr:   row.get(4)?,
      ltpr:   row.get(5)?,
    })
  }

  pub fn into_subject(self) -> Result<Subject> {
    Ok(Subject {
      etpr:   decode_dt(&self.etpr)?,
      ltpr:   decode_dt(&self.ltpr)?,
      dtgs:   self.dtgs,
      ctgr_b: self.ctgr_b,
      dst:    self.dst,
      ctgr:   self.ctgr,
    })
  }

  pub fn into_object(self) -> Result<Object> {
    Ok(Object {
      etpr:   decode_dt(&self.etpr)?,
      ltpr:   decode_dt(&self.ltpr)?,
      dtgs:   self.dtgs,
      ctgr_b: self.ctgr_b,
      dst:    self.dst,
      ctgr:   self.ctgr,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn timestamps_keep_sub_second_precision() {
    let now = Utc::now();
    assert_eq!(decode_dt(&encode_dt(now)).unwrap(), now);
  }

  #[test]
  fn garbage_timestamp_is_a_parse_error() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
