//! SQL schema for the duo SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
///
/// `objects.ctgr_b` carries no `REFERENCES` clause. It points at
/// `subjects.ctgr_b` by value and the link is checked by the integrity rules
/// at write time.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS subjects (
    dtgs    TEXT PRIMARY KEY,
    ctgr_b  TEXT NOT NULL UNIQUE,   -- binding category claimed by this subject
    dst     TEXT,
    ctgr    TEXT,
    etpr    TEXT NOT NULL,          -- ISO 8601 UTC; creation
    ltpr    TEXT NOT NULL           -- ISO 8601 UTC; last mutation
);

CREATE TABLE IF NOT EXISTS objects (
    dtgs    TEXT PRIMARY KEY,
    ctgr_b  TEXT NOT NULL,          -- equals some subjects.ctgr_b
    dst     TEXT,
    ctgr    TEXT,
    etpr    TEXT NOT NULL,
    ltpr    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS subjects_ctgr_idx   ON subjects(ctgr);
CREATE INDEX IF NOT EXISTS objects_ctgr_b_idx  ON objects(ctgr_b);
CREATE INDEX IF NOT EXISTS objects_ctgr_idx    ON objects(ctgr);

PRAGMA user_version = 1;
";
