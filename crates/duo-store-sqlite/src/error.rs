//! Error type for `duo-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl From<Error> for duo_core::Error {
  fn from(e: Error) -> Self { duo_core::Error::store(e) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
