//! [`SqliteStore`], the SQLite implementation of [`EntityStore`].

use std::path::Path;

use duo_core::store::{EntityReader, EntityStore, EntityWriter};
use rusqlite::TransactionBehavior;
use tracing::debug;

use crate::{Error, Result, schema::SCHEMA, session::Session};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A duo entity store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    debug!("schema initialised");
    Ok(())
  }
}

// ─── EntityStore impl ────────────────────────────────────────────────────────

impl EntityStore for SqliteStore {
  async fn read<T, F>(&self, f: F) -> duo_core::Result<T>
  where
    F: FnOnce(&dyn EntityReader) -> duo_core::Result<T> + Send + 'static,
    T: Send + 'static,
  {
    self
      .conn
      .call(move |conn| Ok(f(&Session::new(conn))))
      .await
      .map_err(Error::from)?
  }

  async fn write<T, F>(&self, f: F) -> duo_core::Result<T>
  where
    F: FnOnce(&dyn EntityWriter) -> duo_core::Result<T> + Send + 'static,
    T: Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        // Rules read under the write lock; other connections wait for it.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let outcome = f(&Session::new(&tx));
        match &outcome {
          Ok(_) => tx.commit()?,
          Err(e) => {
            tx.rollback()?;
            debug!(code = e.code(), "transaction rolled back");
          }
        }
        Ok(outcome)
      })
      .await
      .map_err(Error::from)?
  }
}
