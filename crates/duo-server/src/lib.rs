//! HTTP server wiring for duo.
//!
//! Holds the runtime configuration and assembles the full application router
//! around [`duo_api::api_router`]. The binary in `main.rs` only parses flags,
//! opens the store and binds a listener.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use duo_core::{Registry, store::EntityStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `DUO_*` environment variables. Every key is optional.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_owned(),
      port:       8000,
      store_path: PathBuf::from("duo.sqlite3"),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router: the JSON API plus request tracing.
pub fn router<S>(registry: Arc<Registry<S>>) -> Router
where
  S: EntityStore + 'static,
{
  duo_api::api_router(registry).layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
