//! JSON REST API for duo.
//!
//! Exposes an axum [`Router`] backed by a [`Registry`] over any
//! [`EntityStore`]. TLS and other transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(duo_api::api_router(registry.clone()))
//! ```

pub mod error;
pub mod extract;
pub mod objects;
pub mod subjects;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{get, put},
};
use duo_core::{Registry, store::EntityStore};
use serde::Deserialize;
use serde_json::{Value, json};

pub use error::ApiError;

/// Query string of the `by-ctgr` listings.
#[derive(Debug, Deserialize)]
pub struct CategoryParams {
  pub ctgr: String,
}

/// `GET /`: readiness probe.
async fn root() -> Json<Value> {
  Json(json!({ "message": "duo entity API ready" }))
}

/// Build a fully-materialised API router for `registry`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(registry: Arc<Registry<S>>) -> Router<()>
where
  S: EntityStore + 'static,
{
  Router::new()
    .route("/", get(root))
    // Subjects
    .route("/sbj/", get(subjects::list::<S>).post(subjects::create::<S>))
    .route("/sbj/by-dtgs/{dtgs}", get(subjects::get_one::<S>))
    .route("/sbj/by-ctgr/", get(subjects::by_category::<S>))
    .route("/sbj/{dtgs}", put(subjects::update::<S>).delete(subjects::delete::<S>))
    // Objects
    .route("/obj/", get(objects::list::<S>).post(objects::create::<S>))
    .route("/obj/by-dtgs/{dtgs}", get(objects::get_one::<S>))
    .route("/obj/by-ctgr/", get(objects::by_category::<S>))
    .route("/obj/{dtgs}", put(objects::update::<S>).delete(objects::delete::<S>))
    .with_state(registry)
}
