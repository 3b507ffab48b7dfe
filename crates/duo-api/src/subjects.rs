//! Handlers for `/sbj` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/sbj/` | All subjects with their object tags |
//! | `POST`   | `/sbj/` | Body: [`CreateBody`]; returns 201 + detail view |
//! | `GET`    | `/sbj/by-dtgs/{dtgs}` | 404 if not found |
//! | `GET`    | `/sbj/by-ctgr/?ctgr=` | Tags of subjects in a category |
//! | `PUT`    | `/sbj/{dtgs}` | Body: [`UpdateBody`]; 400 if nothing changes |
//! | `DELETE` | `/sbj/{dtgs}` | 400 while objects are bound to it |

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use duo_core::{
  Registry,
  store::EntityStore,
  subject::{NewSubject, SubjectUpdate},
  view::{Deletion, SubjectBrief, SubjectDetail, SubjectSummary},
};
use serde::Deserialize;

use crate::{
  CategoryParams,
  error::ApiError,
  extract::{Json, Query},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /sbj/`
pub async fn list<S>(
  State(registry): State<Arc<Registry<S>>>,
) -> Result<Json<Vec<SubjectSummary>>, ApiError>
where
  S: EntityStore + 'static,
{
  Ok(Json(registry.list_subjects().await?))
}

/// `GET /sbj/by-ctgr/?ctgr=<ctgr>`
pub async fn by_category<S>(
  State(registry): State<Arc<Registry<S>>>,
  Query(params): Query<CategoryParams>,
) -> Result<Json<Vec<SubjectBrief>>, ApiError>
where
  S: EntityStore + 'static,
{
  Ok(Json(registry.subjects_by_category(&params.ctgr).await?))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /sbj/by-dtgs/{dtgs}`
pub async fn get_one<S>(
  State(registry): State<Arc<Registry<S>>>,
  Path(dtgs): Path<String>,
) -> Result<Json<SubjectDetail>, ApiError>
where
  S: EntityStore + 'static,
{
  Ok(Json(registry.subject(&dtgs).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /sbj/`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub dtgs:   String,
  pub ctgr_b: String,
  pub dst:    Option<String>,
  pub ctgr:   Option<String>,
}

impl From<CreateBody> for NewSubject {
  fn from(b: CreateBody) -> Self {
    NewSubject {
      dtgs:   b.dtgs,
      ctgr_b: b.ctgr_b,
      dst:    b.dst,
      ctgr:   b.ctgr,
    }
  }
}

/// `POST /sbj/`: returns 201 + the subject's detail view.
pub async fn create<S>(
  State(registry): State<Arc<Registry<S>>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EntityStore + 'static,
{
  let detail = registry.create_subject(NewSubject::from(body)).await?;
  Ok((StatusCode::CREATED, Json(detail)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PUT /sbj/{dtgs}`. Omitted fields are cleared.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBody {
  pub dst:  Option<String>,
  pub ctgr: Option<String>,
}

impl From<UpdateBody> for SubjectUpdate {
  fn from(b: UpdateBody) -> Self { SubjectUpdate { dst: b.dst, ctgr: b.ctgr } }
}

/// `PUT /sbj/{dtgs}`
pub async fn update<S>(
  State(registry): State<Arc<Registry<S>>>,
  Path(dtgs): Path<String>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<SubjectDetail>, ApiError>
where
  S: EntityStore + 'static,
{
  Ok(Json(registry.update_subject(&dtgs, body.into()).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /sbj/{dtgs}`
pub async fn delete<S>(
  State(registry): State<Arc<Registry<S>>>,
  Path(dtgs): Path<String>,
) -> Result<Json<Deletion>, ApiError>
where
  S: EntityStore + 'static,
{
  Ok(Json(registry.delete_subject(&dtgs).await?))
}
