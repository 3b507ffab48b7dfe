//! Handlers for `/obj` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/obj/` | Tags of all objects |
//! | `POST`   | `/obj/` | Body: [`CreateBody`]; 400 if `ctgr_b` has no subject |
//! | `GET`    | `/obj/by-dtgs/{dtgs}` | Detail view with owning subject |
//! | `GET`    | `/obj/by-ctgr/?ctgr=` | Tags of objects in a category |
//! | `PUT`    | `/obj/{dtgs}` | Body: [`UpdateBody`] |
//! | `DELETE` | `/obj/{dtgs}` | |

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use duo_core::{
  Registry,
  object::{NewObject, ObjectUpdate},
  store::EntityStore,
  view::{Deletion, ObjectBrief, ObjectDetail},
};
use serde::Deserialize;

use crate::{
  CategoryParams,
  error::ApiError,
  extract::{Json, Query},
};

/// `GET /obj/`
pub async fn list<S>(
  State(registry): State<Arc<Registry<S>>>,
) -> Result<Json<Vec<ObjectBrief>>, ApiError>
where
  S: EntityStore + 'static,
{
  Ok(Json(registry.list_objects().await?))
}

/// `GET /obj/by-ctgr/?ctgr=<ctgr>`
pub async fn by_category<S>(
  State(registry): State<Arc<Registry<S>>>,
  Query(params): Query<CategoryParams>,
) -> Result<Json<Vec<ObjectBrief>>, ApiError>
where
  S: EntityStore + 'static,
{
  Ok(Json(registry.objects_by_category(&params.ctgr).await?))
}

/// `GET /obj/by-dtgs/{dtgs}`
pub async fn get_one<S>(
  State(registry): State<Arc<Registry<S>>>,
  Path(dtgs): Path<String>,
) -> Result<Json<ObjectDetail>, ApiError>
where
  S: EntityStore + 'static,
{
  Ok(Json(registry.object(&dtgs).await?))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub dtgs:   String,
  pub ctgr_b: String,
  pub dst:    Option<String>,
  pub ctgr:   Option<String>,
}

impl From<CreateBody> for NewObject {
  fn from(b: CreateBody) -> Self {
    NewObject {
      dtgs:   b.dtgs,
      ctgr_b: b.ctgr_b,
      dst:    b.dst,
      ctgr:   b.ctgr,
    }
  }
}

/// `POST /obj/`: returns 201 + the object's detail view.
pub async fn create<S>(
  State(registry): State<Arc<Registry<S>>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EntityStore + 'static,
{
  let detail = registry.create_object(NewObject::from(body)).await?;
  Ok((StatusCode::CREATED, Json(detail)))
}

/// JSON body accepted by `PUT /obj/{dtgs}`.
///
/// Omitted `dst`/`ctgr` are cleared; an omitted `ctgr_b` keeps the current
/// binding.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBody {
  pub dst:    Option<String>,
  pub ctgr:   Option<String>,
  pub ctgr_b: Option<String>,
}

impl From<UpdateBody> for ObjectUpdate {
  fn from(b: UpdateBody) -> Self {
    ObjectUpdate { dst: b.dst, ctgr: b.ctgr, ctgr_b: b.ctgr_b }
  }
}

/// `PUT /obj/{dtgs}`
pub async fn update<S>(
  State(registry): State<Arc<Registry<S>>>,
  Path(dtgs): Path<String>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<ObjectDetail>, ApiError>
where
  S: EntityStore + 'static,
{
  Ok(Json(registry.update_object(&dtgs, body.into()).await?))
}

/// `DELETE /obj/{dtgs}`
pub async fn delete<S>(
  State(registry): State<Arc<Registry<S>>>,
  Path(dtgs): Path<String>,
) -> Result<Json<Deletion>, ApiError>
where
  S: EntityStore + 'static,
{
  Ok(Json(registry.delete_object(&dtgs).await?))
}
