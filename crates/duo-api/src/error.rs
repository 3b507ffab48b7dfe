//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] duo_core::Error),

  /// The request body was missing, malformed, or of the wrong shape.
  #[error("{}", .0.body_text())]
  Body(#[from] JsonRejection),

  /// The query string could not be deserialised.
  #[error("{}", .0.body_text())]
  Query(#[from] QueryRejection),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    use duo_core::Error as E;
    match self {
      Self::Core(E::NotFound { .. }) => StatusCode::NOT_FOUND,
      Self::Core(
        E::DuplicateTag { .. }
        | E::DuplicateBindingCategory(_)
        | E::DanglingReference(_)
        | E::NoChange { .. }
        | E::HasDependents { .. },
      ) => StatusCode::BAD_REQUEST,
      Self::Core(E::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
      Self::Body(r) => r.status(),
      Self::Query(r) => r.status(),
    }
  }

  pub fn code(&self) -> &'static str {
    match self {
      Self::Core(e) => e.code(),
      Self::Body(_) => "invalid_body",
      Self::Query(_) => "invalid_query",
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    let body = json!({
      "error": { "code": self.code(), "message": self.to_string() }
    });
    (status, Json(body)).into_response()
  }
}
