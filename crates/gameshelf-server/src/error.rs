//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  Validation(String),

  #[error("{0}")]
  Unauthorized(String),

  #[error("{0}")]
  Forbidden(String),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Unavailable(String),

  /// The request could not be extracted (malformed JSON, wrong types, bad
  /// path or query parameters). Keeps axum's status code.
  #[error("{1}")]
  Malformed(StatusCode, String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("internal error: {0}")]
  Internal(String),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    ApiError::Store(Box::new(e))
  }

  pub fn game_not_found(id: i64) -> Self {
    ApiError::NotFound(format!("game {id} not found"))
  }
}

impl From<AuthError> for ApiError {
  fn from(e: AuthError) -> Self {
    match e {
      AuthError::Unauthorized => ApiError::Unauthorized("Invalid admin credentials".into()),
      AuthError::InvalidToken => ApiError::Unauthorized("Invalid token".into()),
      AuthError::Forbidden => ApiError::Forbidden("Admin access required".into()),
      other => ApiError::Internal(other.to_string()),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { ApiError::Malformed(r.status(), r.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { ApiError::Malformed(r.status(), r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { ApiError::Malformed(r.status(), r.body_text()) }
}

impl From<gameshelf_core::Error> for ApiError {
  fn from(e: gameshelf_core::Error) -> Self { ApiError::Validation(e.to_string()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::Validation(m) => (StatusCode::UNPROCESSABLE_ENTITY, m),
      ApiError::Unauthorized(m) => {
        let mut res =
          (StatusCode::UNAUTHORIZED, Json(json!({ "error": m }))).into_response();
        res
          .headers_mut()
          .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        return res;
      }
      ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, m),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
      ApiError::Unavailable(m) => (StatusCode::SERVICE_UNAVAILABLE, m),
      ApiError::Malformed(status, m) => (status, m),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".into())
      }
      ApiError::Internal(m) => {
        tracing::error!(error = %m, "internal failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".into())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

/// Failure to assemble [`crate::AppState`] from configuration.
#[derive(Debug, Error)]
pub enum StartupError {
  #[error(transparent)]
  Auth(#[from] AuthError),

  #[error("price lookup: {0}")]
  Pricing(#[from] gameshelf_pricing::Error),
}
