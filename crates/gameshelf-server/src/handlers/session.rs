//! Handlers for admin login and session introspection.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/login` | Body: `{"username":"...","password":"..."}` |
//! | `GET`  | `/admin/me` | Requires a bearer token |

use axum::extract::State;
use gameshelf_core::store::CatalogStore;
use serde::{Deserialize, Serialize};

use crate::{
  AppState,
  auth::{AdminSession, SessionToken},
  error::ApiError,
  extract::Json,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
  pub username: String,
  pub password: String,
}

/// Public profile of the admin principal.
#[derive(Debug, Serialize)]
pub struct AdminProfile {
  pub username: String,
  pub name:     String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  #[serde(flatten)]
  pub token: SessionToken,
  pub user:  AdminProfile,
}

fn profile<S: CatalogStore>(state: &AppState<S>) -> AdminProfile {
  AdminProfile {
    username: state.auth.username().to_owned(),
    name:     state.auth.display_name().to_owned(),
  }
}

/// `POST /login`
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  let token = state
    .auth
    .authenticate(&body.username, &body.password)
    .inspect_err(|_| tracing::warn!(username = %body.username, "rejected admin login"))?;

  tracing::info!(username = %body.username, expires_at = %token.expires_at, "admin logged in");
  Ok(Json(LoginResponse { token, user: profile(&state) }))
}

/// `GET /admin/me`
pub async fn me<S>(
  AdminSession(_identity): AdminSession,
  State(state): State<AppState<S>>,
) -> Json<AdminProfile>
where
  S: CatalogStore + Clone + 'static,
{
  Json(profile(&state))
}
