//! Service-level endpoints: root banner, liveness, and route listing.

use axum::Json;
use serde_json::{Value, json};

use crate::ROUTES;

/// `GET /`
pub async fn root() -> Json<Value> { Json(json!({ "message": "gameshelf catalog API" })) }

/// `GET /health`
pub async fn health() -> Json<Value> { Json(json!({ "status": "healthy" })) }

/// `GET /debug` — every registered path and its methods.
pub async fn debug() -> Json<Value> {
  let routes: Vec<Value> = ROUTES
    .iter()
    .map(|(path, methods)| json!({ "path": path, "methods": methods }))
    .collect();
  Json(json!({ "available_routes": routes }))
}
