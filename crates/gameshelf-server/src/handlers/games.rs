//! Handlers for the game catalog.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/games` | `?skip=<n>&limit=<n>`; limit capped at 100 |
//! | `GET`  | `/games/{id}` | 404 if not found |
//! | `POST` | `/admin/games` | Body: [`NewGame`]; returns 201 + stored game |
//! | `PUT`/`PATCH` | `/admin/games/{id}` | Body: [`GamePatch`] |
//! | `DELETE` | `/admin/games/{id}` | Returns a confirmation message |
//! | `POST` | `/admin/games/refresh-prices` | Re-runs price lookup for every game |

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use gameshelf_core::{
  game::{GamePatch, GameRecord, NewGame},
  store::{CatalogStore, MAX_PAGE_SIZE},
};
use serde::{Deserialize, Serialize};

use crate::{
  AppState,
  auth::AdminSession,
  error::ApiError,
  extract::{Json, Path, Query},
};

// ─── Response shape ───────────────────────────────────────────────────────────

/// A game as presented to clients. Field order is part of the API contract:
/// front-ends render columns in exactly this order.
#[derive(Debug, Serialize)]
pub struct GameResponse {
  pub title:        String,
  pub platform:     String,
  pub genre:        Option<String>,
  pub release_year: Option<i32>,
  pub price:        Option<f64>,
  pub region:       Option<String>,
  pub publisher:    Option<String>,
  pub opened:       bool,
  pub id:           i64,
  pub created_at:   DateTime<Utc>,
}

impl From<GameRecord> for GameResponse {
  fn from(g: GameRecord) -> Self {
    Self {
      title:        g.title,
      platform:     g.platform,
      genre:        g.genre,
      release_year: g.release_year,
      price:        g.price,
      region:       g.region,
      publisher:    g.publisher,
      opened:       g.opened,
      id:           g.id,
      created_at:   g.created_at,
    }
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(default)]
  pub skip:  u32,
  #[serde(default = "default_limit")]
  pub limit: u32,
}

fn default_limit() -> u32 { MAX_PAGE_SIZE }

/// `GET /games[?skip=<n>][&limit=<n>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<GameResponse>>, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  let games = state
    .store
    .list(params.skip, params.limit)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(games.into_iter().map(GameResponse::from).collect()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /games/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<GameResponse>, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  let game = state
    .store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::game_not_found(id))?;
  Ok(Json(game.into()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /admin/games` — returns 201 + the stored game.
///
/// A caller-supplied `price` is kept as is; otherwise the market price is
/// looked up, and a failed lookup simply leaves `price` empty.
pub async fn create<S>(
  AdminSession(admin): AdminSession,
  State(state): State<AppState<S>>,
  Json(mut body): Json<NewGame>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  body.validate()?;

  if body.price.is_none()
    && let Some(prices) = &state.prices
  {
    body.price = prices.lookup(&body.title, &body.platform).await;
  }

  let game = state.store.create(body).await.map_err(ApiError::store)?;
  tracing::info!(admin = %admin.username, id = game.id, title = %game.title, "created game");
  Ok((StatusCode::CREATED, Json(GameResponse::from(game))))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT|PATCH /admin/games/{id}` — only the fields present in the body change.
pub async fn update<S>(
  AdminSession(admin): AdminSession,
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(patch): Json<GamePatch>,
) -> Result<Json<GameResponse>, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  patch.validate()?;

  let game = state
    .store
    .update(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::game_not_found(id))?;
  tracing::info!(admin = %admin.username, id, "updated game");
  Ok(Json(game.into()))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
  pub message: String,
  pub game:    GameResponse,
}

/// `DELETE /admin/games/{id}`
pub async fn delete<S>(
  AdminSession(admin): AdminSession,
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  let game = state
    .store
    .delete(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::game_not_found(id))?;
  tracing::info!(admin = %admin.username, id, title = %game.title, "deleted game");

  Ok(Json(DeleteResponse {
    message: format!("Game '{}' deleted successfully", game.title),
    game:    game.into(),
  }))
}

// ─── Refresh prices ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RefreshSummary {
  /// Games a lookup was attempted for.
  pub checked: usize,
  /// Games whose price was overwritten with a fresh one.
  pub updated: usize,
}

/// `POST /admin/games/refresh-prices`
///
/// Games for which no non-zero price is found keep their previous price.
pub async fn refresh_prices<S>(
  AdminSession(admin): AdminSession,
  State(state): State<AppState<S>>,
) -> Result<Json<RefreshSummary>, ApiError>
where
  S: CatalogStore + Clone + 'static,
{
  let prices = state
    .prices
    .as_ref()
    .ok_or_else(|| ApiError::Unavailable("price lookup is disabled".into()))?;

  let mut summary = RefreshSummary { checked: 0, updated: 0 };
  let mut skip = 0;
  loop {
    let page = state
      .store
      .list(skip, MAX_PAGE_SIZE)
      .await
      .map_err(ApiError::store)?;
    let fetched = page.len() as u32;

    for game in page {
      summary.checked += 1;
      // A zero listing is treated as no price at all.
      let Some(price) = prices
        .lookup(&game.title, &game.platform)
        .await
        .filter(|price| *price > 0.0)
      else {
        continue;
      };
      let updated = state
        .store
        .update(game.id, GamePatch::price(price))
        .await
        .map_err(ApiError::store)?;
      if updated.is_some() {
        summary.updated += 1;
      }
    }

    if fetched < MAX_PAGE_SIZE {
      break;
    }
    skip += fetched;
  }

  tracing::info!(
    admin = %admin.username,
    checked = summary.checked,
    updated = summary.updated,
    "refreshed game prices"
  );
  Ok(Json(summary))
}
