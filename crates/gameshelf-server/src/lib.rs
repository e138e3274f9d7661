//! HTTP API for the gameshelf catalog.
//!
//! Exposes an axum [`Router`] backed by any [`CatalogStore`]. Reads are
//! public; writes require an admin session token (see [`auth`]).

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;

pub use error::{ApiError, StartupError};

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{
  Router,
  http::HeaderValue,
  routing::{get, post, put},
};
use gameshelf_core::store::CatalogStore;
use gameshelf_pricing::PriceLookup;
use serde::Deserialize;
use tower_http::{
  cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
  trace::TraceLayer,
};

use auth::{AuthConfig, AuthService};
use handlers::{games, meta, session};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `GAMESHELF_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "defaults::host")]
  pub host:                      String,
  #[serde(default = "defaults::port")]
  pub port:                      u16,
  #[serde(default = "defaults::database_path")]
  pub database_path:             PathBuf,
  #[serde(default = "defaults::admin_username")]
  pub admin_username:            String,
  #[serde(default = "defaults::admin_display_name")]
  pub admin_display_name:        String,
  /// argon2 PHC string; generate with `gameshelf-server --hash-password`.
  pub admin_password_hash:       String,
  pub jwt_secret:                String,
  #[serde(default = "defaults::token_ttl_hours")]
  pub token_ttl_hours:           u32,
  #[serde(default = "defaults::cors_origins")]
  pub cors_origins:              Vec<String>,
  #[serde(default = "defaults::price_lookup_enabled")]
  pub price_lookup_enabled:      bool,
  #[serde(default = "defaults::price_lookup_url")]
  pub price_lookup_url:          String,
  #[serde(default = "defaults::price_lookup_timeout_secs")]
  pub price_lookup_timeout_secs: u64,
}

mod defaults {
  use std::path::PathBuf;

  pub fn host() -> String { "127.0.0.1".into() }
  pub fn port() -> u16 { 8000 }
  pub fn database_path() -> PathBuf { PathBuf::from("gameshelf.db") }
  pub fn admin_username() -> String { "admin".into() }
  pub fn admin_display_name() -> String { "Administrator".into() }
  pub fn token_ttl_hours() -> u32 { 24 }
  pub fn cors_origins() -> Vec<String> { vec!["http://localhost:3000".into()] }
  pub fn price_lookup_enabled() -> bool { true }
  pub fn price_lookup_url() -> String { gameshelf_pricing::DEFAULT_SEARCH_URL.into() }
  pub fn price_lookup_timeout_secs() -> u64 { 10 }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CatalogStore> {
  pub store:  Arc<S>,
  pub auth:   Arc<AuthService>,
  /// `None` when price lookup is disabled.
  pub prices: Option<Arc<PriceLookup>>,
  pub config: Arc<ServerConfig>,
}

impl<S: CatalogStore> AppState<S> {
  pub fn new(store: S, config: ServerConfig) -> Result<Self, StartupError> {
    let auth = AuthService::new(AuthConfig::from(&config))?;
    let prices = if config.price_lookup_enabled {
      let timeout = Duration::from_secs(config.price_lookup_timeout_secs);
      Some(Arc::new(PriceLookup::new(config.price_lookup_url.clone(), timeout)?))
    } else {
      None
    };

    Ok(Self {
      store: Arc::new(store),
      auth: Arc::new(auth),
      prices,
      config: Arc::new(config),
    })
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Every route served by [`router`], as reported by `GET /debug`.
pub const ROUTES: &[(&str, &[&str])] = &[
  ("/", &["GET"]),
  ("/health", &["GET"]),
  ("/debug", &["GET"]),
  ("/games", &["GET"]),
  ("/games/", &["GET"]),
  ("/games/{id}", &["GET"]),
  ("/login", &["POST"]),
  ("/admin/me", &["GET"]),
  ("/admin/games", &["POST"]),
  ("/admin/games/refresh-prices", &["POST"]),
  ("/admin/games/{id}", &["PUT", "PATCH", "DELETE"]),
];

/// Build the API router.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CatalogStore + Clone + 'static,
{
  let cors = cors_layer(&state.config.cors_origins);

  Router::new()
    // Public
    .route("/",                           get(meta::root))
    .route("/health",                     get(meta::health))
    .route("/debug",                      get(meta::debug))
    .route("/games",                      get(games::list::<S>))
    .route("/games/",                     get(games::list::<S>))
    .route("/games/{id}",                 get(games::get_one::<S>))
    .route("/login",                      post(session::login::<S>))
    // Admin
    .route("/admin/me",                   get(session::me::<S>))
    .route("/admin/games",                post(games::create::<S>))
    .route("/admin/games/refresh-prices", post(games::refresh_prices::<S>))
    .route(
      "/admin/games/{id}",
      put(games::update::<S>)
        .patch(games::update::<S>)
        .delete(games::delete::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .layer(cors)
    .with_state(state)
}

/// CORS for the configured front-end origins, with credentials allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
  let origins = origins.iter().filter_map(|origin| {
    // A wildcard cannot be combined with credentials.
    if origin.trim() == "*" {
      tracing::warn!("ignoring wildcard CORS origin; list origins explicitly");
      return None;
    }
    match HeaderValue::from_str(origin) {
      Ok(value) => Some(value),
      Err(_) => {
        tracing::warn!(origin, "ignoring invalid CORS origin");
        None
      }
    }
  });

  CorsLayer::new()
    .allow_origin(AllowOrigin::list(origins))
    .allow_methods(AllowMethods::mirror_request())
    .allow_headers(AllowHeaders::mirror_request())
    .allow_credentials(true)
}
