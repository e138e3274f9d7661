//! Admin authentication: credential check, session token issuance and
//! validation, and the [`AdminSession`] extractor guarding admin routes.
//!
//! Sessions are stateless HS256 JWTs. Nothing is stored server-side, so a
//! token stays valid until it expires; there is no revocation.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use chrono::{DateTime, TimeDelta, Utc};
use gameshelf_core::store::CatalogStore;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AppState, ServerConfig, error::ApiError};

// ─── Configuration ───────────────────────────────────────────────────────────

/// The single admin principal and the token signing secret. Loaded once at
/// startup and never modified.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// Shown as `name` in login and `/admin/me` responses.
  pub display_name:  String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub secret:        String,
  pub token_ttl:     TimeDelta,
}

impl From<&ServerConfig> for AuthConfig {
  fn from(config: &ServerConfig) -> Self {
    Self {
      username:      config.admin_username.clone(),
      display_name:  config.admin_display_name.clone(),
      password_hash: config.admin_password_hash.clone(),
      secret:        config.jwt_secret.clone(),
      token_ttl:     TimeDelta::hours(i64::from(config.token_ttl_hours)),
    }
  }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AuthError {
  /// Wrong username or wrong password; deliberately not distinguished.
  #[error("invalid admin credentials")]
  Unauthorized,

  /// Bad signature, malformed, or expired.
  #[error("invalid token")]
  InvalidToken,

  /// Well-signed token for someone other than the admin.
  #[error("admin access required")]
  Forbidden,

  #[error("failed to sign token: {0}")]
  Signing(#[source] jsonwebtoken::errors::Error),

  #[error("invalid auth configuration: {0}")]
  Config(String),
}

// ─── Tokens ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
  sub: String,
  iat: i64,
  exp: i64,
}

/// A freshly issued session credential.
#[derive(Debug, Clone, Serialize)]
pub struct SessionToken {
  pub access_token: String,
  pub token_type:   &'static str,
  pub expires_at:   DateTime<Utc>,
}

/// The subject carried by a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
  pub username: String,
}

// ─── Service ─────────────────────────────────────────────────────────────────

pub struct AuthService {
  config:     AuthConfig,
  encoding:   EncodingKey,
  decoding:   DecodingKey,
  validation: Validation,
}

impl AuthService {
  pub fn new(config: AuthConfig) -> Result<Self, AuthError> {
    if config.secret.is_empty() {
      return Err(AuthError::Config("token secret must not be empty".into()));
    }
    PasswordHash::new(&config.password_hash)
      .map_err(|e| AuthError::Config(format!("admin password hash: {e}")))?;
    if config.token_ttl <= TimeDelta::zero()
      || Utc::now().checked_add_signed(config.token_ttl).is_none()
    {
      return Err(AuthError::Config("token lifetime out of range".into()));
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    Ok(Self {
      encoding: EncodingKey::from_secret(config.secret.as_bytes()),
      decoding: DecodingKey::from_secret(config.secret.as_bytes()),
      validation,
      config,
    })
  }

  pub fn username(&self) -> &str { &self.config.username }

  pub fn display_name(&self) -> &str { &self.config.display_name }

  /// Check the admin credentials and issue a session token.
  pub fn authenticate(
    &self,
    username: &str,
    password: &str,
  ) -> Result<SessionToken, AuthError> {
    // Hash on every attempt so a wrong username costs as much as a wrong
    // password.
    let password_ok = self.verify_password(password);
    if username != self.config.username || !password_ok {
      return Err(AuthError::Unauthorized);
    }
    self.issue(&self.config.username, Utc::now())
  }

  /// Sign a token for `subject`, valid for the configured lifetime from
  /// `issued_at`.
  pub fn issue(
    &self,
    subject: &str,
    issued_at: DateTime<Utc>,
  ) -> Result<SessionToken, AuthError> {
    let expires_at = issued_at
      .checked_add_signed(self.config.token_ttl)
      .ok_or_else(|| AuthError::Config("token lifetime out of range".into()))?;
    let claims = Claims {
      sub: subject.to_owned(),
      iat: issued_at.timestamp(),
      exp: expires_at.timestamp(),
    };
    let access_token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
      .map_err(AuthError::Signing)?;
    Ok(SessionToken { access_token, token_type: "bearer", expires_at })
  }

  /// Verify signature and expiry, then require the admin subject.
  pub fn validate(&self, token: &str) -> Result<Identity, AuthError> {
    let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
      .map_err(|_| AuthError::InvalidToken)?;
    if data.claims.sub != self.config.username {
      return Err(AuthError::Forbidden);
    }
    Ok(Identity { username: data.claims.sub })
  }

  fn verify_password(&self, password: &str) -> bool {
    // Parsed once already in `new`, so this cannot fail in practice.
    let Ok(parsed) = PasswordHash::new(&self.config.password_hash) else {
      return false;
    };
    Argon2::default()
      .verify_password(password.as_bytes(), &parsed)
      .is_ok()
  }
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// Present in a handler's arguments means the request carried a valid admin
/// token. Runs before any body extractor, so rejected requests never reach
/// the store.
pub struct AdminSession(pub Identity);

/// The token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
  let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
  let (scheme, token) = value.split_once(' ')?;
  let token = token.trim();
  (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<AppState<S>> for AdminSession
where
  S: CatalogStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = bearer_token(&parts.headers)
      .ok_or_else(|| ApiError::Unauthorized("Not authenticated".into()))?;
    let identity = state.auth.validate(token)?;
    Ok(AdminSession(identity))
  }
}
