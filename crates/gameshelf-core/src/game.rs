//! Game records — the single entity of the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

// ─── GameRecord ──────────────────────────────────────────────────────────────

/// A stored catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
  /// Store-assigned; never reused after deletion.
  pub id:           i64,
  pub title:        String,
  pub platform:     String,
  pub genre:        Option<String>,
  pub publisher:    Option<String>,
  pub region:       Option<String>,
  pub release_year: Option<i32>,
  pub price:        Option<f64>,
  /// Whether this physical copy has been opened.
  pub opened:       bool,
  /// Server-assigned insertion timestamp; never changes after creation.
  pub created_at:   DateTime<Utc>,
}

// ─── NewGame ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::CatalogStore::create`].
/// `id` and `created_at` are always set by the store.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewGame {
  pub title:        String,
  pub platform:     String,
  pub genre:        Option<String>,
  pub publisher:    Option<String>,
  pub region:       Option<String>,
  pub release_year: Option<i32>,
  pub price:        Option<f64>,
  #[serde(default)]
  pub opened:       bool,
}

impl NewGame {
  /// Convenience constructor with all optional fields unset.
  pub fn new(title: impl Into<String>, platform: impl Into<String>) -> Self {
    Self {
      title:        title.into(),
      platform:     platform.into(),
      genre:        None,
      publisher:    None,
      region:       None,
      release_year: None,
      price:        None,
      opened:       false,
    }
  }

  /// Reject values the store must never see.
  pub fn validate(&self) -> Result<()> {
    require_text("title", &self.title)?;
    require_text("platform", &self.platform)?;
    check_price(self.price)
  }
}

// ─── GamePatch ───────────────────────────────────────────────────────────────

/// A partial update. `None` means "leave untouched".
///
/// The nullable columns use `Option<Option<_>>`: an explicit JSON `null`
/// deserialises to `Some(None)` and clears the column, while an absent key
/// stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GamePatch {
  pub title:        Option<String>,
  pub platform:     Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub genre:        Option<Option<String>>,
  #[serde(default, deserialize_with = "present")]
  pub publisher:    Option<Option<String>>,
  #[serde(default, deserialize_with = "present")]
  pub region:       Option<Option<String>>,
  #[serde(default, deserialize_with = "present")]
  pub release_year: Option<Option<i32>>,
  #[serde(default, deserialize_with = "present")]
  pub price:        Option<Option<f64>>,
  pub opened:       Option<bool>,
}

impl GamePatch {
  /// A patch that only sets `price`.
  pub fn price(price: f64) -> Self {
    Self { price: Some(Some(price)), ..Self::default() }
  }

  pub fn is_empty(&self) -> bool { *self == Self::default() }

  pub fn validate(&self) -> Result<()> {
    if let Some(title) = &self.title {
      require_text("title", title)?;
    }
    if let Some(platform) = &self.platform {
      require_text("platform", platform)?;
    }
    check_price(self.price.flatten())
  }
}

/// Wraps whatever was present (including `null`) in `Some`.
fn present<'de, T, D>(de: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}

fn require_text(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::EmptyField { field });
  }
  Ok(())
}

fn check_price(price: Option<f64>) -> Result<()> {
  match price {
    Some(p) if !p.is_finite() || p < 0.0 => Err(Error::InvalidPrice),
    _ => Ok(()),
  }
}
