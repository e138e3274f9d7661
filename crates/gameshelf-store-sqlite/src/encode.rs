//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microsecond
//! precision, `Z` suffix) so that lexical order equals chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use gameshelf_core::game::{GamePatch, GameRecord};
use rusqlite::{Row, types::Value};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Column list matching [`RawGame::from_row`].
pub const GAME_COLUMNS: &str = "id, title, platform, genre, publisher, region, \
                                release_year, price, opened, created_at";

/// A `games` row before timestamp decoding.
pub struct RawGame {
  pub id:           i64,
  pub title:        String,
  pub platform:     String,
  pub genre:        Option<String>,
  pub publisher:    Option<String>,
  pub region:       Option<String>,
  pub release_year: Option<i32>,
  pub price:        Option<f64>,
  pub opened:       bool,
  pub created_at:   String,
}

impl RawGame {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      title:        row.get(1)?,
      platform:     row.get(2)?,
      genre:        row.get(3)?,
      publisher:    row.get(4)?,
      region:       row.get(5)?,
      release_year: row.get(6)?,
      price:        row.get(7)?,
      opened:       row.get(8)?,
      created_at:   row.get(9)?,
    })
  }

  pub fn into_record(self) -> Result<GameRecord> {
    Ok(GameRecord {
      id:           self.id,
      title:        self.title,
      platform:     self.platform,
      genre:        self.genre,
      publisher:    self.publisher,
      region:       self.region,
      release_year: self.release_year,
      price:        self.price,
      opened:       self.opened,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

// ─── GamePatch ───────────────────────────────────────────────────────────────

/// The `column = value` pairs an `UPDATE` must set for `patch`, in column
/// order. Fields absent from the patch produce no pair.
pub fn patch_assignments(patch: GamePatch) -> Vec<(&'static str, Value)> {
  let GamePatch {
    title,
    platform,
    genre,
    publisher,
    region,
    release_year,
    price,
    opened,
  } = patch;

  let mut sets = Vec::new();
  if let Some(v) = title {
    sets.push(("title", Value::from(v)));
  }
  if let Some(v) = platform {
    sets.push(("platform", Value::from(v)));
  }
  if let Some(v) = genre {
    sets.push(("genre", Value::from(v)));
  }
  if let Some(v) = publisher {
    sets.push(("publisher", Value::from(v)));
  }
  if let Some(v) = region {
    sets.push(("region", Value::from(v)));
  }
  if let Some(v) = release_year {
    sets.push(("release_year", Value::from(v)));
  }
  if let Some(v) = price {
    sets.push(("price", Value::from(v)));
  }
  if let Some(v) = opened {
    sets.push(("opened", Value::from(v)));
  }
  sets
}
