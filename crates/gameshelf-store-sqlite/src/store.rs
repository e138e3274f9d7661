//! [`SqliteStore`] — the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use chrono::Utc;
use gameshelf_core::{
  game::{GamePatch, GameRecord, NewGame},
  store::{CatalogStore, MAX_PAGE_SIZE},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{GAME_COLUMNS, RawGame, encode_dt, patch_assignments},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A game catalog backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection handle is reference-counted. Every
/// operation borrows the connection for exactly one closure on the database
/// thread; writes run inside a transaction that is rolled back if the closure
/// returns early with an error.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = crate::Error;

  async fn create(&self, input: NewGame) -> Result<GameRecord> {
    let now = encode_dt(Utc::now());

    let raw: RawGame = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // Never stamp a row earlier than its predecessor, even if the wall
        // clock stepped backwards.
        let latest: Option<String> =
          tx.query_row("SELECT MAX(created_at) FROM games", [], |r| r.get(0))?;
        let created_at = match latest {
          Some(latest) if latest > now => latest,
          _ => now,
        };

        tx.execute(
          "INSERT INTO games (
             title, platform, genre, publisher, region,
             release_year, price, opened, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            input.title,
            input.platform,
            input.genre,
            input.publisher,
            input.region,
            input.release_year,
            input.price,
            input.opened,
            created_at,
          ],
        )?;
        let id = tx.last_insert_rowid();

        let raw = tx.query_row(
          &format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1"),
          rusqlite::params![id],
          RawGame::from_row,
        )?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    let record = raw.into_record()?;
    tracing::debug!(id = record.id, title = %record.title, "inserted game");
    Ok(record)
  }

  async fn get(&self, id: i64) -> Result<Option<GameRecord>> {
    let raw: Option<RawGame> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1"),
            rusqlite::params![id],
            RawGame::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawGame::into_record).transpose()
  }

  async fn list(&self, skip: u32, limit: u32) -> Result<Vec<GameRecord>> {
    let limit = limit.min(MAX_PAGE_SIZE);

    let raws: Vec<RawGame> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {GAME_COLUMNS} FROM games ORDER BY id LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit, skip], RawGame::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawGame::into_record).collect()
  }

  async fn update(&self, id: i64, patch: GamePatch) -> Result<Option<GameRecord>> {
    let sets = patch_assignments(patch);

    let raw: Option<RawGame> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        if !sets.is_empty() {
          let assignments = sets
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{column} = ?{}", i + 2))
            .collect::<Vec<_>>()
            .join(", ");
          let sql = format!("UPDATE games SET {assignments} WHERE id = ?1");

          let values = std::iter::once(rusqlite::types::Value::Integer(id))
            .chain(sets.into_iter().map(|(_, value)| value));
          if tx.execute(&sql, rusqlite::params_from_iter(values))? == 0 {
            return Ok(None);
          }
        }

        let raw = tx
          .query_row(
            &format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1"),
            rusqlite::params![id],
            RawGame::from_row,
          )
          .optional()?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawGame::into_record).transpose()
  }

  async fn delete(&self, id: i64) -> Result<Option<GameRecord>> {
    let raw: Option<RawGame> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let raw = tx
          .query_row(
            &format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1"),
            rusqlite::params![id],
            RawGame::from_row,
          )
          .optional()?;
        if raw.is_some() {
          tx.execute("DELETE FROM games WHERE id = ?1", rusqlite::params![id])?;
        }
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawGame::into_record).transpose()
  }
}
