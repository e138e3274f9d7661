//! The `CatalogStore` trait.
//!
//! Implemented by storage backends (e.g. `gameshelf-store-sqlite`). The server
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::game::{GamePatch, GameRecord, NewGame};

/// Upper bound on the number of records a single [`CatalogStore::list`] call
/// returns, whatever `limit` the caller asks for.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Abstraction over a catalog backend.
///
/// Operations addressing a record by id return `Ok(None)` when no such record
/// exists; an `Err` always means the backend itself failed.
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a new record. The store assigns `id` and `created_at`.
  fn create(
    &self,
    input: NewGame,
  ) -> impl Future<Output = Result<GameRecord, Self::Error>> + Send + '_;

  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<GameRecord>, Self::Error>> + Send + '_;

  /// Records in insertion order, skipping `skip` and returning at most
  /// `min(limit, MAX_PAGE_SIZE)`.
  fn list(
    &self,
    skip: u32,
    limit: u32,
  ) -> impl Future<Output = Result<Vec<GameRecord>, Self::Error>> + Send + '_;

  /// Apply the fields present in `patch` and return the updated record.
  fn update(
    &self,
    id: i64,
    patch: GamePatch,
  ) -> impl Future<Output = Result<Option<GameRecord>, Self::Error>> + Send + '_;

  /// Remove a record permanently, returning it as it was before deletion.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<GameRecord>, Self::Error>> + Send + '_;
}
