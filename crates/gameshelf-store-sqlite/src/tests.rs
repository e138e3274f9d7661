//! Integration tests for `SqliteStore` against an in-memory database.

use gameshelf_core::{
  game::{GamePatch, NewGame},
  store::{CatalogStore, MAX_PAGE_SIZE},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn chrono_trigger() -> NewGame {
  let mut game = NewGame::new("Chrono Trigger", "SNES");
  game.genre = Some("RPG".into());
  game.publisher = Some("Square".into());
  game.region = Some("NTSC-U".into());
  game.release_year = Some(1995);
  game
}

async fn seed(s: &SqliteStore, n: usize) -> Vec<i64> {
  let mut ids = Vec::with_capacity(n);
  for i in 0..n {
    let game = s.create(NewGame::new(format!("Game {i}"), "PC")).await.unwrap();
    ids.push(game.id);
  }
  ids
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_roundtrip() {
  let s = store().await;

  let created = s.create(chrono_trigger()).await.unwrap();
  assert_eq!(created.id, 1);
  assert_eq!(created.price, None);
  assert!(!created.opened);

  let fetched = s.get(created.id).await.unwrap().expect("record exists");
  assert_eq!(fetched, created);
  assert_eq!(fetched.title, "Chrono Trigger");
  assert_eq!(fetched.platform, "SNES");
  assert_eq!(fetched.genre.as_deref(), Some("RPG"));
  assert_eq!(fetched.publisher.as_deref(), Some("Square"));
  assert_eq!(fetched.region.as_deref(), Some("NTSC-U"));
  assert_eq!(fetched.release_year, Some(1995));
}

#[tokio::test]
async fn create_keeps_supplied_price_and_opened() {
  let s = store().await;
  let mut input = chrono_trigger();
  input.price = Some(149.99);
  input.opened = true;

  let created = s.create(input).await.unwrap();
  let fetched = s.get(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.price, Some(149.99));
  assert!(fetched.opened);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn created_at_is_monotonic() {
  let s = store().await;
  seed(&s, 5).await;

  let all = s.list(0, 100).await.unwrap();
  assert!(all.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_returns_insertion_order() {
  let s = store().await;
  let ids = seed(&s, 4).await;

  let all = s.list(0, 100).await.unwrap();
  assert_eq!(all.iter().map(|g| g.id).collect::<Vec<_>>(), ids);
}

#[tokio::test]
async fn list_pages_are_slices_of_the_full_list() {
  let s = store().await;
  seed(&s, 7).await;
  let all = s.list(0, 100).await.unwrap();

  for (skip, limit) in [(0, 3), (2, 2), (5, 10), (7, 1), (10, 5)] {
    let page = s.list(skip, limit).await.unwrap();
    let start = (skip as usize).min(all.len());
    let end = (start + limit as usize).min(all.len());
    assert_eq!(page, all[start..end], "skip={skip} limit={limit}");
  }
}

#[tokio::test]
async fn list_limit_is_capped() {
  let s = store().await;
  seed(&s, MAX_PAGE_SIZE as usize + 5).await;

  let page = s.list(0, 1_000).await.unwrap();
  assert_eq!(page.len(), MAX_PAGE_SIZE as usize);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_changes_only_supplied_fields() {
  let s = store().await;
  let created = s.create(chrono_trigger()).await.unwrap();

  let patch = GamePatch { opened: Some(true), ..GamePatch::default() };
  let updated = s.update(created.id, patch).await.unwrap().unwrap();

  assert!(updated.opened);
  assert_eq!(updated.title, created.title);
  assert_eq!(updated.genre, created.genre);
  assert_eq!(updated.created_at, created.created_at);
  assert_eq!(s.get(created.id).await.unwrap().unwrap(), updated);
}

#[tokio::test]
async fn update_with_null_clears_optional_field() {
  let s = store().await;
  let created = s.create(chrono_trigger()).await.unwrap();

  let patch = GamePatch { genre: Some(None), ..GamePatch::default() };
  let updated = s.update(created.id, patch).await.unwrap().unwrap();

  assert_eq!(updated.genre, None);
  assert_eq!(updated.publisher, created.publisher);
}

#[tokio::test]
async fn empty_update_leaves_record_unchanged() {
  let s = store().await;
  let created = s.create(chrono_trigger()).await.unwrap();

  let updated = s.update(created.id, GamePatch::default()).await.unwrap();
  assert_eq!(updated, Some(created));
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = store().await;
  assert!(s.update(9, GamePatch::price(10.0)).await.unwrap().is_none());
  assert!(s.update(9, GamePatch::default()).await.unwrap().is_none());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_returns_record_and_removes_it() {
  let s = store().await;
  let created = s.create(chrono_trigger()).await.unwrap();

  let deleted = s.delete(created.id).await.unwrap();
  assert_eq!(deleted, Some(created.clone()));
  assert!(s.get(created.id).await.unwrap().is_none());
  assert!(s.delete(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
  let s = store().await;
  let ids = seed(&s, 3).await;
  s.delete(ids[2]).await.unwrap();

  let next = s.create(NewGame::new("Earthbound", "SNES")).await.unwrap();
  assert!(next.id > ids[2]);
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn records_survive_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("catalog.db");

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create(chrono_trigger()).await.unwrap().id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let fetched = s.get(id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "Chrono Trigger");
}
