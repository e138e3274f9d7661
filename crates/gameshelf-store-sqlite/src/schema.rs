//! SQL schema for the gameshelf SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps SQLite from handing out the id of a deleted row again.
CREATE TABLE IF NOT EXISTS games (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    title         TEXT    NOT NULL,
    platform      TEXT    NOT NULL,
    genre         TEXT,
    publisher     TEXT,
    region        TEXT,
    release_year  INTEGER,
    price         REAL,
    opened        INTEGER NOT NULL DEFAULT 0,
    created_at    TEXT    NOT NULL   -- RFC 3339 UTC, fixed width; server-assigned
);

CREATE INDEX IF NOT EXISTS games_created_idx ON games(created_at);

PRAGMA user_version = 1;
";
