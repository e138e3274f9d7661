//! Core types and trait definitions for the gameshelf catalog.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store, pricing and server crates all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
#![allow(async_fn_in_trait)]

pub mod error;
pub mod game;
pub mod store;

pub use error::{Error, Result};
