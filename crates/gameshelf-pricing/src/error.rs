//! Error type for `gameshelf-pricing`.
//!
//! These never escape [`crate::PriceLookup::lookup`]; they exist so the
//! failure reason can be logged before it is swallowed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build http client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("marketplace unavailable: {0}")]
  Upstream(#[from] reqwest::Error),

  #[error("marketplace returned status {0}")]
  Status(reqwest::StatusCode),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
