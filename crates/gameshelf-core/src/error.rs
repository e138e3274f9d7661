//! Error types for `gameshelf-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
  #[error("{field} must not be empty")]
  EmptyField { field: &'static str },

  #[error("price must be a non-negative number")]
  InvalidPrice,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
