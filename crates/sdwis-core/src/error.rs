//! Error types for `sdwis-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid quarter {0:?}, expected YYYYQn")]
  InvalidQuarter(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
