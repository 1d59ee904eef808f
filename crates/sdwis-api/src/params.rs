//! Query-string parameters shared by several endpoints.

use std::str::FromStr;

use sdwis_core::Quarter;
use serde::Deserialize;

use crate::error::ApiError;

/// `?quarter=YYYYQn`, accepted by every per-system and per-violation route.
///
/// Parsed by hand so a malformed value yields the JSON error body rather
/// than axum's plain-text query rejection.
#[derive(Debug, Deserialize, Default)]
pub struct QuarterParams {
  pub quarter: Option<String>,
}

impl QuarterParams {
  pub fn quarter(&self) -> Result<Option<Quarter>, ApiError> {
    self
      .quarter
      .as_deref()
      .map(|raw| raw.parse().map_err(|e: sdwis_core::Error| ApiError::BadRequest(e.to_string())))
      .transpose()
  }
}

/// Parse an optional query value by hand. Empty means absent; anything
/// unparseable is a JSON 400 naming the parameter.
pub fn parse_optional<T: FromStr>(name: &str, raw: Option<&str>) -> Result<Option<T>, ApiError> {
  match raw.map(str::trim) {
    None | Some("") => Ok(None),
    Some(value) => value
      .parse()
      .map(Some)
      .map_err(|_| ApiError::BadRequest(format!("invalid {name}: {value:?}"))),
  }
}
