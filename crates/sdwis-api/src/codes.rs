//! Handler for `GET /codes/{type}/{code}`: reference-code descriptions.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use sdwis_core::store::SnapshotStore;
use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeDescription {
  pub value_type:  String,
  pub value_code:  String,
  pub description: String,
}

/// `GET /codes/{type}/{code}`: 404 if the pair is unknown or undescribed.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Path((value_type, value_code)): Path<(String, String)>,
) -> Result<Json<CodeDescription>, ApiError>
where
  S: SnapshotStore,
{
  let description = store
    .code_description(&value_type, &value_code)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("no description for {value_type}/{value_code}")))?;

  Ok(Json(CodeDescription { value_type, value_code, description }))
}
