//! Handlers for `/inspections` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/inspections` | Optional `?limit=<n>`; all visits when absent or empty |
//! | `GET`  | `/inspections/recent` | The most recent [`RECENT_VISITS_LIMIT`] visits |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use sdwis_core::store::{RECENT_VISITS_LIMIT, SnapshotStore};
use serde::Deserialize;

use crate::{
  error::ApiError,
  params::parse_optional,
  views::{SiteVisitView, views},
};

#[derive(Debug, Deserialize, Default)]
pub struct InspectionParams {
  /// Most recent `limit` visits; all of them when absent.
  pub limit: Option<String>,
}

/// `GET /inspections[?limit=<n>]`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<InspectionParams>,
) -> Result<Json<Vec<SiteVisitView>>, ApiError>
where
  S: SnapshotStore,
{
  let limit = parse_optional::<usize>("limit", params.limit.as_deref())?;
  let visits = store.site_visits(limit).await.map_err(ApiError::store)?;
  Ok(Json(views(visits)))
}

/// `GET /inspections/recent`
pub async fn recent<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<SiteVisitView>>, ApiError>
where
  S: SnapshotStore,
{
  let visits = store
    .recent_site_visits(RECENT_VISITS_LIMIT)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(views(visits)))
}
