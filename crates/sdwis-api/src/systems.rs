//! Handlers for `/systems` and `/counties` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/systems` | Active quarter, ordered by name |
//! | `GET`  | `/systems/active` | Activity code `A`, every quarter |
//! | `GET`  | `/systems/search?q=` | 400 if `q` is blank |
//! | `GET`  | `/systems/{pwsid}` | Detail bundle; 404 if not found |
//! | `GET`  | `/systems/{pwsid}/violations` | |
//! | `GET`  | `/systems/{pwsid}/facilities` | |
//! | `GET`  | `/systems/{pwsid}/samples` | |
//! | `GET`  | `/systems/{pwsid}/areas` | |
//! | `GET`  | `/counties/{county}/systems` | |
//!
//! Every `/systems/{pwsid}*` route takes an optional `?quarter=`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use sdwis_core::{
  store::SnapshotStore,
  system::{Facility, GeographicArea, SystemSummary, WaterSystem},
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  params::QuarterParams,
  views::{SampleView, SystemDetail, ViolationView, views},
};

// ─── Lists ────────────────────────────────────────────────────────────────────

/// `GET /systems`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<WaterSystem>>, ApiError>
where
  S: SnapshotStore,
{
  let systems = store.water_systems(None).await.map_err(ApiError::store)?;
  Ok(Json(systems))
}

/// `GET /systems/active`
pub async fn active<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<WaterSystem>>, ApiError>
where
  S: SnapshotStore,
{
  let systems = store.active_water_systems().await.map_err(ApiError::store)?;
  Ok(Json(systems))
}

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  pub q: Option<String>,
}

/// `GET /systems/search?q=<term>`
pub async fn search<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<WaterSystem>>, ApiError>
where
  S: SnapshotStore,
{
  let term = params.q.as_deref().map(str::trim).unwrap_or_default();
  if term.is_empty() {
    return Err(ApiError::BadRequest("search term `q` is required".into()));
  }

  let systems = store.search_water_systems(term).await.map_err(ApiError::store)?;
  Ok(Json(systems))
}

/// `GET /counties/{county}/systems`
pub async fn in_county<S>(
  State(store): State<Arc<S>>,
  Path(county): Path<String>,
) -> Result<Json<Vec<SystemSummary>>, ApiError>
where
  S: SnapshotStore,
{
  let systems = store
    .water_systems_in_county(&county)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(systems))
}

// ─── Detail ───────────────────────────────────────────────────────────────────

/// `GET /systems/{pwsid}`
///
/// The five lookups are independent and run concurrently.
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(pwsid): Path<String>,
  Query(params): Query<QuarterParams>,
) -> Result<Json<SystemDetail>, ApiError>
where
  S: SnapshotStore,
{
  let quarter = params.quarter()?;
  let quarter = quarter.as_ref();

  let (system, facilities, violations, samples, areas) = tokio::try_join!(
    store.water_system(&pwsid, quarter),
    store.facilities_for_system(&pwsid, quarter),
    store.violations_for_system(&pwsid, quarter),
    store.lcr_samples_for_system(&pwsid, quarter),
    store.geographic_areas_for_system(&pwsid, quarter),
  )
  .map_err(ApiError::store)?;

  let system = system.ok_or_else(|| ApiError::NotFound(format!("water system {pwsid} not found")))?;

  Ok(Json(SystemDetail {
    system,
    facilities,
    violations: views(violations),
    samples: views(samples),
    areas,
  }))
}

// ─── Per-system records ───────────────────────────────────────────────────────

/// `GET /systems/{pwsid}/violations`
pub async fn violations<S>(
  State(store): State<Arc<S>>,
  Path(pwsid): Path<String>,
  Query(params): Query<QuarterParams>,
) -> Result<Json<Vec<ViolationView>>, ApiError>
where
  S: SnapshotStore,
{
  let quarter = params.quarter()?;
  let violations = store
    .violations_for_system(&pwsid, quarter.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(views(violations)))
}

/// `GET /systems/{pwsid}/facilities`
pub async fn facilities<S>(
  State(store): State<Arc<S>>,
  Path(pwsid): Path<String>,
  Query(params): Query<QuarterParams>,
) -> Result<Json<Vec<Facility>>, ApiError>
where
  S: SnapshotStore,
{
  let quarter = params.quarter()?;
  let facilities = store
    .facilities_for_system(&pwsid, quarter.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(facilities))
}

/// `GET /systems/{pwsid}/samples`
pub async fn samples<S>(
  State(store): State<Arc<S>>,
  Path(pwsid): Path<String>,
  Query(params): Query<QuarterParams>,
) -> Result<Json<Vec<SampleView>>, ApiError>
where
  S: SnapshotStore,
{
  let quarter = params.quarter()?;
  let samples = store
    .lcr_samples_for_system(&pwsid, quarter.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(views(samples)))
}

/// `GET /systems/{pwsid}/areas`
pub async fn areas<S>(
  State(store): State<Arc<S>>,
  Path(pwsid): Path<String>,
  Query(params): Query<QuarterParams>,
) -> Result<Json<Vec<GeographicArea>>, ApiError>
where
  S: SnapshotStore,
{
  let quarter = params.quarter()?;
  let areas = store
    .geographic_areas_for_system(&pwsid, quarter.as_ref())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(areas))
}
