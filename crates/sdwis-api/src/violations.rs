//! Handlers for `/violations` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/violations` | Optional `?status=Resolved\|Unaddressed&healthBased=true\|false&contaminantCode=`; empty values are ignored, others are a 400 |
//! | `GET`  | `/violations/unaddressed` | Every quarter |
//! | `GET`  | `/violations/stats` | Active quarter |
//! | `GET`  | `/violations/{pwsid}/{id}` | 404 if not found; optional `?quarter=` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use sdwis_core::{
  store::SnapshotStore,
  violation::{ViolationFilter, ViolationStatus},
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  params::{QuarterParams, parse_optional},
  views::{StatsView, ViolationDetail, ViolationView, views},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// Raw filter values, parsed by hand so bad input gets the JSON error body.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  pub status:           Option<String>,
  pub health_based:     Option<String>,
  pub contaminant_code: Option<String>,
}

impl TryFrom<ListParams> for ViolationFilter {
  type Error = ApiError;

  fn try_from(params: ListParams) -> Result<Self, ApiError> {
    let status = match params.status.as_deref().map(str::trim) {
      None | Some("") => None,
      Some("Resolved") => Some(ViolationStatus::Resolved),
      Some("Unaddressed") => Some(ViolationStatus::Unaddressed),
      Some(other) => {
        return Err(ApiError::BadRequest(format!(
          "invalid status: {other:?} (expected Resolved or Unaddressed)"
        )));
      }
    };

    Ok(ViolationFilter {
      status,
      health_based: parse_optional("healthBased", params.health_based.as_deref())?,
      contaminant_code: params.contaminant_code.filter(|c| !c.trim().is_empty()),
    })
  }
}

/// `GET /violations[?status=..][&healthBased=..][&contaminantCode=..]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<ViolationView>>, ApiError>
where
  S: SnapshotStore,
{
  let filter = ViolationFilter::try_from(params)?;
  let violations = store.violations(&filter).await.map_err(ApiError::store)?;
  Ok(Json(views(violations)))
}

/// `GET /violations/unaddressed`
pub async fn unaddressed<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<ViolationView>>, ApiError>
where
  S: SnapshotStore,
{
  let violations = store.unaddressed_violations().await.map_err(ApiError::store)?;
  Ok(Json(views(violations)))
}

/// `GET /violations/stats`
pub async fn stats<S>(State(store): State<Arc<S>>) -> Result<Json<StatsView>, ApiError>
where
  S: SnapshotStore,
{
  let stats = store.violation_stats().await.map_err(ApiError::store)?;
  Ok(Json(stats.into()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /violations/{pwsid}/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path((pwsid, violation_id)): Path<(String, String)>,
  Query(params): Query<QuarterParams>,
) -> Result<Json<ViolationDetail>, ApiError>
where
  S: SnapshotStore,
{
  let quarter = params.quarter()?;
  let quarter = quarter.as_ref();

  let (violation, enforcements) = tokio::try_join!(
    store.violation(&pwsid, &violation_id, quarter),
    store.enforcements_for_violation(&pwsid, &violation_id, quarter),
  )
  .map_err(ApiError::store)?;

  let violation = violation.ok_or_else(|| {
    ApiError::NotFound(format!("violation {violation_id} for {pwsid} not found"))
  })?;

  Ok(Json(ViolationDetail { violation: violation.into(), enforcements }))
}
