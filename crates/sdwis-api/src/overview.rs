//! Handler for `GET /overview`: a quick health check of the snapshot.

use std::sync::Arc;

use axum::{Json, extract::State};
use sdwis_core::store::SnapshotStore;
use serde::Serialize;

use crate::{error::ApiError, views::StatsView};

/// Number of systems echoed back in [`Overview::sample_systems`].
pub const SAMPLE_SIZE: usize = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSystem {
  pub pwsid:      String,
  pub name:       Option<String>,
  pub population: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
  pub quarter:              String,
  pub active_systems_count: usize,
  pub sample_systems:       Vec<SampleSystem>,
  pub violation_stats:      StatsView,
}

/// `GET /overview`
pub async fn handler<S>(State(store): State<Arc<S>>) -> Result<Json<Overview>, ApiError>
where
  S: SnapshotStore,
{
  let (active, stats) = tokio::try_join!(store.active_water_systems(), store.violation_stats())
    .map_err(ApiError::store)?;

  let sample_systems = active
    .iter()
    .take(SAMPLE_SIZE)
    .map(|system| SampleSystem {
      pwsid:      system.pwsid.clone(),
      name:       system.pws_name.clone(),
      population: system.population_served_count,
    })
    .collect();

  Ok(Json(Overview {
    quarter: store.active_quarter().to_string(),
    active_systems_count: active.len(),
    sample_systems,
    violation_stats: stats.into(),
  }))
}
