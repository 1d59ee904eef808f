//! JSON payloads that add derived values to the stored records.

use sdwis_core::{
  sample::LcrSample,
  system::{Facility, GeographicArea, WaterSystem},
  violation::{Enforcement, Violation, ViolationStats, ViolationStatus},
  visit::SiteVisit,
};
use serde::Serialize;

/// A violation plus its computed `violationStatus` and `healthBased` flag.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationView {
  #[serde(flatten)]
  pub violation:        Violation,
  pub violation_status: ViolationStatus,
  pub health_based:     bool,
}

impl From<Violation> for ViolationView {
  fn from(violation: Violation) -> Self {
    let violation_status = violation.status();
    let health_based = violation.is_health_based();
    Self { violation, violation_status, health_based }
  }
}

/// A site visit plus its computed `hasIssues` flag.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteVisitView {
  #[serde(flatten)]
  pub visit:      SiteVisit,
  pub has_issues: bool,
}

impl From<SiteVisit> for SiteVisitView {
  fn from(visit: SiteVisit) -> Self {
    let has_issues = visit.has_issues();
    Self { visit, has_issues }
  }
}

/// An LCR sample plus its display form, e.g. `<0.005`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleView {
  #[serde(flatten)]
  pub sample:          LcrSample,
  pub display_measure: Option<String>,
}

impl From<LcrSample> for SampleView {
  fn from(sample: LcrSample) -> Self {
    let display_measure = sample.display_measure();
    Self { sample, display_measure }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
  #[serde(flatten)]
  pub stats:              ViolationStats,
  pub health_based_share: f64,
}

impl From<ViolationStats> for StatsView {
  fn from(stats: ViolationStats) -> Self {
    Self { health_based_share: stats.health_based_share(), stats }
  }
}

/// Everything the system detail page shows, fetched in one request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemDetail {
  pub system:     WaterSystem,
  pub facilities: Vec<Facility>,
  pub violations: Vec<ViolationView>,
  pub samples:    Vec<SampleView>,
  pub areas:      Vec<GeographicArea>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationDetail {
  pub violation:    ViolationView,
  pub enforcements: Vec<Enforcement>,
}

/// Convert every element of a store result into its view.
pub fn views<T, V: From<T>>(items: Vec<T>) -> Vec<V> {
  items.into_iter().map(V::from).collect()
}
