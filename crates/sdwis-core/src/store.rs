//! The `SnapshotStore` trait: the read-only access layer over one SDWIS
//! snapshot.
//!
//! The trait is implemented by storage backends (e.g. `sdwis-store-sqlite`).
//! Higher layers (`sdwis-api`, `sdwis-server`) depend on this abstraction, not
//! on any concrete backend.
//!
//! Every method is a pure read. A missing system or violation yields `None` or
//! an empty `Vec`; only storage failures surface as `Err`.

use std::future::Future;

use crate::{
  Quarter,
  sample::LcrSample,
  system::{Facility, GeographicArea, SystemSummary, WaterSystem},
  violation::{Enforcement, Violation, ViolationFilter, ViolationStats},
  visit::SiteVisit,
};

/// Upper bound on [`SnapshotStore::search_water_systems`] results.
pub const SEARCH_LIMIT: usize = 50;

/// Default page size for [`SnapshotStore::recent_site_visits`] callers.
pub const RECENT_VISITS_LIMIT: usize = 100;

/// Abstraction over a read-only SDWIS snapshot backend.
///
/// Operations documented as "by parent id" take an explicit quarter and fall
/// back to [`active_quarter`](Self::active_quarter) when given `None`. All
/// other quarter-scoped operations use the active quarter.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait SnapshotStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The quarter this store was configured with.
  fn active_quarter(&self) -> &Quarter;

  // ── Water systems ─────────────────────────────────────────────────────

  /// Every system with activity code `A`, in every quarter present in the
  /// snapshot. Unlike its siblings this is not scoped to the active quarter.
  fn active_water_systems(
    &self,
  ) -> impl Future<Output = Result<Vec<WaterSystem>, Self::Error>> + Send + '_;

  /// All systems of a quarter, ordered by name.
  fn water_systems<'a>(
    &'a self,
    quarter: Option<&'a Quarter>,
  ) -> impl Future<Output = Result<Vec<WaterSystem>, Self::Error>> + Send + 'a;

  /// By parent id. Returns `None` if no system matches.
  fn water_system<'a>(
    &'a self,
    pwsid: &'a str,
    quarter: Option<&'a Quarter>,
  ) -> impl Future<Output = Result<Option<WaterSystem>, Self::Error>> + Send + 'a;

  /// Case-insensitive literal substring match on the system name, capped at
  /// [`SEARCH_LIMIT`] rows.
  fn search_water_systems<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Result<Vec<WaterSystem>, Self::Error>> + Send + 'a;

  /// Distinct systems whose geographic coverage includes `county`.
  fn water_systems_in_county<'a>(
    &'a self,
    county: &'a str,
  ) -> impl Future<Output = Result<Vec<SystemSummary>, Self::Error>> + Send + 'a;

  // ── Per-system records ────────────────────────────────────────────────

  /// By parent id.
  fn facilities_for_system<'a>(
    &'a self,
    pwsid: &'a str,
    quarter: Option<&'a Quarter>,
  ) -> impl Future<Output = Result<Vec<Facility>, Self::Error>> + Send + 'a;

  /// By parent id, most recent sampling period first.
  fn lcr_samples_for_system<'a>(
    &'a self,
    pwsid: &'a str,
    quarter: Option<&'a Quarter>,
  ) -> impl Future<Output = Result<Vec<LcrSample>, Self::Error>> + Send + 'a;

  /// By parent id.
  fn geographic_areas_for_system<'a>(
    &'a self,
    pwsid: &'a str,
    quarter: Option<&'a Quarter>,
  ) -> impl Future<Output = Result<Vec<GeographicArea>, Self::Error>> + Send + 'a;

  // ── Violations ────────────────────────────────────────────────────────

  /// By parent id, most recent non-compliance first.
  fn violations_for_system<'a>(
    &'a self,
    pwsid: &'a str,
    quarter: Option<&'a Quarter>,
  ) -> impl Future<Output = Result<Vec<Violation>, Self::Error>> + Send + 'a;

  /// Every unaddressed violation in every quarter present in the snapshot,
  /// most recent non-compliance first. Not scoped to the active quarter.
  fn unaddressed_violations(
    &self,
  ) -> impl Future<Output = Result<Vec<Violation>, Self::Error>> + Send + '_;

  /// Violations of the active quarter matching every set field of `filter`,
  /// most recent non-compliance first.
  fn violations<'a>(
    &'a self,
    filter: &'a ViolationFilter,
  ) -> impl Future<Output = Result<Vec<Violation>, Self::Error>> + Send + 'a;

  /// By parent id. Returns `None` if no violation matches.
  fn violation<'a>(
    &'a self,
    pwsid: &'a str,
    violation_id: &'a str,
    quarter: Option<&'a Quarter>,
  ) -> impl Future<Output = Result<Option<Violation>, Self::Error>> + Send + 'a;

  /// By parent id. Only rows carrying an enforcement id are returned.
  fn enforcements_for_violation<'a>(
    &'a self,
    pwsid: &'a str,
    violation_id: &'a str,
    quarter: Option<&'a Quarter>,
  ) -> impl Future<Output = Result<Vec<Enforcement>, Self::Error>> + Send + 'a;

  /// Counts over the active quarter in one round trip.
  fn violation_stats(
    &self,
  ) -> impl Future<Output = Result<ViolationStats, Self::Error>> + Send + '_;

  // ── Site visits ───────────────────────────────────────────────────────

  /// Visits of the active quarter, most recent first. `None` is unbounded.
  fn site_visits(
    &self,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<SiteVisit>, Self::Error>> + Send + '_;

  /// The `limit` most recent visits of the active quarter.
  fn recent_site_visits(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<SiteVisit>, Self::Error>> + Send + '_ {
    self.site_visits(Some(limit))
  }

  // ── Reference codes ───────────────────────────────────────────────────

  /// Human-readable description for a reference code, if one is recorded.
  fn code_description<'a>(
    &'a self,
    value_type: &'a str,
    value_code: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;
}
