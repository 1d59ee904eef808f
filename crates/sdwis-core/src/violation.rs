//! Violations and the enforcement actions taken against them.
//!
//! The snapshot stores enforcement fields denormalised onto the violation row,
//! one row per action. Here a violation owns its actions as a collection, and
//! its status is always computed from the compliance period, never read from a
//! stored column.

use serde::{Deserialize, Serialize};

use crate::Quarter;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Whether a violation has been returned to compliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationStatus {
  Resolved,
  Unaddressed,
}

impl ViolationStatus {
  /// `Resolved` iff the compliance period has an end date.
  pub fn from_compliance_end(compl_per_end_date: Option<&str>) -> Self {
    match compl_per_end_date {
      Some(_) => Self::Resolved,
      None => Self::Unaddressed,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Resolved => "Resolved",
      Self::Unaddressed => "Unaddressed",
    }
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A formal or informal action taken to bring a violation back to compliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enforcement {
  pub enforcement_id:      String,
  pub enforcement_date:    Option<String>,
  pub action_type_code:    Option<String>,
  pub action_category:     Option<String>,
  pub originator_code:     Option<String>,
  pub first_reported_date: Option<String>,
  pub last_reported_date:  Option<String>,
}

/// A single violation, keyed by `(quarter, pwsid, violation_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
  pub quarter:                  Quarter,
  pub pwsid:                    String,
  pub violation_id:             String,
  /// Joined from the parent system; `None` if the system row is missing.
  pub pws_name:                 Option<String>,
  pub facility_id:              Option<String>,
  pub compl_per_begin_date:     Option<String>,
  pub compl_per_end_date:       Option<String>,
  pub non_compl_per_begin_date: Option<String>,
  pub non_compl_per_end_date:   Option<String>,
  pub violation_code:           Option<String>,
  /// `MR`, `MCL`, `TT` or `OTHER`.
  pub category_code:            Option<String>,
  pub is_health_based_ind:      Option<String>,
  pub contaminant_code:         Option<String>,
  pub viol_measure:             Option<f64>,
  pub unit_of_measure:          Option<String>,
  pub federal_mcl:              Option<String>,
  pub state_mcl:                Option<f64>,
  pub is_major_viol_ind:        Option<String>,
  pub severity_ind_cnt:         Option<i64>,
  pub public_notification_tier: Option<i64>,
  pub rule_code:                Option<String>,
  pub rule_group_code:          Option<String>,
  pub rule_family_code:         Option<String>,
  pub first_reported_date:      Option<String>,
  pub last_reported_date:       Option<String>,
  pub enforcements:             Vec<Enforcement>,
}

impl Violation {
  pub fn status(&self) -> ViolationStatus {
    ViolationStatus::from_compliance_end(self.compl_per_end_date.as_deref())
  }

  pub fn is_health_based(&self) -> bool {
    self.is_health_based_ind.as_deref() == Some("Y")
  }
}

// ─── Query types ─────────────────────────────────────────────────────────────

/// Conjunctive equality filters for [`SnapshotStore::violations`].
///
/// A `None` field adds no predicate at all; it never means "match null".
///
/// [`SnapshotStore::violations`]: crate::store::SnapshotStore::violations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationFilter {
  pub status:           Option<ViolationStatus>,
  /// `true` matches indicator `Y`, `false` matches `N`.
  pub health_based:     Option<bool>,
  pub contaminant_code: Option<String>,
}

/// Aggregate counts over one quarter, computed in a single query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationStats {
  pub total_violations:        i64,
  pub health_based_violations: i64,
  pub unaddressed_violations:  i64,
  pub resolved_violations:     i64,
}

impl ViolationStats {
  /// Fraction of violations that are health-based; `0.0` when there are none.
  pub fn health_based_share(&self) -> f64 {
    if self.total_violations == 0 {
      0.0
    } else {
      self.health_based_violations as f64 / self.total_violations as f64
    }
  }
}
