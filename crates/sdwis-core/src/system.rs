//! Water systems and the per-system records that hang off them.
//!
//! A [`WaterSystem`] is the root of every snapshot: facilities, geographic
//! coverage, violations, samples and visits all reference it by
//! `(pwsid, quarter)`.

use serde::{Deserialize, Serialize};

use crate::Quarter;

/// Activity code for a system that is currently operating.
pub const ACTIVE_CODE: &str = "A";

// ─── Water system ────────────────────────────────────────────────────────────

/// One row of `SDWA_PUB_WATER_SYSTEMS`.
///
/// Code-valued fields (`type_code`, `owner_type_code`, ...) are kept as the raw
/// SDWIS codes; descriptions come from the reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterSystem {
  pub quarter:                   Quarter,
  pub pwsid:                     String,
  pub pws_name:                  Option<String>,
  pub primacy_agency_code:       Option<String>,
  pub epa_region:                Option<String>,
  pub activity_code:             Option<String>,
  pub deactivation_date:         Option<String>,
  /// `CWS`, `NTNCWS` or `TNCWS`.
  pub type_code:                 Option<String>,
  /// Ground or surface water source.
  pub gw_sw_code:                Option<String>,
  pub primary_source_code:       Option<String>,
  pub owner_type_code:           Option<String>,
  pub population_served_count:   Option<i64>,
  pub service_connections_count: Option<i64>,
  pub is_wholesaler_ind:         Option<String>,
  pub is_school_or_daycare_ind:  Option<String>,
  pub org_name:                  Option<String>,
  pub admin_name:                Option<String>,
  pub email_addr:                Option<String>,
  pub phone_number:              Option<String>,
  pub address_line1:             Option<String>,
  pub address_line2:             Option<String>,
  pub city_name:                 Option<String>,
  pub zip_code:                  Option<String>,
  pub state_code:                Option<String>,
  pub first_reported_date:       Option<String>,
  pub last_reported_date:        Option<String>,
}

impl WaterSystem {
  pub fn is_active(&self) -> bool {
    self.activity_code.as_deref() == Some(ACTIVE_CODE)
  }
}

/// The slim projection returned by county lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSummary {
  pub pwsid:             String,
  pub pws_name:          Option<String>,
  pub population_served: Option<i64>,
  pub type_code:         Option<String>,
  pub activity_code:     Option<String>,
}

// ─── Facilities ──────────────────────────────────────────────────────────────

/// One row of `SDWA_FACILITIES`: a well, intake, plant or other component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
  pub quarter:                Quarter,
  pub pwsid:                  String,
  pub facility_id:            String,
  pub facility_name:          Option<String>,
  pub state_facility_id:      Option<String>,
  pub activity_code:          Option<String>,
  pub deactivation_date:      Option<String>,
  pub type_code:              Option<String>,
  /// `Y` when the facility is a water source.
  pub is_source_ind:          Option<String>,
  pub water_type_code:        Option<String>,
  pub availability_code:      Option<String>,
  pub seller_pwsid:           Option<String>,
  pub seller_pws_name:        Option<String>,
  pub filtration_status_code: Option<String>,
  pub is_source_treated_ind:  Option<String>,
}

// ─── Geographic coverage ─────────────────────────────────────────────────────

/// One row of `SDWA_GEOGRAPHIC_AREAS`. A system usually has several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeographicArea {
  pub quarter:          Quarter,
  pub pwsid:            String,
  pub geo_id:           String,
  pub area_type_code:   String,
  pub tribal_code:      Option<String>,
  pub state_served:     Option<String>,
  pub ansi_entity_code: Option<String>,
  pub zip_code_served:  Option<String>,
  pub city_served:      Option<String>,
  pub county_served:    Option<String>,
}
