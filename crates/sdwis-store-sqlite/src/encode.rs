//! Column lists and row decoders between snapshot rows and domain types.
//!
//! Decoders run inside the connection closure, so a malformed value surfaces
//! as a `rusqlite` conversion error naming the offending column.

use std::collections::HashMap;

use rusqlite::{Row, types::Type};
use sdwis_core::{
  Quarter,
  sample::LcrSample,
  system::{Facility, GeographicArea, SystemSummary, WaterSystem},
  violation::{Enforcement, Violation},
  visit::{EvalCode, SiteVisit},
};

// ─── Scalars ─────────────────────────────────────────────────────────────────

fn conversion_error(idx: usize, e: sdwis_core::Error) -> rusqlite::Error {
  rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

pub fn decode_quarter(row: &Row<'_>, idx: usize) -> rusqlite::Result<Quarter> {
  let raw: String = row.get(idx)?;
  raw.parse().map_err(|e| conversion_error(idx, e))
}

pub fn decode_eval(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<EvalCode>> {
  let raw: Option<String> = row.get(idx)?;
  Ok(raw.map(EvalCode::from))
}

/// Build a `LIKE` pattern matching `term` literally anywhere in the column.
/// Must be paired with `ESCAPE '\'`.
pub fn like_pattern(term: &str) -> String {
  let mut escaped = String::with_capacity(term.len() + 2);
  escaped.push('%');
  for c in term.chars() {
    if matches!(c, '\\' | '%' | '_') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped.push('%');
  escaped
}

// ─── Water systems ───────────────────────────────────────────────────────────

pub const SYSTEM_COLUMNS: &str = "
  p.SUBMISSIONYEARQUARTER, p.PWSID, p.PWS_NAME, p.PRIMACY_AGENCY_CODE,
  p.EPA_REGION, p.PWS_ACTIVITY_CODE, p.PWS_DEACTIVATION_DATE, p.PWS_TYPE_CODE,
  p.GW_SW_CODE, p.PRIMARY_SOURCE_CODE, p.OWNER_TYPE_CODE,
  p.POPULATION_SERVED_COUNT, p.SERVICE_CONNECTIONS_COUNT, p.IS_WHOLESALER_IND,
  p.IS_SCHOOL_OR_DAYCARE_IND, p.ORG_NAME, p.ADMIN_NAME, p.EMAIL_ADDR,
  p.PHONE_NUMBER, p.ADDRESS_LINE1, p.ADDRESS_LINE2, p.CITY_NAME, p.ZIP_CODE,
  p.STATE_CODE, p.FIRST_REPORTED_DATE, p.LAST_REPORTED_DATE";

pub fn decode_system(row: &Row<'_>) -> rusqlite::Result<WaterSystem> {
  Ok(WaterSystem {
    quarter:                   decode_quarter(row, 0)?,
    pwsid:                     row.get(1)?,
    pws_name:                  row.get(2)?,
    primacy_agency_code:       row.get(3)?,
    epa_region:                row.get(4)?,
    activity_code:             row.get(5)?,
    deactivation_date:         row.get(6)?,
    type_code:                 row.get(7)?,
    gw_sw_code:                row.get(8)?,
    primary_source_code:       row.get(9)?,
    owner_type_code:           row.get(10)?,
    population_served_count:   row.get(11)?,
    service_connections_count: row.get(12)?,
    is_wholesaler_ind:         row.get(13)?,
    is_school_or_daycare_ind:  row.get(14)?,
    org_name:                  row.get(15)?,
    admin_name:                row.get(16)?,
    email_addr:                row.get(17)?,
    phone_number:              row.get(18)?,
    address_line1:             row.get(19)?,
    address_line2:             row.get(20)?,
    city_name:                 row.get(21)?,
    zip_code:                  row.get(22)?,
    state_code:                row.get(23)?,
    first_reported_date:       row.get(24)?,
    last_reported_date:        row.get(25)?,
  })
}

pub const SUMMARY_COLUMNS: &str = "
  p.PWSID, p.PWS_NAME, p.POPULATION_SERVED_COUNT, p.PWS_TYPE_CODE,
  p.PWS_ACTIVITY_CODE";

pub fn decode_summary(row: &Row<'_>) -> rusqlite::Result<SystemSummary> {
  Ok(SystemSummary {
    pwsid:             row.get(0)?,
    pws_name:          row.get(1)?,
    population_served: row.get(2)?,
    type_code:         row.get(3)?,
    activity_code:     row.get(4)?,
  })
}

// ─── Facilities and coverage ─────────────────────────────────────────────────

pub const FACILITY_COLUMNS: &str = "
  f.SUBMISSIONYEARQUARTER, f.PWSID, f.FACILITY_ID, f.FACILITY_NAME,
  f.STATE_FACILITY_ID, f.FACILITY_ACTIVITY_CODE, f.FACILITY_DEACTIVATION_DATE,
  f.FACILITY_TYPE_CODE, f.IS_SOURCE_IND, f.WATER_TYPE_CODE,
  f.AVAILABILITY_CODE, f.SELLER_PWSID, f.SELLER_PWS_NAME,
  f.FILTRATION_STATUS_CODE, f.IS_SOURCE_TREATED_IND";

pub fn decode_facility(row: &Row<'_>) -> rusqlite::Result<Facility> {
  Ok(Facility {
    quarter:                decode_quarter(row, 0)?,
    pwsid:                  row.get(1)?,
    facility_id:            row.get(2)?,
    facility_name:          row.get(3)?,
    state_facility_id:      row.get(4)?,
    activity_code:          row.get(5)?,
    deactivation_date:      row.get(6)?,
    type_code:              row.get(7)?,
    is_source_ind:          row.get(8)?,
    water_type_code:        row.get(9)?,
    availability_code:      row.get(10)?,
    seller_pwsid:           row.get(11)?,
    seller_pws_name:        row.get(12)?,
    filtration_status_code: row.get(13)?,
    is_source_treated_ind:  row.get(14)?,
  })
}

pub const AREA_COLUMNS: &str = "
  g.SUBMISSIONYEARQUARTER, g.PWSID, g.GEO_ID, g.AREA_TYPE_CODE, g.TRIBAL_CODE,
  g.STATE_SERVED, g.ANSI_ENTITY_CODE, g.ZIP_CODE_SERVED, g.CITY_SERVED,
  g.COUNTY_SERVED";

pub fn decode_area(row: &Row<'_>) -> rusqlite::Result<GeographicArea> {
  Ok(GeographicArea {
    quarter:          decode_quarter(row, 0)?,
    pwsid:            row.get(1)?,
    geo_id:           row.get(2)?,
    area_type_code:   row.get(3)?,
    tribal_code:      row.get(4)?,
    state_served:     row.get(5)?,
    ansi_entity_code: row.get(6)?,
    zip_code_served:  row.get(7)?,
    city_served:      row.get(8)?,
    county_served:    row.get(9)?,
  })
}

// ─── Samples and visits ──────────────────────────────────────────────────────

pub const SAMPLE_COLUMNS: &str = "
  s.SUBMISSIONYEARQUARTER, s.PWSID, s.SAMPLE_ID, s.SAR_ID,
  s.SAMPLING_START_DATE, s.SAMPLING_END_DATE, s.RECONCILIATION_ID,
  s.CONTAMINANT_CODE, s.RESULT_SIGN_CODE, s.SAMPLE_MEASURE, s.UNIT_OF_MEASURE";

pub fn decode_sample(row: &Row<'_>) -> rusqlite::Result<LcrSample> {
  Ok(LcrSample {
    quarter:             decode_quarter(row, 0)?,
    pwsid:               row.get(1)?,
    sample_id:           row.get(2)?,
    sar_id:              row.get(3)?,
    sampling_start_date: row.get(4)?,
    sampling_end_date:   row.get(5)?,
    reconciliation_id:   row.get(6)?,
    contaminant_code:    row.get(7)?,
    result_sign_code:    row.get(8)?,
    sample_measure:      row.get(9)?,
    unit_of_measure:     row.get(10)?,
  })
}

pub const VISIT_COLUMNS: &str = "
  sv.SUBMISSIONYEARQUARTER, sv.PWSID, sv.VISIT_ID, p.PWS_NAME, sv.VISIT_DATE,
  sv.AGENCY_TYPE_CODE, sv.VISIT_REASON_CODE, sv.MANAGEMENT_OPS_EVAL_CODE,
  sv.SOURCE_WATER_EVAL_CODE, sv.TREATMENT_EVAL_CODE,
  sv.DISTRIBUTION_EVAL_CODE, sv.FINANCIAL_EVAL_CODE, sv.COMPLIANCE_EVAL_CODE,
  sv.VISIT_COMMENTS";

pub fn decode_visit(row: &Row<'_>) -> rusqlite::Result<SiteVisit> {
  Ok(SiteVisit {
    quarter:             decode_quarter(row, 0)?,
    pwsid:               row.get(1)?,
    visit_id:            row.get(2)?,
    pws_name:            row.get(3)?,
    visit_date:          row.get(4)?,
    agency_type_code:    row.get(5)?,
    visit_reason_code:   row.get(6)?,
    management_ops_eval: decode_eval(row, 7)?,
    source_water_eval:   decode_eval(row, 8)?,
    treatment_eval:      decode_eval(row, 9)?,
    distribution_eval:   decode_eval(row, 10)?,
    financial_eval:      decode_eval(row, 11)?,
    compliance_eval:     decode_eval(row, 12)?,
    visit_comments:      row.get(13)?,
  })
}

// ─── Violations ──────────────────────────────────────────────────────────────

pub const ENFORCEMENT_COLUMNS: &str = "
  v.ENFORCEMENT_ID, v.ENFORCEMENT_DATE, v.ENFORCEMENT_ACTION_TYPE_CODE,
  v.ENF_ACTION_CATEGORY, v.ENF_ORIGINATOR_CODE, v.ENF_FIRST_REPORTED_DATE,
  v.ENF_LAST_REPORTED_DATE";

/// Violation columns followed by [`ENFORCEMENT_COLUMNS`]; expects `v` joined
/// to the systems table as `p`.
pub const VIOLATION_COLUMNS: &str = "
  v.SUBMISSIONYEARQUARTER, v.PWSID, v.VIOLATION_ID, p.PWS_NAME, v.FACILITY_ID,
  v.COMPL_PER_BEGIN_DATE, v.COMPL_PER_END_DATE, v.NON_COMPL_PER_BEGIN_DATE,
  v.NON_COMPL_PER_END_DATE, v.VIOLATION_CODE, v.VIOLATION_CATEGORY_CODE,
  v.IS_HEALTH_BASED_IND, v.CONTAMINANT_CODE, v.VIOL_MEASURE, v.UNIT_OF_MEASURE,
  v.FEDERAL_MCL, v.STATE_MCL, v.IS_MAJOR_VIOL_IND, v.SEVERITY_IND_CNT,
  v.PUBLIC_NOTIFICATION_TIER, v.RULE_CODE, v.RULE_GROUP_CODE,
  v.RULE_FAMILY_CODE, v.VIOL_FIRST_REPORTED_DATE, v.VIOL_LAST_REPORTED_DATE";

const ENFORCEMENT_OFFSET: usize = 25;

/// Decode the enforcement columns starting at `offset`. A row whose
/// enforcement id is NULL carries no action.
pub fn decode_enforcement(
  row: &Row<'_>,
  offset: usize,
) -> rusqlite::Result<Option<Enforcement>> {
  let Some(enforcement_id) = row.get::<_, Option<String>>(offset)? else {
    return Ok(None);
  };
  Ok(Some(Enforcement {
    enforcement_id,
    enforcement_date:    row.get(offset + 1)?,
    action_type_code:    row.get(offset + 2)?,
    action_category:     row.get(offset + 3)?,
    originator_code:     row.get(offset + 4)?,
    first_reported_date: row.get(offset + 5)?,
    last_reported_date:  row.get(offset + 6)?,
  }))
}

/// One denormalised violation row: the violation with no actions attached,
/// plus the action this row carries, if any.
pub type ViolationRow = (Violation, Option<Enforcement>);

pub fn decode_violation_row(row: &Row<'_>) -> rusqlite::Result<ViolationRow> {
  let violation = Violation {
    quarter:                  decode_quarter(row, 0)?,
    pwsid:                    row.get(1)?,
    violation_id:             row.get(2)?,
    pws_name:                 row.get(3)?,
    facility_id:              row.get(4)?,
    compl_per_begin_date:     row.get(5)?,
    compl_per_end_date:       row.get(6)?,
    non_compl_per_begin_date: row.get(7)?,
    non_compl_per_end_date:   row.get(8)?,
    violation_code:           row.get(9)?,
    category_code:            row.get(10)?,
    is_health_based_ind:      row.get(11)?,
    contaminant_code:         row.get(12)?,
    viol_measure:             row.get(13)?,
    unit_of_measure:          row.get(14)?,
    federal_mcl:              row.get(15)?,
    state_mcl:                row.get(16)?,
    is_major_viol_ind:        row.get(17)?,
    severity_ind_cnt:         row.get(18)?,
    public_notification_tier: row.get(19)?,
    rule_code:                row.get(20)?,
    rule_group_code:          row.get(21)?,
    rule_family_code:         row.get(22)?,
    first_reported_date:      row.get(23)?,
    last_reported_date:       row.get(24)?,
    enforcements:             Vec::new(),
  };
  let enforcement = decode_enforcement(row, ENFORCEMENT_OFFSET)?;
  Ok((violation, enforcement))
}

/// Fold denormalised rows into one [`Violation`] per key, each owning its
/// actions. Output order is the order in which each key first appears.
pub fn fold_violations(rows: Vec<ViolationRow>) -> Vec<Violation> {
  let mut index: HashMap<(Quarter, String, String), usize> = HashMap::new();
  let mut out: Vec<Violation> = Vec::new();

  for (violation, enforcement) in rows {
    let key = (
      violation.quarter.clone(),
      violation.pwsid.clone(),
      violation.violation_id.clone(),
    );
    let slot = *index.entry(key).or_insert_with(|| {
      out.push(violation);
      out.len() - 1
    });

    if let Some(enforcement) = enforcement {
      let actions = &mut out[slot].enforcements;
      if !actions.iter().any(|a| a.enforcement_id == enforcement.enforcement_id) {
        actions.push(enforcement);
      }
    }
  }

  out
}
