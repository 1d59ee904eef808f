//! Integration tests for `SqliteStore` against an in-memory snapshot.

use sdwis_core::{
  Quarter,
  store::{SEARCH_LIMIT, SnapshotStore},
  violation::{ViolationFilter, ViolationStatus},
  visit::EvalCode,
};

use crate::{Error, SqliteStore, schema::SCHEMA};

const FIXTURE: &str = "
INSERT INTO SDWA_REF_CODE_VALUES VALUES
  ('PWS_TYPE_CODE', 'CWS', 'Community water system'),
  ('CONTAMINANT_CODE', '1040', 'Nitrate'),
  ('OWNER_TYPE_CODE', 'X', NULL);

INSERT INTO SDWA_PUB_WATER_SYSTEMS
  (SUBMISSIONYEARQUARTER, PWSID, PWS_NAME, PWS_ACTIVITY_CODE, PWS_TYPE_CODE, POPULATION_SERVED_COUNT)
VALUES
  ('2025Q1', 'GA0000001', 'Atlanta Water Works',     'A', 'CWS',    500000),
  ('2025Q1', 'GA0000002', 'Blue Creek Utility',      'A', 'NTNCWS', 300),
  ('2025Q1', 'GA0000003', 'Cedar Falls 100% Spring', 'I', 'TNCWS',  50),
  ('2025Q1', 'GA0000004', 'Dogwood_Estates',         'A', 'CWS',    1200),
  ('2024Q4', 'GA0000001', 'Atlanta Water Works',     'A', 'CWS',    498000),
  ('2024Q4', 'GA0000009', 'Old Mill Water',          'A', 'CWS',    900);

INSERT INTO SDWA_VIOLATIONS_ENFORCEMENT
  (SUBMISSIONYEARQUARTER, PWSID, VIOLATION_ID, COMPL_PER_END_DATE, NON_COMPL_PER_BEGIN_DATE,
   VIOLATION_CODE, VIOLATION_CATEGORY_CODE, IS_HEALTH_BASED_IND, CONTAMINANT_CODE,
   VIOLATION_STATUS, ENFORCEMENT_ID, ENFORCEMENT_DATE, ENFORCEMENT_ACTION_TYPE_CODE)
VALUES
  ('2025Q1', 'GA0000001', 'V100', NULL,         '2023-05-01', '02', 'MCL', 'Y', '1040', 'Resolved', 'E1', '2023-06-01', 'SIA'),
  ('2025Q1', 'GA0000001', 'V100', NULL,         '2023-05-01', '02', 'MCL', 'Y', '1040', 'Resolved', 'E2', '2023-07-15', 'SFJ'),
  ('2025Q1', 'GA0000001', 'V101', '2024-12-31', '2024-10-01', '03', 'MR',  'N', '3100', NULL,       NULL, NULL,         NULL),
  ('2025Q1', 'GA0000001', 'V102', NULL,         NULL,         '03', 'MR',  'N', '1040', NULL,       'E3', '2025-02-01', 'SIE'),
  ('2025Q1', 'GA0000002', 'V200', '2025-01-15', '2024-11-20', '41', 'TT',  'Y', '2950', NULL,       NULL, NULL,         NULL),
  ('2024Q4', 'GA0000001', 'V090', NULL,         '2022-01-01', '02', 'MCL', 'Y', '1040', NULL,       NULL, NULL,         NULL),
  ('2024Q4', 'GA0000009', 'V900', '2024-10-10', '2024-09-01', '03', 'MR',  'N', '3100', NULL,       NULL, NULL,         NULL);

INSERT INTO SDWA_FACILITIES (SUBMISSIONYEARQUARTER, PWSID, FACILITY_ID, FACILITY_NAME, IS_SOURCE_IND)
VALUES
  ('2025Q1', 'GA0000001', 'F1', 'Chattahoochee Intake', 'Y'),
  ('2025Q1', 'GA0000001', 'F2', 'Hemphill Plant',       'N'),
  ('2025Q1', 'GA0000001', 'F3', 'Well 3',               'Y'),
  ('2024Q4', 'GA0000001', 'F1', 'Chattahoochee Intake', 'Y'),
  ('2025Q1', 'GA0000002', 'F1', 'Creek Well',           'Y');

INSERT INTO SDWA_LCR_SAMPLES
  (SUBMISSIONYEARQUARTER, PWSID, SAMPLE_ID, SAR_ID, SAMPLING_END_DATE, CONTAMINANT_CODE,
   RESULT_SIGN_CODE, SAMPLE_MEASURE, UNIT_OF_MEASURE)
VALUES
  ('2025Q1', 'GA0000001', 'S1', 1, '2024-09-30', 'PB90', 'L', 0.005, 'mg/L'),
  ('2025Q1', 'GA0000001', 'S1', 2, '2024-09-30', 'CU90', NULL, 1.1,  'mg/L'),
  ('2025Q1', 'GA0000001', 'S2', 1, '2025-01-31', 'PB90', NULL, 0.012, 'mg/L');

INSERT INTO SDWA_SITE_VISITS
  (SUBMISSIONYEARQUARTER, PWSID, VISIT_ID, VISIT_DATE, VISIT_REASON_CODE,
   MANAGEMENT_OPS_EVAL_CODE, TREATMENT_EVAL_CODE, DISTRIBUTION_EVAL_CODE)
VALUES
  ('2025Q1', 'GA0000001', 'SV1', '2025-02-10', 'SNSV', 'S', 'N', 'N'),
  ('2025Q1', 'GA0000002', 'SV2', '2025-03-05', 'SNSV', 'N', 'N', 'N'),
  ('2025Q1', 'GA0000001', 'SV3', '2025-01-20', 'OTHR', 'N', 'M', NULL),
  ('2024Q4', 'GA0000009', 'SV9', '2024-11-01', 'SNSV', 'N', 'N', 'N');

INSERT INTO SDWA_GEOGRAPHIC_AREAS
  (SUBMISSIONYEARQUARTER, PWSID, GEO_ID, AREA_TYPE_CODE, CITY_SERVED, COUNTY_SERVED, ZIP_CODE_SERVED)
VALUES
  ('2025Q1', 'GA0000001', 'G1', 'CN', NULL,        'Fulton',   NULL),
  ('2025Q1', 'GA0000001', 'G2', 'ZC', 'Atlanta',   'Fulton',   '30303'),
  ('2025Q1', 'GA0000002', 'G3', 'CN', NULL,        'Cherokee', NULL),
  ('2024Q4', 'GA0000009', 'G9', 'CN', NULL,        'Fulton',   NULL);
";

fn q(s: &str) -> Quarter { s.parse().unwrap() }

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory(Quarter::default(), FIXTURE)
    .await
    .expect("in-memory store")
}

// ─── Water systems ───────────────────────────────────────────────────────────

#[tokio::test]
async fn water_system_found_in_active_quarter() {
  let s = store().await;
  let system = s.water_system("GA0000001", None).await.unwrap().unwrap();
  assert_eq!(system.pws_name.as_deref(), Some("Atlanta Water Works"));
  assert_eq!(system.quarter, q("2025Q1"));
  assert_eq!(system.population_served_count, Some(500000));
  assert!(system.is_active());
}

#[tokio::test]
async fn water_system_honours_explicit_quarter() {
  let s = store().await;
  let system = s
    .water_system("GA0000001", Some(&q("2024Q4")))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(system.population_served_count, Some(498000));

  // Only present in the older quarter.
  assert!(s.water_system("GA0000009", None).await.unwrap().is_none());
}

#[tokio::test]
async fn missing_water_system_returns_none() {
  let s = store().await;
  let result = s.water_system("GA9999999", None).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn active_systems_span_every_quarter() {
  let s = store().await;
  let active = s.active_water_systems().await.unwrap();

  assert!(active.iter().all(|w| w.is_active()));
  assert_eq!(active.len(), 5);
  assert!(active.iter().any(|w| w.quarter == q("2024Q4")));
  assert!(!active.iter().any(|w| w.pwsid == "GA0000003"));
}

#[tokio::test]
async fn water_systems_ordered_by_name() {
  let s = store().await;
  let names: Vec<_> = s
    .water_systems(None)
    .await
    .unwrap()
    .into_iter()
    .map(|w| w.pws_name.unwrap())
    .collect();
  assert_eq!(
    names,
    ["Atlanta Water Works", "Blue Creek Utility", "Cedar Falls 100% Spring", "Dogwood_Estates"]
  );
}

#[tokio::test]
async fn search_is_case_insensitive_and_quarter_scoped() {
  let s = store().await;
  for term in ["water", "WATER", "Water"] {
    let found = s.search_water_systems(term).await.unwrap();
    assert_eq!(found.len(), 1, "{term}");
    assert_eq!(found[0].pwsid, "GA0000001");
    assert_eq!(found[0].quarter, q("2025Q1"));
  }
}

#[tokio::test]
async fn search_matches_wildcards_literally() {
  let s = store().await;

  let percent = s.search_water_systems("%").await.unwrap();
  assert_eq!(percent.len(), 1);
  assert_eq!(percent[0].pwsid, "GA0000003");

  let underscore = s.search_water_systems("_").await.unwrap();
  assert_eq!(underscore.len(), 1);
  assert_eq!(underscore[0].pwsid, "GA0000004");
}

#[tokio::test]
async fn search_is_capped() {
  let rows: Vec<String> = (0..60)
    .map(|i| format!("('2025Q1', 'GA10{i:05}', 'Lakeside System {i}', 'A')"))
    .collect();
  let fixture = format!(
    "INSERT INTO SDWA_PUB_WATER_SYSTEMS
       (SUBMISSIONYEARQUARTER, PWSID, PWS_NAME, PWS_ACTIVITY_CODE)
     VALUES {};",
    rows.join(",\n")
  );
  let s = SqliteStore::open_in_memory(Quarter::default(), fixture).await.unwrap();

  let found = s.search_water_systems("lakeside").await.unwrap();
  assert_eq!(found.len(), SEARCH_LIMIT);
  assert!(
    found
      .iter()
      .all(|w| w.pws_name.as_deref().unwrap().to_lowercase().contains("lakeside"))
  );
}

#[tokio::test]
async fn county_lookup_returns_distinct_systems() {
  let s = store().await;
  let fulton = s.water_systems_in_county("Fulton").await.unwrap();
  assert_eq!(fulton.len(), 1);
  assert_eq!(fulton[0].pwsid, "GA0000001");
  assert_eq!(fulton[0].type_code.as_deref(), Some("CWS"));

  assert!(s.water_systems_in_county("Nowhere").await.unwrap().is_empty());
}

// ─── Per-system records ──────────────────────────────────────────────────────

#[tokio::test]
async fn facilities_scoped_to_quarter() {
  let s = store().await;

  let current = s.facilities_for_system("GA0000001", None).await.unwrap();
  let ids: Vec<_> = current.iter().map(|f| f.facility_id.as_str()).collect();
  assert_eq!(ids, ["F1", "F2", "F3"]);
  assert!(current.iter().all(|f| f.quarter == q("2025Q1")));

  let older = s
    .facilities_for_system("GA0000001", Some(&q("2024Q4")))
    .await
    .unwrap();
  assert_eq!(older.len(), 1);

  let none = s
    .facilities_for_system("GA0000001", Some(&q("2023Q2")))
    .await
    .unwrap();
  assert!(none.is_empty());
}

#[tokio::test]
async fn lcr_samples_most_recent_first() {
  let s = store().await;
  let samples = s.lcr_samples_for_system("GA0000001", None).await.unwrap();

  let keys: Vec<_> = samples.iter().map(|x| (x.sample_id.as_str(), x.sar_id)).collect();
  assert_eq!(keys, [("S2", 1), ("S1", 1), ("S1", 2)]);
  assert_eq!(samples[1].display_measure().as_deref(), Some("<0.005"));
}

#[tokio::test]
async fn geographic_areas_for_system() {
  let s = store().await;
  let areas = s.geographic_areas_for_system("GA0000001", None).await.unwrap();
  assert_eq!(areas.len(), 2);
  assert_eq!(areas[1].zip_code_served.as_deref(), Some("30303"));

  assert!(s.geographic_areas_for_system("GA9999999", None).await.unwrap().is_empty());
}

// ─── Violations ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn violations_for_system_newest_first_nulls_last() {
  let s = store().await;
  let violations = s.violations_for_system("GA0000001", None).await.unwrap();

  let ids: Vec<_> = violations.iter().map(|v| v.violation_id.as_str()).collect();
  assert_eq!(ids, ["V101", "V100", "V102"]);
  assert!(violations.iter().all(|v| v.pws_name.as_deref() == Some("Atlanta Water Works")));

  let dates: Vec<_> = violations
    .iter()
    .filter_map(|v| v.non_compl_per_begin_date.as_deref())
    .collect();
  assert!(dates.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn violation_owns_each_enforcement_once() {
  let s = store().await;
  let violations = s.violations_for_system("GA0000001", None).await.unwrap();

  let v100 = violations.iter().find(|v| v.violation_id == "V100").unwrap();
  let ids: Vec<_> = v100.enforcements.iter().map(|e| e.enforcement_id.as_str()).collect();
  assert_eq!(ids, ["E1", "E2"]);

  let v101 = violations.iter().find(|v| v.violation_id == "V101").unwrap();
  assert!(v101.enforcements.is_empty());
}

#[tokio::test]
async fn status_is_derived_from_compliance_end_date() {
  let s = store().await;
  let v100 = s.violation("GA0000001", "V100", None).await.unwrap().unwrap();

  // The stored status column says Resolved; the compliance period disagrees.
  assert_eq!(v100.status(), ViolationStatus::Unaddressed);

  let resolved = s
    .violations(&ViolationFilter {
      status: Some(ViolationStatus::Resolved),
      ..Default::default()
    })
    .await
    .unwrap();
  assert!(!resolved.iter().any(|v| v.violation_id == "V100"));
  assert!(resolved.iter().all(|v| v.compl_per_end_date.is_some()));
}

#[tokio::test]
async fn unaddressed_violations_span_every_quarter() {
  let s = store().await;
  let unaddressed = s.unaddressed_violations().await.unwrap();

  let keys: Vec<_> = unaddressed
    .iter()
    .map(|v| (v.quarter.as_str(), v.violation_id.as_str()))
    .collect();
  assert_eq!(keys, [("2025Q1", "V100"), ("2024Q4", "V090"), ("2025Q1", "V102")]);
  assert!(unaddressed.iter().all(|v| v.status() == ViolationStatus::Unaddressed));
}

#[tokio::test]
async fn violations_without_filter_cover_active_quarter() {
  let s = store().await;
  let all = s.violations(&ViolationFilter::default()).await.unwrap();
  assert_eq!(all.len(), 4);
  assert!(all.iter().all(|v| v.quarter == q("2025Q1")));
}

#[tokio::test]
async fn violation_filters_combine_conjunctively() {
  let s = store().await;

  let health = s
    .violations(&ViolationFilter { health_based: Some(true), ..Default::default() })
    .await
    .unwrap();
  let ids: Vec<_> = health.iter().map(|v| v.violation_id.as_str()).collect();
  assert_eq!(ids, ["V200", "V100"]);

  let nitrate_open = s
    .violations(&ViolationFilter {
      status:           Some(ViolationStatus::Unaddressed),
      health_based:     Some(false),
      contaminant_code: Some("1040".into()),
    })
    .await
    .unwrap();
  assert_eq!(nitrate_open.len(), 1);
  assert_eq!(nitrate_open[0].violation_id, "V102");

  let nothing = s
    .violations(&ViolationFilter {
      contaminant_code: Some("9999".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert!(nothing.is_empty());
}

#[tokio::test]
async fn stats_match_independent_counts() {
  let s = store().await;
  let stats = s.violation_stats().await.unwrap();

  let all = s.violations(&ViolationFilter::default()).await.unwrap();
  let count = |f: ViolationFilter| {
    let s = s.clone();
    async move { s.violations(&f).await.unwrap().len() as i64 }
  };

  assert_eq!(stats.total_violations, all.len() as i64);
  assert_eq!(
    stats.health_based_violations,
    count(ViolationFilter { health_based: Some(true), ..Default::default() }).await
  );
  assert_eq!(
    stats.unaddressed_violations,
    count(ViolationFilter {
      status: Some(ViolationStatus::Unaddressed),
      ..Default::default()
    })
    .await
  );
  assert_eq!(
    stats.resolved_violations,
    count(ViolationFilter {
      status: Some(ViolationStatus::Resolved),
      ..Default::default()
    })
    .await
  );
  assert_eq!(stats.total_violations, 4);
  assert_eq!(stats.health_based_violations, 2);
}

#[tokio::test]
async fn stats_for_empty_quarter_are_zero() {
  let s = SqliteStore::open_in_memory(q("2030Q1"), FIXTURE).await.unwrap();
  let stats = s.violation_stats().await.unwrap();
  assert_eq!(stats.total_violations, 0);
  assert_eq!(stats.health_based_violations, 0);
  assert_eq!(stats.unaddressed_violations, 0);
  assert_eq!(stats.resolved_violations, 0);
}

#[tokio::test]
async fn missing_violation_returns_none() {
  let s = store().await;
  assert!(s.violation("GA0000001", "V999", None).await.unwrap().is_none());
  assert!(s.violation("GA0000001", "V090", None).await.unwrap().is_none());
  assert!(
    s.violation("GA0000001", "V090", Some(&q("2024Q4")))
      .await
      .unwrap()
      .is_some()
  );
}

#[tokio::test]
async fn enforcements_exclude_rows_without_an_action() {
  let s = store().await;

  let actions = s.enforcements_for_violation("GA0000001", "V100", None).await.unwrap();
  let ids: Vec<_> = actions.iter().map(|e| e.enforcement_id.as_str()).collect();
  assert_eq!(ids, ["E1", "E2"]);
  assert_eq!(actions[1].action_type_code.as_deref(), Some("SFJ"));

  let none = s.enforcements_for_violation("GA0000001", "V101", None).await.unwrap();
  assert!(none.is_empty());
}

#[tokio::test]
async fn equal_begin_dates_fall_back_to_key_order() {
  let fixture = "
    INSERT INTO SDWA_PUB_WATER_SYSTEMS (SUBMISSIONYEARQUARTER, PWSID)
    VALUES ('2025Q1', 'GA1'), ('2025Q1', 'GA2'), ('2024Q4', 'GA1');
    INSERT INTO SDWA_VIOLATIONS_ENFORCEMENT
      (SUBMISSIONYEARQUARTER, PWSID, VIOLATION_ID, NON_COMPL_PER_BEGIN_DATE)
    VALUES
      ('2025Q1', 'GA2', 'V1', '2024-06-01'),
      ('2025Q1', 'GA1', 'V3', '2024-06-01'),
      ('2025Q1', 'GA1', 'V1', '2024-06-01'),
      ('2024Q4', 'GA1', 'V9', '2024-06-01'),
      ('2025Q1', 'GA1', 'V2', '2024-06-01');
  ";
  let s = SqliteStore::open_in_memory(Quarter::default(), fixture).await.unwrap();

  let ids: Vec<_> = s
    .violations_for_system("GA1", None)
    .await
    .unwrap()
    .into_iter()
    .map(|v| v.violation_id)
    .collect();
  assert_eq!(ids, ["V1", "V2", "V3"]);

  let keys: Vec<_> = s
    .unaddressed_violations()
    .await
    .unwrap()
    .into_iter()
    .map(|v| format!("{}/{}/{}", v.quarter, v.pwsid, v.violation_id))
    .collect();
  assert_eq!(
    keys,
    ["2024Q4/GA1/V9", "2025Q1/GA1/V1", "2025Q1/GA1/V2", "2025Q1/GA1/V3", "2025Q1/GA2/V1"]
  );
}

#[tokio::test]
async fn repeated_enforcement_id_is_listed_once() {
  // Snapshots built without the uniqueness index may repeat an action.
  let fixture = "
    DROP INDEX violation_enforcement_key;
    INSERT INTO SDWA_PUB_WATER_SYSTEMS (SUBMISSIONYEARQUARTER, PWSID) VALUES ('2025Q1', 'GA1');
    INSERT INTO SDWA_VIOLATIONS_ENFORCEMENT
      (SUBMISSIONYEARQUARTER, PWSID, VIOLATION_ID, ENFORCEMENT_ID, ENFORCEMENT_DATE)
    VALUES
      ('2025Q1', 'GA1', 'V1', 'E1', '2024-02-01'),
      ('2025Q1', 'GA1', 'V1', 'E2', '2024-01-15'),
      ('2025Q1', 'GA1', 'V1', 'E1', '2024-01-01');
  ";
  let s = SqliteStore::open_in_memory(Quarter::default(), fixture).await.unwrap();

  let actions = s.enforcements_for_violation("GA1", "V1", None).await.unwrap();
  let listed: Vec<_> = actions
    .iter()
    .map(|e| (e.enforcement_id.as_str(), e.enforcement_date.as_deref()))
    .collect();
  assert_eq!(listed, [("E1", Some("2024-01-01")), ("E2", Some("2024-01-15"))]);

  let violation = s.violation("GA1", "V1", None).await.unwrap().unwrap();
  assert_eq!(violation.enforcements.len(), 2);
}

// ─── Site visits ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn site_visits_newest_first_in_active_quarter() {
  let s = store().await;
  let visits = s.site_visits(None).await.unwrap();

  let ids: Vec<_> = visits.iter().map(|v| v.visit_id.as_str()).collect();
  assert_eq!(ids, ["SV2", "SV1", "SV3"]);
  assert_eq!(visits[1].pws_name.as_deref(), Some("Atlanta Water Works"));
  assert_eq!(visits[1].management_ops_eval, Some(EvalCode::Significant));
  assert!(!visits[0].has_issues());
  assert!(visits[1].has_issues());
  assert!(visits[2].has_issues());
}

#[tokio::test]
async fn recent_site_visits_respects_limit() {
  let s = store().await;
  let visits = s.recent_site_visits(2).await.unwrap();
  let ids: Vec<_> = visits.iter().map(|v| v.visit_id.as_str()).collect();
  assert_eq!(ids, ["SV2", "SV1"]);
}

#[tokio::test]
async fn oversized_limit_returns_every_visit() {
  let s = store().await;
  assert_eq!(s.site_visits(Some(usize::MAX)).await.unwrap().len(), 3);
  assert!(s.site_visits(Some(0)).await.unwrap().is_empty());
}

#[tokio::test]
async fn unlisted_evaluation_code_is_kept_raw() {
  let fixture = "
    INSERT INTO SDWA_PUB_WATER_SYSTEMS (SUBMISSIONYEARQUARTER, PWSID) VALUES ('2025Q1', 'GA1');
    INSERT INTO SDWA_SITE_VISITS
      (SUBMISSIONYEARQUARTER, PWSID, VISIT_ID, TREATMENT_EVAL_CODE, FINANCIAL_EVAL_CODE)
    VALUES ('2025Q1', 'GA1', 'SV1', 'Q', 'S');
  ";
  let s = SqliteStore::open_in_memory(Quarter::default(), fixture).await.unwrap();

  let visits = s.site_visits(None).await.unwrap();
  assert_eq!(visits[0].treatment_eval, Some(EvalCode::Other("Q".into())));
  assert!(visits[0].has_issues());
}

// ─── Reference codes ─────────────────────────────────────────────────────────

#[tokio::test]
async fn code_description_lookup() {
  let s = store().await;
  assert_eq!(
    s.code_description("CONTAMINANT_CODE", "1040").await.unwrap().as_deref(),
    Some("Nitrate")
  );
  assert!(s.code_description("CONTAMINANT_CODE", "0000").await.unwrap().is_none());
  assert!(s.code_description("OWNER_TYPE_CODE", "X").await.unwrap().is_none());
}

// ─── Snapshot access ─────────────────────────────────────────────────────────

async fn try_delete(s: &SqliteStore) -> Result<usize, tokio_rusqlite::Error> {
  s.conn
    .call(|c| Ok(c.execute("DELETE FROM SDWA_FACILITIES", [])?))
    .await
}

#[tokio::test]
async fn in_memory_store_rejects_writes() {
  let s = store().await;
  assert!(try_delete(&s).await.is_err());
  assert_eq!(s.facilities_for_system("GA0000001", None).await.unwrap().len(), 3);
}

#[tokio::test]
async fn fixtures_must_reference_an_existing_system() {
  let orphan = "
    INSERT INTO SDWA_FACILITIES (SUBMISSIONYEARQUARTER, PWSID, FACILITY_ID)
    VALUES ('2025Q1', 'GA0000404', 'F1');
  ";
  assert!(SqliteStore::open_in_memory(Quarter::default(), orphan).await.is_err());
}

#[tokio::test]
async fn open_missing_snapshot_fails() {
  let path = std::env::temp_dir().join("sdwis-definitely-missing.db");
  let result = SqliteStore::open(&path, Quarter::default()).await;
  assert!(matches!(result, Err(Error::SnapshotMissing(p)) if p == path));
}

#[tokio::test]
async fn open_file_snapshot_read_only() {
  let path = std::env::temp_dir().join(format!("sdwis-store-{}.db", std::process::id()));
  {
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    conn.execute_batch(FIXTURE).unwrap();
  }

  let s = SqliteStore::open(&path, Quarter::default()).await.unwrap();
  assert_eq!(s.active_quarter(), &q("2025Q1"));
  assert_eq!(s.violation_stats().await.unwrap().total_violations, 4);
  assert!(try_delete(&s).await.is_err());

  // The read-only open flag holds even with query_only switched back off.
  s.conn
    .call(|c| {
      c.pragma_update(None, "query_only", false)?;
      Ok(())
    })
    .await
    .unwrap();
  assert!(try_delete(&s).await.is_err());
  assert_eq!(s.facilities_for_system("GA0000001", None).await.unwrap().len(), 3);

  drop(s);
  std::fs::remove_file(&path).ok();
}
