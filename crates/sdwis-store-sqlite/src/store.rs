//! [`SqliteStore`]: the SQLite implementation of [`SnapshotStore`].

use std::{collections::HashSet, path::Path};

use rusqlite::{OpenFlags, OptionalExtension as _, Row};
use sdwis_core::{
  Quarter,
  sample::LcrSample,
  store::{SEARCH_LIMIT, SnapshotStore},
  system::{ACTIVE_CODE, Facility, GeographicArea, SystemSummary, WaterSystem},
  violation::{Enforcement, Violation, ViolationFilter, ViolationStats, ViolationStatus},
  visit::SiteVisit,
};

use crate::{
  Error, Result,
  encode::{
    AREA_COLUMNS, ENFORCEMENT_COLUMNS, FACILITY_COLUMNS, SAMPLE_COLUMNS, SUMMARY_COLUMNS,
    SYSTEM_COLUMNS, VIOLATION_COLUMNS, VISIT_COLUMNS, ViolationRow, decode_area,
    decode_enforcement, decode_facility, decode_sample, decode_summary, decode_system,
    decode_violation_row, decode_visit, fold_violations, like_pattern,
  },
  schema::SCHEMA,
};

/// Violations joined to their system's name for the same quarter.
const VIOLATION_FROM: &str = "
  FROM SDWA_VIOLATIONS_ENFORCEMENT v
  LEFT JOIN SDWA_PUB_WATER_SYSTEMS p
    ON p.PWSID = v.PWSID AND p.SUBMISSIONYEARQUARTER = v.SUBMISSIONYEARQUARTER";

/// Most recent non-compliance first; the key columns keep ties stable.
const VIOLATION_ORDER: &str = "
  ORDER BY v.NON_COMPL_PER_BEGIN_DATE DESC NULLS LAST,
           v.SUBMISSIONYEARQUARTER, v.PWSID, v.VIOLATION_ID, v.ENFORCEMENT_ID";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A read-only view over one SDWA snapshot file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
  quarter:         Quarter,
}

impl SqliteStore {
  /// Open the snapshot at `path` read-only, scoped to `quarter`.
  ///
  /// The file must already exist; nothing is ever written to it.
  pub async fn open(path: impl AsRef<Path>, quarter: Quarter) -> Result<Self> {
    let path = path.as_ref();
    if !path.is_file() {
      return Err(Error::SnapshotMissing(path.to_path_buf()));
    }

    let conn = tokio_rusqlite::Connection::open_with_flags(
      path,
      OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_NO_MUTEX
        | OpenFlags::SQLITE_OPEN_URI,
    )
    .await?;
    conn
      .call(|conn| {
        conn.pragma_update(None, "query_only", true)?;
        Ok(())
      })
      .await?;

    tracing::info!(path = %path.display(), %quarter, "opened snapshot read-only");
    Ok(Self { conn, quarter })
  }

  /// Build an in-memory snapshot from `fixture_sql`, for tests.
  ///
  /// The schema is created, the fixture statements are run, and the
  /// connection is then switched to `query_only` like a file snapshot.
  pub async fn open_in_memory(quarter: Quarter, fixture_sql: impl Into<String>) -> Result<Self> {
    let fixture_sql = fixture_sql.into();
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    conn
      .call(move |conn| {
        conn.execute_batch(SCHEMA)?;
        conn.execute_batch(&fixture_sql)?;
        conn.pragma_update(None, "query_only", true)?;
        Ok(())
      })
      .await?;
    Ok(Self { conn, quarter })
  }

  fn quarter_or_active(&self, quarter: Option<&Quarter>) -> String {
    quarter.unwrap_or(&self.quarter).as_str().to_owned()
  }

  /// Run `sql` with positional text parameters and decode every row.
  async fn query_rows<T>(
    &self,
    sql: String,
    params: Vec<String>,
    decode: fn(&Row<'_>) -> rusqlite::Result<T>,
  ) -> Result<Vec<T>>
  where
    T: Send + 'static,
  {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), decode)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  /// Select violations matching `conditions` (ANDed) and fold their
  /// enforcement rows.
  async fn query_violations(
    &self,
    conditions: Vec<&'static str>,
    params: Vec<String>,
  ) -> Result<Vec<Violation>> {
    let where_clause = if conditions.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", conditions.join(" AND "))
    };
    let sql = format!(
      "SELECT {VIOLATION_COLUMNS}, {ENFORCEMENT_COLUMNS}
       {VIOLATION_FROM}
       {where_clause}
       {VIOLATION_ORDER}"
    );

    let rows: Vec<ViolationRow> = self.query_rows(sql, params, decode_violation_row).await?;
    Ok(fold_violations(rows))
  }
}

// ─── SnapshotStore impl ──────────────────────────────────────────────────────

impl SnapshotStore for SqliteStore {
  type Error = Error;

  fn active_quarter(&self) -> &Quarter { &self.quarter }

  // ── Water systems ─────────────────────────────────────────────────────────

  async fn active_water_systems(&self) -> Result<Vec<WaterSystem>> {
    let sql = format!(
      "SELECT {SYSTEM_COLUMNS}
       FROM SDWA_PUB_WATER_SYSTEMS p
       WHERE p.PWS_ACTIVITY_CODE = ?1
       ORDER BY p.SUBMISSIONYEARQUARTER, p.PWSID"
    );
    self.query_rows(sql, vec![ACTIVE_CODE.to_owned()], decode_system).await
  }

  async fn water_systems(&self, quarter: Option<&Quarter>) -> Result<Vec<WaterSystem>> {
    let sql = format!(
      "SELECT {SYSTEM_COLUMNS}
       FROM SDWA_PUB_WATER_SYSTEMS p
       WHERE p.SUBMISSIONYEARQUARTER = ?1
       ORDER BY p.PWS_NAME, p.PWSID"
    );
    self.query_rows(sql, vec![self.quarter_or_active(quarter)], decode_system).await
  }

  async fn water_system(
    &self,
    pwsid: &str,
    quarter: Option<&Quarter>,
  ) -> Result<Option<WaterSystem>> {
    let sql = format!(
      "SELECT {SYSTEM_COLUMNS}
       FROM SDWA_PUB_WATER_SYSTEMS p
       WHERE p.PWSID = ?1 AND p.SUBMISSIONYEARQUARTER = ?2"
    );
    let params = vec![pwsid.to_owned(), self.quarter_or_active(quarter)];

    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(
            conn
              .query_row(&sql, rusqlite::params_from_iter(params.iter()), decode_system)
              .optional()?,
          )
        })
        .await?,
    )
  }

  async fn search_water_systems(&self, term: &str) -> Result<Vec<WaterSystem>> {
    let sql = format!(
      "SELECT {SYSTEM_COLUMNS}
       FROM SDWA_PUB_WATER_SYSTEMS p
       WHERE p.PWS_NAME LIKE ?1 ESCAPE '\\'
         AND p.SUBMISSIONYEARQUARTER = ?2
       ORDER BY p.PWS_NAME, p.PWSID
       LIMIT {SEARCH_LIMIT}"
    );
    let params = vec![like_pattern(term), self.quarter.as_str().to_owned()];
    self.query_rows(sql, params, decode_system).await
  }

  async fn water_systems_in_county(&self, county: &str) -> Result<Vec<SystemSummary>> {
    let sql = format!(
      "SELECT DISTINCT {SUMMARY_COLUMNS}
       FROM SDWA_PUB_WATER_SYSTEMS p
       INNER JOIN SDWA_GEOGRAPHIC_AREAS g
         ON g.PWSID = p.PWSID AND g.SUBMISSIONYEARQUARTER = p.SUBMISSIONYEARQUARTER
       WHERE g.COUNTY_SERVED = ?1 AND p.SUBMISSIONYEARQUARTER = ?2
       ORDER BY p.PWS_NAME, p.PWSID"
    );
    let params = vec![county.to_owned(), self.quarter.as_str().to_owned()];
    self.query_rows(sql, params, decode_summary).await
  }

  // ── Per-system records ────────────────────────────────────────────────────

  async fn facilities_for_system(
    &self,
    pwsid: &str,
    quarter: Option<&Quarter>,
  ) -> Result<Vec<Facility>> {
    let sql = format!(
      "SELECT {FACILITY_COLUMNS}
       FROM SDWA_FACILITIES f
       WHERE f.PWSID = ?1 AND f.SUBMISSIONYEARQUARTER = ?2
       ORDER BY f.FACILITY_ID"
    );
    let params = vec![pwsid.to_owned(), self.quarter_or_active(quarter)];
    self.query_rows(sql, params, decode_facility).await
  }

  async fn lcr_samples_for_system(
    &self,
    pwsid: &str,
    quarter: Option<&Quarter>,
  ) -> Result<Vec<LcrSample>> {
    let sql = format!(
      "SELECT {SAMPLE_COLUMNS}
       FROM SDWA_LCR_SAMPLES s
       WHERE s.PWSID = ?1 AND s.SUBMISSIONYEARQUARTER = ?2
       ORDER BY s.SAMPLING_END_DATE DESC NULLS LAST, s.SAMPLE_ID, s.SAR_ID"
    );
    let params = vec![pwsid.to_owned(), self.quarter_or_active(quarter)];
    self.query_rows(sql, params, decode_sample).await
  }

  async fn geographic_areas_for_system(
    &self,
    pwsid: &str,
    quarter: Option<&Quarter>,
  ) -> Result<Vec<GeographicArea>> {
    let sql = format!(
      "SELECT {AREA_COLUMNS}
       FROM SDWA_GEOGRAPHIC_AREAS g
       WHERE g.PWSID = ?1 AND g.SUBMISSIONYEARQUARTER = ?2
       ORDER BY g.AREA_TYPE_CODE, g.GEO_ID"
    );
    let params = vec![pwsid.to_owned(), self.quarter_or_active(quarter)];
    self.query_rows(sql, params, decode_area).await
  }

  // ── Violations ────────────────────────────────────────────────────────────

  async fn violations_for_system(
    &self,
    pwsid: &str,
    quarter: Option<&Quarter>,
  ) -> Result<Vec<Violation>> {
    self
      .query_violations(
        vec!["v.PWSID = ?1", "v.SUBMISSIONYEARQUARTER = ?2"],
        vec![pwsid.to_owned(), self.quarter_or_active(quarter)],
      )
      .await
  }

  async fn unaddressed_violations(&self) -> Result<Vec<Violation>> {
    self
      .query_violations(vec!["v.COMPL_PER_END_DATE IS NULL"], Vec::new())
      .await
  }

  async fn violations(&self, filter: &ViolationFilter) -> Result<Vec<Violation>> {
    // Anonymous placeholders: parameters bind in push order.
    let mut conditions = vec!["v.SUBMISSIONYEARQUARTER = ?"];
    let mut params = vec![self.quarter.as_str().to_owned()];

    match filter.status {
      Some(ViolationStatus::Resolved) => conditions.push("v.COMPL_PER_END_DATE IS NOT NULL"),
      Some(ViolationStatus::Unaddressed) => conditions.push("v.COMPL_PER_END_DATE IS NULL"),
      None => {}
    }
    if let Some(health_based) = filter.health_based {
      conditions.push("v.IS_HEALTH_BASED_IND = ?");
      params.push(if health_based { "Y" } else { "N" }.to_owned());
    }
    if let Some(code) = &filter.contaminant_code {
      conditions.push("v.CONTAMINANT_CODE = ?");
      params.push(code.clone());
    }

    self.query_violations(conditions, params).await
  }

  async fn violation(
    &self,
    pwsid: &str,
    violation_id: &str,
    quarter: Option<&Quarter>,
  ) -> Result<Option<Violation>> {
    let found = self
      .query_violations(
        vec!["v.PWSID = ?1", "v.VIOLATION_ID = ?2", "v.SUBMISSIONYEARQUARTER = ?3"],
        vec![
          pwsid.to_owned(),
          violation_id.to_owned(),
          self.quarter_or_active(quarter),
        ],
      )
      .await?;
    Ok(found.into_iter().next())
  }

  async fn enforcements_for_violation(
    &self,
    pwsid: &str,
    violation_id: &str,
    quarter: Option<&Quarter>,
  ) -> Result<Vec<Enforcement>> {
    let sql = format!(
      "SELECT {ENFORCEMENT_COLUMNS}
       FROM SDWA_VIOLATIONS_ENFORCEMENT v
       WHERE v.PWSID = ?1
         AND v.VIOLATION_ID = ?2
         AND v.SUBMISSIONYEARQUARTER = ?3
         AND v.ENFORCEMENT_ID IS NOT NULL
       ORDER BY v.ENFORCEMENT_DATE NULLS LAST, v.ENFORCEMENT_ID"
    );
    let params = vec![
      pwsid.to_owned(),
      violation_id.to_owned(),
      self.quarter_or_active(quarter),
    ];

    let actions = self
      .query_rows(sql, params, |row| decode_enforcement(row, 0))
      .await?;

    // One entry per enforcement id, keeping the earliest-dated row.
    let mut seen = HashSet::new();
    Ok(
      actions
        .into_iter()
        .flatten()
        .filter(|action| seen.insert(action.enforcement_id.clone()))
        .collect(),
    )
  }

  async fn violation_stats(&self) -> Result<ViolationStats> {
    let quarter = self.quarter.as_str().to_owned();

    // Enforcement rows repeat the violation columns, so collapse to one row
    // per violation key before counting.
    let stats = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*),
                  COALESCE(SUM(health_based = 'Y'), 0),
                  COALESCE(SUM(compl_end IS NULL), 0),
                  COALESCE(SUM(compl_end IS NOT NULL), 0)
           FROM (
             SELECT MAX(IS_HEALTH_BASED_IND) AS health_based,
                    MAX(COMPL_PER_END_DATE)  AS compl_end
             FROM SDWA_VIOLATIONS_ENFORCEMENT
             WHERE SUBMISSIONYEARQUARTER = ?1
             GROUP BY PWSID, VIOLATION_ID
           )",
          rusqlite::params![quarter],
          |row| {
            Ok(ViolationStats {
              total_violations:        row.get(0)?,
              health_based_violations: row.get(1)?,
              unaddressed_violations:  row.get(2)?,
              resolved_violations:     row.get(3)?,
            })
          },
        )?)
      })
      .await?;
    Ok(stats)
  }

  // ── Site visits ───────────────────────────────────────────────────────────

  async fn site_visits(&self, limit: Option<usize>) -> Result<Vec<SiteVisit>> {
    // SQLite treats a negative LIMIT as unbounded; larger values saturate.
    let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
    let quarter = self.quarter.as_str().to_owned();
    let sql = format!(
      "SELECT {VISIT_COLUMNS}
       FROM SDWA_SITE_VISITS sv
       LEFT JOIN SDWA_PUB_WATER_SYSTEMS p
         ON p.PWSID = sv.PWSID AND p.SUBMISSIONYEARQUARTER = sv.SUBMISSIONYEARQUARTER
       WHERE sv.SUBMISSIONYEARQUARTER = ?1
       ORDER BY sv.VISIT_DATE DESC NULLS LAST, sv.PWSID, sv.VISIT_ID
       LIMIT ?2"
    );

    let visits = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let visits = stmt
          .query_map(rusqlite::params![quarter, limit], decode_visit)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(visits)
      })
      .await?;
    Ok(visits)
  }

  // ── Reference codes ───────────────────────────────────────────────────────

  async fn code_description(&self, value_type: &str, value_code: &str) -> Result<Option<String>> {
    let value_type = value_type.to_owned();
    let value_code = value_code.to_owned();

    let description: Option<Option<String>> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT VALUE_DESCRIPTION FROM SDWA_REF_CODE_VALUES
               WHERE VALUE_TYPE = ?1 AND VALUE_CODE = ?2",
              rusqlite::params![value_type, value_code],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(description.flatten())
  }
}
