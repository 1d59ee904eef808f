//! SQL schema of an SDWA snapshot file.
//!
//! Production snapshots are produced by the external ETL loader; this DDL is
//! only executed for in-memory stores built from fixtures. Column names match
//! the SDWIS CSV headers.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS SDWA_REF_CODE_VALUES (
    VALUE_TYPE        TEXT NOT NULL,
    VALUE_CODE        TEXT NOT NULL,
    VALUE_DESCRIPTION TEXT,
    PRIMARY KEY (VALUE_TYPE, VALUE_CODE)
);

CREATE TABLE IF NOT EXISTS SDWA_PUB_WATER_SYSTEMS (
    SUBMISSIONYEARQUARTER     TEXT NOT NULL,
    PWSID                     TEXT NOT NULL,
    PWS_NAME                  TEXT,
    PRIMACY_AGENCY_CODE       TEXT,
    EPA_REGION                TEXT,
    PWS_ACTIVITY_CODE         TEXT,    -- 'A' = active
    PWS_DEACTIVATION_DATE     TEXT,
    PWS_TYPE_CODE             TEXT,    -- 'CWS' | 'NTNCWS' | 'TNCWS'
    GW_SW_CODE                TEXT,
    PRIMARY_SOURCE_CODE       TEXT,
    OWNER_TYPE_CODE           TEXT,
    POPULATION_SERVED_COUNT   INTEGER,
    SERVICE_CONNECTIONS_COUNT INTEGER,
    IS_WHOLESALER_IND         TEXT,
    IS_SCHOOL_OR_DAYCARE_IND  TEXT,
    ORG_NAME                  TEXT,
    ADMIN_NAME                TEXT,
    EMAIL_ADDR                TEXT,
    PHONE_NUMBER              TEXT,
    ADDRESS_LINE1             TEXT,
    ADDRESS_LINE2             TEXT,
    CITY_NAME                 TEXT,
    ZIP_CODE                  TEXT,
    STATE_CODE                TEXT,
    FIRST_REPORTED_DATE       TEXT,
    LAST_REPORTED_DATE        TEXT,
    PRIMARY KEY (SUBMISSIONYEARQUARTER, PWSID)
);

CREATE TABLE IF NOT EXISTS SDWA_FACILITIES (
    SUBMISSIONYEARQUARTER      TEXT NOT NULL,
    PWSID                      TEXT NOT NULL,
    FACILITY_ID                TEXT NOT NULL,
    FACILITY_NAME              TEXT,
    STATE_FACILITY_ID          TEXT,
    FACILITY_ACTIVITY_CODE     TEXT,
    FACILITY_DEACTIVATION_DATE TEXT,
    FACILITY_TYPE_CODE         TEXT,
    IS_SOURCE_IND              TEXT,
    WATER_TYPE_CODE            TEXT,
    AVAILABILITY_CODE          TEXT,
    SELLER_PWSID               TEXT,
    SELLER_PWS_NAME            TEXT,
    FILTRATION_STATUS_CODE     TEXT,
    IS_SOURCE_TREATED_IND      TEXT,
    PRIMARY KEY (SUBMISSIONYEARQUARTER, PWSID, FACILITY_ID),
    FOREIGN KEY (SUBMISSIONYEARQUARTER, PWSID)
        REFERENCES SDWA_PUB_WATER_SYSTEMS(SUBMISSIONYEARQUARTER, PWSID)
);

-- One row per (violation, enforcement action). A violation without any
-- action has a single row whose ENFORCEMENT_* columns are all NULL.
CREATE TABLE IF NOT EXISTS SDWA_VIOLATIONS_ENFORCEMENT (
    SUBMISSIONYEARQUARTER        TEXT NOT NULL,
    PWSID                        TEXT NOT NULL,
    VIOLATION_ID                 TEXT NOT NULL,
    FACILITY_ID                  TEXT,
    COMPL_PER_BEGIN_DATE         TEXT,
    COMPL_PER_END_DATE           TEXT,    -- NULL = unaddressed
    NON_COMPL_PER_BEGIN_DATE     TEXT,
    NON_COMPL_PER_END_DATE       TEXT,
    VIOLATION_CODE               TEXT,
    VIOLATION_CATEGORY_CODE      TEXT,    -- 'MR' | 'MCL' | 'TT' | 'OTHER'
    IS_HEALTH_BASED_IND          TEXT,
    CONTAMINANT_CODE             TEXT,
    VIOL_MEASURE                 REAL,
    UNIT_OF_MEASURE              TEXT,
    FEDERAL_MCL                  TEXT,
    STATE_MCL                    REAL,
    IS_MAJOR_VIOL_IND            TEXT,
    SEVERITY_IND_CNT             INTEGER,
    VIOLATION_STATUS             TEXT,    -- as reported; never read
    PUBLIC_NOTIFICATION_TIER     INTEGER,
    RULE_CODE                    TEXT,
    RULE_GROUP_CODE              TEXT,
    RULE_FAMILY_CODE             TEXT,
    VIOL_FIRST_REPORTED_DATE     TEXT,
    VIOL_LAST_REPORTED_DATE      TEXT,
    ENFORCEMENT_ID               TEXT,
    ENFORCEMENT_DATE             TEXT,
    ENFORCEMENT_ACTION_TYPE_CODE TEXT,
    ENF_ACTION_CATEGORY          TEXT,
    ENF_ORIGINATOR_CODE          TEXT,
    ENF_FIRST_REPORTED_DATE      TEXT,
    ENF_LAST_REPORTED_DATE       TEXT,
    FOREIGN KEY (SUBMISSIONYEARQUARTER, PWSID)
        REFERENCES SDWA_PUB_WATER_SYSTEMS(SUBMISSIONYEARQUARTER, PWSID)
);

CREATE UNIQUE INDEX IF NOT EXISTS violation_enforcement_key
    ON SDWA_VIOLATIONS_ENFORCEMENT(SUBMISSIONYEARQUARTER, PWSID, VIOLATION_ID, ENFORCEMENT_ID);

CREATE TABLE IF NOT EXISTS SDWA_LCR_SAMPLES (
    SUBMISSIONYEARQUARTER TEXT NOT NULL,
    PWSID                 TEXT NOT NULL,
    SAMPLE_ID             TEXT NOT NULL,
    SAMPLING_END_DATE     TEXT,
    SAMPLING_START_DATE   TEXT,
    RECONCILIATION_ID     TEXT,
    SAR_ID                INTEGER NOT NULL,
    CONTAMINANT_CODE      TEXT,
    RESULT_SIGN_CODE      TEXT,    -- 'L' = less than
    SAMPLE_MEASURE        REAL,
    UNIT_OF_MEASURE       TEXT,
    PRIMARY KEY (SUBMISSIONYEARQUARTER, PWSID, SAMPLE_ID, SAR_ID),
    FOREIGN KEY (SUBMISSIONYEARQUARTER, PWSID)
        REFERENCES SDWA_PUB_WATER_SYSTEMS(SUBMISSIONYEARQUARTER, PWSID)
);

CREATE TABLE IF NOT EXISTS SDWA_SITE_VISITS (
    SUBMISSIONYEARQUARTER    TEXT NOT NULL,
    PWSID                    TEXT NOT NULL,
    VISIT_ID                 TEXT NOT NULL,
    VISIT_DATE               TEXT,
    AGENCY_TYPE_CODE         TEXT,
    VISIT_REASON_CODE        TEXT,
    MANAGEMENT_OPS_EVAL_CODE TEXT,
    SOURCE_WATER_EVAL_CODE   TEXT,
    TREATMENT_EVAL_CODE      TEXT,
    DISTRIBUTION_EVAL_CODE   TEXT,
    FINANCIAL_EVAL_CODE      TEXT,
    COMPLIANCE_EVAL_CODE     TEXT,
    VISIT_COMMENTS           TEXT,
    PRIMARY KEY (SUBMISSIONYEARQUARTER, PWSID, VISIT_ID),
    FOREIGN KEY (SUBMISSIONYEARQUARTER, PWSID)
        REFERENCES SDWA_PUB_WATER_SYSTEMS(SUBMISSIONYEARQUARTER, PWSID)
);

CREATE TABLE IF NOT EXISTS SDWA_GEOGRAPHIC_AREAS (
    SUBMISSIONYEARQUARTER TEXT NOT NULL,
    PWSID                 TEXT NOT NULL,
    GEO_ID                TEXT NOT NULL,
    AREA_TYPE_CODE        TEXT NOT NULL,
    TRIBAL_CODE           TEXT,
    STATE_SERVED          TEXT,
    ANSI_ENTITY_CODE      TEXT,
    ZIP_CODE_SERVED       TEXT,
    CITY_SERVED           TEXT,
    COUNTY_SERVED         TEXT,
    PRIMARY KEY (SUBMISSIONYEARQUARTER, PWSID, GEO_ID, AREA_TYPE_CODE),
    FOREIGN KEY (SUBMISSIONYEARQUARTER, PWSID)
        REFERENCES SDWA_PUB_WATER_SYSTEMS(SUBMISSIONYEARQUARTER, PWSID)
);

CREATE INDEX IF NOT EXISTS pws_activity_idx  ON SDWA_PUB_WATER_SYSTEMS(PWS_ACTIVITY_CODE);
CREATE INDEX IF NOT EXISTS vio_dates_idx     ON SDWA_VIOLATIONS_ENFORCEMENT(NON_COMPL_PER_BEGIN_DATE);
CREATE INDEX IF NOT EXISTS vio_health_idx    ON SDWA_VIOLATIONS_ENFORCEMENT(IS_HEALTH_BASED_IND);
CREATE INDEX IF NOT EXISTS lcr_dates_idx     ON SDWA_LCR_SAMPLES(SAMPLING_END_DATE);
CREATE INDEX IF NOT EXISTS visit_date_idx    ON SDWA_SITE_VISITS(VISIT_DATE);
CREATE INDEX IF NOT EXISTS geo_county_idx    ON SDWA_GEOGRAPHIC_AREAS(COUNTY_SERVED);
";
