//! Lead and Copper Rule sample results.

use serde::{Deserialize, Serialize};

use crate::Quarter;

/// Result sign code meaning the measure is an upper bound ("less than").
pub const LESS_THAN_SIGN: &str = "L";

/// One analyte result of an LCR sample. A sample with several analytes has one
/// row per `sar_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LcrSample {
  pub quarter:             Quarter,
  pub pwsid:               String,
  pub sample_id:           String,
  pub sar_id:              i64,
  pub sampling_start_date: Option<String>,
  pub sampling_end_date:   Option<String>,
  pub reconciliation_id:   Option<String>,
  pub contaminant_code:    Option<String>,
  pub result_sign_code:    Option<String>,
  pub sample_measure:      Option<f64>,
  pub unit_of_measure:     Option<String>,
}

impl LcrSample {
  /// The measure as shown to readers: `<0.005` for below-detection results.
  pub fn display_measure(&self) -> Option<String> {
    let measure = self.sample_measure?;
    if self.result_sign_code.as_deref() == Some(LESS_THAN_SIGN) {
      Some(format!("<{measure}"))
    } else {
      Some(measure.to_string())
    }
  }
}
