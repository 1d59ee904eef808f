//! Site visits (sanitary surveys and other on-site inspections).

use serde::{Deserialize, Serialize};

use crate::Quarter;

/// The outcome recorded for one evaluated area of a site visit.
///
/// Serialized as the SDWIS letter. A letter outside the published code list
/// is kept verbatim in [`EvalCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EvalCode {
  /// `N`: no deficiencies.
  NoDeficiencies,
  /// `M`: major deficiencies.
  Major,
  /// `S`: significant deficiencies.
  Significant,
  /// `R`: recommendations made.
  Recommendations,
  /// `X`: not evaluated.
  NotEvaluated,
  /// `Z`: not applicable.
  NotApplicable,
  /// `D`: sanitary defect.
  Defect,
  Other(String),
}

impl EvalCode {
  pub fn from_code(code: &str) -> Self {
    match code {
      "N" => Self::NoDeficiencies,
      "M" => Self::Major,
      "S" => Self::Significant,
      "R" => Self::Recommendations,
      "X" => Self::NotEvaluated,
      "Z" => Self::NotApplicable,
      "D" => Self::Defect,
      other => Self::Other(other.to_owned()),
    }
  }

  pub fn as_code(&self) -> &str {
    match self {
      Self::NoDeficiencies => "N",
      Self::Major => "M",
      Self::Significant => "S",
      Self::Recommendations => "R",
      Self::NotEvaluated => "X",
      Self::NotApplicable => "Z",
      Self::Defect => "D",
      Self::Other(code) => code,
    }
  }

  /// Codes that flag a visit as having issues.
  pub fn is_issue(&self) -> bool { matches!(self, Self::Significant | Self::Major) }
}

impl From<String> for EvalCode {
  fn from(code: String) -> Self { Self::from_code(&code) }
}

impl From<EvalCode> for String {
  fn from(code: EvalCode) -> Self {
    match code {
      EvalCode::Other(raw) => raw,
      known => known.as_code().to_owned(),
    }
  }
}

/// One row of `SDWA_SITE_VISITS`, joined to its system's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteVisit {
  pub quarter:             Quarter,
  pub pwsid:               String,
  pub visit_id:            String,
  pub pws_name:            Option<String>,
  pub visit_date:          Option<String>,
  pub agency_type_code:    Option<String>,
  pub visit_reason_code:   Option<String>,
  pub management_ops_eval: Option<EvalCode>,
  pub source_water_eval:   Option<EvalCode>,
  pub treatment_eval:      Option<EvalCode>,
  pub distribution_eval:   Option<EvalCode>,
  pub financial_eval:      Option<EvalCode>,
  pub compliance_eval:     Option<EvalCode>,
  pub visit_comments:      Option<String>,
}

impl SiteVisit {
  pub fn evaluations(&self) -> [Option<&EvalCode>; 6] {
    [
      self.management_ops_eval.as_ref(),
      self.source_water_eval.as_ref(),
      self.treatment_eval.as_ref(),
      self.distribution_eval.as_ref(),
      self.financial_eval.as_ref(),
      self.compliance_eval.as_ref(),
    ]
  }

  /// True iff any evaluated area recorded a significant or major deficiency.
  pub fn has_issues(&self) -> bool {
    self.evaluations().into_iter().flatten().any(|code| code.is_issue())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn visit(evals: [Option<EvalCode>; 6]) -> SiteVisit {
    let [management, source, treatment, distribution, financial, compliance] = evals;
    SiteVisit {
      quarter:             Quarter::default(),
      pwsid:               "GA0000001".into(),
      visit_id:            "V1".into(),
      pws_name:            None,
      visit_date:          Some("2025-02-11".into()),
      agency_type_code:    None,
      visit_reason_code:   Some("SNSV".into()),
      management_ops_eval: management,
      source_water_eval:   source,
      treatment_eval:      treatment,
      distribution_eval:   distribution,
      financial_eval:      financial,
      compliance_eval:     compliance,
      visit_comments:      None,
    }
  }

  #[test]
  fn known_codes_round_trip_through_letters() {
    for code in ["N", "M", "S", "R", "X", "Z", "D"] {
      let eval = EvalCode::from_code(code);
      assert!(!matches!(eval, EvalCode::Other(_)), "{code}");
      assert_eq!(eval.as_code(), code);
    }
  }

  #[test]
  fn unlisted_code_is_kept_verbatim() {
    let eval = EvalCode::from_code("Q");
    assert_eq!(eval, EvalCode::Other("Q".into()));
    assert!(!eval.is_issue());
    assert_eq!(serde_json::to_string(&eval).unwrap(), "\"Q\"");
  }

  #[test]
  fn significant_or_major_in_any_area_is_an_issue() {
    use EvalCode::*;

    assert!(!visit([None, None, None, None, None, None]).has_issues());
    assert!(
      !visit([
        Some(NoDeficiencies),
        Some(Recommendations),
        Some(NotEvaluated),
        Some(NotApplicable),
        Some(Defect),
        None,
      ])
      .has_issues()
    );
    assert!(visit([None, None, None, None, None, Some(Significant)]).has_issues());
    assert!(visit([Some(Major), None, None, None, None, None]).has_issues());
  }

  #[test]
  fn codes_serialize_as_letters() {
    let json = serde_json::to_string(&EvalCode::Significant).unwrap();
    assert_eq!(json, "\"S\"");
  }
}
