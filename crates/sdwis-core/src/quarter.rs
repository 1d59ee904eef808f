//! The submission quarter that scopes every snapshot row.
//!
//! SDWIS publishes one immutable extract per calendar quarter. Ids are only
//! unique within a quarter, so every "by parent id" lookup carries one.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A validated `YYYYQn` submission quarter, e.g. `2025Q1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Quarter(String);

impl Quarter {
  /// The quarter the dashboard ships pinned to.
  pub const DEFAULT: &'static str = "2025Q1";

  pub fn as_str(&self) -> &str { &self.0 }
}

impl Default for Quarter {
  fn default() -> Self { Self(Self::DEFAULT.to_owned()) }
}

impl FromStr for Quarter {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let bytes = s.as_bytes();
    let valid = bytes.len() == 6
      && bytes[..4].iter().all(u8::is_ascii_digit)
      && bytes[4] == b'Q'
      && (b'1'..=b'4').contains(&bytes[5]);
    if valid {
      Ok(Self(s.to_owned()))
    } else {
      Err(Error::InvalidQuarter(s.to_owned()))
    }
  }
}

impl TryFrom<String> for Quarter {
  type Error = Error;

  fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<Quarter> for String {
  fn from(q: Quarter) -> Self { q.0 }
}

impl fmt::Display for Quarter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_valid_quarter() {
    let q: Quarter = "2024Q3".parse().unwrap();
    assert_eq!(q.as_str(), "2024Q3");
  }

  #[test]
  fn default_is_pinned_quarter() {
    assert_eq!(Quarter::default().as_str(), "2025Q1");
  }

  #[test]
  fn rejects_malformed_quarters() {
    for bad in ["", "2025", "2025Q0", "2025Q5", "2025q1", "25Q1", "2025Q12", "ABCDQ1"] {
      assert!(
        matches!(bad.parse::<Quarter>(), Err(Error::InvalidQuarter(_))),
        "{bad:?} should be rejected"
      );
    }
  }

  #[test]
  fn deserializes_through_validation() {
    let q: Quarter = serde_json::from_str("\"2025Q2\"").unwrap();
    assert_eq!(q.to_string(), "2025Q2");
    assert!(serde_json::from_str::<Quarter>("\"Q2-2025\"").is_err());
  }
}
