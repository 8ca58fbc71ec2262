//! Establishment records and reconciliation queries.
//!
//! An [`EstablishmentRecord`] is written once by the feed ingester and is
//! read-only from then on. A [`QueryRecord`] lives for a single resolve call.

use serde::{Deserialize, Serialize};

use crate::normalize::{normalize_postcode, prepare_search_name};

/// A food business as published in an authority's hygiene rating feed.
///
/// Address lines and the postcode are present only when the feed supplied
/// them. A stored postcode is always normalized and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstablishmentRecord {
  /// FHRS identifier; the primary key of the store.
  pub id:            String,
  pub name:          String,
  /// Numeric score or a status token such as `Exempt` or `AwaitingInspection`.
  pub rating:        String,
  pub rating_date:   String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub address_line1: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub address_line2: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub address_line3: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub address_line4: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub postcode:      Option<String>,
}

impl EstablishmentRecord {
  /// A record with only the required fields set.
  pub fn new(
    id: impl Into<String>,
    name: impl Into<String>,
    rating: impl Into<String>,
    rating_date: impl Into<String>,
  ) -> Self {
    Self {
      id:            id.into(),
      name:          name.into(),
      rating:        rating.into(),
      rating_date:   rating_date.into(),
      address_line1: None,
      address_line2: None,
      address_line3: None,
      address_line4: None,
      postcode:      None,
    }
  }

  /// Builder-style setter; the value is stored in normalized form.
  pub fn with_postcode(mut self, raw: &str) -> Self {
    self.postcode = crate::normalize::normalize_stored_postcode(raw);
    self
  }
}

/// A restaurant to reconcile, as read from the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
  pub name:     String,
  pub postcode: String,
}

impl QueryRecord {
  pub fn new(name: impl Into<String>, postcode: impl Into<String>) -> Self {
    Self { name: name.into(), postcode: postcode.into() }
  }

  pub fn normalized_postcode(&self) -> String { normalize_postcode(&self.postcode) }

  pub fn search_name(&self) -> &str { prepare_search_name(&self.name) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn with_postcode_normalizes() {
    let r = EstablishmentRecord::new("1", "The Ship Inn", "5", "2021-01-01")
      .with_postcode("sw1a 1aa");
    assert_eq!(r.postcode.as_deref(), Some("SW1A1AA"));
  }

  #[test]
  fn blank_postcode_is_absent() {
    let r = EstablishmentRecord::new("1", "Cafe", "5", "").with_postcode("  ");
    assert_eq!(r.postcode, None);
  }

  #[test]
  fn absent_address_lines_are_not_serialized() {
    let r = EstablishmentRecord::new("7", "Cafe", "Exempt", "2020-02-02");
    let json = serde_json::to_value(&r).unwrap();
    let obj = json.as_object().unwrap();
    assert!(!obj.contains_key("address_line1"));
    assert!(!obj.contains_key("postcode"));
    assert_eq!(obj["rating"], "Exempt");
  }

  #[test]
  fn query_record_derives_fields() {
    let q = QueryRecord::new("Ship Inn", "sw1a 1aa");
    assert_eq!(q.normalized_postcode(), "SW1A1AA");
    assert_eq!(q.search_name(), "Ship Inn");
  }
}
