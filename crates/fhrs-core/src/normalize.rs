//! Canonical forms for postcodes and search names.

/// Uppercase `raw` and remove every whitespace character.
///
/// Idempotent. Blank input yields an empty string, which never equals a
/// stored postcode.
pub fn normalize_postcode(raw: &str) -> String {
  raw
    .chars()
    .filter(|c| !c.is_whitespace())
    .flat_map(char::to_uppercase)
    .collect()
}

/// The form a postcode takes in the store: normalized, or absent when blank.
pub fn normalize_stored_postcode(raw: &str) -> Option<String> {
  let normalized = normalize_postcode(raw);
  (!normalized.is_empty()).then_some(normalized)
}

/// Names go to the text search untouched; case and diacritic folding are the
/// search engine's job.
pub fn prepare_search_name(raw: &str) -> &str { raw }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn collapses_case_and_spacing() {
    assert_eq!(normalize_postcode("ec1a 1bb"), "EC1A1BB");
    assert_eq!(normalize_postcode("EC1A1BB"), "EC1A1BB");
    assert_eq!(normalize_postcode(" ec1a\t1bb\n"), "EC1A1BB");
  }

  #[test]
  fn is_idempotent() {
    for raw in ["m1 1ae", "  SW1A 1AA ", "", "b\u{a0}33 8th"] {
      let once = normalize_postcode(raw);
      assert_eq!(normalize_postcode(&once), once);
    }
  }

  #[test]
  fn strips_non_ascii_whitespace() {
    assert_eq!(normalize_postcode("b\u{a0}33 8th"), "B338TH");
  }

  #[test]
  fn empty_input_yields_empty() {
    assert_eq!(normalize_postcode(""), "");
    assert_eq!(normalize_postcode(" \t "), "");
    assert_eq!(normalize_stored_postcode(" "), None);
  }

  #[test]
  fn search_name_is_passed_through() {
    assert_eq!(prepare_search_name("Café Rouge"), "Café Rouge");
    assert_eq!(prepare_search_name(""), "");
  }
}
