//! The three-way result of reconciling one restaurant against the store.

use serde::{Deserialize, Serialize};

pub const NO_MATCH: &str = "No match";
pub const MULTIPLE_MATCHES: &str = "Multiple matches";
pub const SINGLE_MATCH: &str = "Single match";

/// How many stored establishments correspond to a query.
///
/// Zero and several matches are ordinary outcomes, not errors. Only a single
/// match carries rating data; with several candidates none is picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
  NoMatch,
  AmbiguousMatch,
  SingleMatch {
    rating:      String,
    rating_date: String,
    /// FHRS identifier of the matched establishment.
    id:          String,
  },
}

impl MatchOutcome {
  /// The cells appended to an output row for this outcome.
  pub fn labels(&self) -> Vec<String> {
    match self {
      Self::NoMatch => vec![NO_MATCH.to_owned()],
      Self::AmbiguousMatch => vec![MULTIPLE_MATCHES.to_owned()],
      Self::SingleMatch { rating, rating_date, id } => vec![
        SINGLE_MATCH.to_owned(),
        rating.clone(),
        rating_date.clone(),
        id.clone(),
      ],
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_match_appends_one_label() {
    assert_eq!(MatchOutcome::NoMatch.labels(), ["No match"]);
  }

  #[test]
  fn ambiguous_match_appends_one_label() {
    assert_eq!(MatchOutcome::AmbiguousMatch.labels(), ["Multiple matches"]);
  }

  #[test]
  fn single_match_appends_rating_columns() {
    let outcome = MatchOutcome::SingleMatch {
      rating:      "5".into(),
      rating_date: "2021-01-01".into(),
      id:          "123".into(),
    };
    assert_eq!(outcome.labels(), [
      "Single match",
      "5",
      "2021-01-01",
      "123"
    ]);
  }

  #[test]
  fn empty_rating_fields_pass_through() {
    let outcome = MatchOutcome::SingleMatch {
      rating:      String::new(),
      rating_date: String::new(),
      id:          "9".into(),
    };
    assert_eq!(outcome.labels(), ["Single match", "", "", "9"]);
  }
}
