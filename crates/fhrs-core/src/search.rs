//! Full-text search predicate over establishment names.
//!
//! Mirrors document-store `$text` semantics: the phrase is split into terms,
//! English stop words are dropped, and a name matches when it contains any
//! remaining term. Backends do the stemming and folding in their index;
//! [`TextSearch::admits`] enforces the stricter comparison when a
//! sensitivity flag is switched on.

use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Terms that never take part in a search.
const STOP_WORDS: &[&str] = &[
  "a", "about", "above", "after", "again", "against", "all", "am", "an", "and",
  "any", "are", "as", "at", "be", "because", "been", "before", "being",
  "below", "between", "both", "but", "by", "did", "do", "does", "doing",
  "down", "during", "each", "few", "for", "from", "further", "had", "has",
  "have", "having", "he", "her", "here", "hers", "him", "his", "how", "i",
  "if", "in", "into", "is", "it", "its", "itself", "me", "more", "most", "my",
  "no", "nor", "not", "of", "off", "on", "once", "only", "or", "other", "our",
  "ours", "out", "over", "own", "s", "same", "she", "should", "so", "some",
  "such", "t", "than", "that", "the", "their", "them", "then", "there",
  "these", "they", "this", "those", "through", "to", "too", "under", "until",
  "up", "very", "was", "we", "were", "what", "when", "where", "which", "while",
  "who", "whom", "why", "will", "with", "you", "your", "yours",
];

/// A text-search predicate on a stored field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSearch {
  pub phrase:              String,
  #[serde(default)]
  pub case_sensitive:      bool,
  #[serde(default)]
  pub diacritic_sensitive: bool,
}

impl TextSearch {
  /// Case- and diacritic-insensitive search for `phrase`.
  pub fn insensitive(phrase: impl Into<String>) -> Self {
    Self {
      phrase:              phrase.into(),
      case_sensitive:      false,
      diacritic_sensitive: false,
    }
  }

  /// Distinct search terms in phrase order, stop words removed.
  ///
  /// An empty result means the search can match nothing.
  pub fn terms(&self) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut terms = Vec::new();
    for word in words(&self.phrase) {
      let lower = word.to_lowercase();
      if STOP_WORDS.contains(&lower.as_str()) || seen.contains(&lower) {
        continue;
      }
      seen.push(lower);
      terms.push(word.to_owned());
    }
    terms
  }

  /// Whether `candidate` satisfies the sensitivity flags.
  ///
  /// With both flags off every index hit is admitted. Otherwise at least one
  /// term must equal a word of `candidate` when compared with only the
  /// foldings the flags still allow.
  pub fn admits(&self, candidate: &str) -> bool {
    if !self.case_sensitive && !self.diacritic_sensitive {
      return true;
    }
    let candidate_words: Vec<String> =
      words(candidate).map(|w| self.fold(w)).collect();
    self
      .terms()
      .iter()
      .map(|t| self.fold(t))
      .any(|t| candidate_words.contains(&t))
  }

  fn fold(&self, word: &str) -> String {
    let word = if self.diacritic_sensitive {
      word.to_owned()
    } else {
      strip_diacritics(word)
    };
    if self.case_sensitive { word } else { word.to_lowercase() }
  }
}

fn words(text: &str) -> impl Iterator<Item = &str> {
  text
    .split(|c: char| !c.is_alphanumeric())
    .filter(|w| !w.is_empty())
}

fn strip_diacritics(word: &str) -> String {
  word.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}
