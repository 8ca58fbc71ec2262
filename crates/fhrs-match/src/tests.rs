//! Resolver and driver tests against an in-memory SQLite store.

use fhrs_core::{
  EstablishmentQuery, EstablishmentRecord, EstablishmentStore, InsertReport,
  MatchOutcome,
};
use fhrs_store_sqlite::SqliteStore;

use crate::{Columns, Error, Resolver, Summary, reconcile};

fn record(id: &str, name: &str, postcode: &str, rating: &str, date: &str) -> EstablishmentRecord {
  EstablishmentRecord::new(id, name, rating, date).with_postcode(postcode)
}

async fn resolver_with(records: Vec<EstablishmentRecord>) -> Resolver<SqliteStore> {
  let store = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  store.insert_many(records).await.unwrap();
  Resolver::new(store)
}

fn input_row(id: &str, name: &str, postcode: &str) -> Vec<String> {
  [id, name, "1 High St", "", "London", postcode, "2021-03-01"]
    .map(str::to_owned)
    .to_vec()
}

// ─── Resolver ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn single_match_carries_rating_fields() {
  let resolver = resolver_with(vec![record("123", "The Ship Inn", "SW1A1AA", "5", "2021-01-01")]).await;

  let outcome = resolver.resolve("Ship Inn", "SW1A 1AA").await.unwrap();
  assert_eq!(outcome, MatchOutcome::SingleMatch {
    rating:      "5".into(),
    rating_date: "2021-01-01".into(),
    id:          "123".into(),
  });
}

#[tokio::test]
async fn two_hits_are_ambiguous() {
  let resolver = resolver_with(vec![
    record("1", "Cafe", "SW1A1AA", "5", "2021-01-01"),
    record("2", "Corner Cafe", "SW1A1AA", "3", "2020-06-01"),
  ])
  .await;

  let outcome = resolver.resolve("Cafe", "SW1A 1AA").await.unwrap();
  assert_eq!(outcome, MatchOutcome::AmbiguousMatch);
}

#[tokio::test]
async fn unknown_postcode_is_no_match() {
  let resolver = resolver_with(vec![record("1", "Anything", "SW1A1AA", "5", "2021-01-01")]).await;

  let outcome = resolver.resolve("Anything", "M1 1AE").await.unwrap();
  assert_eq!(outcome, MatchOutcome::NoMatch);
}

#[tokio::test]
async fn postcode_mismatch_wins_over_name_match() {
  let resolver = resolver_with(vec![
    record("1", "Royal Oak", "M11AE", "4", "2019-01-01"),
    record("2", "Royal Oak", "M12AE", "4", "2019-01-01"),
  ])
  .await;

  for name in ["Royal Oak", "royal", "Oak", "", "The"] {
    let outcome = resolver.resolve(name, "M1 3AE").await.unwrap();
    assert_eq!(outcome, MatchOutcome::NoMatch, "name {name:?}");
  }
}

#[tokio::test]
async fn name_must_also_match() {
  let resolver = resolver_with(vec![record("1", "Royal Oak", "M11AE", "4", "2019-01-01")]).await;

  let outcome = resolver.resolve("Golden Dragon", "M1 1AE").await.unwrap();
  assert_eq!(outcome, MatchOutcome::NoMatch);
}

#[tokio::test]
async fn postcode_formatting_is_normalized() {
  let resolver = resolver_with(vec![record("7", "Deli", "EC1A 1BB", "2", "2018-08-08")]).await;

  for postcode in ["ec1a 1bb", "EC1A1BB", " Ec1A  1bB "] {
    let outcome = resolver.resolve("deli", postcode).await.unwrap();
    assert!(
      matches!(outcome, MatchOutcome::SingleMatch { ref id, .. } if id == "7"),
      "postcode {postcode:?}"
    );
  }
}

#[tokio::test]
async fn empty_postcode_never_matches() {
  let resolver = resolver_with(vec![EstablishmentRecord::new("1", "Cafe", "5", "2021-01-01")]).await;

  let outcome = resolver.resolve("Cafe", "").await.unwrap();
  assert_eq!(outcome, MatchOutcome::NoMatch);
}

#[tokio::test]
async fn empty_rating_fields_are_passed_through() {
  let resolver = resolver_with(vec![record("5", "Pop Up", "N1 9GU", "", "")]).await;

  let outcome = resolver.resolve("Pop Up", "N1 9GU").await.unwrap();
  assert_eq!(outcome.labels(), ["Single match", "", "", "5"]);
}

#[tokio::test]
async fn repeated_resolution_is_stable() {
  let resolver = resolver_with(vec![
    record("1", "Cafe", "E16AN", "5", "2021-01-01"),
    record("2", "Cafe Bar", "E16AN", "4", "2021-01-02"),
    record("3", "Noodle House", "E16AN", "3", "2021-01-03"),
  ])
  .await;

  for (name, postcode) in [("Cafe", "E1 6AN"), ("Noodle", "E1 6AN"), ("Pizza", "E1 6AN")] {
    let first = resolver.resolve(name, postcode).await.unwrap();
    let second = resolver.resolve(name, postcode).await.unwrap();
    assert_eq!(first, second);
  }
}

// ─── Driver ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn reconcile_appends_outcome_columns_in_order() {
  let resolver = resolver_with(vec![
    record("123", "The Ship Inn", "SW1A1AA", "5", "2021-01-01"),
    record("1", "Cafe", "E16AN", "5", "2021-01-01"),
    record("2", "Cafe Royal", "E16AN", "4", "2021-01-01"),
  ])
  .await;

  let input = vec![
    input_row("a", "Ship Inn", "SW1A 1AA"),
    input_row("b", "Cafe", "E1 6AN"),
    input_row("c", "Anything", "M1 1AE"),
  ];
  let out = reconcile(&resolver, input.clone(), Columns::default())
    .await
    .unwrap();

  assert_eq!(out.rows.len(), input.len());
  for (got, original) in out.rows.iter().zip(&input) {
    assert_eq!(&got[..original.len()], original.as_slice());
  }
  assert_eq!(&out.rows[0][7..], ["Single match", "5", "2021-01-01", "123"]);
  assert_eq!(&out.rows[1][7..], ["Multiple matches"]);
  assert_eq!(&out.rows[2][7..], ["No match"]);
  assert_eq!(out.summary, Summary { no_match: 1, multiple: 1, single: 1 });
}

#[tokio::test]
async fn reconcile_empty_input() {
  let resolver = resolver_with(Vec::new()).await;
  let out = reconcile(&resolver, Vec::new(), Columns::default())
    .await
    .unwrap();
  assert!(out.rows.is_empty());
  assert_eq!(out.summary.total(), 0);
}

#[tokio::test]
async fn short_row_fails_the_run_before_querying() {
  let resolver = resolver_with(Vec::new()).await;
  let input = vec![
    input_row("a", "Ship Inn", "SW1A 1AA"),
    vec!["b".into(), "Cafe".into(), "High St".into()],
  ];

  let err = reconcile(&resolver, input, Columns::default())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::MalformedRow { row: 2, len: 3, needed: 6 }));
}

#[tokio::test]
async fn custom_columns_are_honoured() {
  let resolver = resolver_with(vec![record("9", "Harbour Kitchen", "PL12AA", "5", "2022-02-02")]).await;
  let input = vec![vec!["PL1 2AA".to_owned(), "Harbour Kitchen".to_owned()]];

  let out = reconcile(&resolver, input, Columns { name: 1, postcode: 0 })
    .await
    .unwrap();
  assert_eq!(out.rows[0], [
    "PL1 2AA",
    "Harbour Kitchen",
    "Single match",
    "5",
    "2022-02-02",
    "9"
  ]);
}

// ─── Store failures ──────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("store unavailable")]
struct Unavailable;

struct FailingStore;

impl EstablishmentStore for FailingStore {
  type Error = Unavailable;

  async fn insert_many(&self, _: Vec<EstablishmentRecord>) -> Result<InsertReport, Unavailable> {
    Err(Unavailable)
  }

  async fn find(&self, _: &EstablishmentQuery) -> Result<Vec<EstablishmentRecord>, Unavailable> {
    Err(Unavailable)
  }

  async fn count(&self) -> Result<usize, Unavailable> { Err(Unavailable) }

  async fn clear(&self) -> Result<(), Unavailable> { Err(Unavailable) }
}

#[tokio::test]
async fn store_failure_is_an_error_not_no_match() {
  let resolver = Resolver::new(FailingStore);
  assert!(resolver.resolve("Cafe", "E1 6AN").await.is_err());

  let err = reconcile(&resolver, vec![input_row("a", "Cafe", "E1 6AN")], Columns::default())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Store(_)));
}
