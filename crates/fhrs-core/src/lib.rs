//! Core types and trait definitions for the food hygiene rating matcher.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend, the feed ingester, and the matching engine all depend on
//! it.

pub mod establishment;
pub mod normalize;
pub mod outcome;
pub mod search;
pub mod store;

pub use establishment::{EstablishmentRecord, QueryRecord};
pub use outcome::MatchOutcome;
pub use search::TextSearch;
pub use store::{EstablishmentQuery, EstablishmentStore, InsertReport};
