//! Reconciliation of restaurant lists against the establishment store.
//!
//! [`Resolver`] classifies one (name, postcode) pair as no match, one match
//! or several. [`reconcile`] runs it over an input table in order and appends
//! the outcome columns to each row. [`table`] reads and writes those tables
//! as CSV.

pub mod driver;
pub mod error;
pub mod resolver;
pub mod table;

pub use driver::{Columns, Reconciliation, Summary, reconcile};
pub use error::{Error, Result};
pub use resolver::Resolver;

#[cfg(test)]
mod tests;
