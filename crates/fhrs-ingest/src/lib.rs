//! Ingestion of the national food hygiene rating dataset.
//!
//! The dataset is published as one XML feed per local authority. This crate
//! fetches the authority list, downloads every feed to a directory, parses
//! the feeds into [`fhrs_core::EstablishmentRecord`]s, and bulk-loads them
//! into any [`fhrs_core::EstablishmentStore`].

pub mod authority;
pub mod error;
pub mod feed_dir;
pub mod parse;
pub mod refresh;

pub use authority::{AuthorityClient, AuthorityFeed};
pub use error::{Error, Result};
pub use parse::{ParsedFeed, parse_feed};
pub use refresh::{LoadReport, RefreshReport, load_feed_dir, rebuild_from_feed_dir, refresh};
