//! HTTP client for the ratings API authority list and feed downloads.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use reqwest::{
  Client,
  header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::Deserialize;
use tokio::io::AsyncWriteExt as _;

use crate::{Error, Result};

pub const DEFAULT_AUTHORITIES_URL: &str = "https://api.ratings.food.gov.uk/authorities";
pub const DEFAULT_API_VERSION: &str = "2";

const API_VERSION_HEADER: &str = "x-api-version";
const LIST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// One authority's downloadable feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorityFeed {
  #[serde(rename = "FriendlyName")]
  pub friendly_name: String,
  #[serde(rename = "FileName")]
  pub file_url:      String,
}

impl AuthorityFeed {
  /// File name the feed is stored under: `<friendly name>.xml`, with path
  /// separators replaced.
  pub fn file_name(&self) -> String {
    let stem: String = self
      .friendly_name
      .chars()
      .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
      .collect();
    format!("{stem}.xml")
  }
}

#[derive(Deserialize)]
struct AuthorityList {
  authorities: Vec<AuthorityFeed>,
}

/// Async client for the authority list endpoint and the feed files it
/// points at.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct AuthorityClient {
  client:          Client,
  authorities_url: String,
}

impl AuthorityClient {
  /// Every request carries `x-api-version: <api_version>`.
  pub fn new(authorities_url: impl Into<String>, api_version: &str) -> Result<Self> {
    let mut headers = HeaderMap::new();
    headers.insert(
      API_VERSION_HEADER,
      HeaderValue::from_str(api_version)
        .map_err(|_| Error::InvalidApiVersion(api_version.to_owned()))?,
    );
    let client = Client::builder()
      .default_headers(headers)
      .connect_timeout(CONNECT_TIMEOUT)
      .build()?;
    Ok(Self { client, authorities_url: authorities_url.into() })
  }

  /// `GET <authorities_url>`: one entry per local authority.
  pub async fn list_feeds(&self) -> Result<Vec<AuthorityFeed>> {
    let list: AuthorityList = self
      .client
      .get(&self.authorities_url)
      .header(ACCEPT, "application/json")
      .timeout(LIST_TIMEOUT)
      .send()
      .await?
      .error_for_status()?
      .json()
      .await?;
    tracing::info!(count = list.authorities.len(), "fetched authority list");
    Ok(list.authorities)
  }

  /// Stream a feed into `dir`, creating the directory if needed.
  pub async fn download_feed(&self, feed: &AuthorityFeed, dir: &Path) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(feed.file_name());

    tracing::info!(authority = %feed.friendly_name, url = %feed.file_url, "downloading feed");
    let mut response = self
      .client
      .get(&feed.file_url)
      .send()
      .await?
      .error_for_status()?;

    let mut file = tokio::fs::File::create(&path).await?;
    let mut written = 0usize;
    while let Some(chunk) = response.chunk().await? {
      file.write_all(&chunk).await?;
      written += chunk.len();
    }
    file.flush().await?;

    tracing::debug!(path = %path.display(), bytes = written, "feed written");
    Ok(path)
  }

  /// Download every feed in order. The first failure aborts.
  pub async fn download_all(&self, feeds: &[AuthorityFeed], dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(feeds.len());
    for feed in feeds {
      paths.push(self.download_feed(feed, dir).await?);
    }
    Ok(paths)
  }
}
