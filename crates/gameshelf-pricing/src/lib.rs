//! Best-effort market price lookup.
//!
//! Queries a marketplace search page (eBay, sorted by lowest price first) and
//! reports the cheapest listing. The scrape depends on the page's current
//! markup and can break at any time, so callers only ever see a price or
//! nothing; failures are logged and swallowed.

mod parse;

pub mod error;

pub use error::{Error, Result};
pub use parse::{listing_prices, lowest_price, parse_price};

use std::time::Duration;

use reqwest::Client;

/// The public eBay search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://www.ebay.com/sch/i.html";

/// eBay's "price + shipping: lowest first" sort order.
const SORT_LOWEST_FIRST: &str = "15";

/// Looks up a representative market price for a game.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct PriceLookup {
  client:     Client,
  search_url: String,
}

impl PriceLookup {
  pub fn new(search_url: impl Into<String>, timeout: Duration) -> Result<Self> {
    let client = Client::builder()
      .timeout(timeout)
      .user_agent("Mozilla/5.0")
      .build()
      .map_err(Error::Client)?;
    Ok(Self { client, search_url: search_url.into() })
  }

  /// The lowest listed price for `title` on `platform`, or `None` if the
  /// marketplace could not be reached or listed nothing parseable.
  pub async fn lookup(&self, title: &str, platform: &str) -> Option<f64> {
    match self.try_lookup(title, platform).await {
      Ok(Some(price)) => {
        tracing::debug!(title, platform, price, "found market price");
        Some(price)
      }
      Ok(None) => {
        tracing::debug!(title, platform, "no market price listed");
        None
      }
      Err(e) => {
        tracing::warn!(title, platform, error = %e, "price lookup failed");
        None
      }
    }
  }

  /// Like [`Self::lookup`] but reports why no price was obtained.
  pub async fn try_lookup(&self, title: &str, platform: &str) -> Result<Option<f64>> {
    let query = format!("{title} {platform}");
    let resp = self
      .client
      .get(&self.search_url)
      .query(&[("_nkw", query.as_str()), ("_sop", SORT_LOWEST_FIRST)])
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status(status));
    }

    let body = resp.text().await?;
    Ok(lowest_price(&body))
  }
}
