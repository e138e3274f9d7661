//! Extraction of listing prices from a marketplace search results page.

use std::sync::LazyLock;

use scraper::{Html, Selector};

static ITEM: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse(".s-item").expect("valid item selector"));
static ITEM_PRICE: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse(".s-item__price").expect("valid price selector"));

/// Every parseable price on the page, in document order.
pub fn listing_prices(html: &str) -> Vec<f64> {
  let document = Html::parse_document(html);
  document
    .select(&ITEM)
    .filter_map(|item| item.select(&ITEM_PRICE).next())
    .filter_map(|tag| parse_price(&tag.text().collect::<String>()))
    .collect()
}

/// The cheapest listing on the page, if any price could be read.
pub fn lowest_price(html: &str) -> Option<f64> {
  listing_prices(html).into_iter().reduce(f64::min)
}

/// Parse the leading amount of a price label such as `$1,299.00` or
/// `$12.50 to $20.00`.
pub fn parse_price(text: &str) -> Option<f64> {
  let cleaned = text.replace(['$', ','], "");
  let amount: f64 = cleaned.split_whitespace().next()?.parse().ok()?;
  (amount.is_finite() && amount >= 0.0).then_some(amount)
}
