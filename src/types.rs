use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One laptop listing as parsed from a category page.
///
/// `model` is the natural key: two runs match rows by it when diffing.
/// Price fields use `None` as the explicit "no data" marker; a listing with
/// no price is never recorded as costing zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub model: String,
    pub description: String,
    pub min_price: Option<u64>,
    pub avr_price: Option<u64>,
    pub max_price: Option<u64>,
}

/// Field order for the CSV header and every row.
pub const LISTING_FIELDS: [&str; 5] =
    ["model", "description", "min_price", "avr_price", "max_price"];

/// Display form of a price field: decimal text, or empty when absent.
/// Diffing compares these strings, so an absent value is unequal to any
/// number and equal only to itself.
pub fn price_text(price: Option<u64>) -> String {
    price.map(|p| p.to_string()).unwrap_or_default()
}

/// Seam over page retrieval so the crawl loop can be driven by an in-memory
/// fetcher in tests.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the raw HTML of the given 1-based category page.
    async fn fetch_page(&self, page: u32) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_text_renders_absent_as_empty() {
        assert_eq!(price_text(None), "");
        assert_eq!(price_text(Some(0)), "0");
        assert_eq!(price_text(Some(45999)), "45999");
    }
}
