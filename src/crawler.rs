use std::collections::HashSet;

use scraper::Html;
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::extractor;
use crate::types::{Listing, PageFetcher};

/// Walks every page of the category in order and aggregates the listings.
pub struct Crawler {
    fetcher: Box<dyn PageFetcher>,
    allow: Option<HashSet<String>>,
}

impl Crawler {
    pub fn new(fetcher: Box<dyn PageFetcher>, allow: Option<HashSet<String>>) -> Self {
        Self { fetcher, allow }
    }

    /// Fetches page 1, reads the declared page count from its pagination
    /// control, then fetches pages 2..=N one at a time. Listings keep page
    /// order, and document order within a page.
    #[instrument(skip(self))]
    pub async fn crawl(&self) -> Result<Vec<Listing>> {
        let first_body = self.fetcher.fetch_page(1).await?;
        let (pages, mut all_listings) = self.parse_first_page(&first_body)?;
        info!(pages, listings = all_listings.len(), "Parsed first category page");

        for page in 2..=pages {
            let body = self.fetcher.fetch_page(page).await?;
            let listings = self.parse_page(&body)?;
            debug!(page, listings = listings.len(), "Parsed category page");
            all_listings.extend(listings);
        }

        info!(total = all_listings.len(), "Crawl finished");
        Ok(all_listings)
    }

    // Parsing stays in sync helpers so the non-Send `Html` document never
    // lives across an await point.
    fn parse_first_page(&self, body: &str) -> Result<(u32, Vec<Listing>)> {
        let document = Html::parse_document(body);
        let pages = extractor::page_count(&document)?;
        let listings = extractor::extract_listings(&document, self.allow.as_ref())?;
        Ok((pages, listings))
    }

    fn parse_page(&self, body: &str) -> Result<Vec<Listing>> {
        let document = Html::parse_document(body);
        extractor::extract_listings(&document, self.allow.as_ref())
    }
}
