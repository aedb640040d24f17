use std::time::Duration;

use rand::seq::SliceRandom;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::config::{FetchConfig, TargetConfig};
use crate::error::Result;
use crate::types::PageFetcher;

/// Desktop User-Agent pool; one entry is picked per run so all pages of a
/// crawl present the same browser identity.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
];

/// reqwest-backed page fetcher for the category URL.
pub struct HttpFetcher {
    client: Client,
    category_url: Url,
    page_param: String,
}

impl HttpFetcher {
    pub fn new(target: &TargetConfig, fetch: &FetchConfig) -> Result<Self> {
        let user_agent = USER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(USER_AGENTS[0]);

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(fetch.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            category_url: Url::parse(&target.category_url)?,
            page_param: target.page_param.clone(),
        })
    }

    /// Page 1 is the bare category URL; later pages carry the page-number
    /// query parameter.
    fn page_url(&self, page: u32) -> Url {
        let mut url = self.category_url.clone();
        if page > 1 {
            url.query_pairs_mut()
                .append_pair(&self.page_param, &page.to_string());
        }
        url
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch_page(&self, page: u32) -> Result<String> {
        let url = self.page_url(page);
        debug!(url = %url, "Fetching category page");

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        Ok(body)
    }
}
