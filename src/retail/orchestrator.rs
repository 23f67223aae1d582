use tracing::{error, info};

use crate::app::{Result, VitrinaError};
use crate::domain::{ProductRecord, ScrapeRequest};
use crate::retail::pipeline::RetailScraper;
use crate::retail::site::RetailSite;

/// Routes scrape requests to the registered site with the matching key
pub struct ScrapeOrchestrator {
    scraper: RetailScraper,
    sites: Vec<RetailSite>,
}

impl ScrapeOrchestrator {
    pub fn new(scraper: RetailScraper, sites: Vec<RetailSite>) -> Self {
        Self { scraper, sites }
    }

    pub fn scraper(&self) -> &RetailScraper {
        &self.scraper
    }

    /// Registered keys, in registration order
    pub fn site_keys(&self) -> Vec<String> {
        self.sites.iter().map(|s| s.key().to_string()).collect()
    }

    pub fn site(&self, key: &str) -> Option<&RetailSite> {
        self.sites.iter().find(|s| s.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Run the request; unknown keys fail before any browser is started
    pub async fn try_scrape(&self, request: &ScrapeRequest) -> Result<Vec<ProductRecord>> {
        let site = self
            .site(request.site_key())
            .ok_or_else(|| VitrinaError::UnsupportedSite {
                site: request.site_key().to_string(),
                valid: self.site_keys(),
            })?;

        info!(site = site.key(), term = request.search_term(), "Dispatching scrape");
        Ok(self
            .scraper
            .scrape(site, request.search_term(), request.page_count())
            .await)
    }

    /// Like [`try_scrape`](Self::try_scrape), logging the failure and returning no records
    pub async fn scrape(&self, request: &ScrapeRequest) -> Vec<ProductRecord> {
        match self.try_scrape(request).await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "Scrape request rejected");
                Vec::new()
            }
        }
    }
}
