use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::app::Result;
use crate::browser::{BrowserLauncher, PageHandle};
use crate::domain::ProductRecord;
use crate::output::RecordWriter;
use crate::retail::pacing::Pacing;
use crate::retail::site::RetailSite;
use crate::retail::{extractor, pagination, search};

/// Drives one browser session through search, extraction and pagination
/// for any [`RetailSite`].
pub struct RetailScraper {
    launcher: Arc<dyn BrowserLauncher>,
    pacing: Arc<dyn Pacing>,
    writer: RecordWriter,
}

impl RetailScraper {
    pub fn new(
        launcher: Arc<dyn BrowserLauncher>,
        pacing: Arc<dyn Pacing>,
        writer: RecordWriter,
    ) -> Self {
        Self {
            launcher,
            pacing,
            writer,
        }
    }

    pub fn writer(&self) -> &RecordWriter {
        &self.writer
    }

    /// Scrape up to `page_count` result pages of `term` on `site`.
    ///
    /// A run that fails before completing returns no records and leaves a
    /// screenshot in the report directory. The browser is always closed.
    pub async fn scrape(&self, site: &RetailSite, term: &str, page_count: u32) -> Vec<ProductRecord> {
        let profile = site.profile();
        info!(site = %profile.name, term, pages = page_count, "Starting scrape");

        let session = match self.launcher.launch(Some(&profile.base_url)).await {
            Ok(session) => session,
            Err(e) => {
                error!(site = %profile.name, error = %e, "Failed to launch browser");
                return Vec::new();
            }
        };

        let records = match self.run(session.page(), site, term, page_count).await {
            Ok(records) => {
                self.save(site, term, &records);
                records
            }
            Err(e) => {
                error!(site = %profile.name, error = %e, "Scrape failed");
                match self.screenshot(session.page(), &profile.name).await {
                    Ok(path) => info!(path = %path.display(), "Saved error screenshot"),
                    Err(shot_err) => warn!(error = %shot_err, "Could not save error screenshot"),
                }
                Vec::new()
            }
        };

        if let Err(e) = session.close().await {
            warn!(site = %profile.name, error = %e, "Failed to close browser");
        }

        records
    }

    async fn run(
        &self,
        page: &dyn PageHandle,
        site: &RetailSite,
        term: &str,
        page_count: u32,
    ) -> Result<Vec<ProductRecord>> {
        let profile = site.profile();
        let timing = &profile.timing;
        let pacing = self.pacing.as_ref();

        page.goto(&profile.base_url, timing.navigation_timeout).await?;
        self.accept_cookies(page, site).await;
        pacing.pause(timing.settle_delay).await;

        search::execute(page, profile, term, pacing).await?;

        let mut records = Vec::new();
        for page_number in 1..=page_count {
            info!(site = %profile.name, page = page_number, of = page_count, "Processing page");

            let items = page.query_selector_all(&profile.selectors.product_container).await?;
            debug!(site = %profile.name, items = items.len(), "result cards found");

            for item in &items {
                let Some(mut record) = extractor::extract(item.as_ref(), profile).await else {
                    continue;
                };
                if let Err(e) = site.enricher().enrich(item.as_ref(), &mut record).await {
                    warn!(site = %profile.name, error = %e, "Failed to enrich product");
                    continue;
                }
                info!(
                    site = %profile.name,
                    name = %record.name,
                    price = %record.current_price,
                    "Product extracted"
                );
                records.push(record);
            }

            if page_number < page_count && !pagination::advance(page, profile, pacing).await {
                break;
            }
        }

        Ok(records)
    }

    /// Click the cookie banner if one shows up within the site's bound
    async fn accept_cookies(&self, page: &dyn PageHandle, site: &RetailSite) {
        let profile = site.profile();
        let Some(ref selector) = profile.selectors.cookie_accept else {
            return;
        };

        match click_first(page, selector, profile.timing.cookie_timeout).await {
            Ok(()) => info!(site = %profile.name, "Cookies accepted"),
            Err(e) => debug!(site = %profile.name, error = %e, "no cookie banner"),
        }
    }

    async fn screenshot(&self, page: &dyn PageHandle, site_name: &str) -> Result<PathBuf> {
        let path = self.writer.error_screenshot_path(site_name)?;
        page.screenshot(&path).await?;
        Ok(path)
    }

    fn save(&self, site: &RetailSite, term: &str, records: &[ProductRecord]) {
        match self.writer.write(site.key(), term, records) {
            Ok(report) => info!(
                records = records.len(),
                csv = %report.csv.display(),
                json = %report.json.display(),
                "Data saved"
            ),
            Err(e) => error!(site = %site.profile().name, error = %e, "Failed to save data"),
        }
    }
}

async fn click_first(page: &dyn PageHandle, selector: &str, timeout: Duration) -> Result<()> {
    page.wait_for_selector(selector, timeout).await?.click().await
}
