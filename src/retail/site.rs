use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;
use crate::browser::ElementHandle;
use crate::domain::ProductRecord;
use crate::retail::pacing::DelayRange;

/// DOM queries identifying the parts of one site's result page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSelectorSet {
    pub search_input: String,
    /// Submit button; the input is submitted with Enter when unset
    pub search_button: Option<String>,
    pub product_container: String,
    pub product_name: String,
    pub product_price: String,
    pub product_original_price: Option<String>,
    pub product_link: String,
    pub product_discount: Option<String>,
    pub next_page: Option<String>,
    pub cookie_accept: Option<String>,
}

/// Every bound and pause a scrape run uses on one site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteTiming {
    pub navigation_timeout: Duration,
    pub cookie_timeout: Duration,
    pub search_input_timeout: Duration,
    pub search_button_timeout: Duration,
    /// Fixed wait after submitting the search, before looking for results
    pub post_search_wait: Duration,
    pub results_timeout: Duration,
    pub click_timeout: Duration,
    pub next_page_timeout: Duration,
    pub settle_delay: DelayRange,
    pub results_delay: DelayRange,
    pub hover_delay: DelayRange,
    pub page_turn_delay: DelayRange,
}

impl Default for SiteTiming {
    fn default() -> Self {
        Self {
            navigation_timeout: Duration::from_secs(60),
            cookie_timeout: Duration::from_secs(3),
            search_input_timeout: Duration::from_secs(15),
            search_button_timeout: Duration::from_secs(5),
            post_search_wait: Duration::from_secs(3),
            results_timeout: Duration::from_secs(20),
            click_timeout: Duration::from_secs(3),
            next_page_timeout: Duration::from_secs(10),
            settle_delay: DelayRange::secs(3, 5),
            results_delay: DelayRange::secs(2, 4),
            hover_delay: DelayRange::millis(800, 1200),
            page_turn_delay: DelayRange::millis(2000, 3500),
        }
    }
}

impl SiteTiming {
    /// No pauses and short bounds, for driving a scripted page
    pub fn instant() -> Self {
        let bound = Duration::from_millis(50);
        Self {
            navigation_timeout: bound,
            cookie_timeout: bound,
            search_input_timeout: bound,
            search_button_timeout: bound,
            post_search_wait: Duration::ZERO,
            results_timeout: bound,
            click_timeout: bound,
            next_page_timeout: bound,
            settle_delay: DelayRange::ZERO,
            results_delay: DelayRange::ZERO,
            hover_delay: DelayRange::ZERO,
            page_turn_delay: DelayRange::ZERO,
        }
    }
}

/// Static description of a retail site
#[derive(Debug, Clone)]
pub struct SiteProfile {
    /// Lowercase lookup key, also used in output file names
    pub key: String,
    /// Name written into each record's `site` field
    pub name: String,
    pub base_url: String,
    /// Currency code appended to rendered prices
    pub currency: String,
    pub selectors: SiteSelectorSet,
    pub timing: SiteTiming,
}

/// Site-specific touch-ups applied to each extracted record
#[async_trait]
pub trait ItemEnricher: Send + Sync {
    async fn enrich(&self, item: &dyn ElementHandle, record: &mut ProductRecord) -> Result<()>;
}

/// Leaves records as extracted
pub struct NoEnrichment;

#[async_trait]
impl ItemEnricher for NoEnrichment {
    async fn enrich(&self, _item: &dyn ElementHandle, _record: &mut ProductRecord) -> Result<()> {
        Ok(())
    }
}

/// A site profile plus its enrichment hook
pub struct RetailSite {
    profile: SiteProfile,
    enricher: Box<dyn ItemEnricher>,
}

impl RetailSite {
    pub fn new(profile: SiteProfile, enricher: Box<dyn ItemEnricher>) -> Self {
        Self { profile, enricher }
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    pub fn enricher(&self) -> &dyn ItemEnricher {
        self.enricher.as_ref()
    }

    pub fn key(&self) -> &str {
        &self.profile.key
    }

    pub fn with_timing(mut self, timing: SiteTiming) -> Self {
        self.profile.timing = timing;
        self
    }
}

impl std::fmt::Debug for RetailSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetailSite")
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}
