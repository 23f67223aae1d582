//! Retail product scraping.
//!
//! One pipeline, [`RetailScraper`], serves every site. A site plugs in as a
//! [`RetailSite`]: selectors, timing and base URL in a [`SiteProfile`], plus an
//! optional [`ItemEnricher`] for layout quirks.
//!
//! ```text
//! ScrapeOrchestrator → RetailScraper → search → (extract + enrich)* → advance → RecordWriter
//! ```

pub mod extractor;
pub mod orchestrator;
pub mod pacing;
pub mod pagination;
pub mod pipeline;
pub mod price;
pub mod search;
pub mod site;
pub mod sites;

pub use orchestrator::ScrapeOrchestrator;
pub use pacing::{DelayRange, HumanPacing, NoPacing, Pacing};
pub use pipeline::RetailScraper;
pub use site::{ItemEnricher, NoEnrichment, RetailSite, SiteProfile, SiteSelectorSet, SiteTiming};
