//! # Vitrina
//!
//! Browser-driven scraping of Colombian retail, encyclopedia and news sites.
//!
//! ## Architecture
//!
//! Every scraper drives a real browser through the [`browser`] traits:
//!
//! ```text
//! ScrapeOrchestrator → RetailScraper → BrowserSession → RecordWriter
//! WikiScraper / NewsScraper → BrowserSession → process_text → TextExporter
//! ```
//!
//! - [`retail`]: one search/extract/paginate pipeline shared by all shops
//! - [`wiki`]: Wikipedia section listing and extraction
//! - [`news`]: headline search and article reading
//! - [`output`]: CSV/JSON reports and text export
//!
//! ## Quick Start
//!
//! ```bash
//! # Two result pages of laptops on Mercado Libre
//! vitrina retail laptop --site mercadolibre --pages 2
//!
//! # Sections of a Wikipedia article, then a summary of the second one
//! vitrina wiki "Gabriel García Márquez"
//! vitrina wiki "Gabriel García Márquez" --section 2 --summary
//!
//! # News
//! vitrina news search "paz total"
//! vitrina news read https://www.eltiempo.com/...
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// browser launcher, scrapers, summarizer and exporters.
pub mod app;

/// Browser driving.
///
/// - [`BrowserLauncher`](browser::BrowserLauncher), [`BrowserSession`](browser::BrowserSession),
///   [`PageHandle`](browser::PageHandle), [`ElementHandle`](browser::ElementHandle): driver traits
/// - [`ChromeLauncher`](browser::ChromeLauncher): chromiumoxide implementation
pub mod browser;

/// Command-line interface using clap.
///
/// - `retail <term> --site <key> [--pages N]` - Scrape products
/// - `sites` - List retail sites
/// - `wiki <term> [--section N] [--summary]` - Wikipedia sections
/// - `news search <keyword>` / `news read <url>` - News
pub mod cli;

/// Configuration loaded from `~/.config/vitrina/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`ProductRecord`](domain::ProductRecord): one product listing
/// - [`ScrapeRequest`](domain::ScrapeRequest): validated retail search
pub mod domain;

pub mod news;

/// Files written by the scrapers.
pub mod output;

/// Retail scraping pipeline and site adapters.
pub mod retail;

/// Text summarization through an inference endpoint.
pub mod summarizer;

pub mod wiki;
