//! Colombian news sites: headline search and article reading.
//!
//! Each outlet is a row in [`news_sites`]; adding one needs no new code.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use url::Url;

use crate::app::{Result, VitrinaError};
use crate::browser::{BrowserLauncher, BrowserSession, PageHandle};
use crate::retail::extractor::resolve_link;

pub const MAX_RESULTS: usize = 3;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how to search one outlet and read its articles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSite {
    pub name: &'static str,
    /// Registrable domain used to route article URLs
    pub host: &'static str,
    pub base_url: &'static str,
    /// Search URL up to the keyword
    pub search_url: &'static str,
    /// Replaces spaces in the keyword
    pub separator: &'static str,
    /// Result anchors on the search page
    pub result_selector: &'static str,
    /// Title element inside the anchor, when the anchor text is not the title
    pub result_title: Option<&'static str>,
    pub title_selector: &'static str,
    pub paragraph_selector: &'static str,
}

impl NewsSite {
    pub fn search_url(&self, keyword: &str) -> String {
        format!("{}{}", self.search_url, normalize_keyword(keyword, self.separator))
    }

    /// Whether `host` is this outlet or one of its subdomains
    pub fn serves(&self, host: &str) -> bool {
        host == self.host || host.ends_with(&format!(".{}", self.host))
    }
}

pub fn news_sites() -> Vec<NewsSite> {
    vec![
        NewsSite {
            name: "El Tiempo",
            host: "eltiempo.com",
            base_url: "https://www.eltiempo.com",
            search_url: "https://www.eltiempo.com/buscar?q=",
            separator: "+",
            result_selector: "h3.c-article__title a",
            result_title: None,
            title_selector: "h1",
            paragraph_selector: "div.paragraph",
        },
        NewsSite {
            name: "Semana",
            host: "semana.com",
            base_url: "https://www.semana.com",
            search_url: "https://www.semana.com/buscador/?query=",
            separator: "%20",
            result_selector: "a:has(div.queryly_item_title)",
            result_title: Some("div.queryly_item_title"),
            title_selector: "h1.text-smoke-700",
            paragraph_selector: "p[data-type='text']",
        },
        NewsSite {
            name: "El Espectador",
            host: "elespectador.com",
            base_url: "https://www.elespectador.com",
            search_url: "https://www.elespectador.com/buscador/",
            separator: "-",
            result_selector: "h2.Card-Title > a",
            result_title: None,
            title_selector: "h1.Title",
            paragraph_selector: "div.Article-Content p",
        },
    ]
}

/// Lowercase `keyword` and join its words with `separator`
pub fn normalize_keyword(keyword: &str, separator: &str) -> String {
    keyword.trim().to_lowercase().replace(' ', separator)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub site: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub site: String,
    pub url: String,
    pub title: String,
    /// Non-empty paragraphs separated by blank lines
    pub text: String,
}

pub struct NewsScraper {
    launcher: Arc<dyn BrowserLauncher>,
    sites: Vec<NewsSite>,
    timeout: Duration,
}

impl NewsScraper {
    pub fn new(launcher: Arc<dyn BrowserLauncher>) -> Self {
        Self {
            launcher,
            sites: news_sites(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bound for each navigation and each wait
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn sites(&self) -> &[NewsSite] {
        &self.sites
    }

    /// Up to [`MAX_RESULTS`] headlines per outlet, outlets in table order.
    ///
    /// An outlet that fails or shows no results is skipped.
    pub async fn search(&self, keyword: &str) -> Result<Vec<Headline>> {
        let session = self.launcher.launch(None).await?;
        let page = session.page();

        let mut headlines = Vec::new();
        for site in &self.sites {
            match self.search_site(page, site, keyword).await {
                Ok(found) => {
                    info!(site = site.name, results = found.len(), keyword, "Search results");
                    headlines.extend(found);
                }
                Err(e) => warn!(site = site.name, error = %e, "No results found"),
            }
        }

        close(session).await;
        Ok(headlines)
    }

    async fn search_site(
        &self,
        page: &dyn PageHandle,
        site: &NewsSite,
        keyword: &str,
    ) -> Result<Vec<Headline>> {
        page.goto(&site.search_url(keyword), self.timeout).await?;
        page.wait_for_selector(site.result_selector, self.timeout)
            .await?;

        let mut headlines = Vec::new();
        for anchor in page.query_selector_all(site.result_selector).await? {
            let title = match site.result_title {
                Some(selector) => match anchor.query_selector(selector).await? {
                    Some(title) => title.inner_text().await?,
                    None => continue,
                },
                None => anchor.inner_text().await?,
            };
            let Some(href) = anchor.attribute("href").await? else {
                continue;
            };

            let (title, href) = (title.trim(), href.trim());
            if title.is_empty() || href.is_empty() {
                continue;
            }

            headlines.push(Headline {
                site: site.name.to_string(),
                title: title.to_string(),
                url: resolve_link(site.base_url, href),
            });
            if headlines.len() >= MAX_RESULTS {
                break;
            }
        }
        Ok(headlines)
    }

    /// The outlet that publishes `url`
    pub fn site_for(&self, url: &str) -> Result<&NewsSite> {
        let host = Url::parse(url.trim())?
            .host_str()
            .map(str::to_lowercase)
            .unwrap_or_default();

        self.sites
            .iter()
            .find(|s| s.serves(&host))
            .ok_or_else(|| VitrinaError::UnsupportedSite {
                site: host,
                valid: self.sites.iter().map(|s| s.host.to_string()).collect(),
            })
    }

    /// Title and body of the article at `url`
    pub async fn read(&self, url: &str) -> Result<Article> {
        let site = self.site_for(url)?;
        let session = self.launcher.launch(Some(site.base_url)).await?;
        let article = self.read_on(session.page(), site, url.trim()).await;
        close(session).await;
        article
    }

    async fn read_on(&self, page: &dyn PageHandle, site: &NewsSite, url: &str) -> Result<Article> {
        page.goto(url, self.timeout).await?;

        let title = page
            .wait_for_selector(site.title_selector, self.timeout)
            .await?
            .inner_text()
            .await?;

        let mut paragraphs = Vec::new();
        for node in page.query_selector_all(site.paragraph_selector).await? {
            let text = node.inner_text().await?;
            let text = text.trim();
            if !text.is_empty() {
                paragraphs.push(text.to_string());
            }
        }
        if paragraphs.is_empty() {
            warn!(site = site.name, url, "Article has no paragraphs");
        }

        let url = page.url().await?.unwrap_or_else(|| url.to_string());
        info!(site = site.name, title = %title.trim(), "Article read");

        Ok(Article {
            site: site.name.to_string(),
            url,
            title: title.trim().to_string(),
            text: paragraphs.join("\n\n"),
        })
    }
}

async fn close(session: Box<dyn BrowserSession>) {
    if let Err(e) = session.close().await {
        warn!(error = %e, "Failed to close browser");
    }
}
