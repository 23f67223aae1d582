//! Browser driving for the scrapers.
//!
//! Everything above this module talks to the browser through three object-safe
//! traits, so the pipelines never see `chromiumoxide` types directly:
//!
//! ```text
//! BrowserLauncher → BrowserSession → PageHandle → ElementHandle
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use vitrina::browser::{BrowserLauncher, BrowserSettings, ChromeLauncher};
//!
//! let launcher = ChromeLauncher::new(BrowserSettings::default());
//! let session = launcher.launch(Some("https://www.exito.com")).await?;
//!
//! session.page().goto("https://www.exito.com", Duration::from_secs(60)).await?;
//! let cards = session.page().query_selector_all("article").await?;
//!
//! session.close().await?;
//! ```

mod chrome;
mod config;
mod selector;

#[cfg(test)]
pub(crate) mod mock;

pub use chrome::ChromeLauncher;
pub use config::BrowserSettings;
pub use selector::{SelectorList, SelectorPart};

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::app::{Result, VitrinaError};

/// How often [`PageHandle::wait_for_selector`] re-queries the DOM.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A single DOM element.
#[async_trait]
pub trait ElementHandle: Send + Sync {
    /// Rendered text of the element (`innerText`), empty when it has none
    async fn inner_text(&self) -> Result<String>;

    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// First descendant matching `selector`, if any
    async fn query_selector(&self, selector: &str) -> Result<Option<Box<dyn ElementHandle>>>;

    /// Replace the element's value with `text` as typed input
    async fn fill(&self, text: &str) -> Result<()>;

    async fn click(&self) -> Result<()>;

    /// Click through whatever overlays cover the element
    async fn force_click(&self) -> Result<()>;

    async fn hover(&self) -> Result<()>;

    async fn press_enter(&self) -> Result<()>;
}

/// The page a session drives.
#[async_trait]
pub trait PageHandle: Send + Sync {
    /// Navigate to `url`, failing once `timeout` elapses
    async fn goto(&self, url: &str, timeout: Duration) -> Result<()>;

    async fn url(&self) -> Result<Option<String>>;

    /// All elements matching `selector`, in document order
    async fn query_selector_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementHandle>>>;

    /// Evaluate a JavaScript expression and return its JSON value
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value>;

    /// Save a PNG snapshot of the page to `path`
    async fn screenshot(&self, path: &Path) -> Result<()>;

    /// Bounded wait for the first element matching `selector`.
    ///
    /// Query errors while waiting are treated as "not there yet" since the
    /// DOM is often mid-navigation.
    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Box<dyn ElementHandle>> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.query_selector_all(selector).await {
                Ok(found) => {
                    if let Some(first) = found.into_iter().next() {
                        return Ok(first);
                    }
                }
                Err(e) => tracing::debug!(selector, error = %e, "query failed while waiting"),
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(VitrinaError::SelectorTimeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            tokio::time::sleep(POLL_INTERVAL.min(deadline - now)).await;
        }
    }
}

/// One browser process with one open page, exclusively owned by a scrape run.
#[async_trait]
pub trait BrowserSession: Send {
    fn page(&self) -> &dyn PageHandle;

    /// Close the page, then the browser
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Opens configured browser sessions.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Launch a session; `referer` is sent as the `Referer` header when set
    async fn launch(&self, referer: Option<&str>) -> Result<Box<dyn BrowserSession>>;
}

#[cfg(test)]
mod tests {
    use super::mock::{MockElement, MockPage};
    use super::*;

    #[tokio::test]
    async fn test_wait_for_selector_returns_first_match() {
        let page = MockPage::new("div.card")
            .with_fixture("input.search", MockElement::new().with_text("first"))
            .with_fixture("input.search", MockElement::new().with_text("second"));

        let found = page
            .wait_for_selector("input.search", Duration::from_millis(50))
            .await
            .unwrap();
        assert_eq!(found.inner_text().await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_wait_for_selector_times_out() {
        let page = MockPage::new("div.card");
        let err = page
            .wait_for_selector("input.missing", Duration::from_millis(20))
            .await
            .err()
            .unwrap();

        assert!(matches!(
            err,
            VitrinaError::SelectorTimeout { ref selector, .. } if selector == "input.missing"
        ));
    }
}
