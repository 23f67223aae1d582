use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::{
    SetLocaleOverrideParams, SetTimezoneOverrideParams, SetUserAgentOverrideParams,
};
use chromiumoxide::cdp::browser_protocol::network::{Headers, SetExtraHttpHeadersParams};
use chromiumoxide::element::Element;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::app::{Result, VitrinaError};
use crate::browser::config::BrowserSettings;
use crate::browser::selector::{SelectorList, SelectorPart};
use crate::browser::{BrowserLauncher, BrowserSession, ElementHandle, PageHandle};

/// CDP request timeout; must outlast the longest navigation bound
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Launches Chrome/Chromium through chromiumoxide
pub struct ChromeLauncher {
    settings: BrowserSettings,
}

impl ChromeLauncher {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let settings = &self.settings;
        let mut builder = BrowserConfig::builder()
            .window_size(settings.viewport_width, settings.viewport_height)
            .viewport(Viewport {
                width: settings.viewport_width,
                height: settings.viewport_height,
                device_scale_factor: None,
                emulating_mobile: false,
                is_landscape: true,
                has_touch: false,
            })
            .request_timeout(REQUEST_TIMEOUT);

        for arg in settings.launch_args() {
            builder = builder.arg(arg);
        }

        if !settings.headless {
            builder = builder.with_head();
        }

        if let Some(ref path) = settings.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder
            .build()
            .map_err(|e| VitrinaError::Browser(format!("Failed to build browser config: {}", e)))
    }

    /// Apply the identity overrides to a fresh page
    async fn prepare_page(&self, browser: &Browser, referer: Option<&str>) -> Result<Page> {
        let page = browser.new_page("about:blank").await?;

        let mut user_agent = SetUserAgentOverrideParams::new(self.settings.user_agent.clone());
        user_agent.accept_language = Some(self.settings.accept_language.clone());
        page.execute(user_agent).await?;

        page.execute(SetLocaleOverrideParams {
            locale: Some(self.settings.locale.clone()),
        })
        .await?;

        page.execute(SetTimezoneOverrideParams::new(
            self.settings.timezone.clone(),
        ))
        .await?;

        let headers = Headers::new(self.settings.extra_headers(referer));
        page.execute(SetExtraHttpHeadersParams::new(headers)).await?;

        Ok(page)
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    async fn launch(&self, referer: Option<&str>) -> Result<Box<dyn BrowserSession>> {
        let config = self.browser_config()?;

        let (mut browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            VitrinaError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "browser handler error");
                }
            }
        });

        let page = match self.prepare_page(&browser, referer).await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                handler_task.abort();
                return Err(e);
            }
        };

        Ok(Box::new(ChromeSession {
            browser,
            page: ChromePage { page },
            handler: handler_task,
        }))
    }
}

struct ChromeSession {
    browser: Browser,
    page: ChromePage,
    handler: JoinHandle<()>,
}

#[async_trait]
impl BrowserSession for ChromeSession {
    fn page(&self) -> &dyn PageHandle {
        &self.page
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let ChromeSession {
            mut browser,
            page,
            handler,
        } = *self;

        if let Err(e) = page.page.close().await {
            warn!(error = %e, "Failed to close page");
        }

        let closed = browser.close().await;
        if let Err(e) = browser.wait().await {
            debug!(error = %e, "Failed to wait for browser process");
        }
        handler.abort();

        closed?;
        Ok(())
    }
}

struct ChromePage {
    page: Page,
}

#[async_trait]
impl PageHandle for ChromePage {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<()> {
        match tokio::time::timeout(timeout, self.page.goto(url)).await {
            Ok(result) => {
                result?;
                Ok(())
            }
            Err(_) => Err(VitrinaError::NavigationTimeout {
                url: url.to_string(),
                timeout,
            }),
        }
    }

    async fn url(&self) -> Result<Option<String>> {
        Ok(self.page.url().await?)
    }

    async fn query_selector_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementHandle>>> {
        let found = query(Scope::Page(&self.page), selector).await?;
        Ok(boxed(found))
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        self.page
            .evaluate(script)
            .await?
            .into_value()
            .map_err(|e| VitrinaError::Browser(format!("Failed to parse result: {:?}", e)))
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        self.page
            .save_screenshot(ScreenshotParams::builder().full_page(true).build(), path)
            .await?;
        Ok(())
    }
}

struct ChromeElement(Element);

#[async_trait]
impl ElementHandle for ChromeElement {
    async fn inner_text(&self) -> Result<String> {
        Ok(self.0.inner_text().await?.unwrap_or_default())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.0.attribute(name).await?)
    }

    async fn query_selector(&self, selector: &str) -> Result<Option<Box<dyn ElementHandle>>> {
        let found = query(Scope::Element(&self.0), selector).await?;
        Ok(boxed(found).into_iter().next())
    }

    async fn fill(&self, text: &str) -> Result<()> {
        self.0
            .call_js_fn("function() { this.value = ''; }", false)
            .await?;
        self.0.click().await?;
        self.0.type_str(text).await?;
        Ok(())
    }

    async fn click(&self) -> Result<()> {
        self.0.click().await?;
        Ok(())
    }

    async fn force_click(&self) -> Result<()> {
        // Dispatched from JS so overlays covering the element don't intercept it
        self.0
            .call_js_fn("function() { this.click(); }", false)
            .await?;
        Ok(())
    }

    async fn hover(&self) -> Result<()> {
        self.0.hover().await?;
        Ok(())
    }

    async fn press_enter(&self) -> Result<()> {
        self.0.press_key("Enter").await?;
        Ok(())
    }
}

enum Scope<'a> {
    Page(&'a Page),
    Element(&'a Element),
}

impl Scope<'_> {
    async fn find(&self, css: &str) -> Result<Vec<Element>> {
        let found = match self {
            Scope::Page(page) => page.find_elements(css).await?,
            Scope::Element(element) => element.find_elements(css).await?,
        };
        Ok(found)
    }
}

async fn query(scope: Scope<'_>, selector: &str) -> Result<Vec<Element>> {
    let list = SelectorList::parse(selector);
    if !list.has_text_filters() {
        return scope.find(list.raw()).await;
    }

    let mut matched = Vec::new();
    for part in list.parts() {
        let candidates = scope.find(&part.css).await?;
        matched.extend(filter_by_text(candidates, part).await?);
    }
    Ok(matched)
}

async fn filter_by_text(elements: Vec<Element>, part: &SelectorPart) -> Result<Vec<Element>> {
    if part.text.is_none() {
        return Ok(elements);
    }

    let mut kept = Vec::new();
    for element in elements {
        let text = element.inner_text().await?.unwrap_or_default();
        if part.matches_text(&text) {
            kept.push(element);
        }
    }
    Ok(kept)
}

fn boxed(elements: Vec<Element>) -> Vec<Box<dyn ElementHandle>> {
    elements
        .into_iter()
        .map(|e| Box::new(ChromeElement(e)) as Box<dyn ElementHandle>)
        .collect()
}

