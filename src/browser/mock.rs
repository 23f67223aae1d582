//! In-memory browser used by the pipeline tests.
//!
//! A [`MockPage`] serves a fixed list of result pages under the product
//! container selector; clicking the next-page button advances to the next one.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::app::{Result, VitrinaError};
use crate::browser::{BrowserLauncher, BrowserSession, ElementHandle, PageHandle};

#[derive(Clone, Default)]
pub struct MockElement {
    text: String,
    attributes: HashMap<String, String>,
    children: HashMap<String, MockElement>,
    turns_page: Option<Arc<AtomicUsize>>,
    fail_clicks: bool,
    stall_clicks: bool,
    fail_reads: bool,
}

impl MockElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_child(mut self, selector: &str, child: MockElement) -> Self {
        self.children.insert(selector.to_string(), child);
        self
    }

    pub fn failing_clicks(mut self) -> Self {
        self.fail_clicks = true;
        self
    }

    /// Forced clicks on this element never complete
    pub fn stalling_clicks(mut self) -> Self {
        self.stall_clicks = true;
        self
    }

    /// Every DOM read on this element returns an error
    pub fn broken(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    fn check_readable(&self) -> Result<()> {
        if self.fail_reads {
            return Err(VitrinaError::Browser("node detached".into()));
        }
        Ok(())
    }

    fn do_click(&self) -> Result<()> {
        if self.fail_clicks {
            return Err(VitrinaError::Browser("click intercepted".into()));
        }
        if let Some(ref current) = self.turns_page {
            current.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

#[async_trait]
impl ElementHandle for MockElement {
    async fn inner_text(&self) -> Result<String> {
        self.check_readable()?;
        Ok(self.text.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.check_readable()?;
        Ok(self.attributes.get(name).cloned())
    }

    async fn query_selector(&self, selector: &str) -> Result<Option<Box<dyn ElementHandle>>> {
        self.check_readable()?;
        Ok(self
            .children
            .get(selector)
            .cloned()
            .map(|c| Box::new(c) as Box<dyn ElementHandle>))
    }

    async fn fill(&self, _text: &str) -> Result<()> {
        Ok(())
    }

    async fn click(&self) -> Result<()> {
        self.do_click()
    }

    async fn force_click(&self) -> Result<()> {
        if self.stall_clicks {
            std::future::pending::<()>().await;
        }
        self.do_click()
    }

    async fn hover(&self) -> Result<()> {
        Ok(())
    }

    async fn press_enter(&self) -> Result<()> {
        Ok(())
    }
}

pub struct MockPage {
    container: String,
    results: Vec<Vec<MockElement>>,
    current: Arc<AtomicUsize>,
    next_page: Option<(String, MockElement)>,
    fixtures: HashMap<String, Vec<MockElement>>,
    evaluations: Mutex<Vec<serde_json::Value>>,
    visited: Arc<Mutex<Vec<String>>>,
    screenshots: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockPage {
    pub fn new(container: &str) -> Self {
        Self {
            container: container.to_string(),
            results: Vec::new(),
            current: Arc::new(AtomicUsize::new(0)),
            next_page: None,
            fixtures: HashMap::new(),
            evaluations: Mutex::new(Vec::new()),
            visited: Arc::new(Mutex::new(Vec::new())),
            screenshots: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Result pages served, in order, under the container selector
    pub fn with_results(mut self, pages: Vec<Vec<MockElement>>) -> Self {
        self.results = pages;
        self
    }

    /// Next-page button shown while a following result page exists
    pub fn with_next_button(mut self, selector: &str) -> Self {
        self.next_page = Some((selector.to_string(), MockElement::new().with_text("Siguiente")));
        self
    }

    /// Next-page button whose clicks always fail
    pub fn with_broken_next_button(mut self, selector: &str) -> Self {
        self.next_page = Some((selector.to_string(), MockElement::new().failing_clicks()));
        self
    }

    /// Next-page button whose forced clicks hang
    pub fn with_stalled_next_button(mut self, selector: &str) -> Self {
        self.next_page = Some((selector.to_string(), MockElement::new().stalling_clicks()));
        self
    }

    pub fn with_fixture(mut self, selector: &str, element: MockElement) -> Self {
        self.fixtures
            .entry(selector.to_string())
            .or_default()
            .push(element);
        self
    }

    /// Values returned by successive `evaluate` calls
    pub fn with_evaluations(self, values: Vec<serde_json::Value>) -> Self {
        *self.evaluations.lock().unwrap() = values;
        self
    }

    pub fn current_page(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    pub fn visited(&self) -> Arc<Mutex<Vec<String>>> {
        self.visited.clone()
    }

    pub fn screenshots(&self) -> Arc<Mutex<Vec<PathBuf>>> {
        self.screenshots.clone()
    }
}

#[async_trait]
impl PageHandle for MockPage {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<()> {
        if url.contains("unreachable") {
            return Err(VitrinaError::NavigationTimeout {
                url: url.to_string(),
                timeout,
            });
        }
        self.visited.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn url(&self) -> Result<Option<String>> {
        Ok(self.visited.lock().unwrap().last().cloned())
    }

    async fn query_selector_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementHandle>>> {
        let current = self.current_page();

        let found: Vec<MockElement> = if selector == self.container {
            self.results.get(current).cloned().unwrap_or_default()
        } else if let Some((ref next_selector, ref button)) = self.next_page {
            if selector == next_selector && current + 1 < self.results.len() {
                let mut button = button.clone();
                button.turns_page = Some(self.current.clone());
                vec![button]
            } else {
                self.fixtures.get(selector).cloned().unwrap_or_default()
            }
        } else {
            self.fixtures.get(selector).cloned().unwrap_or_default()
        };

        Ok(found
            .into_iter()
            .map(|e| Box::new(e) as Box<dyn ElementHandle>)
            .collect())
    }

    async fn evaluate(&self, _script: &str) -> Result<serde_json::Value> {
        let mut queued = self.evaluations.lock().unwrap();
        if queued.is_empty() {
            return Err(VitrinaError::Browser("nothing to evaluate".into()));
        }
        Ok(queued.remove(0))
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        self.screenshots.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

pub struct MockSession {
    page: MockPage,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl BrowserSession for MockSession {
    fn page(&self) -> &dyn PageHandle {
        &self.page
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out a single prepared page; later launches fail
pub struct MockLauncher {
    page: Mutex<Option<MockPage>>,
    pub launches: Arc<AtomicUsize>,
    pub closes: Arc<AtomicUsize>,
    pub referers: Arc<Mutex<Vec<Option<String>>>>,
}

impl MockLauncher {
    pub fn new(page: MockPage) -> Self {
        Self {
            page: Mutex::new(Some(page)),
            launches: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
            referers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A launcher whose browser never starts
    pub fn unavailable() -> Self {
        Self {
            page: Mutex::new(None),
            launches: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
            referers: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl BrowserLauncher for MockLauncher {
    async fn launch(&self, referer: Option<&str>) -> Result<Box<dyn BrowserSession>> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        self.referers
            .lock()
            .unwrap()
            .push(referer.map(str::to_string));

        let page = self
            .page
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| VitrinaError::Browser("browser not available".into()))?;

        Ok(Box::new(MockSession {
            page,
            closed: self.closes.clone(),
        }))
    }
}
