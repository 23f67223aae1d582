//! Spanish Wikipedia section reader.
//!
//! Lists an article's top-level sections and pulls the first paragraphs of
//! one of them. The browser returns the article body as a flat list of
//! headings and paragraphs; section boundaries are resolved here.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::app::{Result, VitrinaError};
use crate::browser::{BrowserLauncher, BrowserSession, PageHandle};

pub const WIKI_BASE: &str = "https://es.wikipedia.org/wiki/";
/// Pseudo-section for the lead paragraphs before the first heading
pub const INTRODUCTION: &str = "Introducción";
pub const MAX_PARAGRAPHS: usize = 3;

const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Headings that hold lists and links rather than prose
const SKIPPED_SECTIONS: [&str; 5] = [
    "Contenidos",
    "Véase también",
    "Referencias",
    "Enlaces externos",
    "Bibliografía",
];

const SECTIONS_SCRIPT: &str =
    "Array.from(document.querySelectorAll('h2')).map(h => h.innerText.trim())";

/// Direct children of the article body only; the sidebar table of contents
/// lives outside it.
const BODY_SCRIPT: &str = r#"(() => {
  const root = document.querySelector('#mw-content-text .mw-parser-output');
  if (!root) return [];
  return Array.from(root.children).map(node => {
    const heading = node.tagName === 'H2'
      ? node
      : (node.classList.contains('mw-heading2') ? node.querySelector('h2') : null);
    if (heading) return { kind: 'heading', text: heading.innerText.trim() };
    if (node.tagName === 'P') return { kind: 'paragraph', text: node.innerText.trim() };
    return { kind: 'other', text: '' };
  });
})()"#;

/// Result of looking up an article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLookup {
    pub url: String,
    /// Selectable sections, [`INTRODUCTION`] first; empty when the page has no headings
    pub sections: Vec<String>,
    /// The chosen section and its text
    pub selected: Option<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum BlockKind {
    Heading,
    Paragraph,
    Other,
}

/// One top-level element of the article body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct Block {
    kind: BlockKind,
    #[serde(default)]
    text: String,
}

pub struct WikiScraper {
    launcher: Arc<dyn BrowserLauncher>,
}

impl WikiScraper {
    pub fn new(launcher: Arc<dyn BrowserLauncher>) -> Self {
        Self { launcher }
    }

    /// Selectable sections of the article for `term`
    pub async fn sections(&self, term: &str) -> Result<Vec<String>> {
        Ok(self.lookup(term, None).await?.sections)
    }

    /// Text of the section headed `section` in the article for `term`
    pub async fn section_text(&self, term: &str, section: &str) -> Result<String> {
        let url = article_url(term);
        let session = self.open(&url).await?;
        let text = read_section(session.page(), section).await;
        close(session).await;
        text
    }

    /// List the sections and, when `pick` is set, read the `pick`-th (1-based) one
    pub async fn lookup(&self, term: &str, pick: Option<usize>) -> Result<WikiLookup> {
        let url = article_url(term);
        let session = self.open(&url).await?;
        let lookup = lookup_on(session.page(), url, pick).await;
        close(session).await;
        lookup
    }

    async fn open(&self, url: &str) -> Result<Box<dyn BrowserSession>> {
        info!(url, "Opening article");
        let session = self.launcher.launch(Some(WIKI_BASE)).await?;
        let loaded = session.page().goto(url, NAVIGATION_TIMEOUT).await;
        match loaded {
            Ok(()) => Ok(session),
            Err(e) => {
                close(session).await;
                Err(e)
            }
        }
    }
}

async fn lookup_on(page: &dyn PageHandle, url: String, pick: Option<usize>) -> Result<WikiLookup> {
    let sections = list_sections(page).await?;
    if sections.is_empty() {
        warn!(url = %url, "No sections found");
    }

    let selected = match pick {
        None => None,
        Some(n) => {
            let section = n
                .checked_sub(1)
                .and_then(|i| sections.get(i))
                .ok_or_else(|| {
                    VitrinaError::InvalidRequest(format!(
                        "section {} out of range (1-{})",
                        n,
                        sections.len()
                    ))
                })?
                .clone();
            info!(section = %section, "Section selected");
            let text = read_section(page, &section).await?;
            Some((section, text))
        }
    };

    Ok(WikiLookup {
        url,
        sections,
        selected,
    })
}

async fn list_sections(page: &dyn PageHandle) -> Result<Vec<String>> {
    let headings: Vec<String> = serde_json::from_value(page.evaluate(SECTIONS_SCRIPT).await?)?;
    Ok(filter_sections(headings))
}

async fn read_section(page: &dyn PageHandle, section: &str) -> Result<String> {
    let blocks: Vec<Block> = serde_json::from_value(page.evaluate(BODY_SCRIPT).await?)?;
    let paragraphs = section_paragraphs(&blocks, section).ok_or_else(|| {
        VitrinaError::Other(format!("section `{}` not found on the page", section))
    })?;
    if paragraphs.is_empty() {
        warn!(section, "Section has no text");
    }
    Ok(paragraphs.join("\n\n"))
}

async fn close(session: Box<dyn BrowserSession>) {
    if let Err(e) = session.close().await {
        warn!(error = %e, "Failed to close browser");
    }
}

pub fn article_url(term: &str) -> String {
    format!("{}{}", WIKI_BASE, term.trim().replace(' ', "_"))
}

/// Drop non-prose headings and put [`INTRODUCTION`] first.
///
/// A page without any headings has no sections at all.
pub fn filter_sections(headings: Vec<String>) -> Vec<String> {
    if headings.is_empty() {
        return Vec::new();
    }
    std::iter::once(INTRODUCTION.to_string())
        .chain(
            headings
                .into_iter()
                .filter(|h| !h.is_empty() && !SKIPPED_SECTIONS.contains(&h.as_str())),
        )
        .collect()
}

/// Up to [`MAX_PARAGRAPHS`] non-empty paragraphs between the heading named
/// `section` and the next heading. [`INTRODUCTION`] covers everything before
/// the first heading. `None` when no such heading exists.
fn section_paragraphs(blocks: &[Block], section: &str) -> Option<Vec<String>> {
    let start = if section == INTRODUCTION {
        0
    } else {
        blocks
            .iter()
            .position(|b| b.kind == BlockKind::Heading && b.text == section)?
            + 1
    };

    Some(
        blocks[start..]
            .iter()
            .take_while(|b| b.kind != BlockKind::Heading)
            .filter(|b| b.kind == BlockKind::Paragraph && !b.text.is_empty())
            .take(MAX_PARAGRAPHS)
            .map(|b| b.text.clone())
            .collect(),
    )
}
