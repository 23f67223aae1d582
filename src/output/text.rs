use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::app::Result;
use crate::summarizer::Summarizer;

const TEXT_FILE: &str = "output.txt";
const JSON_FILE: &str = "output.json";

/// What to keep from an extracted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// The text as extracted
    #[default]
    Raw,
    /// A model-generated summary of it
    Summary,
}

impl TextMode {
    /// Label written into the exported files
    pub fn label(self) -> &'static str {
        match self {
            TextMode::Raw => "text",
            TextMode::Summary => "ai_summary",
        }
    }
}

#[derive(Debug, Serialize)]
struct ExportedText<'a> {
    url: &'a str,
    section: &'a str,
    mode: &'a str,
    content: &'a str,
}

/// Writes the latest processed text to `output.txt` and `output.json`,
/// replacing what a previous run left there
#[derive(Debug, Clone)]
pub struct TextExporter {
    dir: PathBuf,
}

impl TextExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn export(&self, url: &str, section: &str, mode: TextMode, content: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let mut txt = BufWriter::new(File::create(self.dir.join(TEXT_FILE))?);
        writeln!(txt, "URL: {}", url)?;
        writeln!(txt, "Section: {}", section)?;
        writeln!(txt, "Mode: {}", mode.label())?;
        writeln!(txt)?;
        txt.write_all(content.as_bytes())?;
        txt.flush()?;

        let json = BufWriter::new(File::create(self.dir.join(JSON_FILE))?);
        serde_json::to_writer_pretty(
            json,
            &ExportedText {
                url,
                section,
                mode: mode.label(),
                content,
            },
        )?;

        info!(dir = %self.dir.display(), mode = mode.label(), "Content exported");
        Ok(())
    }
}

/// Export `text` from `url` as-is or summarized.
///
/// Returns the content that was written, or `None` when there was nothing to
/// write (empty text or no summary).
pub async fn process_text(
    url: &str,
    section: &str,
    text: &str,
    mode: TextMode,
    summarizer: &dyn Summarizer,
    exporter: &TextExporter,
) -> Result<Option<String>> {
    if text.trim().is_empty() {
        warn!(url, section, "No text to process");
        return Ok(None);
    }

    let content = match mode {
        TextMode::Raw => text.to_string(),
        TextMode::Summary => match summarizer.summarize(text).await {
            Some(summary) => summary,
            None => {
                warn!(url, section, "No summary produced, nothing exported");
                return Ok(None);
            }
        },
    };

    exporter.export(url, section, mode, &content)?;
    Ok(Some(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedSummary(Option<&'static str>);

    #[async_trait]
    impl Summarizer for FixedSummary {
        async fn summarize(&self, _text: &str) -> Option<String> {
            self.0.map(String::from)
        }
    }

    #[tokio::test]
    async fn test_raw_text_exported() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = TextExporter::new(dir.path().join("reportes"));

        let written = process_text(
            "https://es.wikipedia.org/wiki/Rust",
            "Historia",
            "Primer párrafo.",
            TextMode::Raw,
            &FixedSummary(None),
            &exporter,
        )
        .await
        .unwrap();

        assert_eq!(written.as_deref(), Some("Primer párrafo."));
        let txt = fs::read_to_string(exporter.dir().join(TEXT_FILE)).unwrap();
        assert_eq!(
            txt,
            "URL: https://es.wikipedia.org/wiki/Rust\nSection: Historia\nMode: text\n\nPrimer párrafo."
        );
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(exporter.dir().join(JSON_FILE)).unwrap())
                .unwrap();
        assert_eq!(json["mode"], "text");
        assert_eq!(json["content"], "Primer párrafo.");
    }

    #[tokio::test]
    async fn test_summary_overwrites_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = TextExporter::new(dir.path());
        exporter
            .export("https://a", "Noticia", TextMode::Raw, "viejo")
            .unwrap();

        process_text(
            "https://b",
            "Noticia",
            "texto largo",
            TextMode::Summary,
            &FixedSummary(Some("resumen")),
            &exporter,
        )
        .await
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(JSON_FILE)).unwrap()).unwrap();
        assert_eq!(json["url"], "https://b");
        assert_eq!(json["mode"], "ai_summary");
        assert_eq!(json["content"], "resumen");
    }

    #[tokio::test]
    async fn test_empty_text_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = TextExporter::new(dir.path().join("reportes"));

        let written = process_text("u", "s", "  ", TextMode::Raw, &FixedSummary(None), &exporter)
            .await
            .unwrap();

        assert!(written.is_none());
        assert!(!exporter.dir().exists());
    }

    #[tokio::test]
    async fn test_failed_summary_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = TextExporter::new(dir.path().join("reportes"));

        let written = process_text(
            "u",
            "s",
            "texto",
            TextMode::Summary,
            &FixedSummary(None),
            &exporter,
        )
        .await
        .unwrap();

        assert!(written.is_none());
        assert!(!exporter.dir().exists());
    }
}
