use std::path::Path;
use std::sync::Arc;

use crate::app::error::Result;
use crate::browser::{BrowserLauncher, ChromeLauncher};
use crate::config::Config;
use crate::news::NewsScraper;
use crate::output::{RecordWriter, TextExporter};
use crate::retail::sites::default_sites;
use crate::retail::{HumanPacing, Pacing, RetailScraper, ScrapeOrchestrator};
use crate::summarizer::{HttpSummarizer, Summarizer};
use crate::wiki::WikiScraper;

pub struct AppContext {
    pub config: Config,
    pub orchestrator: ScrapeOrchestrator,
    pub wiki: WikiScraper,
    pub news: NewsScraper,
    pub summarizer: Arc<dyn Summarizer>,
    pub exporter: TextExporter,
}

impl AppContext {
    /// Build from the config at `config_path`, or the default config file
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let launcher: Arc<dyn BrowserLauncher> =
            Arc::new(ChromeLauncher::new(config.browser.clone()));
        let summarizer: Arc<dyn Summarizer> = Arc::new(HttpSummarizer::new(&config.summarizer)?);
        Ok(Self::with_parts(config, launcher, Arc::new(HumanPacing), summarizer))
    }

    /// Wire the scrapers around the given browser, pacing and summarizer
    pub fn with_parts(
        config: Config,
        launcher: Arc<dyn BrowserLauncher>,
        pacing: Arc<dyn Pacing>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        let writer = RecordWriter::new(&config.output.report_dir);
        let scraper = RetailScraper::new(launcher.clone(), pacing, writer);
        let orchestrator = ScrapeOrchestrator::new(scraper, default_sites());

        Self {
            orchestrator,
            wiki: WikiScraper::new(launcher.clone()),
            news: NewsScraper::new(launcher),
            summarizer,
            exporter: TextExporter::new(&config.output.text_dir),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::mock::{MockLauncher, MockPage};
    use crate::retail::NoPacing;

    #[test]
    fn test_context_wiring() {
        let mut config = Config::default();
        config.output.report_dir = "out/retail".into();
        config.output.text_dir = "out/text".into();
        let summarizer: Arc<dyn Summarizer> =
            Arc::new(HttpSummarizer::new(&config.summarizer).unwrap());

        let ctx = AppContext::with_parts(
            config,
            Arc::new(MockLauncher::new(MockPage::new("div"))),
            Arc::new(NoPacing),
            summarizer,
        );

        assert_eq!(ctx.orchestrator.site_keys(), vec!["mercadolibre", "exito"]);
        assert_eq!(
            ctx.orchestrator.scraper().writer().dir(),
            Path::new("out/retail")
        );
        assert_eq!(ctx.exporter.dir(), Path::new("out/text"));
        assert_eq!(ctx.news.sites().len(), 3);
    }
}
