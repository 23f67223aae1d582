use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::app::{Result, VitrinaError};
use crate::config::SummarizerConfig;

/// Characters of input sent to the model
pub const MAX_INPUT_CHARS: usize = 1024;
pub const MIN_SUMMARY_LENGTH: u32 = 30;
pub const MAX_SUMMARY_LENGTH: u32 = 130;

/// Turns long text into a short abstract.
///
/// Failures are reported as `None`; callers just skip the summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Option<String>;
}

#[derive(Debug, Serialize)]
struct SummaryRequest<'a> {
    inputs: &'a str,
    parameters: SummaryParameters,
}

#[derive(Debug, Serialize)]
struct SummaryParameters {
    min_length: u32,
    max_length: u32,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    summary_text: String,
}

/// Client for a Hugging Face style summarization inference endpoint
pub struct HttpSummarizer {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpSummarizer {
    pub fn new(config: &SummarizerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("vitrina/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let token = config
            .token_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|t| !t.trim().is_empty());

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token,
        })
    }

    async fn request(&self, text: &str) -> Result<String> {
        let body = SummaryRequest {
            inputs: truncate_chars(text, MAX_INPUT_CHARS),
            parameters: SummaryParameters {
                min_length: MIN_SUMMARY_LENGTH,
                max_length: MAX_SUMMARY_LENGTH,
                do_sample: false,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        response.error_for_status_ref()?;

        let summaries: Vec<SummaryResponse> = response.json().await?;
        summaries
            .into_iter()
            .next()
            .map(|s| s.summary_text.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| VitrinaError::Other("summary service returned no summary".into()))
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            warn!("No text to summarize");
            return None;
        }

        info!(endpoint = %self.endpoint, "Summarizing text");
        match self.request(text).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!(error = %e, "Summary failed");
                None
            }
        }
    }
}

/// The first `max` characters of `text`, cut on a char boundary
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
