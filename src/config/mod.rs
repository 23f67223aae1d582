//! Configuration management for Vitrina.
//!
//! Configuration is read from `~/.config/vitrina/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::browser::BrowserSettings;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browser: BrowserSettings,
    pub output: OutputConfig,
    pub summarizer: SummarizerConfig,
}

/// Where results are written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Retail CSV/JSON reports and error screenshots
    pub report_dir: PathBuf,
    /// Exported article and section text
    pub text_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from("reportes_retail"),
            text_dir: PathBuf::from("reportes"),
        }
    }
}

/// Summary inference endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub endpoint: String,
    /// Environment variable holding the bearer token, if the endpoint needs one
    pub token_env: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api-inference.huggingface.co/models/sshleifer/distilbart-cnn-12-6"
                .to_string(),
            token_env: Some("HF_TOKEN".to_string()),
            timeout_secs: 60,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/vitrina/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("vitrina").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# Vitrina Configuration

[browser]
# Run the browser without a visible window
headless = true

# Identity presented to the scraped sites
user_agent = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
accept_language = "es-CO,es;q=0.9"
locale = "es-CO"
timezone = "America/Bogota"

# Window and viewport size in CSS pixels
viewport_width = 1366
viewport_height = 768

# Chrome/Chromium binary; searched in PATH when unset
# chrome_executable = "/usr/bin/chromium"

[output]
# Retail CSV/JSON reports and error screenshots
report_dir = "reportes_retail"

# Exported Wikipedia and news text (output.txt / output.json)
text_dir = "reportes"

[summarizer]
# Hugging Face style summarization endpoint
endpoint = "https://api-inference.huggingface.co/models/sshleifer/distilbart-cnn-12-6"

# Environment variable holding the API token
token_env = "HF_TOKEN"

# Request timeout in seconds
timeout_secs = 60
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(Config::default_config_content())
            .expect("Default config should be valid TOML");

        assert!(config.browser.headless);
        assert_eq!(config.browser.viewport_width, 1366);
        assert_eq!(config.browser.timezone, "America/Bogota");
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.summarizer, SummarizerConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[browser]
headless = false

[output]
report_dir = "/tmp/retail"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        // Custom values
        assert!(!config.browser.headless);
        assert_eq!(config.output.report_dir, PathBuf::from("/tmp/retail"));
        // Defaults
        assert_eq!(config.browser.locale, "es-CO");
        assert_eq!(config.output.text_dir, PathBuf::from("reportes"));
        assert_eq!(config.summarizer.timeout_secs, 60);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert_eq!(config.browser.accept_language, "es-CO,es;q=0.9");
        assert_eq!(config.output.report_dir, PathBuf::from("reportes_retail"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[summarizer]\ntoken_env = \"MY_TOKEN\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.summarizer.token_env.as_deref(), Some("MY_TOKEN"));
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[browser\nheadless = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
