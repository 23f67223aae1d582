use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Browser launch and anti-detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Whether to run the browser without a window (default: true)
    pub headless: bool,

    /// User agent string presented to the sites
    pub user_agent: String,

    /// Value of the `Accept-Language` header
    pub accept_language: String,

    /// Locale override, e.g. `es-CO`
    pub locale: String,

    /// IANA timezone override, e.g. `America/Bogota`
    pub timezone: String,

    /// Viewport width in CSS pixels (default: 1366)
    pub viewport_width: u32,

    /// Viewport height in CSS pixels (default: 768)
    pub viewport_height: u32,

    /// Explicit Chrome/Chromium binary; searched in PATH when unset
    pub chrome_executable: Option<PathBuf>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept_language: "es-CO,es;q=0.9".to_string(),
            locale: "es-CO".to_string(),
            timezone: "America/Bogota".to_string(),
            viewport_width: 1366,
            viewport_height: 768,
            chrome_executable: None,
        }
    }
}

impl BrowserSettings {
    /// Chrome command-line flags for these settings
    pub fn launch_args(&self) -> Vec<String> {
        vec![
            "--disable-blink-features=AutomationControlled".to_string(),
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            format!("--lang={}", self.locale),
        ]
    }

    /// Extra HTTP headers sent with every request
    pub fn extra_headers(&self, referer: Option<&str>) -> serde_json::Value {
        let mut headers = serde_json::Map::new();
        headers.insert(
            "Accept-Language".to_string(),
            serde_json::Value::String(self.accept_language.clone()),
        );
        if let Some(referer) = referer {
            headers.insert(
                "Referer".to_string(),
                serde_json::Value::String(referer.to_string()),
            );
        }
        serde_json::Value::Object(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_values() {
        let settings = BrowserSettings::default();
        assert!(settings.headless);
        assert_eq!(settings.viewport_width, 1366);
        assert_eq!(settings.viewport_height, 768);
        assert_eq!(settings.locale, "es-CO");
        assert_eq!(settings.timezone, "America/Bogota");
        assert_eq!(settings.accept_language, "es-CO,es;q=0.9");
        assert!(settings.user_agent.starts_with("Mozilla/5.0"));
        assert!(settings.chrome_executable.is_none());
    }

    #[test]
    fn test_launch_args_hide_automation() {
        let args = BrowserSettings::default().launch_args();
        assert!(args.contains(&"--disable-blink-features=AutomationControlled".to_string()));
        assert!(args.contains(&"--lang=es-CO".to_string()));
    }

    #[test]
    fn test_extra_headers_with_referer() {
        let headers = BrowserSettings::default().extra_headers(Some("https://www.exito.com"));
        assert_eq!(headers["Accept-Language"], "es-CO,es;q=0.9");
        assert_eq!(headers["Referer"], "https://www.exito.com");
    }

    #[test]
    fn test_extra_headers_without_referer() {
        let headers = BrowserSettings::default().extra_headers(None);
        assert!(headers.get("Referer").is_none());
    }
}
