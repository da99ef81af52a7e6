use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_PDF_VIEWER: &str = "xdg-open";
const DEFAULT_PREVIEW_RELEASE_SECS: u64 = 10;

/// Client configuration loaded from environment variables.
/// Every variable is optional; CLI flags override the base URL.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    /// `None` keeps the HTTP transport default.
    pub timeout: Option<Duration>,
    pub pdf_viewer: String,
    pub preview_release: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout = lookup("JDGEN_TIMEOUT_SECS")
            .map(|v| {
                v.parse::<u64>()
                    .context("JDGEN_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?
            .map(Duration::from_secs);

        let preview_release = match lookup("JDGEN_PREVIEW_RELEASE_SECS") {
            Some(v) => v
                .parse::<u64>()
                .context("JDGEN_PREVIEW_RELEASE_SECS must be a whole number of seconds")?,
            None => DEFAULT_PREVIEW_RELEASE_SECS,
        };

        Ok(Config {
            base_url: lookup("JDGEN_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
            pdf_viewer: lookup("JDGEN_PDF_VIEWER").unwrap_or_else(|| DEFAULT_PDF_VIEWER.to_string()),
            preview_release: Duration::from_secs(preview_release),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
