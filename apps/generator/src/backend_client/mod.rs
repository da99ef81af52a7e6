//! HTTP client for the generator backend.
//!
//! Two endpoints: `POST /generate` (JSON in, JSON out) and `POST /download_pdf`
//! (JSON in, PDF bytes out). One attempt per call; no retry or backoff.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::errors::{AppError, GENERIC_GENERATION_FAILURE};
use crate::models::job::{GenerationResult, JobFormInput};
use crate::session::SessionEntry;

const GENERATE_PATH: &str = "generate";
const DOWNLOAD_PDF_PATH: &str = "download_pdf";

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base: Url,
}

impl BackendClient {
    /// `timeout` of `None` leaves the transport default in place.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let base = Url::parse(base_url)?.join("/")?;
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(AppError::Network)?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, AppError> {
        Ok(self.base.join(path)?)
    }

    /// Posts the form to `/generate`.
    ///
    /// Succeeds only on a 2xx whose body has `success=true` and a non-empty
    /// `jobDescription`.
    pub async fn generate(&self, form: &JobFormInput) -> Result<GenerationResult, AppError> {
        let url = self.url(GENERATE_PATH)?;
        info!("Requesting generation for '{}' at {}", form.job_title, url);

        let response = self
            .client
            .post(url)
            .json(form)
            .send()
            .await
            .map_err(AppError::Network)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Generation endpoint returned {}", status);
            return Err(AppError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(AppError::Network)?;
        let result: GenerationResult = serde_json::from_slice(&body)
            .map_err(|e| AppError::MalformedResponse(e.to_string()))?;

        if !result.success || result.description().is_none() {
            let message = result
                .failure_message()
                .unwrap_or(GENERIC_GENERATION_FAILURE)
                .to_string();
            warn!("Generation rejected by backend: {}", message);
            return Err(AppError::Rejected(message));
        }

        if let Some(meta) = result.metadata.as_ref().filter(|m| m.fallback_used == Some(true)) {
            warn!(
                model_available = ?meta.model_available,
                api_attempted = ?meta.api_attempted,
                api_error = ?meta.api_error,
                "Backend answered with its own fallback text"
            );
        }
        debug!(
            "Generation succeeded: {} chars, word_count={:?}",
            result.description().map_or(0, str::len),
            result.metadata.as_ref().and_then(|m| m.word_count)
        );
        Ok(result)
    }

    /// Posts the current session pair to `/download_pdf` and returns the PDF bytes.
    pub async fn export_pdf(&self, entry: &SessionEntry) -> Result<Bytes, AppError> {
        let url = self.url(DOWNLOAD_PDF_PATH)?;
        info!("Requesting PDF export for '{}'", entry.details.title);

        let response = self
            .client
            .post(url)
            .json(entry)
            .send()
            .await
            .map_err(AppError::Network)?;

        let status = response.status();
        if !status.is_success() {
            warn!("PDF endpoint returned {}", status);
            return Err(AppError::Http {
                status: status.as_u16(),
            });
        }

        let pdf = response.bytes().await.map_err(AppError::Network)?;
        debug!("Received {} PDF bytes", pdf.len());
        Ok(pdf)
    }
}
