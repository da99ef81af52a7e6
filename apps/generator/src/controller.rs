//! Generator controller — orchestrates one page session.
//!
//! Flow: submit → validate → `/generate` → parse + render (session updated)
//!       → download / preview reuse the session.
//!
//! Every user action takes `&mut self`, so actions never interleave and the
//! session pair is only ever replaced whole.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend_client::BackendClient;
use crate::description::fallback::placeholder_description;
use crate::description::{present, ResultOrigin, ResultView};
use crate::errors::AppError;
use crate::export::{self, PreviewOptions};
use crate::models::job::{JobDetails, JobFormInput};
use crate::session::SessionState;
use crate::toast::{Notifier, Toast, ToastKind};
use crate::validation::validate_form;
use crate::view_state::{ViewEvent, ViewState};

const GENERATED_MESSAGE: &str = "Job description generated successfully!";
const FALLBACK_MESSAGE: &str = "Generated a template for you to customize";
const DOWNLOADED_MESSAGE: &str = "PDF downloaded";
const DOWNLOAD_FAILED_MESSAGE: &str = "Error downloading PDF. Please try again.";
const PREVIEW_FAILED_MESSAGE: &str = "Error generating PDF preview. Please try again.";

pub struct GeneratorController {
    client: BackendClient,
    notifier: Arc<dyn Notifier>,
    preview: PreviewOptions,
    session: SessionState,
    view_state: ViewState,
    last_form: Option<JobFormInput>,
    result: Option<ResultView>,
}

impl GeneratorController {
    pub fn new(client: BackendClient, notifier: Arc<dyn Notifier>, preview: PreviewOptions) -> Self {
        Self {
            client,
            notifier,
            preview,
            session: SessionState::new(),
            view_state: ViewState::Idle,
            last_form: None,
            result: None,
        }
    }

    pub fn view_state(&self) -> ViewState {
        self.view_state
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// The result currently on display, if any.
    pub fn result(&self) -> Option<&ResultView> {
        self.result.as_ref()
    }

    // ────────────────────────────────────────────────────────────────────────
    // Generation
    // ────────────────────────────────────────────────────────────────────────

    /// Handles a form submission.
    ///
    /// Returns the displayed view (generated or placeholder). Errors that leave
    /// the display unchanged are returned after being toasted.
    pub async fn submit(&mut self, form: &JobFormInput) -> Result<&ResultView, AppError> {
        let form = form.trimmed();
        if let Err(err) = validate_form(&form) {
            warn!("Submission blocked: {err}");
            self.toast(ToastKind::Error, err.user_message());
            return Err(err);
        }
        self.last_form = Some(form.clone());
        self.generate(&form).await
    }

    /// Re-runs generation with the last submitted form.
    pub async fn regenerate(&mut self) -> Result<&ResultView, AppError> {
        let form = self.last_form.clone().unwrap_or_default();
        info!("Regenerating '{}'", form.job_title);
        self.submit(&form).await
    }

    async fn generate(&mut self, form: &JobFormInput) -> Result<&ResultView, AppError> {
        self.transition(ViewEvent::Submit);

        let outcome = self.client.generate(form).await;
        let err = match outcome {
            Ok(result) => {
                let raw = result.description().unwrap_or_default().to_string();
                let details = JobDetails::from_raw(result.job_details);
                let view = present(
                    &raw,
                    details,
                    result.metadata.as_ref(),
                    ResultOrigin::Generated,
                    &mut self.session,
                );
                self.transition(ViewEvent::Succeeded);
                self.toast(ToastKind::Success, GENERATED_MESSAGE);
                return Ok(self.result.insert(view));
            }
            Err(err) => err,
        };

        warn!(kind = ?err.kind(), "Generation failed: {err}");
        self.toast(ToastKind::Error, err.user_message());
        if !err.triggers_fallback() {
            self.transition(ViewEvent::Failed);
            return Err(err);
        }

        info!("Showing placeholder template");
        let view = present(
            &placeholder_description(form),
            JobDetails::from_form(form),
            None,
            ResultOrigin::Placeholder,
            &mut self.session,
        );
        self.transition(ViewEvent::FellBack);
        self.toast(ToastKind::Info, FALLBACK_MESSAGE);
        Ok(self.result.insert(view))
    }

    // ────────────────────────────────────────────────────────────────────────
    // Export
    // ────────────────────────────────────────────────────────────────────────

    pub async fn download(&self, dir: &Path) -> Result<PathBuf, AppError> {
        match export::download_pdf(&self.client, &self.session, dir).await {
            Ok(path) => {
                self.toast(ToastKind::Success, DOWNLOADED_MESSAGE);
                Ok(path)
            }
            Err(err) => {
                self.export_failed(&err, DOWNLOAD_FAILED_MESSAGE);
                Err(err)
            }
        }
    }

    pub async fn preview(&self) -> Result<(), AppError> {
        export::preview_pdf(&self.client, &self.session, &self.preview)
            .await
            .inspect_err(|err| self.export_failed(err, PREVIEW_FAILED_MESSAGE))
    }

    fn export_failed(&self, err: &AppError, message: &str) {
        match err {
            AppError::NothingToExport(_) => self.toast(ToastKind::Warning, err.user_message()),
            _ => {
                warn!("Export failed: {err}");
                self.toast(ToastKind::Error, message);
            }
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Helpers
    // ────────────────────────────────────────────────────────────────────────

    fn transition(&mut self, event: ViewEvent) {
        match self.view_state.next(event) {
            Some(next) => {
                debug!(
                    loading = next.is_loading(),
                    submit_enabled = next.submit_enabled(),
                    "View state {:?} -> {:?}",
                    self.view_state,
                    next
                );
                self.view_state = next;
            }
            None => warn!("Ignoring {:?} in view state {:?}", event, self.view_state),
        }
    }

    fn toast(&self, kind: ToastKind, text: impl Into<String>) {
        self.notifier.notify(Toast::new(kind, text));
    }
}
