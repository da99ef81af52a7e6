//! Export Client — download or preview the backend-rendered PDF of the
//! current session.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::backend_client::BackendClient;
use crate::errors::{AppError, ExportAction};
use crate::session::{SessionEntry, SessionState};

const FILENAME_SUFFIX: &str = "_job_description.pdf";

/// How previews are opened and how long the temp file outlives the viewer launch.
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    pub viewer: String,
    pub release_after: Duration,
}

/// `Senior Dev (Remote)` → `senior_dev__remote__job_description.pdf`.
pub fn pdf_filename(title: &str) -> String {
    let base = if title.is_empty() {
        "job_description"
    } else {
        title
    };
    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{sanitized}{FILENAME_SUFFIX}")
}

/// Fails fast, before any request, when nothing has been generated.
fn require_entry(session: &SessionState, action: ExportAction) -> Result<&SessionEntry, AppError> {
    session
        .current()
        .ok_or(AppError::NothingToExport(action))
}

/// Fetches the PDF and writes it into `dir`. Returns the written path.
pub async fn download_pdf(
    client: &BackendClient,
    session: &SessionState,
    dir: &Path,
) -> Result<PathBuf, AppError> {
    let entry = require_entry(session, ExportAction::Download)?;
    let pdf = client.export_pdf(entry).await?;

    let path = dir.join(pdf_filename(&entry.details.title));
    tokio::fs::write(&path, &pdf).await?;
    info!("Saved PDF to {}", path.display());
    Ok(path)
}

/// Fetches the PDF, opens it in the configured viewer, then drops the
/// temporary file once `release_after` has elapsed.
pub async fn preview_pdf(
    client: &BackendClient,
    session: &SessionState,
    options: &PreviewOptions,
) -> Result<(), AppError> {
    let entry = require_entry(session, ExportAction::Preview)?;
    let pdf = client.export_pdf(entry).await?;

    let file = tempfile::Builder::new()
        .prefix("jd-preview-")
        .suffix(".pdf")
        .tempfile()?;
    tokio::fs::write(file.path(), &pdf).await?;
    debug!("Wrote preview to {}", file.path().display());

    let status = tokio::process::Command::new(&options.viewer)
        .arg(file.path())
        .status()
        .await
        .map_err(|e| AppError::Viewer(format!("{}: {e}", options.viewer)))?;
    if !status.success() {
        return Err(AppError::Viewer(format!(
            "{} exited with {status}",
            options.viewer
        )));
    }
    info!("Opened preview with {}", options.viewer);

    tokio::time::sleep(options.release_after).await;
    drop(file);
    debug!("Released preview file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::MockServer;

    use crate::models::job::JobDetails;

    fn session_with(title: &str) -> SessionState {
        let mut session = SessionState::new();
        session.update(
            "How to Apply:\nPlease send your application to a@b.com".to_string(),
            JobDetails {
                title: title.to_string(),
                ..Default::default()
            },
        );
        session
    }

    #[test]
    fn test_pdf_filename_sanitizes_and_lowercases() {
        assert_eq!(
            pdf_filename("Senior Dev (Remote)"),
            "senior_dev__remote__job_description.pdf"
        );
        assert_eq!(pdf_filename("QA/Tester"), "qa_tester_job_description.pdf");
        assert_eq!(pdf_filename(""), "job_description_job_description.pdf");
    }

    #[tokio::test]
    async fn test_download_without_session_issues_no_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/download_pdf");
                then.status(200).body("%PDF");
            })
            .await;
        let client = BackendClient::new(&server.base_url(), None).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let err = download_pdf(&client, &SessionState::new(), dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NothingToExport(ExportAction::Download)));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_download_writes_named_file() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/download_pdf");
                then.status(200)
                    .header("content-type", "application/pdf")
                    .body("%PDF-1.4 body");
            })
            .await;
        let client = BackendClient::new(&server.base_url(), None).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let path = download_pdf(&client, &session_with("Rust Engineer"), dir.path())
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("rust_engineer_job_description.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 body");
    }

    #[tokio::test]
    async fn test_download_server_error_writes_nothing() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/download_pdf");
                then.status(500);
            })
            .await;
        let client = BackendClient::new(&server.base_url(), None).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let err = download_pdf(&client, &session_with("Rust Engineer"), dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Http { status: 500 }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_preview_without_session_issues_no_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/download_pdf");
                then.status(200);
            })
            .await;
        let client = BackendClient::new(&server.base_url(), None).unwrap();
        let options = PreviewOptions {
            viewer: "true".to_string(),
            release_after: Duration::ZERO,
        };

        let err = preview_pdf(&client, &SessionState::new(), &options)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NothingToExport(ExportAction::Preview)));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_preview_runs_viewer() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/download_pdf");
                then.status(200).body("%PDF");
            })
            .await;
        let client = BackendClient::new(&server.base_url(), None).unwrap();
        let options = PreviewOptions {
            viewer: "true".to_string(),
            release_after: Duration::ZERO,
        };

        preview_pdf(&client, &session_with("Engineer"), &options)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_preview_reports_failing_viewer() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/download_pdf");
                then.status(200).body("%PDF");
            })
            .await;
        let client = BackendClient::new(&server.base_url(), None).unwrap();
        let options = PreviewOptions {
            viewer: "false".to_string(),
            release_after: Duration::ZERO,
        };

        let err = preview_pdf(&client, &session_with("Engineer"), &options)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Viewer(_)));
    }
}
