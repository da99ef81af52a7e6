use thiserror::Error;

pub const GENERIC_GENERATION_FAILURE: &str =
    "Failed to generate job description. Please try again.";

/// Which export action hit a missing-session precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportAction {
    Download,
    Preview,
}

impl ExportAction {
    pub fn verb(self) -> &'static str {
        match self {
            ExportAction::Download => "download",
            ExportAction::Preview => "preview",
        }
    }
}

/// Coarse classification used for toasts and the fallback decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing required input. The user corrects the form.
    Validation,
    /// The request never completed.
    Network,
    /// A response arrived but was an error status, a rejection, or unreadable.
    Server,
    /// Export attempted before anything was generated.
    Precondition,
    /// Filesystem or viewer failure on this machine.
    Local,
}

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: missing {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("Generation rejected: {0}")]
    Rejected(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Nothing to {}: no job description generated yet", .0.verb())]
    NothingToExport(ExportAction),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Viewer error: {0}")]
    Viewer(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation { .. } => ErrorKind::Validation,
            AppError::Network(_) => ErrorKind::Network,
            AppError::Http { .. } | AppError::Rejected(_) | AppError::MalformedResponse(_) => {
                ErrorKind::Server
            }
            AppError::NothingToExport(_) => ErrorKind::Precondition,
            AppError::InvalidUrl(_) | AppError::Io(_) | AppError::Viewer(_) => ErrorKind::Local,
        }
    }

    /// Whether a failed generation should be replaced by the placeholder template.
    ///
    /// Only connectivity-class failures qualify. A backend that answered with
    /// `success=false` made a decision about the input, so it only gets a toast.
    pub fn triggers_fallback(&self) -> bool {
        matches!(
            self,
            AppError::Network(_) | AppError::Http { .. } | AppError::MalformedResponse(_)
        )
    }

    /// Text shown to the user in a toast.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation { .. } => "Please fill in all required fields".to_string(),
            AppError::Network(_) => {
                "Network error - please check your connection and try again.".to_string()
            }
            AppError::Http { .. } => "Server error - please try again in a moment.".to_string(),
            AppError::Rejected(msg) => msg.clone(),
            AppError::MalformedResponse(_) => GENERIC_GENERATION_FAILURE.to_string(),
            AppError::NothingToExport(action) => format!(
                "No job description to {}. Please generate one first.",
                action.verb()
            ),
            AppError::InvalidUrl(e) => format!("Invalid backend URL: {e}"),
            AppError::Io(e) => format!("Could not write file: {e}"),
            AppError::Viewer(msg) => format!("Could not open PDF viewer: {msg}"),
        }
    }
}
