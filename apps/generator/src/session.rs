//! The single "current" result that export operates on.

use serde::Serialize;
use tracing::debug;

use crate::models::job::JobDetails;

/// A canonical description and the details it was generated for.
/// Always written and read as a pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionEntry {
    #[serde(rename = "jobDescription")]
    pub description: String,
    #[serde(rename = "jobDetails")]
    pub details: JobDetails,
}

/// Holds the most recent generation until overwritten or the process exits.
#[derive(Debug, Default)]
pub struct SessionState {
    current: Option<SessionEntry>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both halves of the current result in one step.
    pub fn update(&mut self, description: String, details: JobDetails) {
        debug!(
            "Session updated: '{}' ({} chars)",
            details.title,
            description.len()
        );
        self.current = Some(SessionEntry {
            description,
            details,
        });
    }

    /// The current result, if it has a non-empty description.
    pub fn current(&self) -> Option<&SessionEntry> {
        self.current
            .as_ref()
            .filter(|entry| !entry.description.trim().is_empty())
    }
}
