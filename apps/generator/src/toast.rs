//! Transient user feedback. Not data-bearing.

#[cfg(test)]
use std::sync::Mutex;

use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
    pub ttl_ms: u64,
}

impl Toast {
    /// Errors stay up longer than everything else.
    pub fn new(kind: ToastKind, text: impl Into<String>) -> Self {
        let ttl_ms = match kind {
            ToastKind::Error => 5_000,
            _ => 3_000,
        };
        Self {
            kind,
            text: text.into(),
            ttl_ms,
        }
    }
}

/// Where toasts go. Swapped in tests for a recording implementation.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Default notifier: each toast becomes a log event at a matching level.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success | ToastKind::Info => {
                info!(kind = ?toast.kind, ttl_ms = toast.ttl_ms, "{}", toast.text)
            }
            ToastKind::Warning => warn!(ttl_ms = toast.ttl_ms, "{}", toast.text),
            ToastKind::Error => error!(ttl_ms = toast.ttl_ms, "{}", toast.text),
        }
    }
}

/// Keeps every toast in memory, in order.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_ttl_longer() {
        assert_eq!(Toast::new(ToastKind::Error, "x").ttl_ms, 5_000);
        assert_eq!(Toast::new(ToastKind::Warning, "x").ttl_ms, 3_000);
        assert_eq!(Toast::new(ToastKind::Success, "x").ttl_ms, 3_000);
    }

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::default();
        notifier.notify(Toast::new(ToastKind::Info, "first"));
        notifier.notify(Toast::new(ToastKind::Error, "second"));
        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].text, "first");
        assert_eq!(toasts[1].kind, ToastKind::Error);
    }
}
