//! Backend-to-UI events.

use client_core::PageEvent;

#[derive(Debug, Clone)]
pub enum UiEvent {
    BackendReady,
    BackendFailed(String),
    Page(PageEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Startup,
    Unknown,
}

/// Buckets a backend failure message for the status line prefix. Request
/// failures arrive as page statuses, so only worker lifecycle failures come
/// through here.
pub fn classify_backend_failure(message: &str) -> UiErrorCategory {
    let lower = message.to_ascii_lowercase();
    if lower.contains("startup failure") || lower.contains("failed to build") {
        UiErrorCategory::Startup
    } else {
        UiErrorCategory::Unknown
    }
}

pub fn backend_failure_text(message: &str) -> String {
    match classify_backend_failure(message) {
        UiErrorCategory::Startup => {
            format!("Backend worker could not start; restart the app. ({message})")
        }
        UiErrorCategory::Unknown => message.to_string(),
    }
}
