use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the server on non-2xx responses.
///
/// `detail` is usually a string, but validation failures carry a structured
/// value, so it is kept as raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The detail text, when the server sent a non-empty string.
    pub fn detail_text(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .filter(|text| !text.is_empty())
    }
}

/// Input rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter an email address.")]
    MissingEmail,
    #[error("Please select an activity.")]
    MissingActivity,
}
