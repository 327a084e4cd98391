//! Failure taxonomy for calls against the activities server.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    /// The request never produced a usable response.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("server rejected request with status {status}")]
    Rejected { status: u16, detail: Option<String> },
    /// A 2xx response whose body did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("server url {0} cannot be used as a base for endpoint paths")]
    InvalidBaseUrl(String),
}

impl ActionError {
    pub fn rejected(status: u16, detail: Option<String>) -> Self {
        Self::Rejected { status, detail }
    }

    /// Detail text reported by the server, if any.
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Malformed bodies are shown to the user the same way as network errors.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }
}

impl From<reqwest::Error> for ActionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ActionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid server url {url:?}: {reason}")]
    InvalidServerUrl { url: String, reason: String },
    #[error("unsupported server url scheme {0:?}; expected http or https")]
    UnsupportedScheme(String),
}
