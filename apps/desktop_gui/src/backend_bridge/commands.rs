//! Backend commands queued from UI to backend worker.

use client_core::view::SignupRequest;
use shared::protocol::UnregisterIntent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Refresh,
    Signup(SignupRequest),
    /// Only queued after the user confirmed the intent.
    Unregister(UnregisterIntent),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Refresh => "refresh",
            BackendCommand::Signup(_) => "signup",
            BackendCommand::Unregister(_) => "unregister",
        }
    }
}
