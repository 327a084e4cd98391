use serde::{Deserialize, Serialize};

use crate::domain::{ActivityName, ParticipantEmail};

/// Success body of `POST /activities/{name}/signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Query string shared by the signup and unregister endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantQuery {
    pub email: ParticipantEmail,
}

/// The two participant mutations the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantAction {
    Signup,
    Unregister,
}

impl ParticipantAction {
    /// Final path segment under `/activities/{name}/`.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Unregister => "unregister",
        }
    }
}

/// Typed payload carried by a rendered unregister control.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnregisterIntent {
    pub activity: ActivityName,
    pub email: ParticipantEmail,
}

impl UnregisterIntent {
    pub fn new(activity: ActivityName, email: ParticipantEmail) -> Self {
        Self { activity, email }
    }

    pub fn confirmation_prompt(&self) -> String {
        format!("Unregister {} from {}?", self.email, self.activity)
    }
}
