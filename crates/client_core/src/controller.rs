//! Refresh, signup and unregister flows. Each flow makes exactly one request
//! and reports what the view should do through [`PageEvent`]s.

use std::sync::Arc;

use shared::{
    domain::{ActivityCatalog, ActivityName, ParticipantEmail},
    protocol::{MessageResponse, UnregisterIntent},
};
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use crate::{error::ActionError, notifier::StatusMessage, view::SignupRequest, ActivitiesApi};

pub const SERVER_ERROR_FALLBACK: &str = "An error occurred";
pub const SIGNUP_TRANSPORT_FAILURE: &str = "Failed to sign up. Please try again.";
pub const UNREGISTER_TRANSPORT_FAILURE: &str = "Failed to unregister. Please try again.";

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    CatalogLoaded(ActivityCatalog),
    CatalogUnavailable,
    Status(StatusMessage),
    /// The signup form should be cleared.
    SignupAccepted,
}

/// Status shown for a failed participant action: the server's detail text
/// verbatim, the generic fallback when it sent none, or the per-action
/// transport message.
pub fn failure_status(err: &ActionError, transport_text: &str) -> StatusMessage {
    if err.is_transport() {
        return StatusMessage::error(transport_text);
    }
    StatusMessage::error(err.server_detail().unwrap_or(SERVER_ERROR_FALLBACK))
}

pub fn unregister_success_text(intent: &UnregisterIntent) -> String {
    format!("Unregistered {} from {}", intent.email, intent.activity)
}

pub struct PageController {
    api: Arc<dyn ActivitiesApi>,
    events: broadcast::Sender<PageEvent>,
}

impl PageController {
    pub fn new(api: Arc<dyn ActivitiesApi>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self { api, events })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PageEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: PageEvent) {
        // Fails only when nobody is subscribed.
        let _ = self.events.send(event);
    }

    /// Fetches the catalog and asks the view to rebuild. Failures are not
    /// retried.
    pub async fn refresh(&self) -> Result<ActivityCatalog, ActionError> {
        match self.api.list_activities().await {
            Ok(catalog) => {
                info!(activities = catalog.len(), "activities: catalog loaded");
                self.emit(PageEvent::CatalogLoaded(catalog.clone()));
                Ok(catalog)
            }
            Err(err) => {
                error!("activities: error fetching activities: {err}");
                self.emit(PageEvent::CatalogUnavailable);
                Err(err)
            }
        }
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<MessageResponse, ActionError> {
        match self.api.signup(&request.activity, &request.email).await {
            Ok(response) => {
                info!(
                    activity = %request.activity,
                    email = %request.email,
                    "activities: signup accepted"
                );
                self.emit(PageEvent::Status(StatusMessage::success(
                    response.message.clone(),
                )));
                self.emit(PageEvent::SignupAccepted);
                let _ = self.refresh().await;
                Ok(response)
            }
            Err(err) => {
                self.log_failure("signup", &request.activity, &request.email, &err);
                self.emit(PageEvent::Status(failure_status(
                    &err,
                    SIGNUP_TRANSPORT_FAILURE,
                )));
                Err(err)
            }
        }
    }

    /// Callers must have confirmed the intent with the user first.
    pub async fn unregister(&self, intent: &UnregisterIntent) -> Result<(), ActionError> {
        match self.api.unregister(&intent.activity, &intent.email).await {
            Ok(()) => {
                info!(
                    activity = %intent.activity,
                    email = %intent.email,
                    "activities: unregister accepted"
                );
                self.emit(PageEvent::Status(StatusMessage::success(
                    unregister_success_text(intent),
                )));
                let _ = self.refresh().await;
                Ok(())
            }
            Err(err) => {
                self.log_failure("unregister", &intent.activity, &intent.email, &err);
                self.emit(PageEvent::Status(failure_status(
                    &err,
                    UNREGISTER_TRANSPORT_FAILURE,
                )));
                Err(err)
            }
        }
    }

    fn log_failure(
        &self,
        action: &str,
        activity: &ActivityName,
        email: &ParticipantEmail,
        err: &ActionError,
    ) {
        if err.is_transport() {
            error!(action, activity = %activity, email = %email, "activities: request failed: {err}");
        } else {
            warn!(
                action,
                activity = %activity,
                email = %email,
                detail = err.server_detail().unwrap_or_default(),
                "activities: server rejected request: {err}"
            );
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
