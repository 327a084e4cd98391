use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{ActivityCatalog, ActivityName, ParticipantEmail},
    error::ErrorBody,
    protocol::{MessageResponse, ParticipantAction, ParticipantQuery},
};
use tracing::debug;
use url::Url;

pub mod config;
pub mod controller;
pub mod error;
pub mod notifier;
pub mod page;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use controller::{PageController, PageEvent};
pub use error::{ActionError, ConfigError};
pub use notifier::{StatusMessage, StatusNotifier, StatusSeverity};
pub use page::ActivitiesPage;

/// The three calls the activities server exposes.
#[async_trait]
pub trait ActivitiesApi: Send + Sync {
    async fn list_activities(&self) -> Result<ActivityCatalog, ActionError>;
    async fn signup(
        &self,
        activity: &ActivityName,
        email: &ParticipantEmail,
    ) -> Result<MessageResponse, ActionError>;
    async fn unregister(
        &self,
        activity: &ActivityName,
        email: &ParticipantEmail,
    ) -> Result<(), ActionError>;
}

#[derive(Debug, Clone)]
pub struct HttpActivitiesApi {
    http: Client,
    base_url: Url,
}

impl HttpActivitiesApi {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// `{base}/activities[/{name}/{action}]`, each segment percent-encoded.
    fn endpoint(
        &self,
        target: Option<(&ActivityName, ParticipantAction)>,
    ) -> Result<Url, ActionError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ActionError::InvalidBaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push("activities");
            if let Some((activity, action)) = target {
                segments.push(activity.as_str()).push(action.path_segment());
            }
        }
        Ok(url)
    }

    async fn participant_request(
        &self,
        activity: &ActivityName,
        email: &ParticipantEmail,
        action: ParticipantAction,
    ) -> Result<Response, ActionError> {
        let url = self.endpoint(Some((activity, action)))?;
        let query = ParticipantQuery {
            email: email.clone(),
        };
        let request = match action {
            ParticipantAction::Signup => self.http.post(url),
            ParticipantAction::Unregister => self.http.delete(url),
        };
        let response = request.query(&query).send().await?;
        debug!(
            activity = %activity,
            email = %email,
            action = action.path_segment(),
            status = response.status().as_u16(),
            "activities: participant request answered"
        );
        ensure_success(response).await
    }
}

/// Passes 2xx responses through; anything else becomes
/// [`ActionError::Rejected`] carrying the server's detail text when the body
/// has one.
async fn ensure_success(response: Response) -> Result<Response, ActionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.detail_text().map(str::to_owned));
    Err(ActionError::rejected(status.as_u16(), detail))
}

#[async_trait]
impl ActivitiesApi for HttpActivitiesApi {
    async fn list_activities(&self) -> Result<ActivityCatalog, ActionError> {
        let url = self.endpoint(None)?;
        let response = ensure_success(self.http.get(url).send().await?).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn signup(
        &self,
        activity: &ActivityName,
        email: &ParticipantEmail,
    ) -> Result<MessageResponse, ActionError> {
        let response = self
            .participant_request(activity, email, ParticipantAction::Signup)
            .await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn unregister(
        &self,
        activity: &ActivityName,
        email: &ParticipantEmail,
    ) -> Result<(), ActionError> {
        self.participant_request(activity, email, ParticipantAction::Unregister)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
