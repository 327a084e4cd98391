//! Explicit handle for everything a front end draws: list area, selector,
//! signup form, message area and the pending unregister confirmation.

use std::time::{Duration, Instant};

use shared::protocol::UnregisterIntent;

use crate::{
    controller::PageEvent,
    notifier::{StatusMessage, StatusNotifier},
    view::{
        render_cards, ActivityListView, ActivitySelector, SignupForm, SignupRequest,
        LOAD_FAILURE_TEXT,
    },
};

#[derive(Debug, Clone)]
pub struct ActivitiesPage {
    pub list: ActivityListView,
    pub selector: ActivitySelector,
    pub form: SignupForm,
    pub notifier: StatusNotifier,
    pending_unregister: Option<UnregisterIntent>,
}

impl Default for ActivitiesPage {
    fn default() -> Self {
        Self::new(crate::notifier::DEFAULT_MESSAGE_DISPLAY)
    }
}

impl ActivitiesPage {
    pub fn new(message_display: Duration) -> Self {
        Self {
            list: ActivityListView::default(),
            selector: ActivitySelector::default(),
            form: SignupForm::default(),
            notifier: StatusNotifier::new(message_display),
            pending_unregister: None,
        }
    }

    pub fn apply(&mut self, event: PageEvent, now: Instant) {
        match event {
            PageEvent::CatalogLoaded(catalog) => {
                self.list = ActivityListView::Loaded(render_cards(&catalog));
                self.selector.repopulate(catalog.names());
                if let Some(selected) = &self.form.selected_activity {
                    if !self.selector.contains(selected) {
                        self.form.selected_activity = None;
                    }
                }
            }
            PageEvent::CatalogUnavailable => {
                self.list = ActivityListView::Failed(LOAD_FAILURE_TEXT.to_string());
            }
            PageEvent::Status(message) => self.notifier.show(message, now),
            PageEvent::SignupAccepted => self.form.reset(),
        }
    }

    /// Validates the form. On failure the reason is shown as an error status
    /// and nothing should be sent.
    pub fn take_submission(&mut self, now: Instant) -> Option<SignupRequest> {
        match self.form.submission() {
            Ok(request) => Some(request),
            Err(err) => {
                self.notifier.show(StatusMessage::error(err.to_string()), now);
                None
            }
        }
    }

    /// Activating an unregister control only records the intent; nothing is
    /// sent until [`Self::resolve_unregister`] accepts it.
    pub fn request_unregister(&mut self, intent: UnregisterIntent) {
        self.pending_unregister = Some(intent);
    }

    pub fn pending_unregister(&self) -> Option<&UnregisterIntent> {
        self.pending_unregister.as_ref()
    }

    /// Returns the intent to send when confirmed, `None` when declined.
    pub fn resolve_unregister(&mut self, confirmed: bool) -> Option<UnregisterIntent> {
        let intent = self.pending_unregister.take()?;
        confirmed.then_some(intent)
    }

    pub fn visible_status(&self, now: Instant) -> Option<&StatusMessage> {
        self.notifier.visible(now)
    }

    /// Latest status regardless of whether it is still on screen.
    pub fn last_status(&self) -> Option<&StatusMessage> {
        self.notifier.last()
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.notifier.expire(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{notifier::StatusSeverity, view::ParticipantList};
    use shared::domain::ActivityCatalog;

    fn catalog(raw: &str) -> ActivityCatalog {
        serde_json::from_str(raw).expect("catalog")
    }

    #[test]
    fn chess_club_scenario_fills_list_and_selector() {
        let now = Instant::now();
        let mut page = ActivitiesPage::default();
        page.apply(
            PageEvent::CatalogLoaded(catalog(
                r#"{"Chess Club": {"description":"d","schedule":"s","max_participants":10,"participants":["a@x.com"]}}"#,
            )),
            now,
        );

        let cards = page.list.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].participants_heading, "Signed Up (1)");
        assert!(matches!(&cards[0].participants, ParticipantList::Entries(e) if e.len() == 1));
        assert_eq!(page.selector.options().len(), 1);
        assert_eq!(page.selector.options()[0].as_str(), "Chess Club");
    }

    #[test]
    fn repeated_loads_keep_one_option_per_activity() {
        let now = Instant::now();
        let mut page = ActivitiesPage::default();
        let raw = r#"{"Chess Club": {"description":"d","schedule":"s","max_participants":10,"participants":[]},
                      "Art Club": {"description":"a","schedule":"s","max_participants":10,"participants":[]}}"#;
        page.apply(PageEvent::CatalogLoaded(catalog(raw)), now);
        page.apply(PageEvent::CatalogLoaded(catalog(raw)), now);

        assert_eq!(page.selector.options().len(), 2);
    }

    #[test]
    fn selection_survives_reload_only_if_activity_still_exists() {
        let now = Instant::now();
        let mut page = ActivitiesPage::default();
        page.form.selected_activity = Some("Chess Club".into());

        page.apply(
            PageEvent::CatalogLoaded(catalog(
                r#"{"Chess Club": {"description":"d","schedule":"s","max_participants":10,"participants":[]}}"#,
            )),
            now,
        );
        assert_eq!(page.form.selected_activity, Some("Chess Club".into()));

        page.apply(
            PageEvent::CatalogLoaded(catalog(
                r#"{"Art Club": {"description":"a","schedule":"s","max_participants":10,"participants":[]}}"#,
            )),
            now,
        );
        assert_eq!(page.form.selected_activity, None);
    }

    #[test]
    fn load_failure_shows_static_message() {
        let mut page = ActivitiesPage::default();
        page.apply(PageEvent::CatalogUnavailable, Instant::now());
        assert_eq!(
            page.list,
            ActivityListView::Failed("Failed to load activities. Please try again later.".into())
        );
    }

    #[test]
    fn signup_accepted_clears_form() {
        let mut page = ActivitiesPage::default();
        page.form.email = "student@mergington.edu".into();
        page.form.selected_activity = Some("Chess Club".into());
        page.apply(PageEvent::SignupAccepted, Instant::now());
        assert_eq!(page.form, SignupForm::default());
    }

    #[test]
    fn invalid_submission_shows_error_and_yields_nothing() {
        let now = Instant::now();
        let mut page = ActivitiesPage::default();
        assert!(page.take_submission(now).is_none());

        let status = page.visible_status(now).expect("status");
        assert_eq!(status.severity, StatusSeverity::Error);
        assert_eq!(status.text, "Please enter an email address.");
    }

    #[test]
    fn declined_confirmation_yields_no_intent() {
        let mut page = ActivitiesPage::default();
        let intent = UnregisterIntent::new("Chess Club".into(), "a@x.com".into());

        page.request_unregister(intent.clone());
        assert_eq!(page.pending_unregister(), Some(&intent));
        assert_eq!(page.resolve_unregister(false), None);
        assert!(page.pending_unregister().is_none());

        page.request_unregister(intent.clone());
        assert_eq!(page.resolve_unregister(true), Some(intent));
        assert_eq!(page.resolve_unregister(true), None);
    }

    #[test]
    fn oversized_configured_display_window_does_not_panic() {
        let settings = crate::config::ClientSettings {
            message_display_secs: u64::MAX,
            ..Default::default()
        };
        let now = Instant::now();
        let mut page = ActivitiesPage::new(settings.message_display());

        page.apply(PageEvent::Status(StatusMessage::error("An error occurred")), now);
        assert!(!page.tick(now + Duration::from_secs(3600)));
        assert_eq!(
            page.visible_status(now).map(|s| s.text.as_str()),
            Some("An error occurred")
        );
    }

    #[test]
    fn status_hides_after_display_window() {
        let start = Instant::now();
        let mut page = ActivitiesPage::new(Duration::from_secs(5));
        page.apply(PageEvent::Status(StatusMessage::success("done")), start);
        assert!(page.visible_status(start).is_some());
        assert!(page.tick(start + Duration::from_secs(5)));
        assert!(page.visible_status(start + Duration::from_secs(5)).is_none());
        assert!(page.last_status().is_none());
    }
}
