//! View model for the activity list, the activity selector and the signup form.
//!
//! Everything here is plain data rebuilt from an [`ActivityCatalog`]; front ends
//! only draw it.

use shared::{
    domain::{Activity, ActivityCatalog, ActivityName, ParticipantEmail},
    error::ValidationError,
    protocol::UnregisterIntent,
};

pub const LOAD_FAILURE_TEXT: &str = "Failed to load activities. Please try again later.";
pub const LOADING_TEXT: &str = "Loading activities...";
pub const NO_PARTICIPANTS_TEXT: &str = "No participants yet";
pub const SELECTOR_PLACEHOLDER: &str = "-- Select an activity --";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantEntry {
    pub email: ParticipantEmail,
    pub unregister: UnregisterIntent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantList {
    /// Rendered as [`NO_PARTICIPANTS_TEXT`].
    Empty,
    Entries(Vec<ParticipantEntry>),
}

impl ParticipantList {
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Entries(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: ActivityName,
    pub description: String,
    pub schedule_line: String,
    pub availability_line: String,
    pub participants_heading: String,
    pub participants: ParticipantList,
}

impl ActivityCard {
    pub fn from_activity(activity: &Activity) -> Self {
        let participants = if activity.details.participants.is_empty() {
            ParticipantList::Empty
        } else {
            ParticipantList::Entries(
                activity
                    .details
                    .participants
                    .iter()
                    .map(|email| ParticipantEntry {
                        email: email.clone(),
                        unregister: UnregisterIntent::new(activity.name.clone(), email.clone()),
                    })
                    .collect(),
            )
        };

        Self {
            name: activity.name.clone(),
            description: activity.details.description.clone(),
            schedule_line: format!("Schedule: {}", activity.details.schedule),
            availability_line: format!(
                "Availability: {} spots left (capacity {})",
                activity.spots_left(),
                activity.details.max_participants
            ),
            participants_heading: format!("Signed Up ({})", activity.participant_count()),
            participants,
        }
    }
}

/// One card per activity, in catalog order.
pub fn render_cards(catalog: &ActivityCatalog) -> Vec<ActivityCard> {
    catalog.iter().map(ActivityCard::from_activity).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActivityListView {
    #[default]
    Loading,
    Loaded(Vec<ActivityCard>),
    Failed(String),
}

impl ActivityListView {
    pub fn cards(&self) -> &[ActivityCard] {
        match self {
            Self::Loaded(cards) => cards,
            _ => &[],
        }
    }
}

/// Options of the activity drop-down. Repopulating replaces the previous
/// options, so repeated renders never accumulate duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivitySelector {
    options: Vec<ActivityName>,
}

impl ActivitySelector {
    pub fn repopulate<'a>(&mut self, names: impl IntoIterator<Item = &'a ActivityName>) {
        self.options.clear();
        self.options.extend(names.into_iter().cloned());
    }

    pub fn options(&self) -> &[ActivityName] {
        &self.options
    }

    pub fn contains(&self, name: &ActivityName) -> bool {
        self.options.contains(name)
    }
}

/// A validated signup submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub activity: ActivityName,
    pub email: ParticipantEmail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub selected_activity: Option<ActivityName>,
}

impl SignupForm {
    /// Stands in for the native `required` checks of the form controls.
    pub fn submission(&self) -> Result<SignupRequest, ValidationError> {
        let email = ParticipantEmail::parse(&self.email)?;
        let activity = self
            .selected_activity
            .as_ref()
            .ok_or(ValidationError::MissingActivity)
            .and_then(|name| ActivityName::parse(name.as_str()))?;
        Ok(SignupRequest { activity, email })
    }

    pub fn reset(&mut self) {
        self.email.clear();
        self.selected_activity = None;
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
