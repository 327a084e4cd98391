use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::ValidationError;

macro_rules! text_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

text_newtype!(ActivityName);
text_newtype!(ParticipantEmail);

impl ActivityName {
    /// Rejects blank names. Names are server keys, so the text is kept as is.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::MissingActivity);
        }
        Ok(Self(raw.to_string()))
    }
}

impl ParticipantEmail {
    /// Trims surrounding whitespace and rejects empty input. Format checks are
    /// left to the server.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Per-activity payload as served by `GET /activities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDetails {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<ParticipantEmail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: ActivityName,
    pub details: ActivityDetails,
}

impl Activity {
    pub fn participant_count(&self) -> usize {
        self.details.participants.len()
    }

    pub fn spots_left(&self) -> u32 {
        let taken = u32::try_from(self.participant_count()).unwrap_or(u32::MAX);
        self.details.max_participants.saturating_sub(taken)
    }
}

/// Activities keyed by name, in the order the server listed them.
///
/// Serialized as a JSON object. Deserialization walks the object's entries in
/// document order instead of going through a hash map, so rendering follows
/// the server's ordering. A repeated key replaces the earlier entry in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityCatalog {
    activities: Vec<Activity>,
}

impl ActivityCatalog {
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &ActivityName> {
        self.activities.iter().map(|activity| &activity.name)
    }

    pub fn get(&self, name: &ActivityName) -> Option<&Activity> {
        self.activities.iter().find(|activity| &activity.name == name)
    }

    fn upsert(&mut self, activity: Activity) {
        match self
            .activities
            .iter_mut()
            .find(|existing| existing.name == activity.name)
        {
            Some(existing) => existing.details = activity.details,
            None => self.activities.push(activity),
        }
    }
}

impl Serialize for ActivityCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.activities.len()))?;
        for activity in &self.activities {
            map.serialize_entry(&activity.name, &activity.details)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ActivityCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = ActivityCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping activity names to activity details")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut catalog = ActivityCatalog::default();
                while let Some((name, details)) =
                    access.next_entry::<ActivityName, ActivityDetails>()?
                {
                    catalog.upsert(Activity { name, details });
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
