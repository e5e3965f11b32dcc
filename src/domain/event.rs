//! Event entity, its validated input and its lifecycle status.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EventId;

/// Lifecycle status of an event.
///
/// Creation always yields [`EventStatus::Draft`]; later states exist so
/// that stored rows round-trip, but nothing in this service moves an
/// event out of `Draft`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Newly created, not yet visible to registrants.
    #[default]
    Draft,
    /// Announced to the public.
    Published,
    /// Enrollment window has opened.
    BeganEnrollment,
}

impl EventStatus {
    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::BeganEnrollment => "BEGAN_ENROLLMENT",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`EventStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event status: {0}")]
pub struct UnknownEventStatus(pub String);

impl FromStr for EventStatus {
    type Err = UnknownEventStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "PUBLISHED" => Ok(Self::Published),
            "BEGAN_ENROLLMENT" => Ok(Self::BeganEnrollment),
            other => Err(UnknownEventStatus(other.to_string())),
        }
    }
}

/// A proposed event whose required fields are all present and whose
/// numbers are non-negative.
///
/// Produced by [`crate::api::dto::EventRequest::into_submission`]; the
/// cross-field rules are checked separately by
/// [`super::EventValidator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSubmission {
    /// Event name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Start of the enrollment window.
    pub begin_enrollment_date_time: NaiveDateTime,
    /// End of the enrollment window.
    pub close_enrollment_date_time: NaiveDateTime,
    /// Start of the event itself.
    pub begin_event_date_time: NaiveDateTime,
    /// End of the event itself.
    pub end_event_date_time: NaiveDateTime,
    /// Physical location; `None` for online events.
    pub location: Option<String>,
    /// Lowest ticket price.
    pub base_price: i32,
    /// Highest ticket price; `0` means no maximum.
    pub max_price: i32,
    /// Maximum number of registrants.
    pub limit_of_enrollment: i32,
}

/// An accepted submission with its derived flags, waiting for an id.
///
/// [`crate::persistence::EventRepository::insert`] assigns the id and
/// turns it into an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    /// Submitted fields, copied verbatim.
    pub submission: EventSubmission,
    /// `true` iff both prices are zero.
    pub free: bool,
    /// `true` iff a non-blank location was given.
    pub offline: bool,
    /// Initial lifecycle status.
    pub event_status: EventStatus,
}

impl NewEvent {
    /// Builds a draft event from a submission that passed validation.
    #[must_use]
    pub fn from_submission(submission: EventSubmission) -> Self {
        let free = is_free(submission.base_price, submission.max_price);
        let offline = is_offline(submission.location.as_deref());
        Self {
            submission,
            free,
            offline,
            event_status: EventStatus::Draft,
        }
    }

    /// Attaches the identifier chosen by the repository.
    #[must_use]
    pub fn with_id(self, id: EventId) -> Event {
        let Self {
            submission,
            free,
            offline,
            event_status,
        } = self;
        Event {
            id,
            name: submission.name,
            description: submission.description,
            begin_enrollment_date_time: submission.begin_enrollment_date_time,
            close_enrollment_date_time: submission.close_enrollment_date_time,
            begin_event_date_time: submission.begin_event_date_time,
            end_event_date_time: submission.end_event_date_time,
            location: submission.location,
            base_price: submission.base_price,
            max_price: submission.max_price,
            limit_of_enrollment: submission.limit_of_enrollment,
            free,
            offline,
            event_status,
        }
    }
}

/// A stored event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Repository-assigned identifier.
    pub id: EventId,
    /// Event name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Start of the enrollment window.
    pub begin_enrollment_date_time: NaiveDateTime,
    /// End of the enrollment window.
    pub close_enrollment_date_time: NaiveDateTime,
    /// Start of the event itself.
    pub begin_event_date_time: NaiveDateTime,
    /// End of the event itself.
    pub end_event_date_time: NaiveDateTime,
    /// Physical location; absent for online events.
    pub location: Option<String>,
    /// Lowest ticket price.
    pub base_price: i32,
    /// Highest ticket price; `0` means no maximum.
    pub max_price: i32,
    /// Maximum number of registrants.
    pub limit_of_enrollment: i32,
    /// No base or maximum price.
    pub free: bool,
    /// Held at a physical location.
    pub offline: bool,
    /// Lifecycle status.
    pub event_status: EventStatus,
}

/// An event is free when it has neither a base nor a maximum price.
#[must_use]
pub const fn is_free(base_price: i32, max_price: i32) -> bool {
    base_price == 0 && max_price == 0
}

/// An event is offline when it names a location. Blank text counts as
/// no location.
#[must_use]
pub fn is_offline(location: Option<&str>) -> bool {
    location.is_some_and(|l| !l.trim().is_empty())
}
