//! Type-safe event identifier.
//!
//! [`EventId`] is a newtype wrapper around the `BIGSERIAL` key the
//! repository assigns, so that event identifiers cannot be confused with
//! prices, capacities or page numbers.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier of an [`super::Event`].
///
/// Assigned exactly once by the [`crate::persistence::EventRepository`]
/// that stores the event and immutable thereafter. Identifiers are
/// positive and increase monotonically in insertion order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Wraps a raw database key.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw database key.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EventId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<EventId> for i64 {
    fn from(id: EventId) -> Self {
        id.0
    }
}
