//! Event DTOs for create, get, and list operations.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::{PageMeta, local_date_time};
use crate::domain::validation::{MIN, NOT_EMPTY, NOT_NULL, ValidationErrors};
use crate::domain::{Event, EventSubmission};

/// Request body for `POST /api/events`.
///
/// Every field is optional on the wire so that a missing value surfaces
/// as a field error instead of a deserialization failure. Unknown keys
/// (including `id`, `free`, `offline` and `eventStatus`) are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventRequest {
    /// Event name (required, non-empty).
    #[serde(default)]
    pub name: Option<String>,
    /// Description (required, non-empty).
    #[serde(default)]
    pub description: Option<String>,
    /// Start of the enrollment window (required).
    #[serde(default, deserialize_with = "local_date_time::deserialize_option")]
    pub begin_enrollment_date_time: Option<NaiveDateTime>,
    /// End of the enrollment window (required).
    #[serde(default, deserialize_with = "local_date_time::deserialize_option")]
    pub close_enrollment_date_time: Option<NaiveDateTime>,
    /// Start of the event (required).
    #[serde(default, deserialize_with = "local_date_time::deserialize_option")]
    pub begin_event_date_time: Option<NaiveDateTime>,
    /// End of the event (required).
    #[serde(default, deserialize_with = "local_date_time::deserialize_option")]
    pub end_event_date_time: Option<NaiveDateTime>,
    /// Physical location; omit for online events.
    #[serde(default)]
    pub location: Option<String>,
    /// Lowest ticket price (≥ 0).
    #[serde(default)]
    pub base_price: i32,
    /// Highest ticket price (≥ 0); `0` means no maximum.
    #[serde(default)]
    pub max_price: i32,
    /// Maximum number of registrants (≥ 0).
    #[serde(default)]
    pub limit_of_enrollment: i32,
}

impl EventRequest {
    /// Checks presence and bounds of every field, collecting all
    /// violations in field order.
    ///
    /// # Errors
    ///
    /// Returns the full list of violations if any field is missing, empty
    /// or negative.
    pub fn into_submission(self) -> Result<EventSubmission, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required_text(self.name, "name", &mut errors);
        let description = required_text(self.description, "description", &mut errors);
        let begin_enrollment = required(
            self.begin_enrollment_date_time,
            "beginEnrollmentDateTime",
            &mut errors,
        );
        let close_enrollment = required(
            self.close_enrollment_date_time,
            "closeEnrollmentDateTime",
            &mut errors,
        );
        let begin_event = required(self.begin_event_date_time, "beginEventDateTime", &mut errors);
        let end_event = required(self.end_event_date_time, "endEventDateTime", &mut errors);
        non_negative(self.base_price, "basePrice", &mut errors);
        non_negative(self.max_price, "maxPrice", &mut errors);
        non_negative(self.limit_of_enrollment, "limitOfEnrollment", &mut errors);

        match (
            name,
            description,
            begin_enrollment,
            close_enrollment,
            begin_event,
            end_event,
        ) {
            (
                Some(name),
                Some(description),
                Some(begin_enrollment_date_time),
                Some(close_enrollment_date_time),
                Some(begin_event_date_time),
                Some(end_event_date_time),
            ) if errors.is_empty() => Ok(EventSubmission {
                name,
                description,
                begin_enrollment_date_time,
                close_enrollment_date_time,
                begin_event_date_time,
                end_event_date_time,
                location: self.location,
                base_price: self.base_price,
                max_price: self.max_price,
                limit_of_enrollment: self.limit_of_enrollment,
            }),
            _ => Err(errors),
        }
    }
}

fn required_text(
    value: Option<String>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match value {
        Some(text) if !text.is_empty() => Some(text),
        other => {
            errors.reject_value(
                field,
                NOT_EMPTY,
                "must not be empty",
                other.map(serde_json::Value::String),
            );
            None
        }
    }
}

fn required<T>(value: Option<T>, field: &str, errors: &mut ValidationErrors) -> Option<T> {
    if value.is_none() {
        errors.reject_value(field, NOT_NULL, "must not be null", None);
    }
    value
}

fn non_negative(value: i32, field: &str, errors: &mut ValidationErrors) {
    if value < 0 {
        errors.reject_value(
            field,
            MIN,
            "must be greater than or equal to 0",
            Some(value.into()),
        );
    }
}

/// Response body for a single event.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    /// Event identifier.
    pub id: i64,
    /// Event name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Start of the enrollment window.
    pub begin_enrollment_date_time: NaiveDateTime,
    /// End of the enrollment window.
    pub close_enrollment_date_time: NaiveDateTime,
    /// Start of the event.
    pub begin_event_date_time: NaiveDateTime,
    /// End of the event.
    pub end_event_date_time: NaiveDateTime,
    /// Physical location, if any.
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
    /// Lifecycle status (`DRAFT`, `PUBLISHED`, `BEGAN_ENROLLMENT`).
    pub event_status: String,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        let Event {
            id,
            name,
            description,
            begin_enrollment_date_time,
            close_enrollment_date_time,
            begin_event_date_time,
            end_event_date_time,
            location,
            base_price,
            max_price,
            limit_of_enrollment,
            free,
            offline,
            event_status,
        } = event;
        Self {
            id: id.get(),
            name,
            description,
            begin_enrollment_date_time,
            close_enrollment_date_time,
            begin_event_date_time,
            end_event_date_time,
            location,
            base_price,
            max_price,
            limit_of_enrollment,
            free,
            offline,
            event_status: event_status.to_string(),
        }
    }
}

/// Paginated list response for `GET /api/events`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EventPageResponse {
    /// Events on this page.
    pub data: Vec<EventResponse>,
    /// Paging metadata.
    pub page: PageMeta,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::event::tests::spring_submission;
    use crate::domain::{EventId, NewEvent};

    fn spring_json() -> serde_json::Value {
        serde_json::json!({
            "name": "Spring",
            "description": "REST API development",
            "beginEnrollmentDateTime": "2019-09-30T15:27:00",
            "closeEnrollmentDateTime": "2019-10-01T15:27:00",
            "beginEventDateTime": "2019-10-02T15:27:00",
            "endEventDateTime": "2019-10-03T15:27:00",
            "basePrice": 100,
            "maxPrice": 200,
            "limitOfEnrollment": 100,
            "location": "Kyungsung University"
        })
    }

    #[test]
    fn well_formed_body_becomes_a_submission() {
        let Ok(request) = serde_json::from_value::<EventRequest>(spring_json()) else {
            panic!("body should deserialize");
        };
        assert_eq!(request.into_submission(), Ok(spring_submission()));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut body = spring_json();
        body["id"] = 100.into();
        body["free"] = true.into();
        body["eventStatus"] = "PUBLISHED".into();

        assert!(serde_json::from_value::<EventRequest>(body).is_err());
    }

    #[test]
    fn empty_body_reports_every_required_field() {
        let Ok(request) = serde_json::from_str::<EventRequest>("{}") else {
            panic!("empty object should deserialize");
        };
        let Err(errors) = request.into_submission() else {
            panic!("empty submission accepted");
        };

        let fields: Vec<&str> = errors.iter().filter_map(|e| e.field.as_deref()).collect();
        assert_eq!(
            fields,
            vec![
                "name",
                "description",
                "beginEnrollmentDateTime",
                "closeEnrollmentDateTime",
                "beginEventDateTime",
                "endEventDateTime",
            ]
        );
    }

    #[test]
    fn empty_name_and_negative_prices_are_rejected() {
        let Ok(mut request) = serde_json::from_value::<EventRequest>(spring_json()) else {
            panic!("body should deserialize");
        };
        request.name = Some(String::new());
        request.base_price = -1;
        request.limit_of_enrollment = -5;

        let Err(errors) = request.into_submission() else {
            panic!("invalid submission accepted");
        };
        assert!(errors.iter().any(|e| e.is_for("name") && e.code == NOT_EMPTY));
        assert!(errors.iter().any(|e| e.is_for("basePrice") && e.code == MIN));
        assert!(errors.iter().any(|e| e.is_for("limitOfEnrollment") && e.code == MIN));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn minutes_only_timestamps_are_accepted() {
        let mut body = spring_json();
        body["beginEnrollmentDateTime"] = "2019-09-30T15:27".into();
        body["closeEnrollmentDateTime"] = serde_json::Value::Null;

        let Ok(request) = serde_json::from_value::<EventRequest>(body) else {
            panic!("minutes-only timestamp rejected");
        };
        assert_eq!(
            request.begin_enrollment_date_time,
            Some(spring_submission().begin_enrollment_date_time)
        );
        assert_eq!(request.close_enrollment_date_time, None);
    }

    #[test]
    fn garbage_timestamps_are_malformed() {
        let mut body = spring_json();
        body["endEventDateTime"] = "next tuesday".into();
        tokio_test::assert_err!(serde_json::from_value::<EventRequest>(body));
    }

    #[test]
    fn response_carries_status_as_text() {
        let event = NewEvent::from_submission(spring_submission()).with_id(EventId::new(5));
        let response = EventResponse::from(event);

        assert_eq!(response.id, 5);
        assert_eq!(response.event_status, "DRAFT");
        assert!(response.offline);
        assert!(!response.free);
    }
}
