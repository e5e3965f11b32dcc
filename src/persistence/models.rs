//! Database row model for the `events` table.

use chrono::NaiveDateTime;

use crate::domain::{Event, EventId};
use crate::error::ApiError;

/// Column list shared by every `SELECT` and `RETURNING` clause, in
/// [`EventRow`] tuple order.
pub const EVENT_COLUMNS: &str = "id, name, description, begin_enrollment_date_time, \
     close_enrollment_date_time, begin_event_date_time, end_event_date_time, location, \
     base_price, max_price, limit_of_enrollment, free, offline, event_status";

/// A raw row from the `events` table, decoded positionally.
pub type EventRow = (
    i64,
    String,
    String,
    NaiveDateTime,
    NaiveDateTime,
    NaiveDateTime,
    NaiveDateTime,
    Option<String>,
    i32,
    i32,
    i32,
    bool,
    bool,
    String,
);

/// Converts a stored row into an [`Event`].
///
/// # Errors
///
/// Returns [`ApiError::Persistence`] if the row carries an unknown
/// `event_status`.
pub fn event_from_row(row: EventRow) -> Result<Event, ApiError> {
    let (
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
    ) = row;

    let event_status = event_status
        .parse()
        .map_err(|e| ApiError::Persistence(format!("event {id}: {e}")))?;

    Ok(Event {
        id: EventId::new(id),
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
    })
}
