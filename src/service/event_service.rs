//! Event service: validates submissions and talks to the repository.

use std::sync::Arc;

use crate::api::dto::EventRequest;
use crate::domain::{Event, EventId, EventValidator, NewEvent, Page, PageRequest};
use crate::error::ApiError;
use crate::persistence::EventRepository;

/// Orchestration layer for all event operations.
///
/// Stateless coordinator: owns a handle to the [`EventRepository`] and
/// the [`EventValidator`]. Creation follows the pattern: field
/// constraints → cross-field rules → derive flags → persist.
#[derive(Debug, Clone)]
pub struct EventService {
    repository: Arc<dyn EventRepository>,
    validator: EventValidator,
}

impl EventService {
    /// Creates a new `EventService` over the given repository.
    #[must_use]
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self {
            repository,
            validator: EventValidator,
        }
    }

    /// Returns a reference to the inner repository.
    #[must_use]
    pub fn repository(&self) -> &Arc<dyn EventRepository> {
        &self.repository
    }

    /// Validates a submission and stores it as a new draft event.
    ///
    /// Field constraints run first; the cross-field rules only run on a
    /// submission whose required fields are all present.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] carrying every violated rule, or
    /// [`ApiError::Persistence`] if storing fails.
    pub async fn create_event(&self, request: EventRequest) -> Result<Event, ApiError> {
        let submission = request.into_submission().map_err(|errors| {
            tracing::warn!(errors = errors.len(), "event submission missing required fields");
            ApiError::Validation(errors)
        })?;

        let errors = self.validator.validate(&submission);
        if !errors.is_empty() {
            tracing::warn!(
                errors = errors.len(),
                name = %submission.name,
                "event submission rejected"
            );
            return Err(ApiError::Validation(errors));
        }

        let event = self
            .repository
            .insert(NewEvent::from_submission(submission))
            .await?;

        tracing::info!(
            event_id = %event.id,
            name = %event.name,
            free = event.free,
            offline = event.offline,
            "event created"
        );
        Ok(event)
    }

    /// Returns a single event.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EventNotFound`] if no event has this id.
    pub async fn get_event(&self, id: EventId) -> Result<Event, ApiError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ApiError::EventNotFound(id))
    }

    /// Returns one page of events.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] if the repository fails.
    pub async fn list_events(&self, request: &PageRequest) -> Result<Page<Event>, ApiError> {
        let page = self.repository.find_page(request).await?;
        tracing::debug!(
            page = request.number,
            size = request.size,
            sort = %request.sort,
            returned = page.content.len(),
            total = page.total_elements,
            "listed events"
        );
        Ok(page)
    }
}
