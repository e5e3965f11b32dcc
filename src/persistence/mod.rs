//! Persistence layer: the [`EventRepository`] seam and its PostgreSQL
//! implementation.
//!
//! The repository owns identifier assignment. Handlers and the service
//! only ever see fully-formed [`Event`]s coming back out of it. The
//! in-memory implementation lives in [`crate::domain::EventRegistry`].

pub mod models;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{Event, EventId, NewEvent, Page, PageRequest};
use crate::error::ApiError;

pub use postgres::PostgresEventRepository;

/// Storage for events.
#[async_trait]
pub trait EventRepository: Send + Sync + std::fmt::Debug {
    /// Stores a new event and returns it with its freshly assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] if the backing store fails.
    async fn insert(&self, event: NewEvent) -> Result<Event, ApiError>;

    /// Looks up a single event.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] if the backing store fails.
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, ApiError>;

    /// Returns one page of events in the requested order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] if the backing store fails.
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Event>, ApiError>;
}
