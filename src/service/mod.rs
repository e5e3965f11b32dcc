//! Service layer: business logic orchestration.
//!
//! [`EventService`] runs both validation phases, builds the draft event
//! and hands it to the configured [`crate::persistence::EventRepository`].

pub mod event_service;

pub use event_service::EventService;
