//! Domain layer: the event entity, its validation rules and paging.
//!
//! Everything here is synchronous and free of I/O except
//! [`EventRegistry`], the in-memory [`crate::persistence::EventRepository`]
//! used when PostgreSQL persistence is disabled.

pub mod event;
pub mod event_id;
pub mod event_registry;
pub mod event_validator;
pub mod page;
pub mod validation;

pub use event::{Event, EventStatus, EventSubmission, NewEvent};
pub use event_id::EventId;
pub use event_registry::EventRegistry;
pub use event_validator::EventValidator;
pub use page::{Direction, Page, PageRequest, Sort, SortField};
pub use validation::{FieldError, ValidationErrors};
