//! # events-api
//!
//! REST service for creating and browsing events.
//!
//! A submitted event passes two validation phases (field constraints, then
//! the cross-field [`domain::EventValidator`] rules) before it is stored as
//! a `DRAFT` with its `free` and `offline` flags derived from prices and
//! location. Events are listed in 0-indexed, sortable pages.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── EventService (service/)
//!     ├── EventValidator (domain/)
//!     │
//!     ├── EventRepository (persistence/)
//!     │     ├── EventRegistry (in memory)
//!     │     └── PostgresEventRepository
//!     │
//!     └── PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
