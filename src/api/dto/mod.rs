//! Data Transfer Objects for REST request/response serialization.
//!
//! Request and response bodies use camelCase keys; date-times are ISO-8601
//! local date-times without an offset.

pub mod common_dto;
pub mod event_dto;

pub use common_dto::*;
pub use event_dto::*;
