//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Event endpoints are mounted under `/api`; `/health` sits at the root.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "events-api", description = "Event management REST API"),
    paths(
        handlers::event::create_event,
        handlers::event::list_events,
        handlers::event::get_event,
        handlers::system::health_handler,
    ),
    components(schemas(
        dto::EventRequest,
        dto::EventResponse,
        dto::EventPageResponse,
        dto::PageMeta,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
        crate::domain::FieldError,
        handlers::system::HealthResponse,
    )),
    tags(
        (name = "Events", description = "Event creation and lookup"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
}
