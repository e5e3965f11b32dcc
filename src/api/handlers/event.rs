//! Event handlers: create, list, get.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{EventPageResponse, EventRequest, EventResponse, PageMeta, PageParams};
use crate::app_state::AppState;
use crate::domain::EventId;
use crate::error::{ApiError, ErrorResponse};

/// `POST /api/events` — Create a draft event.
///
/// # Errors
///
/// Returns [`ApiError::MalformedBody`] if the body is not an event
/// submission, or [`ApiError::Validation`] if any rule is broken.
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    summary = "Create an event",
    description = "Validates the submission, derives the `free` and `offline` flags and stores it as a DRAFT event. Unknown keys such as `id` or `eventStatus` are rejected.",
    request_body = EventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse,
            headers(("Location" = String, description = "URI of the new event"))),
        (status = 400, description = "Malformed or invalid submission", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected event body");
        ApiError::MalformedBody(rejection.body_text())
    })?;

    let event = state.event_service.create_event(request).await?;
    let location = format!("/api/events/{}", event.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(EventResponse::from(event)),
    ))
}

/// `GET /api/events` — List events one page at a time.
///
/// # Errors
///
/// Returns [`ApiError::InvalidQuery`] on an unusable page, size or sort.
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    summary = "List events",
    description = "Returns one 0-indexed page of events ordered by `sort` (default `id,asc`), with ties broken by id.",
    params(PageParams),
    responses(
        (status = 200, description = "One page of events", body = EventPageResponse),
        (status = 400, description = "Invalid paging or sort parameter", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))?;
    let request = params.to_request()?;

    let page = state.event_service.list_events(&request).await?;
    let meta = PageMeta::from(&page);

    Ok(Json(EventPageResponse {
        data: page.map(EventResponse::from).content,
        page: meta,
    }))
}

/// `GET /api/events/{id}` — Get a single event.
///
/// # Errors
///
/// Returns [`ApiError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = "Events",
    summary = "Get an event",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    responses(
        (status = 200, description = "Event details", body = EventResponse),
        (status = 400, description = "Id is not a number", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))?;
    let event = state.event_service.get_event(EventId::new(id)).await?;
    Ok(Json(EventResponse::from(event)))
}

/// Event routes, relative to `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", get(get_event))
}
