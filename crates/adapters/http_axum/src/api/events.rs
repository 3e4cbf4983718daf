//! JSON REST handlers for events.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use inventory_app::ports::{DeviceRepository, EventStore, LocationRepository};
use inventory_app::services::query_service::Page;
use inventory_domain::event::Event;
use inventory_domain::id::EventId;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Page<Event>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Event>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Event>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /inventory/v1/events`: the whole log in chronological order.
pub async fn list<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let page = state.query_service.list_events()?;
    Ok(ListResponse::Ok(Json(page)))
}

/// `GET /inventory/v1/events/{id}`
pub async fn get<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    Path(id): Path<EventId>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let event = state.event_service.get_event(&id)?;
    Ok(GetResponse::Ok(Json(event)))
}

/// `POST /inventory/v1/events`: record an event by hand. The store stamps
/// `time` and assigns an `id` when none is given.
pub async fn create<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    payload: Result<Json<Event>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let Json(event) = payload?;
    let created = state.event_service.record_event(event)?;
    Ok(CreateResponse::Created(Json(created)))
}
