//! JSON REST handlers for devices.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use inventory_app::ports::{DeviceRepository, EventStore, LocationRepository};
use inventory_app::services::query_service::Page;
use inventory_domain::device::Device;
use inventory_domain::event::Event;
use inventory_domain::id::DeviceId;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Page<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, get-by-name and update endpoints.
pub enum GetResponse {
    Ok(Json<Device>),
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
    Created(Json<Device>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Possible responses from the history endpoint.
pub enum HistoryResponse {
    Ok(Json<Page<Event>>),
}

impl IntoResponse for HistoryResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /inventory/v1/devices`
pub async fn list<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let page = state.query_service.list_devices()?;
    Ok(ListResponse::Ok(Json(page)))
}

/// `GET /inventory/v1/devices/{id}`
pub async fn get<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    Path(id): Path<DeviceId>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let device = state.device_service.get_device(&id)?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `GET /inventory/v1/devices/by-name/{name}`
pub async fn get_by_name<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    Path(name): Path<String>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let device = state.device_service.find_device_by_name(&name)?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `POST /inventory/v1/devices`
pub async fn create<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    payload: Result<Json<Device>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let Json(device) = payload?;
    let created = state.device_service.create_device(device)?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /inventory/v1/devices/{id}`
pub async fn update<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    Path(id): Path<DeviceId>,
    payload: Result<Json<Device>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let Json(patch) = payload?;
    let updated = state.device_service.update_device(&id, patch)?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /inventory/v1/devices/{id}`
pub async fn delete<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    Path(id): Path<DeviceId>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    state.device_service.delete_device(&id)?;
    Ok(DeleteResponse::NoContent)
}

/// `GET /inventory/v1/devices/{id}/history`: every event naming the device,
/// oldest first. Unknown ids yield an empty page.
pub async fn history<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    Path(id): Path<DeviceId>,
) -> Result<HistoryResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let page = state.query_service.device_history(&id)?;
    Ok(HistoryResponse::Ok(Json(page)))
}
