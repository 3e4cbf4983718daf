//! JSON REST handlers for locations, including the install/remove endpoints
//! under `/locations/{id}/device`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use inventory_app::ports::{DeviceRepository, EventStore, LocationRepository};
use inventory_app::services::binding_service::{Attribution, Binding};
use inventory_app::services::query_service::Page;
use inventory_domain::device::Device;
use inventory_domain::error::ValidationError;
use inventory_domain::event::Event;
use inventory_domain::id::{DeviceId, LocationId};
use inventory_domain::location::Location;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `PUT /locations/{id}/device`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallRequest {
    pub device_id: DeviceId,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Optional request body for `DELETE /locations/{id}/device`.
#[derive(Debug, Default, Deserialize)]
pub struct RemoveRequest {
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Page<Location>>),
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
    Ok(Json<Location>),
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
    Created(Json<Location>),
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

/// Possible responses from the occupant endpoint.
pub enum OccupantResponse {
    Ok(Json<Device>),
}

impl IntoResponse for OccupantResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the install and remove endpoints.
pub enum BindingResponse {
    Ok(Json<Binding>),
}

impl IntoResponse for BindingResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /inventory/v1/locations`
pub async fn list<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let page = state.query_service.list_locations()?;
    Ok(ListResponse::Ok(Json(page)))
}

/// `GET /inventory/v1/locations/{id}`
pub async fn get<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    Path(id): Path<LocationId>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let location = state.location_service.get_location(&id)?;
    Ok(GetResponse::Ok(Json(location)))
}

/// `GET /inventory/v1/locations/by-name/{name}`
pub async fn get_by_name<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    Path(name): Path<String>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let location = state.location_service.find_location_by_name(&name)?;
    Ok(GetResponse::Ok(Json(location)))
}

/// `POST /inventory/v1/locations`
pub async fn create<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    payload: Result<Json<Location>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let Json(location) = payload?;
    let created = state.location_service.create_location(location)?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /inventory/v1/locations/{id}`
pub async fn update<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    Path(id): Path<LocationId>,
    payload: Result<Json<Location>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let Json(patch) = payload?;
    let updated = state.location_service.update_location(&id, patch)?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /inventory/v1/locations/{id}`
pub async fn delete<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    Path(id): Path<LocationId>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    state.location_service.delete_location(&id)?;
    Ok(DeleteResponse::NoContent)
}

/// `GET /inventory/v1/locations/{id}/history`
pub async fn history<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    Path(id): Path<LocationId>,
) -> Result<HistoryResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let page = state.query_service.location_history(&id)?;
    Ok(HistoryResponse::Ok(Json(page)))
}

/// `GET /inventory/v1/locations/{id}/device`: the installed device.
pub async fn occupant<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    Path(id): Path<LocationId>,
) -> Result<OccupantResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let device = state.binding_service.occupant(&id)?;
    Ok(OccupantResponse::Ok(Json(device)))
}

/// `PUT /inventory/v1/locations/{id}/device`: install a device.
pub async fn install<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    Path(id): Path<LocationId>,
    payload: Result<Json<InstallRequest>, JsonRejection>,
) -> Result<BindingResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let Json(req) = payload?;
    if req.device_id.is_unassigned() {
        return Err(ValidationError::EmptyField("deviceId").into());
    }
    let attribution = Attribution {
        actor: req.actor,
        comment: req.comment,
    };
    let binding = state
        .binding_service
        .install(&id, &req.device_id, attribution)?;
    Ok(BindingResponse::Ok(Json(binding)))
}

/// `DELETE /inventory/v1/locations/{id}/device`: remove the installed
/// device. The body is optional.
pub async fn remove<DR, LR, ES>(
    State(state): State<AppState<DR, LR, ES>>,
    Path(id): Path<LocationId>,
    body: Bytes,
) -> Result<BindingResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: LocationRepository + Send + Sync + 'static,
    ES: EventStore + Send + Sync + 'static,
{
    let req = parse_optional::<RemoveRequest>(&body)?;
    let attribution = Attribution {
        actor: req.actor,
        comment: req.comment,
    };
    let binding = state.binding_service.remove(&id, attribution)?;
    Ok(BindingResponse::Ok(Json(binding)))
}

/// An empty (or all-whitespace) body means "use defaults".
fn parse_optional<T>(body: &[u8]) -> Result<T, ValidationError>
where
    T: Default + serde::de::DeserializeOwned,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|err| ValidationError::MalformedBody(err.to_string()))
}
