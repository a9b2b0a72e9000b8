//! # Record Operations API
//!
//! One `POST` route per operation. Each handler passes the `Authorization`
//! header and the raw body to [`RecordService`](crate::service::RecordService);
//! the body is only parsed after the token is accepted, so an unauthorized
//! caller gets 403 whatever the body contains.
//!
//! ## Endpoints
//!
//! - `POST /v1/records/create` — create a record
//! - `POST /v1/records/list` — list a tenant's records
//! - `POST /v1/records/get` — get one record
//! - `POST /v1/records/update` — merge fields into a record
//! - `POST /v1/records/delete` — delete a record (idempotent)

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Map, Value};
use tkv_core::{
    DeleteRecordResponse, GetRecordResponse, ListRecordsResponse, Record, Status,
    UpdateRecordResponse,
};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::gate::bearer_token;
use crate::state::AppState;

// ── OpenAPI DTOs ────────────────────────────────────────────────────
//
// Records are open field maps, so these describe the fixed fields only.

/// Create request. Every field other than the key is stored as an attribute.
#[derive(ToSchema)]
pub struct CreateRecordRequest {
    pub tenant_id: String,
    pub record_id: String,
}

/// List request.
#[derive(ToSchema)]
pub struct ListRecordsRequest {
    pub tenant_id: String,
}

/// Get or delete request.
#[derive(ToSchema)]
pub struct RecordKeyRequest {
    pub tenant_id: String,
    pub record_id: String,
}

/// Update request.
#[derive(ToSchema)]
pub struct UpdateRecordRequest {
    pub tenant_id: String,
    pub record_id: String,
    /// Non-empty mapping of field name to new value. Key fields are immutable.
    #[schema(value_type = Object)]
    pub updates: Map<String, Value>,
}

/// A record: key fields plus attribute fields, flat.
#[derive(ToSchema)]
pub struct RecordDto {
    pub tenant_id: String,
    pub record_id: String,
}

/// List response.
#[derive(ToSchema)]
pub struct ListRecordsDto {
    pub tenant_id: String,
    pub count: usize,
    pub records: Vec<RecordDto>,
}

/// Get response. `record` is null and `message` set when nothing exists.
#[derive(ToSchema)]
pub struct GetRecordDto {
    pub record: Option<RecordDto>,
    pub message: Option<String>,
}

/// Update response with the changed fields only.
#[derive(ToSchema)]
pub struct UpdateRecordDto {
    pub tenant_id: String,
    pub record_id: String,
    #[schema(value_type = Object)]
    pub updated: Map<String, Value>,
}

/// Delete confirmation.
#[derive(ToSchema)]
pub struct DeleteRecordDto {
    pub tenant_id: String,
    pub record_id: String,
    pub message: String,
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the records router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/records/create", post(create_record))
        .route("/v1/records/list", post(list_records))
        .route("/v1/records/get", post(get_record))
        .route("/v1/records/update", post(update_record))
        .route("/v1/records/delete", post(delete_record))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /v1/records/create — Create a record.
#[utoipa::path(
    post,
    path = "/v1/records/create",
    request_body = CreateRecordRequest,
    responses(
        (status = 200, description = "Record created", body = RecordDto),
        (status = 400, description = "Missing field or malformed body", body = crate::error::ErrorBody),
        (status = 403, description = "Token missing or invalid", body = crate::error::ErrorBody),
        (status = 409, description = "Record already exists", body = crate::error::ErrorBody),
        (status = 503, description = "Record store unavailable", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "records"
)]
pub(crate) async fn create_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Record>, AppError> {
    let record = state.service.create(bearer_token(&headers), &body).await?;
    Ok(Json(record))
}

/// POST /v1/records/list — List every record of a tenant.
#[utoipa::path(
    post,
    path = "/v1/records/list",
    request_body = ListRecordsRequest,
    responses(
        (status = 200, description = "Records in the tenant", body = ListRecordsDto),
        (status = 400, description = "Missing field or malformed body", body = crate::error::ErrorBody),
        (status = 403, description = "Token missing or invalid", body = crate::error::ErrorBody),
        (status = 503, description = "Record store unavailable", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "records"
)]
pub(crate) async fn list_records(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ListRecordsResponse>, AppError> {
    let listed = state.service.list(bearer_token(&headers), &body).await?;
    Ok(Json(listed))
}

/// POST /v1/records/get — Get one record by key.
#[utoipa::path(
    post,
    path = "/v1/records/get",
    request_body = RecordKeyRequest,
    responses(
        (status = 200, description = "Record found", body = GetRecordDto),
        (status = 404, description = "No record at the key", body = GetRecordDto),
        (status = 400, description = "Missing field or malformed body", body = crate::error::ErrorBody),
        (status = 403, description = "Token missing or invalid", body = crate::error::ErrorBody),
        (status = 503, description = "Record store unavailable", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "records"
)]
pub(crate) async fn get_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<GetRecordResponse>), AppError> {
    let found = state.service.get(bearer_token(&headers), &body).await?;
    let status = match found.status() {
        Status::Ok => StatusCode::OK,
        _ => StatusCode::NOT_FOUND,
    };
    Ok((status, Json(found)))
}

/// POST /v1/records/update — Merge fields into an existing record.
#[utoipa::path(
    post,
    path = "/v1/records/update",
    request_body = UpdateRecordRequest,
    responses(
        (status = 200, description = "Fields updated", body = UpdateRecordDto),
        (status = 400, description = "Missing field or malformed body", body = crate::error::ErrorBody),
        (status = 403, description = "Token missing or invalid", body = crate::error::ErrorBody),
        (status = 404, description = "No record at the key", body = crate::error::ErrorBody),
        (status = 503, description = "Record store unavailable", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "records"
)]
pub(crate) async fn update_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UpdateRecordResponse>, AppError> {
    let updated = state.service.update(bearer_token(&headers), &body).await?;
    Ok(Json(updated))
}

/// POST /v1/records/delete — Delete a record. Succeeds whether or not it existed.
#[utoipa::path(
    post,
    path = "/v1/records/delete",
    request_body = RecordKeyRequest,
    responses(
        (status = 200, description = "Record absent", body = DeleteRecordDto),
        (status = 400, description = "Missing field or malformed body", body = crate::error::ErrorBody),
        (status = 403, description = "Token missing or invalid", body = crate::error::ErrorBody),
        (status = 503, description = "Record store unavailable", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "records"
)]
pub(crate) async fn delete_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DeleteRecordResponse>, AppError> {
    let deleted = state.service.delete(bearer_token(&headers), &body).await?;
    Ok(Json(deleted))
}
