//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec.
//! Serves at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "tkv — Tenant-Partitioned Record Service",
        version = "0.1.0",
        description = "Token-gated record operations keyed by (tenant_id, record_id)."
    ),
    paths(
        crate::routes::records::create_record,
        crate::routes::records::list_records,
        crate::routes::records::get_record,
        crate::routes::records::update_record,
        crate::routes::records::delete_record,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::records::CreateRecordRequest,
        crate::routes::records::ListRecordsRequest,
        crate::routes::records::RecordKeyRequest,
        crate::routes::records::UpdateRecordRequest,
        crate::routes::records::RecordDto,
        crate::routes::records::ListRecordsDto,
        crate::routes::records::GetRecordDto,
        crate::routes::records::UpdateRecordDto,
        crate::routes::records::DeleteRecordDto,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "records", description = "Record operations, each gated by token validation"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` security scheme referenced by the record routes.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
