//! # API REST
//!
//! REST API implementation for the catalog.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, request tracing)
//!
//! Uses `api-shared` for wire types and `catalog-core` for everything else.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod extract;

use api_shared::{
    CreateDiseaseCardReq, CreateProfessionalCenterReq, DiseaseCardRes, ErrorRes, HealthRes,
    HealthService, ProfessionalCenterRes, SearchParams, SeedRes,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use catalog_core::{
    CatalogService, ContactInfo, DiseaseCard, NewDiseaseCard, NewProfessionalCenter,
    ProfessionalCenter, Record,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;
pub use extract::ApiJson;

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    catalog: CatalogService,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_diseases,
        create_disease,
        list_professional_centers,
        create_professional_center,
        seed_data,
    ),
    components(schemas(
        HealthRes,
        DiseaseCardRes,
        ProfessionalCenterRes,
        CreateDiseaseCardReq,
        CreateProfessionalCenterReq,
        SeedRes,
        ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Builds the catalog router with CORS, request tracing and Swagger UI attached.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/diseases", get(list_diseases).post(create_disease))
        .route(
            "/api/professional_centers",
            get(list_professional_centers).post(create_professional_center),
        )
        .route("/api/seed_data", get(seed_data).post(seed_data))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.catalog.backend_name()))
}

#[utoipa::path(
    get,
    path = "/api/diseases",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching disease cards", body = [DiseaseCardRes]),
        (status = 500, description = "Store failure", body = ErrorRes)
    )
)]
/// List disease cards whose name contains `q`, ignoring case
///
/// An omitted or empty `q` returns every disease card.
#[axum::debug_handler]
async fn list_diseases(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<DiseaseCardRes>>, ApiError> {
    let records = state
        .catalog
        .search_diseases(params.q.as_deref())
        .await
        .map_err(|e| ApiError::from_catalog("Error searching diseases", e))?;

    Ok(Json(records.into_iter().map(disease_res).collect()))
}

#[utoipa::path(
    post,
    path = "/api/diseases",
    request_body = CreateDiseaseCardReq,
    responses(
        (status = 201, description = "Disease card created", body = DiseaseCardRes),
        (status = 400, description = "Required field missing", body = ErrorRes),
        (status = 422, description = "Body does not match the request schema", body = ErrorRes),
        (status = 500, description = "Store failure", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn create_disease(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateDiseaseCardReq>,
) -> Result<(StatusCode, Json<DiseaseCardRes>), ApiError> {
    let draft = NewDiseaseCard {
        name: req.name,
        symptoms: req.symptoms,
        causes: req.causes,
        treatments: req.treatments,
        prevalence: req.prevalence,
        resources: req.resources,
    };

    let record = state
        .catalog
        .create_disease(draft)
        .await
        .map_err(|e| ApiError::from_catalog("Error creating disease card", e))?;

    Ok((StatusCode::CREATED, Json(disease_res(record))))
}

#[utoipa::path(
    get,
    path = "/api/professional_centers",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching professional centers", body = [ProfessionalCenterRes]),
        (status = 500, description = "Store failure", body = ErrorRes)
    )
)]
/// List professional centers matching `q` in their name, location, or disease list
///
/// An omitted or empty `q` returns every professional center.
#[axum::debug_handler]
async fn list_professional_centers(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ProfessionalCenterRes>>, ApiError> {
    let records = state
        .catalog
        .search_centers(params.q.as_deref())
        .await
        .map_err(|e| ApiError::from_catalog("Error searching professional centers", e))?;

    Ok(Json(records.into_iter().map(center_res).collect()))
}

#[utoipa::path(
    post,
    path = "/api/professional_centers",
    request_body = CreateProfessionalCenterReq,
    responses(
        (status = 201, description = "Professional center created", body = ProfessionalCenterRes),
        (status = 400, description = "Required field missing", body = ErrorRes),
        (status = 422, description = "Body does not match the request schema", body = ErrorRes),
        (status = 500, description = "Store failure", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn create_professional_center(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateProfessionalCenterReq>,
) -> Result<(StatusCode, Json<ProfessionalCenterRes>), ApiError> {
    let draft = NewProfessionalCenter {
        name: req.name,
        location: req.location,
        map_reference: req.map_reference,
        diseases: req.diseases,
        contact_info: ContactInfo::from_map(req.contact_info),
        hours_of_operation: req.hours_of_operation,
    };

    let record = state
        .catalog
        .create_center(draft)
        .await
        .map_err(|e| ApiError::from_catalog("Error creating professional center", e))?;

    Ok((StatusCode::CREATED, Json(center_res(record))))
}

#[utoipa::path(
    get,
    path = "/api/seed_data",
    responses(
        (status = 200, description = "Both collections replaced with the seed dataset", body = SeedRes),
        (status = 500, description = "Seeding failed or was incomplete", body = ErrorRes)
    )
)]
/// Replace all disease cards and professional centers with the seed dataset
///
/// Also accepts `POST`.
#[axum::debug_handler]
async fn seed_data(State(state): State<AppState>) -> Result<Json<SeedRes>, ApiError> {
    let report = state
        .catalog
        .seed()
        .await
        .map_err(|e| ApiError::from_catalog("Error seeding data", e))?;

    Ok(Json(SeedRes {
        message: "Data seeded successfully".into(),
        diseases: report.diseases_inserted,
        professional_centers: report.centers_inserted,
    }))
}

fn disease_res(record: Record<DiseaseCard>) -> DiseaseCardRes {
    let Record { id, fields } = record;
    DiseaseCardRes {
        id: id.into(),
        name: fields.name.into_inner(),
        symptoms: fields.symptoms,
        causes: fields.causes,
        treatments: fields.treatments,
        prevalence: fields.prevalence,
        resources: fields.resources,
    }
}

fn center_res(record: Record<ProfessionalCenter>) -> ProfessionalCenterRes {
    let Record { id, fields } = record;
    ProfessionalCenterRes {
        id: id.into(),
        name: fields.name.into_inner(),
        location: fields.location,
        map_reference: fields.map_reference,
        diseases: fields.diseases,
        contact_info: fields.contact_info.to_map(),
        hours_of_operation: fields.hours_of_operation,
    }
}
