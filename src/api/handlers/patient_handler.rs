//! Patient lookup handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{DEFAULT_PAGE_NUMBER, PATIENT_QUICK_SEARCH_LIMIT};
use crate::domain::{PatientSummary, UserResponse};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Paginated, PaginatedPatients};

/// Quick search query
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PatientSearchQuery {
    /// Matched against name, email, IC, phone, address, blood type and emergency contact
    pub term: Option<String>,
}

/// Unassigned patient picker query
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UnassignedQuery {
    pub search: Option<String>,
    /// 1-based page number
    pub page: Option<u64>,
}

/// Create patient routes
pub fn patient_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_patients))
        .route("/search", get(search_patients))
        .route("/unassigned", get(search_unassigned))
        .route("/:id", get(get_patient))
}

/// List all patients
#[utoipa::path(
    get,
    path = "/patients",
    tag = "Patients",
    responses(
        (status = 200, description = "Patients ordered by name", body = Vec<UserResponse>)
    )
)]
pub async fn list_patients(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let patients = state.patient_service.list_patients().await?;
    Ok(ApiResponse::success(
        patients.into_iter().map(UserResponse::from).collect(),
    ))
}

/// Quick patient search (first matches only)
#[utoipa::path(
    get,
    path = "/patients/search",
    tag = "Patients",
    params(PatientSearchQuery),
    responses(
        (status = 200, description = "Matching patients", body = Vec<PatientSummary>)
    )
)]
pub async fn search_patients(
    State(state): State<AppState>,
    Query(query): Query<PatientSearchQuery>,
) -> AppResult<ApiResponse<Vec<PatientSummary>>> {
    let term = query.term.unwrap_or_default();
    let patients = state
        .patient_service
        .search_patients(&term, Some(PATIENT_QUICK_SEARCH_LIMIT))
        .await?;

    Ok(ApiResponse::success(
        patients.into_iter().map(PatientSummary::from).collect(),
    ))
}

/// Patients without a bed, paginated for the assignment picker
#[utoipa::path(
    get,
    path = "/patients/unassigned",
    tag = "Patients",
    params(UnassignedQuery),
    responses(
        (status = 200, description = "Page of unassigned patients", body = PaginatedPatients)
    )
)]
pub async fn search_unassigned(
    State(state): State<AppState>,
    Query(query): Query<UnassignedQuery>,
) -> AppResult<Json<Paginated<PatientSummary>>> {
    let term = query.search.unwrap_or_default();
    let page = query.page.unwrap_or(DEFAULT_PAGE_NUMBER);
    let patients = state.patient_service.search_unassigned(&term, page).await?;

    Ok(Json(patients.map(PatientSummary::from)))
}

/// Patient details
#[utoipa::path(
    get,
    path = "/patients/{id}",
    tag = "Patients",
    params(("id" = Uuid, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Patient found", body = UserResponse),
        (status = 404, description = "Patient not found")
    )
)]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<UserResponse>> {
    let patient = state.patient_service.get_patient(id).await?;
    Ok(ApiResponse::success(UserResponse::from(patient)))
}
