//! Dashboard handler.

use axum::{extract::State, routing::get, Router};

use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::DashboardSummary;
use crate::types::ApiResponse;

/// Create dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

/// Ward occupancy and staffing counters
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Current counters", body = DashboardSummary)
    )
)]
pub async fn dashboard(State(state): State<AppState>) -> AppResult<ApiResponse<DashboardSummary>> {
    let summary = state.dashboard_service.summary().await?;
    Ok(ApiResponse::success(summary))
}
