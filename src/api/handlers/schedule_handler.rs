//! Nurse schedule handlers.

use axum::{
    extract::{Path, Query, State},
    routing::{get, patch},
    Router,
};
use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{
    NewSchedule, ScheduleFilter, SchedulePatch, ScheduleResponse, ScheduleStatus, Shift,
};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

/// Calendar range query; defaults to the current month
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScheduleQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub nurse_id: Option<Uuid>,
}

/// Schedule creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateScheduleRequest {
    pub nurse_id: Uuid,
    pub room_id: Uuid,
    pub shift: Shift,
    pub date: NaiveDate,
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Schedule update request (all fields optional)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateScheduleRequest {
    pub room_id: Option<Uuid>,
    pub shift: Option<Shift>,
    pub date: Option<NaiveDate>,
    pub status: Option<ScheduleStatus>,
    /// An empty string clears the notes
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

impl From<CreateScheduleRequest> for NewSchedule {
    fn from(req: CreateScheduleRequest) -> Self {
        Self {
            nurse_id: req.nurse_id,
            room_id: req.room_id,
            shift: req.shift,
            date: req.date,
            notes: req.notes.filter(|n| !n.trim().is_empty()),
        }
    }
}

impl From<UpdateScheduleRequest> for SchedulePatch {
    fn from(req: UpdateScheduleRequest) -> Self {
        Self {
            room_id: req.room_id,
            shift: req.shift,
            date: req.date,
            status: req.status,
            notes: req.notes,
        }
    }
}

/// First and last day of the month containing `day`.
fn month_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = day.with_day(1).unwrap_or(day);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(day);
    (first, last)
}

impl ScheduleQuery {
    fn into_filter(self, today: NaiveDate) -> ScheduleFilter {
        let (first, last) = month_bounds(today);
        ScheduleFilter {
            from: self.from.unwrap_or(first),
            to: self.to.unwrap_or(last),
            nurse_id: self.nurse_id,
        }
    }
}

/// Create schedule routes
pub fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_schedules).post(create_schedule))
        .route("/:id", patch(update_schedule).delete(delete_schedule))
}

/// Schedules in a date range, ordered by date then shift
#[utoipa::path(
    get,
    path = "/schedules",
    tag = "Schedules",
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Schedules in range", body = Vec<ScheduleResponse>),
        (status = 422, description = "Start date after end date")
    )
)]
pub async fn list_schedules(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> AppResult<ApiResponse<Vec<ScheduleResponse>>> {
    let filter = query.into_filter(Utc::now().date_naive());
    let schedules = state.schedule_service.list_schedules(filter).await?;
    Ok(ApiResponse::success(
        schedules.into_iter().map(ScheduleResponse::from).collect(),
    ))
}

/// Put a nurse on a shift
#[utoipa::path(
    post,
    path = "/schedules",
    tag = "Schedules",
    request_body = CreateScheduleRequest,
    responses(
        (status = 201, description = "Schedule created", body = ScheduleResponse),
        (status = 404, description = "Room not found"),
        (status = 422, description = "Not a nurse or already booked for that shift")
    )
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateScheduleRequest>,
) -> AppResult<Created<ScheduleResponse>> {
    let schedule = state.schedule_service.create_schedule(payload.into()).await?;
    Ok(Created(ApiResponse::with_message(
        ScheduleResponse::from(schedule),
        "Schedule created successfully",
    )))
}

/// Update a schedule
#[utoipa::path(
    patch,
    path = "/schedules/{id}",
    tag = "Schedules",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    request_body = UpdateScheduleRequest,
    responses(
        (status = 200, description = "Schedule updated", body = ScheduleResponse),
        (status = 404, description = "Schedule not found"),
        (status = 422, description = "Already booked for that shift")
    )
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateScheduleRequest>,
) -> AppResult<ApiResponse<ScheduleResponse>> {
    let schedule = state
        .schedule_service
        .update_schedule(id, payload.into())
        .await?;
    Ok(ApiResponse::with_message(
        ScheduleResponse::from(schedule),
        "Schedule updated successfully",
    ))
}

/// Delete a schedule
#[utoipa::path(
    delete,
    path = "/schedules/{id}",
    tag = "Schedules",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule deleted"),
        (status = 404, description = "Schedule not found")
    )
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<()>> {
    state.schedule_service.delete_schedule(id).await?;
    Ok(ApiResponse::message("Schedule deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_bounds(date(2024, 2, 14)), (date(2024, 2, 1), date(2024, 2, 29)));
        assert_eq!(month_bounds(date(2023, 12, 31)), (date(2023, 12, 1), date(2023, 12, 31)));
    }

    #[test]
    fn test_query_defaults_to_current_month() {
        let query = ScheduleQuery {
            from: None,
            to: Some(date(2024, 3, 10)),
            nurse_id: None,
        };
        let filter = query.into_filter(date(2024, 3, 5));
        assert_eq!(filter.from, date(2024, 3, 1));
        assert_eq!(filter.to, date(2024, 3, 10));
    }
}
