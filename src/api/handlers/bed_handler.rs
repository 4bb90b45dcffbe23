//! Bed handlers: status changes, assignment, transfer and discharge.

use axum::{
    extract::{Path, State},
    routing::{patch, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{BedAction, BedPatch, BedResponse, BedStatus, OccupantChange};
use crate::errors::{AppError, AppResult};
use crate::types::ApiResponse;

/// Generic bed update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBedRequest {
    pub status: Option<BedStatus>,
    /// Patient to place in the bed
    pub patient_id: Option<Uuid>,
}

impl From<UpdateBedRequest> for BedPatch {
    fn from(req: UpdateBedRequest) -> Self {
        Self {
            status: req.status,
            occupant: req
                .patient_id
                .map_or(OccupantChange::Keep, OccupantChange::Assign),
        }
    }
}

/// Action posted by the ward management screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ManageAction {
    Assign,
    Maintenance,
    Transfer,
}

/// Bed management request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ManageBedRequest {
    pub action: ManageAction,
    pub bed_id: Uuid,
    /// Required for `assign`
    pub patient_id: Option<Uuid>,
    /// Required for `transfer`
    pub new_bed_id: Option<Uuid>,
}

impl TryFrom<ManageBedRequest> for BedAction {
    type Error = AppError;

    fn try_from(req: ManageBedRequest) -> Result<Self, Self::Error> {
        let bed_id = req.bed_id;
        match req.action {
            ManageAction::Assign => req
                .patient_id
                .map(|patient_id| BedAction::Assign { bed_id, patient_id })
                .ok_or_else(|| AppError::validation("patient_id is required to assign a bed")),
            ManageAction::Maintenance => Ok(BedAction::Maintenance { bed_id }),
            ManageAction::Transfer => req
                .new_bed_id
                .map(|new_bed_id| BedAction::Transfer { bed_id, new_bed_id })
                .ok_or_else(|| AppError::validation("new_bed_id is required to transfer a patient")),
        }
    }
}

impl ManageAction {
    fn success_message(&self) -> &'static str {
        match self {
            ManageAction::Assign => "Patient assigned successfully",
            ManageAction::Maintenance => "Bed set to maintenance",
            ManageAction::Transfer => "Patient transferred successfully",
        }
    }
}

/// Create bed routes
pub fn bed_routes() -> Router<AppState> {
    Router::new()
        .route("/manage", post(manage_bed))
        .route("/:id", patch(update_bed).delete(remove_bed))
        .route("/:id/discharge", post(discharge_bed))
}

/// Update bed status and occupant
#[utoipa::path(
    patch,
    path = "/beds/{id}",
    tag = "Beds",
    params(("id" = Uuid, Path, description = "Bed ID")),
    request_body = UpdateBedRequest,
    responses(
        (status = 200, description = "Bed updated", body = BedResponse),
        (status = 404, description = "Bed or patient not found"),
        (status = 422, description = "Invalid status change")
    )
)]
pub async fn update_bed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBedRequest>,
) -> AppResult<ApiResponse<BedResponse>> {
    let bed = state.room_service.update_bed(id, payload.into()).await?;
    Ok(ApiResponse::with_message(
        BedResponse::from(bed),
        "Bed updated successfully",
    ))
}

/// Remove an empty bed
#[utoipa::path(
    delete,
    path = "/beds/{id}",
    tag = "Beds",
    params(("id" = Uuid, Path, description = "Bed ID")),
    responses(
        (status = 200, description = "Bed removed"),
        (status = 404, description = "Bed not found"),
        (status = 400, description = "Bed is occupied")
    )
)]
pub async fn remove_bed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<()>> {
    state.room_service.remove_bed(id).await?;
    Ok(ApiResponse::message("Bed removed successfully"))
}

/// Assign, transfer or service a bed
#[utoipa::path(
    post,
    path = "/beds/manage",
    tag = "Beds",
    request_body = ManageBedRequest,
    responses(
        (status = 200, description = "Beds touched by the action", body = Vec<BedResponse>),
        (status = 404, description = "Bed or patient not found"),
        (status = 422, description = "Bed unavailable or patient already assigned")
    )
)]
pub async fn manage_bed(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ManageBedRequest>,
) -> AppResult<ApiResponse<Vec<BedResponse>>> {
    let message = payload.action.success_message();
    let beds = state.room_service.manage_bed(payload.try_into()?).await?;
    Ok(ApiResponse::with_message(
        beds.into_iter().map(BedResponse::from).collect(),
        message,
    ))
}

/// Discharge the occupant; the bed goes to maintenance
#[utoipa::path(
    post,
    path = "/beds/{id}/discharge",
    tag = "Beds",
    params(("id" = Uuid, Path, description = "Bed ID")),
    responses(
        (status = 200, description = "Patient discharged", body = BedResponse),
        (status = 404, description = "Bed not found")
    )
)]
pub async fn discharge_bed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<BedResponse>> {
    let bed = state.room_service.discharge_patient(id).await?;
    Ok(ApiResponse::with_message(
        BedResponse::from(bed),
        "Patient discharged successfully",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(action: ManageAction) -> ManageBedRequest {
        ManageBedRequest {
            action,
            bed_id: Uuid::from_u128(1),
            patient_id: None,
            new_bed_id: None,
        }
    }

    #[test]
    fn test_assign_requires_patient() {
        let result = BedAction::try_from(request(ManageAction::Assign));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_transfer_maps_target() {
        let mut req = request(ManageAction::Transfer);
        req.new_bed_id = Some(Uuid::from_u128(2));

        let action = BedAction::try_from(req).unwrap();
        assert_eq!(
            action,
            BedAction::Transfer {
                bed_id: Uuid::from_u128(1),
                new_bed_id: Uuid::from_u128(2)
            }
        );
    }

    #[test]
    fn test_manage_action_parses_lowercase() {
        let req: ManageBedRequest = serde_json::from_value(serde_json::json!({
            "action": "maintenance",
            "bed_id": Uuid::from_u128(1),
        }))
        .unwrap();
        assert_eq!(
            BedAction::try_from(req).unwrap(),
            BedAction::Maintenance { bed_id: Uuid::from_u128(1) }
        );
    }

    #[test]
    fn test_patient_id_becomes_assignment() {
        let patch = BedPatch::from(UpdateBedRequest {
            status: None,
            patient_id: Some(Uuid::from_u128(9)),
        });
        assert_eq!(patch.occupant, OccupantChange::Assign(Uuid::from_u128(9)));
    }
}
