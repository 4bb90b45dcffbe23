//! Room handlers: ward inventory and capacity.

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{BedResponse, NewRoom, RoomPatch, RoomResponse, RoomType};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

/// Room creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 32, message = "Room number must be 1-32 characters"))]
    #[schema(example = "101A")]
    pub room_number: String,
    #[validate(range(min = 1, message = "Floor must be at least 1"))]
    #[schema(example = 1)]
    pub floor: i32,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[validate(range(min = 1, max = 64, message = "Total beds must be between 1 and 64"))]
    #[schema(example = 3)]
    pub total_beds: i32,
    #[validate(length(max = 255, message = "Notes must be at most 255 characters"))]
    pub notes: Option<String>,
}

/// Room update request (all fields optional)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, max = 32, message = "Room number must be 1-32 characters"))]
    pub room_number: Option<String>,
    #[validate(range(min = 1, message = "Floor must be at least 1"))]
    pub floor: Option<i32>,
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    /// Resizes the room; occupied beds are never removed
    #[validate(range(min = 1, max = 64, message = "Total beds must be between 1 and 64"))]
    pub total_beds: Option<i32>,
    /// An empty string clears the notes
    #[validate(length(max = 255, message = "Notes must be at most 255 characters"))]
    pub notes: Option<String>,
}

impl From<CreateRoomRequest> for NewRoom {
    fn from(req: CreateRoomRequest) -> Self {
        Self {
            room_number: req.room_number,
            floor: req.floor,
            room_type: req.room_type,
            total_beds: req.total_beds,
            notes: req.notes.filter(|n| !n.trim().is_empty()),
        }
    }
}

impl From<UpdateRoomRequest> for RoomPatch {
    fn from(req: UpdateRoomRequest) -> Self {
        Self {
            room_number: req.room_number,
            floor: req.floor,
            room_type: req.room_type,
            total_beds: req.total_beds,
            notes: req.notes,
        }
    }
}

/// Create room routes
pub fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rooms).post(create_room))
        .route(
            "/:id",
            get(get_room)
                .put(update_room)
                .post(update_room)
                .delete(delete_room),
        )
        .route("/:id/beds", get(list_room_beds).post(add_bed))
}

/// List rooms with their beds
#[utoipa::path(
    get,
    path = "/rooms",
    tag = "Rooms",
    responses(
        (status = 200, description = "Rooms ordered by room number", body = Vec<RoomResponse>)
    )
)]
pub async fn list_rooms(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<RoomResponse>>> {
    let rooms = state.room_service.list_rooms().await?;
    Ok(ApiResponse::success(
        rooms.into_iter().map(RoomResponse::from).collect(),
    ))
}

/// Create a room and its beds
#[utoipa::path(
    post,
    path = "/rooms",
    tag = "Rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = RoomResponse),
        (status = 422, description = "Validation error or duplicate room number")
    )
)]
pub async fn create_room(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateRoomRequest>,
) -> AppResult<Created<RoomResponse>> {
    let room = state.room_service.create_room(payload.into()).await?;
    Ok(Created(ApiResponse::with_message(
        RoomResponse::from(room),
        "Room created successfully",
    )))
}

/// Get a room with its beds
#[utoipa::path(
    get,
    path = "/rooms/{id}",
    tag = "Rooms",
    params(("id" = Uuid, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room found", body = RoomResponse),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<RoomResponse>> {
    let room = state.room_service.get_room(id).await?;
    Ok(ApiResponse::success(RoomResponse::from(room)))
}

/// Update a room, resizing it when `total_beds` is given
#[utoipa::path(
    put,
    path = "/rooms/{id}",
    tag = "Rooms",
    params(("id" = Uuid, Path, description = "Room ID")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Room updated", body = RoomResponse),
        (status = 404, description = "Room not found"),
        (status = 422, description = "Validation error or occupied beds block the resize")
    )
)]
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateRoomRequest>,
) -> AppResult<ApiResponse<RoomResponse>> {
    let room = state.room_service.update_room(id, payload.into()).await?;
    Ok(ApiResponse::with_message(
        RoomResponse::from(room),
        "Room updated successfully",
    ))
}

/// Delete a room and its beds
#[utoipa::path(
    delete,
    path = "/rooms/{id}",
    tag = "Rooms",
    params(("id" = Uuid, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room deleted"),
        (status = 404, description = "Room not found"),
        (status = 422, description = "Room has occupied beds")
    )
)]
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<()>> {
    state.room_service.delete_room(id).await?;
    Ok(ApiResponse::message("Room deleted successfully"))
}

/// Beds of a room with occupant names
#[utoipa::path(
    get,
    path = "/rooms/{id}/beds",
    tag = "Rooms",
    params(("id" = Uuid, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Beds ordered by bed number", body = Vec<BedResponse>),
        (status = 404, description = "Room not found")
    )
)]
pub async fn list_room_beds(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<Vec<BedResponse>>> {
    let beds = state.room_service.room_beds(id).await?;
    Ok(ApiResponse::success(
        beds.into_iter().map(BedResponse::from).collect(),
    ))
}

/// Append a bed to a room
#[utoipa::path(
    post,
    path = "/rooms/{id}/beds",
    tag = "Rooms",
    params(("id" = Uuid, Path, description = "Room ID")),
    responses(
        (status = 201, description = "Bed added", body = BedResponse),
        (status = 404, description = "Room not found")
    )
)]
pub async fn add_bed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Created<BedResponse>> {
    let bed = state.room_service.add_bed(id).await?;
    Ok(Created(ApiResponse::with_message(
        BedResponse::from(bed),
        "Bed added successfully",
    )))
}
