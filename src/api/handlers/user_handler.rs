//! User directory handlers.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{NewUser, UserResponse, UserRole};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

/// User creation request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    #[schema(example = "Siti Aminah")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "siti@example.com")]
    pub email: String,
    /// Defaults to `patient`
    pub role: Option<UserRole>,
    /// Required for nurses and admins
    #[schema(example = "N-0042")]
    pub staff_id: Option<String>,
    pub gender: Option<String>,
    #[validate(length(max = 32, message = "IC number must be at most 32 characters"))]
    pub ic_number: Option<String>,
    #[validate(length(max = 32, message = "Contact number must be at most 32 characters"))]
    pub contact_number: Option<String>,
    pub address: Option<String>,
    #[validate(length(max = 8, message = "Blood type must be at most 8 characters"))]
    pub blood_type: Option<String>,
    pub emergency_contact: Option<String>,
    pub relation: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            role: req.role,
            staff_id: req.staff_id,
            gender: req.gender,
            ic_number: req.ic_number,
            contact_number: req.contact_number,
            address: req.address,
            blood_type: req.blood_type,
            emergency_contact: req.emergency_contact,
            relation: req.relation,
        }
    }
}

/// Role filter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RoleQuery {
    pub role: Option<UserRole>,
}

/// User search query
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserSearchQuery {
    pub q: Option<String>,
    pub role: Option<UserRole>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/search", get(search_users))
        .route("/:id", get(get_user))
}

/// List users, optionally by role
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(RoleQuery),
    responses(
        (status = 200, description = "Users ordered by name", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.user_service.list_users(query.role).await?;
    Ok(ApiResponse::success(
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

/// Register a patient or staff member
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 422, description = "Validation error or email taken")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state.user_service.create_user(payload.into()).await?;
    Ok(Created(ApiResponse::with_message(
        UserResponse::from(user),
        "User created successfully",
    )))
}

/// Search users by name, contact details or staff id
#[utoipa::path(
    get,
    path = "/users/search",
    tag = "Users",
    params(UserSearchQuery),
    responses(
        (status = 200, description = "Matching users", body = Vec<UserResponse>)
    )
)]
pub async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<UserSearchQuery>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let term = query.q.unwrap_or_default();
    let users = state.user_service.search_users(&term, query.role).await?;
    Ok(ApiResponse::success(
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}
