//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{
    bed_handler, dashboard_handler, patient_handler, room_handler, schedule_handler, user_handler,
};
use crate::domain::{
    BadgeColor, BedResponse, BedStatus, PatientSummary, RoomResponse, RoomType, ScheduleResponse,
    ScheduleStatus, Shift, UserResponse, UserRole,
};
use crate::services::DashboardSummary;
use crate::types::{PaginatedPatients, PaginationMeta};

/// OpenAPI documentation for the ward admin API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ward Admin API",
        version = "0.1.0",
        description = "Hospital ward administration: rooms, beds, patients and nurse schedules",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        room_handler::list_rooms,
        room_handler::create_room,
        room_handler::get_room,
        room_handler::update_room,
        room_handler::delete_room,
        room_handler::list_room_beds,
        room_handler::add_bed,
        bed_handler::update_bed,
        bed_handler::remove_bed,
        bed_handler::manage_bed,
        bed_handler::discharge_bed,
        patient_handler::list_patients,
        patient_handler::search_patients,
        patient_handler::search_unassigned,
        patient_handler::get_patient,
        user_handler::list_users,
        user_handler::create_user,
        user_handler::search_users,
        user_handler::get_user,
        schedule_handler::list_schedules,
        schedule_handler::create_schedule,
        schedule_handler::update_schedule,
        schedule_handler::delete_schedule,
        dashboard_handler::dashboard,
    ),
    components(
        schemas(
            // Domain types
            RoomType,
            RoomResponse,
            BedStatus,
            BedResponse,
            UserRole,
            UserResponse,
            PatientSummary,
            Shift,
            ScheduleStatus,
            BadgeColor,
            ScheduleResponse,
            DashboardSummary,
            PaginationMeta,
            PaginatedPatients,
            // Request types
            room_handler::CreateRoomRequest,
            room_handler::UpdateRoomRequest,
            bed_handler::UpdateBedRequest,
            bed_handler::ManageAction,
            bed_handler::ManageBedRequest,
            user_handler::CreateUserRequest,
            schedule_handler::CreateScheduleRequest,
            schedule_handler::UpdateScheduleRequest,
        )
    ),
    tags(
        (name = "Rooms", description = "Ward rooms and capacity"),
        (name = "Beds", description = "Bed status, assignment and transfer"),
        (name = "Patients", description = "Patient lookup"),
        (name = "Users", description = "Patients and staff directory"),
        (name = "Schedules", description = "Nurse shift calendar"),
        (name = "Dashboard", description = "Occupancy counters")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_ward_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/rooms", "/rooms/{id}/beds", "/beds/manage", "/patients/unassigned", "/schedules"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
