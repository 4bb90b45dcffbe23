//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{
    DashboardService, PatientService, RoomService, ScheduleService, ServiceContainer, Services,
    UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Room and bed service
    pub room_service: Arc<dyn RoomService>,
    /// Patient lookup service
    pub patient_service: Arc<dyn PatientService>,
    /// User directory service
    pub user_service: Arc<dyn UserService>,
    /// Nurse schedule service
    pub schedule_service: Arc<dyn ScheduleService>,
    /// Dashboard counters
    pub dashboard_service: Arc<dyn DashboardService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state wired to the given database.
    pub fn from_database(database: Arc<Database>) -> Self {
        let container = Services::from_connection(database.get_connection());
        Self::new(&container, database)
    }

    /// Create application state from any service container.
    pub fn new(services: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            room_service: services.rooms(),
            patient_service: services.patients(),
            user_service: services.users(),
            schedule_service: services.schedules(),
            dashboard_service: services.dashboard(),
            database,
        }
    }
}
