//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

pub mod container;
mod dashboard_service;
mod patient_service;
mod room_service;
mod schedule_service;
mod user_service;

#[cfg(test)]
pub(crate) mod testing;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use dashboard_service::{DashboardReporter, DashboardService, DashboardSummary};
pub use patient_service::{PatientDirectory, PatientService};
pub use room_service::{RoomManager, RoomService};
pub use schedule_service::{ScheduleManager, ScheduleService};
pub use user_service::{UserManager, UserService};

// Parallel execution utilities
pub use container::parallel;

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
