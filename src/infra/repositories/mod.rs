//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod patient_repository;
mod room_repository;
mod schedule_repository;
pub(crate) mod search;
mod user_repository;

pub use patient_repository::{PatientRepository, PatientStore};
pub use room_repository::{RoomRepository, RoomStore};
pub(crate) use room_repository::load_room_details;
pub use schedule_repository::{ScheduleRepository, ScheduleStore};
pub(crate) use schedule_repository::{insert_schedule, nurse_booked, patch_schedule};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use patient_repository::MockPatientRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use room_repository::MockRoomRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use schedule_repository::MockScheduleRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
