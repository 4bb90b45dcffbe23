//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! DDD: Domain layer has NO external dependencies (except error types).
//! Contains: Entities, Value Objects, Domain Services.

pub mod bed;
pub mod bed_status;
pub mod room;
pub mod schedule;
pub mod user;

pub use bed::{Bed, BedAction, BedDetail, BedPatch, BedResponse, BedStatus, BedTransfer};
pub use bed_status::{resolve as resolve_bed_state, BedState, OccupantChange};
pub use room::{NewRoom, Occupancy, Room, RoomDetail, RoomPatch, RoomResponse, RoomType};
pub use schedule::{
    badge_color, BadgeColor, NewSchedule, NurseSchedule, ScheduleFilter, SchedulePatch,
    ScheduleResponse, ScheduleStatus, Shift,
};
pub use user::{NewUser, PatientSummary, User, UserResponse, UserRole};
