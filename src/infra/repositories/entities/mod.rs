//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Enumerations are stored as lowercase strings.

pub mod bed;
pub mod nurse_schedule;
pub mod room;
pub mod user;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use bed::{ActiveModel as BedActiveModel, Entity as BedEntity, Model as BedModel};
#[allow(unused_imports)]
pub use nurse_schedule::{
    ActiveModel as ScheduleActiveModel, Entity as ScheduleEntity, Model as ScheduleModel,
};
#[allow(unused_imports)]
pub use room::{ActiveModel as RoomActiveModel, Entity as RoomEntity, Model as RoomModel};
#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
