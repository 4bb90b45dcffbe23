//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories over rooms, beds, users and nurse schedules
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    PatientRepository, PatientStore, RoomRepository, RoomStore, ScheduleRepository, ScheduleStore,
    UserRepository, UserStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxBedRepository, TxFuture, TxRoomRepository,
    TxScheduleRepository, TxUserRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockPatientRepository, MockRoomRepository, MockScheduleRepository, MockUserRepository,
};
