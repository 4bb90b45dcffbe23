//! Shared fixtures for the integration tests: a migrated in-memory SQLite
//! database and helpers that seed users and rooms through the services.

#![allow(dead_code)]

use std::sync::Arc;

use sea_orm::{ConnectOptions, Database as SeaDatabase};

use ward_admin::domain::{NewRoom, NewUser, RoomDetail, RoomType, User, UserRole};
use ward_admin::infra::Database;
use ward_admin::services::{ServiceContainer, Services};

/// Fresh in-memory database with all migrations applied.
///
/// A single pooled connection keeps the in-memory database alive for the whole test.
pub async fn test_database() -> Arc<Database> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let connection = SeaDatabase::connect(options)
        .await
        .expect("failed to open in-memory sqlite");
    let database = Database::from_connection(connection);
    database
        .run_migrations()
        .await
        .expect("failed to run migrations");

    Arc::new(database)
}

pub async fn test_services() -> Services {
    let database = test_database().await;
    Services::from_connection(database.get_connection())
}

fn email_for(name: &str) -> String {
    format!("{}@example.com", name.to_lowercase().replace(' ', "."))
}

pub async fn create_patient(services: &Services, name: &str) -> User {
    services
        .users()
        .create_user(NewUser {
            name: name.to_string(),
            email: email_for(name),
            role: Some(UserRole::Patient),
            ..Default::default()
        })
        .await
        .expect("failed to create patient")
}

pub async fn create_nurse(services: &Services, name: &str) -> User {
    services
        .users()
        .create_user(NewUser {
            name: name.to_string(),
            email: email_for(name),
            role: Some(UserRole::Nurse),
            staff_id: Some(format!("N-{}", name.len())),
            ..Default::default()
        })
        .await
        .expect("failed to create nurse")
}

pub async fn create_room(services: &Services, room_number: &str, total_beds: i32) -> RoomDetail {
    services
        .rooms()
        .create_room(NewRoom {
            room_number: room_number.to_string(),
            floor: 1,
            room_type: RoomType::Ward,
            total_beds,
            notes: None,
        })
        .await
        .expect("failed to create room")
}
