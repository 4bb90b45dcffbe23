//! Ward Admin - Hospital ward administration API
//!
//! Rooms and their beds, patient lookup for bed assignment, and the nurse
//! shift calendar, served over HTTP with Axum and persisted with SeaORM.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Ward entities and the bed status rules
//! - **services**: Use cases (rooms and beds, patients, users, schedules, dashboard)
//! - **infra**: Database, migrations, repositories and the unit of work
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared response types (envelope, pagination)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve --port 3000
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Bed, BedStatus, Room, User, UserRole};
pub use errors::{AppError, AppResult};
pub use infra::Database;
