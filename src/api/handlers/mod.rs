//! HTTP request handlers.

pub mod bed_handler;
pub mod dashboard_handler;
pub mod patient_handler;
pub mod room_handler;
pub mod schedule_handler;
pub mod user_handler;

pub use bed_handler::bed_routes;
pub use dashboard_handler::dashboard_routes;
pub use patient_handler::patient_routes;
pub use room_handler::room_routes;
pub use schedule_handler::schedule_routes;
pub use user_handler::user_routes;
