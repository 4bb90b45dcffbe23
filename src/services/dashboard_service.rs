//! Dashboard service - Ward occupancy and staffing counters.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use super::container::parallel;
use crate::domain::{Occupancy, UserRole};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Counters shown on the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub rooms: u64,
    pub total_beds: u64,
    pub available_beds: u64,
    pub occupied_beds: u64,
    pub maintenance_beds: u64,
    pub patients: u64,
    pub nurses: u64,
}

impl DashboardSummary {
    fn new(occupancy: Occupancy, patients: u64, nurses: u64) -> Self {
        Self {
            rooms: occupancy.rooms,
            total_beds: occupancy.total_beds,
            available_beds: occupancy.available_beds,
            occupied_beds: occupancy.occupied_beds,
            maintenance_beds: occupancy.maintenance_beds,
            patients,
            nurses,
        }
    }
}

/// Dashboard service trait for dependency injection.
#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn summary(&self) -> AppResult<DashboardSummary>;
}

/// Concrete implementation of DashboardService using Unit of Work.
pub struct DashboardReporter<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DashboardReporter<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DashboardService for DashboardReporter<U> {
    async fn summary(&self) -> AppResult<DashboardSummary> {
        let rooms = self.uow.rooms();
        let patients = self.uow.patients();
        let users = self.uow.users();

        let (occupancy, patient_count, nurse_count) = parallel::join3(
            rooms.occupancy(),
            patients.count(),
            users.count_by_role(UserRole::Nurse),
        )
        .await?;

        Ok(DashboardSummary::new(occupancy, patient_count, nurse_count))
    }
}
