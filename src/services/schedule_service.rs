//! Nurse schedule service - Shift calendar.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    NewSchedule, NurseSchedule, ScheduleFilter, SchedulePatch, ScheduleStatus, Shift,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{TransactionContext, UnitOfWork};

/// Schedule service trait for dependency injection.
#[async_trait]
pub trait ScheduleService: Send + Sync {
    /// Book a nurse into a room for one shift
    async fn create_schedule(&self, schedule: NewSchedule) -> AppResult<NurseSchedule>;

    /// Schedules in the inclusive date range, ordered by date then shift
    async fn list_schedules(&self, filter: ScheduleFilter) -> AppResult<Vec<NurseSchedule>>;

    async fn update_schedule(&self, id: Uuid, patch: SchedulePatch) -> AppResult<NurseSchedule>;

    async fn delete_schedule(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ScheduleService using Unit of Work.
pub struct ScheduleManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ScheduleManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_nurse(&self, nurse_id: Uuid) -> AppResult<()> {
        let user = self.uow.users().find_by_id(nurse_id).await?.ok_or_not_found()?;
        if !user.is_nurse() {
            return Err(AppError::validation("Selected user is not a nurse"));
        }
        Ok(())
    }

    async fn ensure_room(&self, room_id: Uuid) -> AppResult<()> {
        self.uow.rooms().find_by_id(room_id).await?.ok_or_not_found()?;
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> ScheduleService for ScheduleManager<U> {
    async fn create_schedule(&self, schedule: NewSchedule) -> AppResult<NurseSchedule> {
        self.ensure_nurse(schedule.nurse_id).await?;
        self.ensure_room(schedule.room_id).await?;

        let created = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    ensure_free(&ctx, schedule.nurse_id, schedule.date, schedule.shift, None)
                        .await?;
                    ctx.schedules().create(schedule).await
                })
            })
            .await?;

        tracing::info!(
            schedule_id = %created.id,
            nurse_id = %created.nurse_id,
            date = %created.date,
            shift = created.shift.as_str(),
            "Nurse scheduled"
        );

        Ok(created)
    }

    async fn list_schedules(&self, filter: ScheduleFilter) -> AppResult<Vec<NurseSchedule>> {
        if filter.from > filter.to {
            return Err(AppError::validation("Start date must not be after end date"));
        }
        self.uow.schedules().list(filter).await
    }

    async fn update_schedule(&self, id: Uuid, patch: SchedulePatch) -> AppResult<NurseSchedule> {
        if let Some(room_id) = patch.room_id {
            self.ensure_room(room_id).await?;
        }

        let updated = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    let current = ctx.schedules().find_by_id(id).await?.ok_or_not_found()?;

                    let touches_slot =
                        patch.date.is_some() || patch.shift.is_some() || patch.status.is_some();
                    let status = patch.status.unwrap_or(current.status);
                    if touches_slot && status != ScheduleStatus::Cancelled {
                        ensure_free(
                            &ctx,
                            current.nurse_id,
                            patch.date.unwrap_or(current.date),
                            patch.shift.unwrap_or(current.shift),
                            Some(id),
                        )
                        .await?;
                    }

                    ctx.schedules().update(id, patch).await
                })
            })
            .await?;

        tracing::info!(schedule_id = %id, status = updated.status.as_str(), "Schedule updated");

        Ok(updated)
    }

    async fn delete_schedule(&self, id: Uuid) -> AppResult<()> {
        self.uow.schedules().delete(id).await?;
        tracing::info!(schedule_id = %id, "Schedule deleted");
        Ok(())
    }
}

/// Reject the slot when the nurse already holds it.
async fn ensure_free(
    ctx: &TransactionContext<'_>,
    nurse_id: Uuid,
    date: NaiveDate,
    shift: Shift,
    exclude: Option<Uuid>,
) -> AppResult<()> {
    if ctx.schedules().is_booked(nurse_id, date, shift, exclude).await? {
        return Err(AppError::conflict(format!(
            "Nurse is already scheduled for the {} shift on {}",
            shift.as_str(),
            date
        )));
    }
    Ok(())
}
