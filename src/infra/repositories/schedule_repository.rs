//! Nurse schedule repository.

use async_trait::async_trait;
use chrono::NaiveDate;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::{nurse_schedule, ScheduleActiveModel, ScheduleEntity};
use crate::domain::{NewSchedule, NurseSchedule, ScheduleFilter, SchedulePatch, ScheduleStatus, Shift};
use crate::errors::{AppError, AppResult};

/// Schedule repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<NurseSchedule>>;

    /// Schedules within the inclusive date range, ordered by date then shift
    async fn list(&self, filter: ScheduleFilter) -> AppResult<Vec<NurseSchedule>>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM implementation of ScheduleRepository
pub struct ScheduleStore {
    db: DatabaseConnection,
}

impl ScheduleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScheduleRepository for ScheduleStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<NurseSchedule>> {
        let model = ScheduleEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(NurseSchedule::from))
    }

    async fn list(&self, filter: ScheduleFilter) -> AppResult<Vec<NurseSchedule>> {
        let mut query = ScheduleEntity::find()
            .filter(nurse_schedule::Column::Date.between(filter.from, filter.to));
        if let Some(nurse_id) = filter.nurse_id {
            query = query.filter(nurse_schedule::Column::NurseId.eq(nurse_id));
        }

        let models = query
            .order_by_asc(nurse_schedule::Column::Date)
            .all(&self.db)
            .await?;

        // Shifts are stored as text, so day order is restored here
        let mut schedules: Vec<NurseSchedule> =
            models.into_iter().map(NurseSchedule::from).collect();
        schedules.sort_by_key(|s| (s.date, s.shift));

        Ok(schedules)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = ScheduleEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

/// Insert a new schedule in `scheduled` status.
pub(crate) async fn insert_schedule<C>(db: &C, schedule: NewSchedule) -> AppResult<NurseSchedule>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now();
    let active_model = ScheduleActiveModel {
        id: Set(Uuid::new_v4()),
        nurse_id: Set(schedule.nurse_id),
        room_id: Set(schedule.room_id),
        shift: Set(schedule.shift.as_str().to_string()),
        date: Set(schedule.date),
        status: Set(ScheduleStatus::Scheduled.as_str().to_string()),
        notes: Set(schedule.notes),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = active_model.insert(db).await?;
    Ok(NurseSchedule::from(model))
}

/// Apply the present fields of `patch`; an empty `notes` clears them.
pub(crate) async fn patch_schedule<C>(
    db: &C,
    id: Uuid,
    patch: SchedulePatch,
) -> AppResult<NurseSchedule>
where
    C: ConnectionTrait,
{
    let model = ScheduleEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ScheduleActiveModel = model.into();

    if let Some(room_id) = patch.room_id {
        active.room_id = Set(room_id);
    }
    if let Some(shift) = patch.shift {
        active.shift = Set(shift.as_str().to_string());
    }
    if let Some(date) = patch.date {
        active.date = Set(date);
    }
    if let Some(status) = patch.status {
        active.status = Set(status.as_str().to_string());
    }
    if let Some(notes) = patch.notes {
        active.notes = Set((!notes.is_empty()).then_some(notes));
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(db).await?;
    Ok(NurseSchedule::from(model))
}

/// Whether the nurse already holds a non-cancelled schedule for that
/// date and shift, ignoring `exclude`.
pub(crate) async fn nurse_booked<C>(
    db: &C,
    nurse_id: Uuid,
    date: NaiveDate,
    shift: Shift,
    exclude: Option<Uuid>,
) -> AppResult<bool>
where
    C: ConnectionTrait,
{
    let mut query = ScheduleEntity::find()
        .filter(nurse_schedule::Column::NurseId.eq(nurse_id))
        .filter(nurse_schedule::Column::Date.eq(date))
        .filter(nurse_schedule::Column::Shift.eq(shift.as_str()))
        .filter(nurse_schedule::Column::Status.ne(ScheduleStatus::Cancelled.as_str()));
    if let Some(exclude) = exclude {
        query = query.filter(nurse_schedule::Column::Id.ne(exclude));
    }

    Ok(query.count(db).await? > 0)
}
