//! Unit of Work pattern implementation.
//!
//! SOLID (SRP): Manages transaction lifecycle and repository access.
//! DDD: Coordinates operations across the room, bed and user aggregates atomically.
//!
//! The Unit of Work pattern:
//! - Centralizes access to all repositories
//! - Manages database transactions (begin, commit, rollback)
//! - Keeps multi-row bed mutations all-or-nothing

use std::ops::RangeInclusive;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::repositories::entities::{
    bed, nurse_schedule, room, BedActiveModel, BedEntity, RoomActiveModel, RoomEntity,
    ScheduleEntity, UserEntity,
};
use super::repositories::{
    insert_schedule, load_room_details, nurse_booked, patch_schedule, PatientRepository,
    PatientStore, RoomRepository, RoomStore, ScheduleRepository, ScheduleStore, UserRepository,
    UserStore,
};
use crate::domain::{
    Bed, BedState, BedStatus, NewRoom, NewSchedule, NurseSchedule, Room, RoomDetail, RoomPatch,
    SchedulePatch, Shift, User,
};
use crate::errors::{AppError, AppResult};

/// Boxed closure body run inside a transaction.
pub type TxFuture<'a, T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction management.
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, implement it over mocked repositories or use integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get room repository
    fn rooms(&self) -> Arc<dyn RoomRepository>;

    /// Get patient repository
    fn patients(&self) -> Arc<dyn PatientRepository>;

    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get nurse schedule repository
    fn schedules(&self) -> Arc<dyn ScheduleRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled back on error.
    /// Uses ReadCommitted isolation level by default.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;

    /// Execute a closure within a transaction with serializable isolation.
    ///
    /// Patient assignment, transfer and shift booking run here so two
    /// admins cannot hand out the same bed or double-book a nurse.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction. The context borrows the transaction
/// to ensure proper lifetime management.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn rooms(&self) -> TxRoomRepository<'_> {
        TxRoomRepository { txn: self.txn }
    }

    pub fn beds(&self) -> TxBedRepository<'_> {
        TxBedRepository { txn: self.txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    pub fn schedules(&self) -> TxScheduleRepository<'_> {
        TxScheduleRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    room_repo: Arc<RoomStore>,
    patient_repo: Arc<PatientStore>,
    user_repo: Arc<UserStore>,
    schedule_repo: Arc<ScheduleStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            room_repo: Arc::new(RoomStore::new(db.clone())),
            patient_repo: Arc::new(PatientStore::new(db.clone())),
            user_repo: Arc::new(UserStore::new(db.clone())),
            schedule_repo: Arc::new(ScheduleStore::new(db.clone())),
            db,
        }
    }

    /// Internal transaction execution with configurable isolation level
    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn rooms(&self) -> Arc<dyn RoomRepository> {
        self.room_repo.clone()
    }

    fn patients(&self) -> Arc<dyn PatientRepository> {
        self.patient_repo.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn schedules(&self) -> Arc<dyn ScheduleRepository> {
        self.schedule_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}

/// Transaction-aware room repository.
pub struct TxRoomRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxRoomRepository<'a> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>> {
        let model = RoomEntity::find_by_id(id).one(self.txn).await?;
        Ok(model.map(Room::from))
    }

    /// Room with its beds and occupant names, as seen inside the transaction
    pub async fn find_with_beds(&self, id: Uuid) -> AppResult<Option<RoomDetail>> {
        let Some(model) = RoomEntity::find_by_id(id).one(self.txn).await? else {
            return Ok(None);
        };

        Ok(load_room_details(self.txn, vec![model]).await?.pop())
    }

    /// Whether another room already uses `room_number`
    pub async fn number_taken(&self, room_number: &str, except: Option<Uuid>) -> AppResult<bool> {
        let mut query = RoomEntity::find().filter(room::Column::RoomNumber.eq(room_number));
        if let Some(except) = except {
            query = query.filter(room::Column::Id.ne(except));
        }

        Ok(query.count(self.txn).await? > 0)
    }

    /// Insert the room row with no beds; callers add beds and resync the count
    pub async fn create(&self, new_room: NewRoom) -> AppResult<Room> {
        let now = Utc::now();
        let active_model = RoomActiveModel {
            id: Set(Uuid::new_v4()),
            room_number: Set(new_room.room_number),
            floor: Set(new_room.floor),
            room_type: Set(new_room.room_type.as_str().to_string()),
            total_beds: Set(0),
            notes: Set(new_room.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.txn).await?;
        Ok(Room::from(model))
    }

    /// Apply the descriptive fields of `patch`; `total_beds` is left to the resize path
    pub async fn update(&self, id: Uuid, patch: &RoomPatch) -> AppResult<Room> {
        let model = RoomEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: RoomActiveModel = model.into();

        if let Some(room_number) = &patch.room_number {
            active.room_number = Set(room_number.clone());
        }
        if let Some(floor) = patch.floor {
            active.floor = Set(floor);
        }
        if let Some(room_type) = patch.room_type {
            active.room_type = Set(room_type.as_str().to_string());
        }
        if let Some(notes) = &patch.notes {
            active.notes = Set((!notes.is_empty()).then(|| notes.clone()));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(self.txn).await?;
        Ok(Room::from(model))
    }

    /// Set `total_beds` to the number of bed rows the room owns
    pub async fn sync_total_beds(&self, id: Uuid) -> AppResult<Room> {
        let count = BedEntity::find()
            .filter(bed::Column::RoomId.eq(id))
            .count(self.txn)
            .await?;

        let model = RoomEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let total_beds = i32::try_from(count)
            .map_err(|_| AppError::internal(format!("Bed count {} out of range", count)))?;

        let mut active: RoomActiveModel = model.into();
        active.total_beds = Set(total_beds);
        active.updated_at = Set(Utc::now());

        let model = active.update(self.txn).await?;
        Ok(Room::from(model))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = RoomEntity::delete_by_id(id).exec(self.txn).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

/// Transaction-aware bed repository.
pub struct TxBedRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxBedRepository<'a> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Bed>> {
        let model = BedEntity::find_by_id(id).one(self.txn).await?;
        Ok(model.map(Bed::from))
    }

    /// Beds of a room ordered by bed number
    pub async fn list_by_room(&self, room_id: Uuid) -> AppResult<Vec<Bed>> {
        let models = BedEntity::find()
            .filter(bed::Column::RoomId.eq(room_id))
            .order_by_asc(bed::Column::BedNumber)
            .all(self.txn)
            .await?;
        Ok(models.into_iter().map(Bed::from).collect())
    }

    /// The bed a patient currently holds, if any
    pub async fn find_by_patient(&self, patient_id: Uuid) -> AppResult<Option<Bed>> {
        let model = BedEntity::find()
            .filter(bed::Column::PatientId.eq(patient_id))
            .one(self.txn)
            .await?;
        Ok(model.map(Bed::from))
    }

    /// Insert available, empty beds with the given numbers
    pub async fn create_numbered(&self, room_id: Uuid, numbers: RangeInclusive<i32>) -> AppResult<u64> {
        let now = Utc::now();
        let models: Vec<BedActiveModel> = numbers
            .map(|bed_number| BedActiveModel {
                id: Set(Uuid::new_v4()),
                room_id: Set(room_id),
                bed_number: Set(bed_number),
                status: Set(BedStatus::Available.as_str().to_string()),
                patient_id: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .collect();

        if models.is_empty() {
            return Ok(0);
        }

        let inserted = models.len() as u64;
        BedEntity::insert_many(models)
            .exec_without_returning(self.txn)
            .await?;

        Ok(inserted)
    }

    /// Persist a state produced by the bed status rules
    pub async fn save_state(&self, id: Uuid, state: BedState) -> AppResult<Bed> {
        let model = BedEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: BedActiveModel = model.into();
        active.status = Set(state.status.as_str().to_string());
        active.patient_id = Set(state.occupant);
        active.updated_at = Set(Utc::now());

        let model = active.update(self.txn).await?;
        Ok(Bed::from(model))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = BedEntity::delete_by_id(id).exec(self.txn).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    pub async fn delete_many(&self, ids: Vec<Uuid>) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = BedEntity::delete_many()
            .filter(bed::Column::Id.is_in(ids))
            .exec(self.txn)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_room(&self, room_id: Uuid) -> AppResult<u64> {
        let result = BedEntity::delete_many()
            .filter(bed::Column::RoomId.eq(room_id))
            .exec(self.txn)
            .await?;
        Ok(result.rows_affected)
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let model = UserEntity::find_by_id(id).one(self.txn).await?;
        Ok(model.map(User::from))
    }
}

/// Transaction-aware nurse schedule repository.
pub struct TxScheduleRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxScheduleRepository<'a> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<NurseSchedule>> {
        let model = ScheduleEntity::find_by_id(id).one(self.txn).await?;
        Ok(model.map(NurseSchedule::from))
    }

    pub async fn is_booked(
        &self,
        nurse_id: Uuid,
        date: NaiveDate,
        shift: Shift,
        exclude: Option<Uuid>,
    ) -> AppResult<bool> {
        nurse_booked(self.txn, nurse_id, date, shift, exclude).await
    }

    pub async fn create(&self, schedule: NewSchedule) -> AppResult<NurseSchedule> {
        insert_schedule(self.txn, schedule).await
    }

    pub async fn update(&self, id: Uuid, patch: SchedulePatch) -> AppResult<NurseSchedule> {
        patch_schedule(self.txn, id, patch).await
    }

    pub async fn delete_by_room(&self, room_id: Uuid) -> AppResult<u64> {
        let result = ScheduleEntity::delete_many()
            .filter(nurse_schedule::Column::RoomId.eq(room_id))
            .exec(self.txn)
            .await?;
        Ok(result.rows_affected)
    }
}

